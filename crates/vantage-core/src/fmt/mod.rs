// Copyright 2025 the vantage authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pure value-to-text formatters.
//!
//! No shared state: every function here maps a raw numeric or temporal value
//! plus an explicit format choice to text. Invalid or missing format hints
//! fall back to documented defaults instead of failing.

pub mod bytes;
pub mod duration;
pub mod number;

pub use bytes::{format_bytes, UnitBase};
pub use duration::{format_duration, DurationStyle, UnitSuffixes};
pub use number::{format_decimals, format_percent};
