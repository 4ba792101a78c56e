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

//! # Vantage Core
//!
//! Foundational crate for the vantage placeholder engine: the error
//! taxonomy, the narrow source contracts the engine reads metrics through,
//! the sample types published by the sampling cache, and the pure formatter
//! library.

#![warn(missing_docs)]

pub mod error;
pub mod fmt;
pub mod sample;
pub mod source;

pub use error::{
    ConfigError, LookupError, ParseError, ResolutionError, ResolutionResult, SourceError,
    SourceResult,
};
pub use sample::{Sample, SampleValue};
pub use source::{GameState, MemoryUsage, SystemMonitor, TpsWindow, WorldInfo};
