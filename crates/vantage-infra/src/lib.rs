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

//! # Vantage Infra
//!
//! Concrete metric-source implementations for the vantage placeholder
//! engine. Currently: a `sysinfo`-backed [`SystemMonitor`] implementation.
//! Game-side sources ([`vantage_core::GameState`]) are supplied by the
//! hosting environment.
//!
//! [`SystemMonitor`]: vantage_core::SystemMonitor

#![warn(missing_docs)]

pub mod sysinfo_monitor;

pub use sysinfo_monitor::SysinfoMonitor;
