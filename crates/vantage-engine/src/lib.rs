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

//! # Vantage Engine
//!
//! Placeholder resolution engine for live server metrics: a parser and
//! frozen handler registry map user-composed identifier strings to metric
//! providers, a background-refreshed sampling cache shields expensive
//! measurements from per-call recomputation, and a dispatcher turns every
//! input into a defined text result.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vantage_engine::{EngineBuilder, EngineConfig};
//! # fn sources() -> (Arc<dyn vantage_core::SystemMonitor>, Arc<dyn vantage_core::GameState>) { unimplemented!() }
//!
//! let (system, game) = sources();
//! let mut engine = EngineBuilder::new(EngineConfig::default(), system, game)
//!     .build()
//!     .expect("duplicate handler key");
//! engine.start();
//! assert_ne!(engine.resolve("uptime"), engine.config().unknown_text);
//! engine.stop();
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod dispatcher;
mod handlers;
pub mod parser;
pub mod registry;
pub mod scheduler;

pub use cache::{SamplingCache, SamplingCacheBuilder};
pub use config::{EngineConfig, TpsColors};
pub use dispatcher::{Engine, EngineBuilder};
pub use parser::{parse, ParsedPlaceholder, PlaceholderRequest};
pub use registry::{HandlerRegistry, RegistryBuilder};
pub use scheduler::RefreshScheduler;
