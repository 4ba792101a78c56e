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

//! Narrow read-only contracts between the resolution engine and the host
//! environment.
//!
//! The engine never reads OS counters or game state directly. It depends on
//! these traits and treats the implementations as black boxes: repeated calls
//! are idempotent, order-independent, and free of engine-visible side
//! effects. Anything expensive behind these traits is routed through the
//! sampling cache rather than called on the resolution hot path.

use crate::error::SourceResult;
use std::fmt::Debug;
use std::time::Duration;

/// Tick-rate averages over the host's three standard windows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TpsWindow {
    /// Average ticks per second over the last minute.
    pub one_min: f64,
    /// Average over the last five minutes.
    pub five_min: f64,
    /// Average over the last fifteen minutes.
    pub fifteen_min: f64,
}

/// A snapshot of process memory, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    /// Bytes currently in use by the process.
    pub used: u64,
    /// Bytes allocated to the process but not in use.
    pub free: u64,
    /// Bytes currently allocated to the process.
    pub total: u64,
    /// Upper bound the process may grow to, if one is enforced.
    pub max: Option<u64>,
}

/// Per-world population and load counters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorldInfo {
    /// World name, in its original casing.
    pub name: String,
    /// Players currently in this world.
    pub players: u64,
    /// Chunks currently loaded.
    pub chunks: u64,
    /// All entities, living or not.
    pub entities: u64,
    /// Living entities only.
    pub living_entities: u64,
}

/// Read-only view of process-level runtime counters.
///
/// Implemented by `vantage-infra` on top of `sysinfo`; tests substitute
/// deterministic fakes.
pub trait SystemMonitor: Send + Sync + Debug + 'static {
    /// Current process memory snapshot.
    fn memory_usage(&self) -> SourceResult<MemoryUsage>;

    /// Global CPU load as a fraction in `0.0..=1.0`.
    ///
    /// Meaningful values may require a warm-up sample; implementations
    /// return their best current estimate rather than blocking.
    fn cpu_load(&self) -> SourceResult<f64>;

    /// Time since the monitored process started.
    fn process_uptime(&self) -> SourceResult<Duration>;
}

/// Read-only view of game-server state.
///
/// Supplied by the hosting environment; the engine never constructs one.
pub trait GameState: Send + Sync + Debug + 'static {
    /// Tick-rate averages for the 1/5/15-minute windows.
    fn tick_rate_window(&self) -> SourceResult<TpsWindow>;

    /// Players currently online across all worlds.
    fn online_player_count(&self) -> SourceResult<u64>;

    /// Configured player cap.
    fn max_players(&self) -> SourceResult<u64>;

    /// Distinct players that have ever joined.
    fn unique_joins(&self) -> SourceResult<u64>;

    /// Whether the whitelist is enabled.
    fn has_whitelist(&self) -> SourceResult<bool>;

    /// Host software version string.
    fn version(&self) -> SourceResult<String>;

    /// Host build identifier.
    fn build(&self) -> SourceResult<String>;

    /// Host software variant name (e.g. the fork in use).
    fn variant(&self) -> SourceResult<String>;

    /// All loaded worlds with their counters.
    fn world_list(&self) -> SourceResult<Vec<WorldInfo>>;

    /// Names of installed plugins.
    fn plugin_list(&self) -> SourceResult<Vec<String>>;
}
