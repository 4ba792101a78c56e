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

//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vantage_core::fmt::UnitSuffixes;

/// Color prefixes prepended to tick-rate output by the `colored` argument
/// forms. Carried as opaque strings; the host decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TpsColors {
    /// Prefix for tick rates at or below the medium threshold.
    pub low: String,
    /// Prefix for tick rates above 16.0.
    pub medium: String,
    /// Prefix for tick rates above 18.0.
    pub high: String,
}

impl Default for TpsColors {
    fn default() -> Self {
        Self {
            low: "&c".to_owned(),
            medium: "&e".to_owned(),
            high: "&a".to_owned(),
        }
    }
}

/// Full engine configuration with host-facing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Display name served by the `name` placeholder.
    pub server_name: String,
    /// Text returned for placeholders the registry does not recognize.
    pub unknown_text: String,
    /// Text returned when a recognized placeholder fails to compute.
    /// Must stay distinguishable from `unknown_text`.
    pub error_text: String,
    /// Text returned while a cached metric has no sample yet. Never empty.
    pub pending_text: String,
    /// Color prefixes for the `tps ... colored` forms.
    pub tps_colors: TpsColors,
    /// Unit suffixes for compact duration formatting.
    pub time_suffixes: UnitSuffixes,
    /// Refresh period for the tick-rate sample, in seconds.
    pub tps_refresh_secs: u64,
    /// Refresh period for the CPU-load sample, in seconds.
    pub cpu_refresh_secs: u64,
    /// Refresh period for the world-aggregate samples (chunks, entities),
    /// in seconds.
    pub world_totals_refresh_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_name: "A Minecraft Server".to_owned(),
            unknown_text: "<unknown placeholder>".to_owned(),
            error_text: "<placeholder error>".to_owned(),
            pending_text: "...".to_owned(),
            tps_colors: TpsColors::default(),
            time_suffixes: UnitSuffixes::default(),
            tps_refresh_secs: 1,
            cpu_refresh_secs: 1,
            world_totals_refresh_secs: 60,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from its JSON representation. Missing fields
    /// take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Refresh period for the tick-rate sample.
    pub fn tps_refresh(&self) -> Duration {
        Duration::from_secs(self.tps_refresh_secs)
    }

    /// Refresh period for the CPU-load sample.
    pub fn cpu_refresh(&self) -> Duration {
        Duration::from_secs(self.cpu_refresh_secs)
    }

    /// Refresh period for world-aggregate samples.
    pub fn world_totals_refresh(&self) -> Duration {
        Duration::from_secs(self.world_totals_refresh_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete_and_distinct() {
        let config = EngineConfig::default();
        assert_eq!(config.server_name, "A Minecraft Server");
        assert_ne!(config.unknown_text, config.error_text);
        assert!(!config.pending_text.is_empty());
        assert_eq!(config.world_totals_refresh_secs, 60);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            EngineConfig::from_json(r#"{"server_name": "Test", "tps_refresh_secs": 5}"#).unwrap();
        assert_eq!(config.server_name, "Test");
        assert_eq!(config.tps_refresh_secs, 5);
        assert_eq!(config.tps_colors, TpsColors::default());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(EngineConfig::from_json("not json").is_err());
    }
}
