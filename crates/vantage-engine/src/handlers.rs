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

//! The standard placeholder handler set.
//!
//! Cheap metrics (player counts, version strings, world lists) read their
//! source directly. Expensive or periodically meaningful metrics (tick
//! rate, CPU load, world aggregates) go through the sampling cache; their
//! handlers map a still-pending sample to the configured pending text.

use crate::cache::{SamplingCache, SamplingCacheBuilder};
use crate::config::{EngineConfig, TpsColors};
use crate::registry::RegistryBuilder;
use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use std::sync::Arc;
use vantage_core::fmt::{
    format_bytes, format_decimals, format_duration, format_percent, DurationStyle, UnitBase,
};
use vantage_core::fmt::number::precision_from_hint;
use vantage_core::{
    ConfigError, GameState, ResolutionError, ResolutionResult, Sample, SampleValue, SystemMonitor,
    TpsWindow,
};

/// Cache id for the tick-rate window sample.
pub const TPS_METRIC: &str = "tps";
/// Cache id for the CPU-load sample.
pub const CPU_METRIC: &str = "cpu";
/// Cache id for the loaded-chunk aggregate.
pub const CHUNKS_METRIC: &str = "total_chunks";
/// Cache id for the all-entity aggregate.
pub const ENTITIES_METRIC: &str = "total_entities";
/// Cache id for the living-entity aggregate.
pub const LIVING_ENTITIES_METRIC: &str = "total_living_entities";

const MIB: u64 = 1_048_576;
const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Registers the cached metrics the standard handler set depends on.
pub(crate) fn build_cache(
    config: &EngineConfig,
    system: &Arc<dyn SystemMonitor>,
    game: &Arc<dyn GameState>,
) -> Result<SamplingCache, ConfigError> {
    let mut builder = SamplingCacheBuilder::new();

    let g = Arc::clone(game);
    builder.register(TPS_METRIC, config.tps_refresh(), move || {
        Ok(SampleValue::Tps(g.tick_rate_window()?))
    })?;

    let s = Arc::clone(system);
    builder.register(CPU_METRIC, config.cpu_refresh(), move || {
        Ok(SampleValue::Gauge(s.cpu_load()?))
    })?;

    let g = Arc::clone(game);
    builder.register(CHUNKS_METRIC, config.world_totals_refresh(), move || {
        let total = g.world_list()?.iter().map(|w| w.chunks).sum();
        Ok(SampleValue::Counter(total))
    })?;

    let g = Arc::clone(game);
    builder.register(ENTITIES_METRIC, config.world_totals_refresh(), move || {
        let total = g.world_list()?.iter().map(|w| w.entities).sum();
        Ok(SampleValue::Counter(total))
    })?;

    let g = Arc::clone(game);
    builder.register(
        LIVING_ENTITIES_METRIC,
        config.world_totals_refresh(),
        move || {
            let total = g.world_list()?.iter().map(|w| w.living_entities).sum();
            Ok(SampleValue::Counter(total))
        },
    )?;

    Ok(builder.build())
}

/// Registers the full standard handler set.
pub(crate) fn register_handlers(
    registry: &mut RegistryBuilder,
    config: &Arc<EngineConfig>,
    system: &Arc<dyn SystemMonitor>,
    game: &Arc<dyn GameState>,
    cache: &Arc<SamplingCache>,
) -> Result<(), ConfigError> {
    // Identity.
    let cfg = Arc::clone(config);
    registry.register("name", move |_| Ok(cfg.server_name.clone()))?;

    let g = Arc::clone(game);
    registry.register("version", move |_| Ok(g.version()?))?;

    let g = Arc::clone(game);
    registry.register("build", move |_| Ok(g.build()?))?;

    let g = Arc::clone(game);
    registry.register("version_full", move |_| {
        Ok(format!("{}-{}", g.version()?, g.build()?))
    })?;

    let g = Arc::clone(game);
    registry.register("variant", move |_| Ok(g.variant()?))?;

    // Players.
    let g = Arc::clone(game);
    registry.register("online", move |args| online(&g, args))?;

    let g = Arc::clone(game);
    registry.register("max_players", move |_| {
        Ok(g.max_players()?.to_string())
    })?;

    let g = Arc::clone(game);
    registry.register("unique_joins", move |_| {
        Ok(g.unique_joins()?.to_string())
    })?;

    let g = Arc::clone(game);
    registry.register("has_whitelist", move |_| {
        Ok(if g.has_whitelist()? { "true" } else { "false" }.to_owned())
    })?;

    // Uptime.
    let s = Arc::clone(system);
    let cfg = Arc::clone(config);
    registry.register("uptime", move |args| {
        let seconds = s.process_uptime()?.as_secs() as i64;
        let style = DurationStyle::from_hint(args.first().map(String::as_str));
        Ok(format_duration(seconds, style, &cfg.time_suffixes))
    })?;

    // Tick rate, via the cache.
    let c = Arc::clone(cache);
    let cfg = Arc::clone(config);
    registry.register("tps", move |args| {
        let window = match cached(&c, TPS_METRIC)? {
            Some(value) => value
                .as_tps()
                .ok_or_else(|| type_mismatch(TPS_METRIC, "tps window"))?,
            None => return Ok(cfg.pending_text.clone()),
        };
        tps(&window, &cfg.tps_colors, args)
    })?;

    // CPU load, via the cache.
    let c = Arc::clone(cache);
    let cfg = Arc::clone(config);
    registry.register("cpu", move |args| {
        let load = match cached(&c, CPU_METRIC)? {
            Some(value) => value
                .as_f64()
                .ok_or_else(|| type_mismatch(CPU_METRIC, "gauge"))?,
            None => return Ok(cfg.pending_text.clone()),
        };
        Ok(match args.first() {
            None => format_percent(load),
            Some(hint) => {
                let places = precision_from_hint(Some(hint), 2);
                format!("{}%", format_decimals(load * 100.0, places))
            }
        })
    })?;

    // Memory.
    let s = Arc::clone(system);
    registry.register("ram", move |args| ram(&s, args))?;

    // World aggregates, via the cache.
    for metric in [CHUNKS_METRIC, ENTITIES_METRIC, LIVING_ENTITIES_METRIC] {
        let c = Arc::clone(cache);
        let cfg = Arc::clone(config);
        registry.register(metric, move |_| {
            Ok(match cached(&c, metric)? {
                Some(value) => value
                    .as_counter()
                    .ok_or_else(|| type_mismatch(metric, "counter"))?
                    .to_string(),
                None => cfg.pending_text.clone(),
            })
        })?;
    }

    // Worlds and plugins.
    let g = Arc::clone(game);
    registry.register("world_count", move |_| {
        Ok(g.world_list()?.len().to_string())
    })?;

    let g = Arc::clone(game);
    registry.register("world_list", move |_| {
        let names: Vec<String> = g.world_list()?.into_iter().map(|w| w.name).collect();
        Ok(names.join(", "))
    })?;

    let g = Arc::clone(game);
    registry.register("plugin_count", move |_| {
        Ok(g.plugin_list()?.len().to_string())
    })?;

    let g = Arc::clone(game);
    registry.register("plugin_list", move |_| Ok(g.plugin_list()?.join(", ")))?;

    // Wall-clock time.
    registry.register("time", move |args| time(args))?;

    Ok(())
}

/// Reads a cached metric, separating "not wired" (a defect) from "not yet
/// sampled" (mapped to the pending text by the caller).
fn cached(cache: &SamplingCache, id: &str) -> Result<Option<SampleValue>, ResolutionError> {
    match cache.read(id) {
        None => Err(ResolutionError::FormatError(format!(
            "cached metric \"{id}\" is not registered"
        ))),
        Some(Sample::Pending) => Ok(None),
        Some(Sample::Ready { value, .. }) => Ok(Some(value)),
    }
}

fn type_mismatch(id: &str, expected: &str) -> ResolutionError {
    ResolutionError::FormatError(format!("cached metric \"{id}\" is not a {expected}"))
}

fn online(game: &Arc<dyn GameState>, args: &[String]) -> ResolutionResult {
    if args.is_empty() {
        return Ok(game.online_player_count()?.to_string());
    }

    // World names may themselves contain underscores; matching is
    // case-sensitive, so args keep their original casing.
    let name = args.join("_");
    let count = game
        .world_list()?
        .into_iter()
        .find(|w| w.name == name)
        .map(|w| w.players)
        .unwrap_or(0);
    Ok(count.to_string())
}

fn ram(system: &Arc<dyn SystemMonitor>, args: &[String]) -> ResolutionResult {
    let usage = system.memory_usage()?;
    let bytes = match args.first().map(String::as_str) {
        Some("used") => usage.used,
        Some("free") => usage.free,
        Some("total") => usage.total,
        Some("max") => usage.max.unwrap_or(usage.total),
        other => {
            return Err(ResolutionError::FormatError(format!(
                "unrecognized ram argument {other:?}"
            )))
        }
    };

    if args.get(1).map(String::as_str) == Some("formatted") {
        let base = UnitBase::from_hint(args.get(2).map(String::as_str));
        Ok(format_bytes(bytes as i64, base))
    } else {
        // Whole mebibytes, like the original expansion's /1048576.
        Ok((bytes / MIB).to_string())
    }
}

fn tps(window: &TpsWindow, colors: &TpsColors, args: &[String]) -> ResolutionResult {
    let all = [window.one_min, window.five_min, window.fifteen_min];

    if args.is_empty() {
        let parts: Vec<String> = all.iter().map(|t| tps_text(*t)).collect();
        return Ok(parts.join(", "));
    }

    if args.len() == 1 && args[0].eq_ignore_ascii_case("percent") {
        let parts: Vec<String> = all.iter().map(|t| tps_percent(*t)).collect();
        return Ok(parts.join(", "));
    }

    let value = match args[0].to_lowercase().as_str() {
        "1" | "one" => window.one_min,
        "5" | "five" => window.five_min,
        "15" | "fifteen" => window.fifteen_min,
        other => {
            return Err(ResolutionError::FormatError(format!(
                "unrecognized tps window \"{other}\""
            )))
        }
    };

    let modifiers: Vec<String> = args[1..].iter().map(|a| a.to_lowercase()).collect();
    let text = match modifiers.iter().map(String::as_str).collect::<Vec<_>>()[..] {
        [] => tps_text(value),
        ["colored"] => format!("{}{}", tps_color(colors, value), tps_text(value)),
        ["percent"] => tps_percent(value),
        ["percent", "colored"] => format!("{}{}", tps_color(colors, value), tps_percent(value)),
        _ => {
            return Err(ResolutionError::FormatError(format!(
                "unrecognized tps arguments {args:?}"
            )))
        }
    };
    Ok(text)
}

/// Rounds to two decimals and clamps at the host's 20.0 tick ceiling.
fn clamp_tps(tps: f64) -> f64 {
    ((tps * 100.0).round() / 100.0).min(20.0)
}

fn tps_text(tps: f64) -> String {
    format_decimals(clamp_tps(tps), 2)
}

fn tps_percent(tps: f64) -> String {
    format_percent(tps / 20.0)
}

fn tps_color(colors: &TpsColors, tps: f64) -> &str {
    if tps > 18.0 {
        &colors.high
    } else if tps > 16.0 {
        &colors.medium
    } else {
        &colors.low
    }
}

fn time(args: &[String]) -> ResolutionResult {
    // Format strings may contain underscores' worth of tokens; rejoin with
    // spaces, as the original expansion did.
    let format = if args.is_empty() {
        DEFAULT_TIME_FORMAT.to_owned()
    } else {
        args.join(" ")
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(&format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ResolutionError::FormatError(format!(
            "invalid time format \"{format}\""
        )));
    }

    Ok(Local::now().format_with_items(items.into_iter()).to_string())
}
