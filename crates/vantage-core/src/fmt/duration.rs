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

//! Duration-to-text formatting.

use serde::{Deserialize, Serialize};

/// Unit suffixes for the compact duration style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSuffixes {
    /// Suffix appended to the week component.
    pub week: String,
    /// Suffix appended to the day component.
    pub day: String,
    /// Suffix appended to the hour component.
    pub hour: String,
    /// Suffix appended to the minute component.
    pub minute: String,
    /// Suffix appended to the second component.
    pub second: String,
}

impl Default for UnitSuffixes {
    fn default() -> Self {
        Self {
            week: "w".to_owned(),
            day: "d".to_owned(),
            hour: "h".to_owned(),
            minute: "m".to_owned(),
            second: "s".to_owned(),
        }
    }
}

/// How a duration should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// `1w 2d 3h 4m 5s`, zero components skipped.
    #[default]
    Compact,
    /// `1 week, 2 days, 3 hours, 4 minutes, 5 seconds`.
    Long,
}

impl DurationStyle {
    /// Parses a style hint. Unknown or missing hints fall back to
    /// [`DurationStyle::Compact`].
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some(h) if h.eq_ignore_ascii_case("long") => DurationStyle::Long,
            _ => DurationStyle::Compact,
        }
    }
}

const UNIT_NAMES: [(&str, &str); 5] = [
    ("week", "weeks"),
    ("day", "days"),
    ("hour", "hours"),
    ("minute", "minutes"),
    ("second", "seconds"),
];

/// Formats a duration given in seconds.
///
/// Negative inputs are clamped to zero. A zero duration renders as `0` plus
/// the second suffix (compact) or `0 seconds` (long).
pub fn format_duration(seconds: i64, style: DurationStyle, suffixes: &UnitSuffixes) -> String {
    let total = seconds.max(0) as u64;
    let components = split_units(total);

    match style {
        DurationStyle::Compact => {
            let suffix_table = [
                suffixes.week.as_str(),
                suffixes.day.as_str(),
                suffixes.hour.as_str(),
                suffixes.minute.as_str(),
                suffixes.second.as_str(),
            ];
            let parts: Vec<String> = components
                .iter()
                .zip(suffix_table)
                .filter(|((_, value), _)| *value > 0)
                .map(|((_, value), suffix)| format!("{value}{suffix}"))
                .collect();
            if parts.is_empty() {
                format!("0{}", suffixes.second)
            } else {
                parts.join(" ")
            }
        }
        DurationStyle::Long => {
            let parts: Vec<String> = components
                .iter()
                .filter(|(_, value)| *value > 0)
                .map(|(unit, value)| {
                    let (singular, plural) = UNIT_NAMES[*unit];
                    let name = if *value == 1 { singular } else { plural };
                    format!("{value} {name}")
                })
                .collect();
            if parts.is_empty() {
                "0 seconds".to_owned()
            } else {
                parts.join(", ")
            }
        }
    }
}

/// Splits seconds into (unit index, value) pairs, largest unit first.
fn split_units(total: u64) -> [(usize, u64); 5] {
    let seconds = total % 60;
    let minutes = (total / 60) % 60;
    let hours = (total / 3600) % 24;
    let days = (total / 86400) % 7;
    let weeks = total / 604800;
    [
        (0, weeks),
        (1, days),
        (2, hours),
        (3, minutes),
        (4, seconds),
    ]
}
