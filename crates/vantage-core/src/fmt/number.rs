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

//! Numeric formatting: percentages and fixed-precision decimals.

/// Widest precision a format hint may request.
const MAX_DECIMALS: usize = 6;

/// Formats a ratio in `0.0..=1.0` as an integer percentage (`"85%"`).
///
/// Out-of-range ratios are clamped to the `0%`..`100%` bounds; NaN renders
/// as `0%`.
pub fn format_percent(ratio: f64) -> String {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio };
    let percent = (ratio * 100.0).round().clamp(0.0, 100.0);
    format!("{percent:.0}%")
}

/// Formats a value with exactly `places` decimal places.
///
/// Precision is capped at six places; requests beyond that are clamped
/// rather than rejected.
pub fn format_decimals(value: f64, places: usize) -> String {
    let places = places.min(MAX_DECIMALS);
    format!("{value:.places$}")
}

/// Parses a decimal-precision hint, falling back to `default` when the hint
/// is missing or not a number.
pub fn precision_from_hint(hint: Option<&str>, default: usize) -> usize {
    hint.and_then(|h| h.parse::<usize>().ok())
        .unwrap_or(default)
        .min(MAX_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(format_percent(0.85), "85%");
        assert_eq!(format_percent(0.856), "86%");
        assert_eq!(format_percent(1.5), "100%");
        assert_eq!(format_percent(-0.2), "0%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn decimals_fixed_precision() {
        assert_eq!(format_decimals(19.966_6, 2), "19.97");
        assert_eq!(format_decimals(20.0, 0), "20");
        assert_eq!(format_decimals(1.0, 12), "1.000000");
    }

    #[test]
    fn precision_hint_fallback() {
        assert_eq!(precision_from_hint(Some("3"), 2), 3);
        assert_eq!(precision_from_hint(Some("abc"), 2), 2);
        assert_eq!(precision_from_hint(None, 2), 2);
        assert_eq!(precision_from_hint(Some("40"), 2), 6);
    }
}
