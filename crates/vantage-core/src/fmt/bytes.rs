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

//! Byte-count-to-text formatting.

/// Base used when scaling byte counts into larger units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitBase {
    /// Powers of 1024: KiB, MiB, GiB, ...
    #[default]
    Binary,
    /// Powers of 1000: kB, MB, GB, ...
    Decimal,
}

impl UnitBase {
    /// Parses a base hint. Unknown or missing hints fall back to
    /// [`UnitBase::Binary`].
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some(h) if h.eq_ignore_ascii_case("decimal") => UnitBase::Decimal,
            _ => UnitBase::Binary,
        }
    }

    fn step(self) -> f64 {
        match self {
            UnitBase::Binary => 1024.0,
            UnitBase::Decimal => 1000.0,
        }
    }

    fn units(self) -> [&'static str; 6] {
        match self {
            UnitBase::Binary => ["B", "KiB", "MiB", "GiB", "TiB", "PiB"],
            UnitBase::Decimal => ["B", "kB", "MB", "GB", "TB", "PB"],
        }
    }
}

/// Formats a byte count as text.
///
/// Counts below one scaling step render as whole bytes (`1023 B`); larger
/// counts render with one decimal place in the largest unit that keeps the
/// value at or above 1.0 (`1.0 KiB`). Negative inputs pass through as a
/// `-`-prefixed formatted magnitude.
pub fn format_bytes(bytes: i64, base: UnitBase) -> String {
    if bytes < 0 {
        return format!("-{}", format_bytes(bytes.saturating_abs(), base));
    }

    let step = base.step();
    let units = base.units();

    if (bytes as f64) < step {
        return format!("{bytes} {}", units[0]);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= step && unit < units.len() - 1 {
        value /= step;
        unit += 1;
    }
    format!("{value:.1} {}", units[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_boundaries() {
        assert_eq!(format_bytes(0, UnitBase::Binary), "0 B");
        assert_eq!(format_bytes(1023, UnitBase::Binary), "1023 B");
        assert_eq!(format_bytes(1024, UnitBase::Binary), "1.0 KiB");
        assert_eq!(format_bytes(1536, UnitBase::Binary), "1.5 KiB");
        assert_eq!(format_bytes(1024 * 1024, UnitBase::Binary), "1.0 MiB");
    }

    #[test]
    fn decimal_boundaries() {
        assert_eq!(format_bytes(999, UnitBase::Decimal), "999 B");
        assert_eq!(format_bytes(1000, UnitBase::Decimal), "1.0 kB");
        assert_eq!(format_bytes(2_500_000, UnitBase::Decimal), "2.5 MB");
    }

    #[test]
    fn negative_passes_through_with_sign() {
        assert_eq!(format_bytes(-2048, UnitBase::Binary), "-2.0 KiB");
    }

    #[test]
    fn base_hint_parsing() {
        assert_eq!(UnitBase::from_hint(Some("decimal")), UnitBase::Decimal);
        assert_eq!(UnitBase::from_hint(Some("binary")), UnitBase::Binary);
        assert_eq!(UnitBase::from_hint(Some("nonsense")), UnitBase::Binary);
        assert_eq!(UnitBase::from_hint(None), UnitBase::Binary);
    }
}
