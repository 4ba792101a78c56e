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

//! Value types published by the sampling cache.

use crate::source::TpsWindow;
use std::time::Instant;

/// A single captured metric value.
///
/// Kept as a small closed enum so samples stay `Copy`-cheap to clone and the
/// cache can publish them behind an atomic pointer swap without caring what
/// metric they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    /// A monotonic or gauge-like integer count.
    Counter(u64),
    /// A floating-point measurement.
    Gauge(f64),
    /// A full tick-rate window.
    Tps(TpsWindow),
}

impl SampleValue {
    /// Returns the value as `u64` if it is a counter.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            SampleValue::Counter(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it is a counter or gauge.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SampleValue::Counter(v) => Some(*v as f64),
            SampleValue::Gauge(v) => Some(*v),
            SampleValue::Tps(_) => None,
        }
    }

    /// Returns the tick-rate window if this is a tps sample.
    pub fn as_tps(&self) -> Option<TpsWindow> {
        match self {
            SampleValue::Tps(w) => Some(*w),
            _ => None,
        }
    }
}

/// The state of one cached metric as seen by readers.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// No refresh cycle has completed yet. Dispatchers map this to a
    /// defined "not yet available" text, never to an empty string.
    Pending,
    /// The most recently captured value.
    Ready {
        /// The captured value.
        value: SampleValue,
        /// When the refresh that produced it completed.
        captured_at: Instant,
    },
}

impl Sample {
    /// Convenience constructor stamping the capture time as now.
    pub fn ready_now(value: SampleValue) -> Self {
        Sample::Ready {
            value,
            captured_at: Instant::now(),
        }
    }

    /// Returns the captured value, if any.
    pub fn value(&self) -> Option<&SampleValue> {
        match self {
            Sample::Pending => None,
            Sample::Ready { value, .. } => Some(value),
        }
    }
}
