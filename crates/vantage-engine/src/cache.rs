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

//! Sampling cache: periodically refreshed samples for metrics whose cost or
//! accuracy calls for fixed-rate measurement rather than per-resolution
//! recomputation.
//!
//! Each metric owns one [`ArcSwap`] slot. The refresh path builds a complete
//! new [`Sample`] and publishes it with a single pointer swap, so readers
//! always see either the prior sample or the new one, never a torn
//! intermediate. Readers never block, never trigger a recompute, and never
//! coordinate with the writer.
//!
//! A failed refresh keeps the prior sample in place (stale-but-available)
//! and is logged; it must not stop future cycles. Before the first
//! successful refresh, readers see [`Sample::Pending`].

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use vantage_core::{ConfigError, Sample, SampleValue, SourceResult};

/// Provider closure for one cached metric.
pub type SampleProvider = Box<dyn Fn() -> SourceResult<SampleValue> + Send + Sync>;

/// One cached metric: its provider, its refresh period, and the slot its
/// latest sample is published through.
pub struct CachedMetric {
    id: String,
    interval: Duration,
    provider: SampleProvider,
    slot: ArcSwap<Sample>,
}

impl CachedMetric {
    /// The metric's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The configured refresh period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the most recently published sample.
    pub fn load(&self) -> Sample {
        Sample::clone(&self.slot.load())
    }

    /// Runs the provider once and, on success, atomically publishes the new
    /// sample. On failure the previous sample stays in place.
    pub fn refresh(&self) {
        match (self.provider)() {
            Ok(value) => {
                self.slot.store(Arc::new(Sample::Ready {
                    value,
                    captured_at: Instant::now(),
                }));
            }
            Err(e) => {
                log::warn!("refresh of cached metric \"{}\" failed: {e}", self.id);
            }
        }
    }
}

impl std::fmt::Debug for CachedMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedMetric")
            .field("id", &self.id)
            .field("interval", &self.interval)
            .finish()
    }
}

/// Accumulates cached-metric registrations before the cache is frozen.
#[derive(Default)]
pub struct SamplingCacheBuilder {
    metrics: HashMap<String, Arc<CachedMetric>>,
}

impl SamplingCacheBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a metric with its provider and refresh period.
    ///
    /// Duplicate metric ids are a startup configuration defect.
    pub fn register(
        &mut self,
        id: &str,
        interval: Duration,
        provider: impl Fn() -> SourceResult<SampleValue> + Send + Sync + 'static,
    ) -> Result<(), ConfigError> {
        if self.metrics.contains_key(id) {
            return Err(ConfigError::DuplicateKey(id.to_owned()));
        }
        let metric = CachedMetric {
            id: id.to_owned(),
            interval,
            provider: Box::new(provider),
            slot: ArcSwap::from_pointee(Sample::Pending),
        };
        self.metrics.insert(id.to_owned(), Arc::new(metric));
        Ok(())
    }

    /// Freezes the metric set.
    pub fn build(self) -> SamplingCache {
        SamplingCache {
            metrics: self.metrics,
        }
    }
}

/// The frozen set of cached metrics.
///
/// The map itself is immutable after construction; the only mutable state
/// is each metric's sample slot, written by the refresh scheduler and read
/// by any number of resolution calls.
#[derive(Debug, Default)]
pub struct SamplingCache {
    metrics: HashMap<String, Arc<CachedMetric>>,
}

impl SamplingCache {
    /// Returns the latest sample for a metric, or `None` for an id that was
    /// never registered (a programming error in the handler wiring).
    pub fn read(&self, id: &str) -> Option<Sample> {
        self.metrics.get(id).map(|m| m.load())
    }

    /// Synchronously refreshes every registered metric once.
    ///
    /// Used at startup so readers see real values as soon as possible, and
    /// by tests that want deterministic samples without a running scheduler.
    pub fn refresh_all(&self) {
        for metric in self.metrics.values() {
            metric.refresh();
        }
    }

    /// All registered metrics, for the scheduler.
    pub fn metrics(&self) -> impl Iterator<Item = &Arc<CachedMetric>> {
        self.metrics.values()
    }

    /// Number of registered metrics.
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// True when no metrics are registered.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use vantage_core::SourceError;

    fn counter_cache(counter: Arc<AtomicU64>) -> SamplingCache {
        let mut builder = SamplingCacheBuilder::new();
        builder
            .register("hits", Duration::from_millis(10), move || {
                Ok(SampleValue::Counter(counter.fetch_add(1, Ordering::SeqCst)))
            })
            .unwrap();
        builder.build()
    }

    #[test]
    fn pending_before_first_refresh() {
        let cache = counter_cache(Arc::new(AtomicU64::new(0)));
        assert_eq!(cache.read("hits"), Some(Sample::Pending));
        assert_eq!(cache.read("no_such_metric"), None);
    }

    #[test]
    fn read_does_not_recompute() {
        let counter = Arc::new(AtomicU64::new(0));
        let cache = counter_cache(Arc::clone(&counter));
        cache.refresh_all();

        let first = cache.read("hits").unwrap();
        let second = cache.read("hits").unwrap();
        assert_eq!(first, second);
        // Exactly one provider call happened, from refresh_all.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn refresh_advances_the_sample() {
        let cache = counter_cache(Arc::new(AtomicU64::new(0)));
        cache.refresh_all();
        let first = cache.read("hits").unwrap();
        cache.refresh_all();
        let second = cache.read("hits").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn failed_refresh_retains_prior_sample() {
        let fail = Arc::new(AtomicBool::new(false));
        let fail_flag = Arc::clone(&fail);
        let mut builder = SamplingCacheBuilder::new();
        builder
            .register("flaky", Duration::from_millis(10), move || {
                if fail_flag.load(Ordering::SeqCst) {
                    Err(SourceError::new("backend down"))
                } else {
                    Ok(SampleValue::Gauge(7.0))
                }
            })
            .unwrap();
        let cache = builder.build();

        cache.refresh_all();
        let good = cache.read("flaky").unwrap();
        assert_eq!(good.value(), Some(&SampleValue::Gauge(7.0)));

        fail.store(true, Ordering::SeqCst);
        cache.refresh_all();
        // Stale-but-available: the last good sample is still served.
        assert_eq!(cache.read("flaky").unwrap(), good);
    }

    #[test]
    fn duplicate_metric_id_is_rejected() {
        let mut builder = SamplingCacheBuilder::new();
        builder
            .register("m", Duration::from_secs(1), || Ok(SampleValue::Gauge(0.0)))
            .unwrap();
        let err = builder
            .register("m", Duration::from_secs(1), || Ok(SampleValue::Gauge(1.0)))
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateKey("m".to_owned()));
    }

    #[test]
    fn concurrent_readers_see_only_captured_samples() {
        let counter = Arc::new(AtomicU64::new(0));
        let cache = Arc::new(counter_cache(Arc::clone(&counter)));
        cache.refresh_all();

        let mut readers = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            readers.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    match cache.read("hits").unwrap() {
                        Sample::Ready { value, .. } => {
                            // Every observed value must be one the provider
                            // actually produced.
                            assert!(value.as_counter().is_some());
                        }
                        Sample::Pending => panic!("regressed to pending"),
                    }
                }
            }));
        }

        let writer = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    cache.refresh_all();
                }
            })
        };

        for t in readers {
            t.join().unwrap();
        }
        writer.join().unwrap();
    }
}
