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

//! Background refresh scheduler for the sampling cache.
//!
//! One dedicated thread drives all registered metrics, each on its own
//! period. The thread sleeps until the nearest deadline but wakes
//! immediately on the shutdown signal, so `stop` does not wait out a sleep.
//! An in-flight refresh is allowed to finish during shutdown; sample slots
//! are only ever replaced whole, so abandonment cannot corrupt them.

use crate::cache::SamplingCache;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on one sleep, so a metric added with a very long period
/// cannot make the loop unresponsive to deadline arithmetic drift.
const MAX_SLEEP: Duration = Duration::from_secs(1);

/// Owns the refresh thread's lifecycle.
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
    shutdown_tx: Option<Sender<()>>,
}

impl RefreshScheduler {
    /// Creates a scheduler in the stopped state.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the refresh thread is live.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Starts the refresh thread. Every metric is refreshed once
    /// immediately, then on its own period. Starting an already running
    /// scheduler is a no-op.
    pub fn start(&mut self, cache: Arc<SamplingCache>) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let running = Arc::clone(&self.running);

        let handle = thread::spawn(move || {
            run_loop(&cache, &running, &shutdown_rx);
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(handle);
        log::info!("sampling refresh scheduler started");
    }

    /// Stops the refresh thread: no new cycles are issued, an in-flight
    /// cycle finishes, and the thread is joined. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            log::info!("sampling refresh scheduler stopped");
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(cache: &SamplingCache, running: &AtomicBool, shutdown_rx: &Receiver<()>) {
    // Per-metric deadlines; everything is due right away.
    let mut deadlines: HashMap<String, Instant> = cache
        .metrics()
        .map(|m| (m.id().to_owned(), Instant::now()))
        .collect();

    while running.load(Ordering::Relaxed) {
        let now = Instant::now();

        for metric in cache.metrics() {
            let due = deadlines
                .get_mut(metric.id())
                .expect("deadline map covers all metrics");
            if *due <= now {
                metric.refresh();
                *due = Instant::now() + metric.interval();
            }
        }

        let next_due = deadlines.values().min().copied();
        let sleep = match next_due {
            Some(due) => due.saturating_duration_since(Instant::now()).min(MAX_SLEEP),
            None => MAX_SLEEP,
        };

        match shutdown_rx.recv_timeout(sleep) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SamplingCacheBuilder;
    use std::sync::atomic::AtomicU64;
    use vantage_core::{Sample, SampleValue};

    fn ticking_cache(interval: Duration) -> (Arc<SamplingCache>, Arc<AtomicU64>) {
        let counter = Arc::new(AtomicU64::new(0));
        let provider_counter = Arc::clone(&counter);
        let mut builder = SamplingCacheBuilder::new();
        builder
            .register("ticks", interval, move || {
                Ok(SampleValue::Counter(
                    provider_counter.fetch_add(1, Ordering::SeqCst),
                ))
            })
            .unwrap();
        (Arc::new(builder.build()), counter)
    }

    #[test]
    fn refreshes_on_schedule() {
        let (cache, _counter) = ticking_cache(Duration::from_millis(20));
        let mut scheduler = RefreshScheduler::new();
        scheduler.start(Arc::clone(&cache));

        // First refresh is immediate.
        let deadline = Instant::now() + Duration::from_millis(500);
        loop {
            if let Some(Sample::Ready { .. }) = cache.read("ticks") {
                break;
            }
            assert!(Instant::now() < deadline, "first refresh never happened");
            thread::sleep(Duration::from_millis(5));
        }

        // Across a span well beyond the interval, the value advances.
        let before = cache.read("ticks").unwrap();
        thread::sleep(Duration::from_millis(80));
        let after = cache.read("ticks").unwrap();
        assert_ne!(before, after);

        scheduler.stop();
    }

    #[test]
    fn stop_halts_refreshing() {
        let (cache, counter) = ticking_cache(Duration::from_millis(10));
        let mut scheduler = RefreshScheduler::new();
        scheduler.start(Arc::clone(&cache));
        thread::sleep(Duration::from_millis(30));
        scheduler.stop();

        let after_stop = counter.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(counter.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn stop_is_idempotent_and_start_twice_is_noop() {
        let (cache, _) = ticking_cache(Duration::from_millis(10));
        let mut scheduler = RefreshScheduler::new();
        scheduler.start(Arc::clone(&cache));
        scheduler.start(Arc::clone(&cache));
        assert!(scheduler.is_running());
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
    }
}
