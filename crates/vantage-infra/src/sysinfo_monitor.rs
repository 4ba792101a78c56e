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

//! sysinfo-based implementation of the `SystemMonitor` contract.

use std::sync::Mutex;
use std::time::{Duration, Instant};
use sysinfo::{get_current_pid, Pid, ProcessesToUpdate, System};
use vantage_core::{MemoryUsage, SourceError, SourceResult, SystemMonitor};

/// A system monitor backed by the `sysinfo` crate.
///
/// Reads are refreshed on access; callers are expected to route them through
/// the engine's sampling cache, which spaces the calls out to the configured
/// refresh period (sysinfo's CPU estimate needs spaced samples to be
/// meaningful anyway).
///
/// Memory semantics: `used` is the process's resident memory, `total` and
/// `free` are system-wide totals, `max` is unset (no enforced bound exists
/// for a native process). Uptime is measured from monitor construction,
/// which the engine's owner creates at process startup.
pub struct SysinfoMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    started: Instant,
}

impl SysinfoMonitor {
    /// Creates a monitor and takes the initial CPU baseline sample.
    pub fn new() -> Self {
        let mut system = System::new_all();
        system.refresh_all();
        let pid = match get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                log::warn!("could not determine current pid: {e}");
                None
            }
        };
        Self {
            system: Mutex::new(system),
            pid,
            started: Instant::now(),
        }
    }
}

impl Default for SysinfoMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SysinfoMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysinfoMonitor")
            .field("pid", &self.pid)
            .field("started", &self.started)
            .finish()
    }
}

impl SystemMonitor for SysinfoMonitor {
    fn memory_usage(&self) -> SourceResult<MemoryUsage> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| SourceError::new("system handle poisoned"))?;
        system.refresh_memory();

        let used = match self.pid {
            Some(pid) => {
                system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                system
                    .process(pid)
                    .map(|p| p.memory())
                    .ok_or_else(|| SourceError::new("current process not visible to sysinfo"))?
            }
            None => return Err(SourceError::new("current pid unknown")),
        };

        Ok(MemoryUsage {
            used,
            free: system.available_memory(),
            total: system.total_memory(),
            max: None,
        })
    }

    fn cpu_load(&self) -> SourceResult<f64> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| SourceError::new("system handle poisoned"))?;
        system.refresh_cpu_all();
        Ok(f64::from(system.global_cpu_usage()) / 100.0)
    }

    fn process_uptime(&self) -> SourceResult<Duration> {
        Ok(self.started.elapsed())
    }
}
