use std::thread;
use std::time::Duration;

use sysinfo::{ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System};
use tracing::debug;

use super::snapshot::ProcessSample;

/// Samples CPU and resident memory for every process visible at the caller's
/// privilege level.
///
/// Per-process CPU is measured between two whole-table refreshes separated by
/// the sampling interval, so one interval covers the entire scan no matter
/// how many processes are running. Processes that exit during the wait are
/// pruned by the second refresh; zombies and entries without a readable name
/// are skipped. Process churn during a scan is normal, never fatal.
pub struct ProcessSampler {
    sys: System,
    interval: Duration,
}

impl ProcessSampler {
    /// `interval` below sysinfo's minimum update interval is clamped up.
    pub fn new(interval: Duration) -> Self {
        ProcessSampler {
            sys: System::new(),
            interval,
        }
    }

    pub fn sample(&mut self) -> Vec<ProcessSample> {
        let refresh = ProcessRefreshKind::nothing().with_memory().with_cpu();
        self.sys
            .refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);
        thread::sleep(self.interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys
            .refresh_processes_specifics(ProcessesToUpdate::All, true, refresh);

        let mut samples = Vec::with_capacity(self.sys.processes().len());
        for (pid, process) in self.sys.processes() {
            if process.status() == ProcessStatus::Zombie {
                debug!(pid = pid.as_u32(), "skipping zombie process");
                continue;
            }
            let name = process.name().to_string_lossy();
            if name.is_empty() {
                debug!(pid = pid.as_u32(), "skipping process with unreadable name");
                continue;
            }
            samples.push(ProcessSample {
                name: name.into_owned(),
                cpu_percent: process.cpu_usage(),
                memory_bytes: process.memory(),
            });
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_includes_this_process_and_skips_nothing_fatal() {
        let mut sampler = ProcessSampler::new(Duration::from_millis(0));
        let samples = sampler.sample();
        // The test binary itself is always visible.
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|s| !s.name.is_empty()));
    }
}
