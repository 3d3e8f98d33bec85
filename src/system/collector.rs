use std::fmt;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use sysinfo::{Disks, Networks, System};
use tracing::debug;

use super::snapshot::{HostSnapshot, LoadAverages};

/// A metrics subsystem the platform cannot answer for. The whole snapshot
/// fails rather than reporting zeroed values, because a partial report is
/// indistinguishable from a healthy idle host.
#[derive(Clone, Debug)]
pub struct MetricsUnavailable {
    subsystem: &'static str,
    detail: String,
}

impl MetricsUnavailable {
    fn new(subsystem: &'static str, detail: impl Into<String>) -> Self {
        MetricsUnavailable {
            subsystem,
            detail: detail.into(),
        }
    }

    pub fn subsystem(&self) -> &'static str {
        self.subsystem
    }
}

impl fmt::Display for MetricsUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} metrics unavailable: {}", self.subsystem, self.detail)
    }
}

impl std::error::Error for MetricsUnavailable {}

/// Reads one [`HostSnapshot`] from the live host.
pub struct HostCollector {
    sys: System,
    cpu_sample: Duration,
    mount_point: PathBuf,
}

impl HostCollector {
    /// `cpu_sample` is the window the global CPU percentage is measured over.
    /// Values below sysinfo's minimum update interval are clamped up to it.
    pub fn new(cpu_sample: Duration, mount_point: impl Into<PathBuf>) -> Self {
        HostCollector {
            sys: System::new(),
            cpu_sample,
            mount_point: mount_point.into(),
        }
    }

    /// Collect every subsystem and assemble a snapshot. Blocks for the CPU
    /// sampling window.
    pub fn snapshot(&mut self) -> Result<HostSnapshot, MetricsUnavailable> {
        let cpu_usage_percent = self.sample_cpu();
        self.sys.refresh_memory();

        let load_averages = load_averages()?;
        let (disk_total, disk_used, disk_free) = self.disk_usage()?;
        let (net_bytes_sent, net_bytes_received) = network_totals();

        Ok(HostSnapshot {
            boot_time_secs: System::boot_time(),
            memory_total: self.sys.total_memory(),
            memory_used: self.sys.used_memory(),
            memory_available: self.sys.available_memory(),
            disk_total,
            disk_used,
            disk_free,
            net_bytes_sent,
            net_bytes_received,
            load_averages,
            cpu_usage_percent,
        })
    }

    fn sample_cpu(&mut self) -> f32 {
        let window = self.cpu_sample.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        self.sys.refresh_cpu_usage();
        thread::sleep(window);
        self.sys.refresh_cpu_usage();
        debug!(window_ms = window.as_millis() as u64, "sampled global cpu");
        self.sys.global_cpu_usage()
    }

    fn disk_usage(&self) -> Result<(u64, u64, u64), MetricsUnavailable> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == self.mount_point)
            .ok_or_else(|| {
                MetricsUnavailable::new(
                    "disk",
                    format!("no filesystem mounted at {}", self.mount_point.display()),
                )
            })?;
        let total = disk.total_space();
        let free = disk.available_space();
        Ok((total, total.saturating_sub(free), free))
    }
}

fn load_averages() -> Result<LoadAverages, MetricsUnavailable> {
    if cfg!(target_os = "windows") {
        return Err(MetricsUnavailable::new(
            "load average",
            "not reported on this platform",
        ));
    }
    let avg = System::load_average();
    Ok(LoadAverages {
        one: avg.one,
        five: avg.five,
        fifteen: avg.fifteen,
    })
}

fn network_totals() -> (u64, u64) {
    let networks = Networks::new_with_refreshed_list();
    let mut sent = 0u64;
    let mut received = 0u64;
    for (_interface, data) in &networks {
        sent += data.total_transmitted();
        received += data.total_received();
    }
    (sent, received)
}
