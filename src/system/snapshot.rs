/// Load averages over the last 1, 5 and 15 minutes, as the platform reports
/// them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadAverages {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Point-in-time capture of host-level metrics. Byte-valued fields hold raw
/// bytes; conversion to MiB happens at render time.
#[derive(Clone, Debug)]
pub struct HostSnapshot {
    /// Boot instant in epoch seconds.
    pub boot_time_secs: u64,
    pub memory_total: u64,
    pub memory_used: u64,
    pub memory_available: u64,
    pub disk_total: u64,
    pub disk_used: u64,
    pub disk_free: u64,
    /// Cumulative bytes sent since boot, summed over all interfaces.
    pub net_bytes_sent: u64,
    /// Cumulative bytes received since boot, summed over all interfaces.
    pub net_bytes_received: u64,
    pub load_averages: LoadAverages,
    /// Global CPU utilization sampled over the collector's interval.
    pub cpu_usage_percent: f32,
}

/// One process observed during a scan. Transient: computed fresh per run and
/// discarded after the report is written.
#[derive(Clone, Debug)]
pub struct ProcessSample {
    pub name: String,
    pub cpu_percent: f32,
    /// Resident set size in bytes.
    pub memory_bytes: u64,
}
