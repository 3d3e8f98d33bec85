use std::path::Path;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::info;

use crate::report;
use crate::system::collector::{HostCollector, MetricsUnavailable};
use crate::system::sampler::ProcessSampler;
use crate::system::snapshot::{HostSnapshot, ProcessSample};
use crate::system::topk::top_by_cpu;

/// Where the metrics behind a report come from. Production reads the live
/// host; tests substitute synthetic snapshots.
pub trait MetricsSource {
    fn host_snapshot(&mut self) -> Result<HostSnapshot, MetricsUnavailable>;
    fn sample_processes(&mut self) -> Vec<ProcessSample>;
}

/// Live host metrics via sysinfo.
pub struct LiveMetrics {
    collector: HostCollector,
    sampler: ProcessSampler,
}

impl LiveMetrics {
    pub fn new(host_cpu_sample: Duration, process_sample: Duration, mount_point: &str) -> Self {
        LiveMetrics {
            collector: HostCollector::new(host_cpu_sample, mount_point),
            sampler: ProcessSampler::new(process_sample),
        }
    }
}

impl MetricsSource for LiveMetrics {
    fn host_snapshot(&mut self) -> Result<HostSnapshot, MetricsUnavailable> {
        self.collector.snapshot()
    }

    fn sample_processes(&mut self) -> Vec<ProcessSample> {
        self.sampler.sample()
    }
}

/// One monitoring pass: collect host metrics, sample the process table,
/// select the top consumers, render and write the report.
///
/// Sequential and blocking by design; this runs as a one-shot batch job on a
/// scheduler, and the next run simply overwrites the same report.
pub fn run(source: &mut dyn MetricsSource, output: &Path, top_count: usize) -> Result<()> {
    let host = source
        .host_snapshot()
        .wrap_err("collecting host metrics")?;
    let samples = source.sample_processes();
    info!(processes = samples.len(), "sampled process table");

    let top = top_by_cpu(samples, top_count);
    let rendered = report::render(&host, &top);
    report::write(output, &rendered)
        .wrap_err_with(|| format!("writing report to {}", output.display()))?;
    info!(path = %output.display(), "report written");
    Ok(())
}
