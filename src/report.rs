use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, FixedOffset};

use crate::format::{mib, pad_cell};
use crate::system::snapshot::{HostSnapshot, ProcessSample};

/// Civil timezone used for every timestamp in the report (UTC+8).
const REPORT_UTC_OFFSET_SECS: i32 = 8 * 3600;

const NAME_COL: usize = 20;
const CPU_COL: usize = 15;
const MEM_COL: usize = 20;

/// Render the report text. Pure: identical inputs produce identical bytes,
/// with no hidden clock reads.
pub fn render(host: &HostSnapshot, top: &[ProcessSample]) -> String {
    let mut out = String::new();

    out.push_str("===== 服务器资源监控 =====\n");
    out.push_str(&format!(
        "开机时间: {}\n",
        civil_timestamp(host.boot_time_secs)
    ));
    out.push_str(&format!("内存总量: {:.2} MB\n", mib(host.memory_total)));
    out.push_str(&format!("内存已用: {:.2} MB\n", mib(host.memory_used)));
    out.push_str(&format!("内存剩余: {:.2} MB\n", mib(host.memory_available)));
    out.push_str(&format!("网络发送: {:.2} MB\n", mib(host.net_bytes_sent)));
    out.push_str(&format!(
        "网络接收: {:.2} MB\n",
        mib(host.net_bytes_received)
    ));
    out.push_str(&format!(
        "CPU 负载 (1/5/15 分钟): {:.2} / {:.2} / {:.2}\n",
        host.load_averages.one, host.load_averages.five, host.load_averages.fifteen
    ));
    out.push_str(&format!("CPU 平均使用率: {:.2} %\n", host.cpu_usage_percent));
    out.push_str(&format!("硬盘总量: {:.2} MB\n", mib(host.disk_total)));
    out.push_str(&format!("硬盘已用: {:.2} MB\n", mib(host.disk_used)));
    out.push_str(&format!("硬盘剩余: {:.2} MB\n", mib(host.disk_free)));

    out.push_str("\n===== 占用资源前五名的进程 =====\n");
    out.push_str(&format!(
        "{}{}{}\n",
        pad_cell("进程名称", NAME_COL),
        pad_cell("CPU 使用率 (%)", CPU_COL),
        pad_cell("内存使用量 (MB)", MEM_COL),
    ));
    for sample in top {
        out.push_str(&format!(
            "{}{}{}\n",
            pad_cell(&sample.name, NAME_COL),
            pad_cell(&format!("{:.2}", sample.cpu_percent), CPU_COL),
            pad_cell(&format!("{:.2}", mib(sample.memory_bytes)), MEM_COL),
        ));
    }
    out.push_str("=========================\n");

    out
}

/// Create or truncate `path` and write the full report as UTF-8 in one go.
pub fn write(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents.as_bytes())
}

fn civil_timestamp(epoch_secs: u64) -> String {
    let offset = FixedOffset::east_opt(REPORT_UTC_OFFSET_SECS).expect("offset is within a day");
    match DateTime::from_timestamp(epoch_secs as i64, 0) {
        Some(utc) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "unknown".to_string(),
    }
}
