use insta::assert_snapshot;
use opskit::report;
use unicode_width::UnicodeWidthStr;
use opskit::system::snapshot::{HostSnapshot, LoadAverages, ProcessSample};
use opskit::system::topk::{TOP_PROCESS_COUNT, top_by_cpu};

const MIB: u64 = 1024 * 1024;

fn mock_host() -> HostSnapshot {
    HostSnapshot {
        boot_time_secs: 1_700_000_000,
        memory_total: 16384 * MIB,
        memory_used: 8192 * MIB,
        memory_available: 8192 * MIB,
        disk_total: 102_400 * MIB,
        disk_used: 51_200 * MIB,
        disk_free: 51_200 * MIB,
        net_bytes_sent: 300 * MIB,
        net_bytes_received: 1536 * MIB,
        load_averages: LoadAverages {
            one: 0.66,
            five: 0.52,
            fifteen: 0.40,
        },
        cpu_usage_percent: 23.5,
    }
}

fn mock_sample(name: &str, cpu: f32, memory_mb: u64) -> ProcessSample {
    ProcessSample {
        name: name.to_string(),
        cpu_percent: cpu,
        memory_bytes: memory_mb * MIB,
    }
}

/// Rendered rows carry trailing column padding; strip it so the snapshot
/// stays stable under editors that trim line ends.
fn trimmed(report: &str) -> String {
    report
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn full_report_layout_from_mock_data() {
    let samples = vec![
        mock_sample("网易云音乐", 12.25, 512),
        mock_sample("background-flush-worker", 12.25, 64),
        mock_sample("postgres", 42.5, 1024),
    ];
    let top = top_by_cpu(samples, TOP_PROCESS_COUNT);
    let rendered = report::render(&mock_host(), &top);

    assert_snapshot!(trimmed(&rendered), @r"
    ===== 服务器资源监控 =====
    开机时间: 2023-11-15 06:13:20
    内存总量: 16384.00 MB
    内存已用: 8192.00 MB
    内存剩余: 8192.00 MB
    网络发送: 300.00 MB
    网络接收: 1536.00 MB
    CPU 负载 (1/5/15 分钟): 0.66 / 0.52 / 0.40
    CPU 平均使用率: 23.50 %
    硬盘总量: 102400.00 MB
    硬盘已用: 51200.00 MB
    硬盘剩余: 51200.00 MB

    ===== 占用资源前五名的进程 =====
    进程名称            CPU 使用率 (%) 内存使用量 (MB)
    postgres            42.50          1024.00
    网易云音乐          12.25          512.00
    background-flush-wo…12.25          64.00
    =========================
    ");
}

#[test]
fn report_with_no_processes_still_has_the_table_header() {
    let rendered = report::render(&mock_host(), &[]);
    assert!(rendered.contains("===== 占用资源前五名的进程 ====="));
    assert!(rendered.contains("进程名称"));
    assert!(rendered.ends_with("=========================\n"));
}

#[test]
fn every_row_spans_the_three_column_widths() {
    let samples = vec![
        mock_sample("a", 1.0, 1),
        mock_sample("bb", 2.0, 2),
        mock_sample("ccc", 3.0, 3),
    ];
    let top = top_by_cpu(samples, TOP_PROCESS_COUNT);
    let rendered = report::render(&mock_host(), &top);

    let table_start = rendered.find("进程名称").unwrap();
    for row in rendered[table_start..].lines().take(4) {
        assert_eq!(row.width(), 20 + 15 + 20, "row: {row:?}");
    }
}
