use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` display columns, ending with an
/// ellipsis when anything was cut. CJK-aware: wide characters count double.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Left-justify `s` into a cell `width` display columns wide. Content wider
/// than the cell is truncated first, so every cell renders at exactly
/// `width` columns.
pub fn pad_cell(s: &str, width: usize) -> String {
    let cell = truncate_display(s, width);
    let padding = width.saturating_sub(cell.width());
    let mut out = cell;
    out.extend(std::iter::repeat_n(' ', padding));
    out
}

/// Bytes as mebibytes, for two-decimal display.
pub fn mib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Human-readable byte size for log lines.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_cell_fills_to_width() {
        assert_eq!(pad_cell("abc", 5), "abc  ");
        assert_eq!(pad_cell("abcde", 5), "abcde");
    }

    #[test]
    fn pad_cell_counts_display_columns_for_cjk() {
        // Four CJK characters occupy eight columns.
        assert_eq!(pad_cell("进程名称", 10), "进程名称  ");
    }

    #[test]
    fn pad_cell_truncates_oversized_content() {
        let cell = pad_cell("background-flush-worker", 20);
        assert_eq!(cell, "background-flush-wo…");
        assert_eq!(cell.width(), 20);
    }

    #[test]
    fn truncate_display_is_cjk_aware() {
        assert_eq!(truncate_display("abcdef", 4), "abc…");
        assert_eq!(truncate_display("日本語テスト", 5), "日本…");
        assert_eq!(truncate_display("short", 10), "short");
    }

    #[test]
    fn mib_conversion() {
        assert_eq!(mib(8 * 1024 * 1024), 8.0);
        assert_eq!(mib(0), 0.0);
    }

    #[test]
    fn format_bytes_picks_a_unit() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
