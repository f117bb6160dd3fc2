use chrono::{DateTime, Local};

/// 截断到最多 `max_chars` 个字符（按字符而不是字节，避免切断 UTF-8）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// 导出文件的默认名字，例如 gsensor_20250101_120000.csv
pub fn default_export_filename(now: DateTime<Local>) -> String {
    format!("gsensor_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// 将秒数格式化为 MM:SS.s
pub fn format_elapsed(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    format!("{:02}:{:04.1}", minutes, seconds - minutes as f64 * 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("加速度计数据", 2), "加速");
    }

    #[test]
    fn export_filename_uses_local_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(default_export_filename(now), "gsensor_20240309_070501.csv");
    }

    #[test]
    fn elapsed_is_minutes_and_seconds() {
        assert_eq!(format_elapsed(0.0), "00:00.0");
        assert_eq!(format_elapsed(75.3), "01:15.3");
    }
}
