//! Đọc dấu thời gian CDA (`YYYYMMDD[HHMM[SS]][±ZZZZ]`) để hiển thị.
//! Bộ trích xuất giữ nguyên chuỗi gốc, phần này chỉ dùng khi cần.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

fn digits(value: &str) -> &str {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    &value[..end]
}

/// Phần ngày của dấu thời gian. Thiếu tháng/ngày thì lấy 1.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let raw = digits(value.trim());
    if raw.len() < 4 {
        return None;
    }
    let year: i32 = raw[..4].parse().ok()?;
    let month: u32 = raw.get(4..6).map_or(Ok(1), str::parse).ok()?;
    let day: u32 = raw.get(6..8).map_or(Ok(1), str::parse).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Ngày giờ cục bộ (bỏ qua múi giờ).
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let date = parse_date(value)?;
    let raw = digits(value.trim());
    let hour: u32 = raw.get(8..10).map_or(Ok(0), str::parse).ok()?;
    let minute: u32 = raw.get(10..12).map_or(Ok(0), str::parse).ok()?;
    let second: u32 = raw.get(12..14).map_or(Ok(0), str::parse).ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time))
}

/// Dạng `YYYY-MM-DD`, hoặc chuỗi gốc nếu không đọc được.
pub fn display_date(value: &str) -> String {
    parse_date(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_partial_precision() {
        assert_eq!(parse_date("1980"), NaiveDate::from_ymd_opt(1980, 1, 1));
        assert_eq!(parse_date("19800515"), NaiveDate::from_ymd_opt(1980, 5, 15));
        assert_eq!(parse_date("abc"), None);
    }

    #[test]
    fn ignores_timezone_offset() {
        let parsed = parse_datetime("20240115103000-0500").expect("datetime");
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 10:30:00");
        assert_eq!(display_date("20240115"), "2024-01-15");
        assert_eq!(display_date("unknown"), "unknown");
    }
}
