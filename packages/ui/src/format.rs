//! Display helpers for backend timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// `dd/mm/yyyy` for an RFC 3339, `yyyy-mm-dd hh:mm:ss` or `yyyy-mm-dd` string.
/// Anything else is shown as sent; absent values become a dash.
pub fn short_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// Like [`short_date`] but keeps the time of day.
pub fn date_time(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    short_date(Some(raw))
}

/// Human-readable byte size for attachment lists.
pub fn file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date_formats() {
        assert_eq!(short_date(Some("2024-03-05")), "05/03/2024");
        assert_eq!(short_date(Some("2024-03-05 14:30:00")), "05/03/2024");
        assert_eq!(short_date(None), "-");
        assert_eq!(short_date(Some("  ")), "-");
        assert_eq!(short_date(Some("kemarin")), "kemarin");
    }

    #[test]
    fn test_date_time_keeps_time() {
        assert_eq!(date_time(Some("2024-03-05 14:30:00")), "05/03/2024 14:30");
        assert_eq!(date_time(Some("2024-03-05")), "05/03/2024");
    }

    #[test]
    fn test_file_size() {
        assert_eq!(file_size(512), "512 B");
        assert_eq!(file_size(2048), "2 KB");
        assert_eq!(file_size(2 * 1024 * 1024), "2.0 MB");
    }
}
