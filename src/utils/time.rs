use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Asia/Tashkent, UTC+5 all year.
const TASHKENT_OFFSET_SECS: i32 = 5 * 3600;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_tashkent(dt: DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(TASHKENT_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    dt.with_timezone(&offset)
}

/// `dd.mm.YYYY HH:MM` in Tashkent time.
pub fn format_local(dt: DateTime<Utc>) -> String {
    to_tashkent(dt).format("%d.%m.%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_in_tashkent_time() {
        let at = Utc.with_ymd_and_hms(2026, 1, 31, 20, 5, 0).unwrap();
        assert_eq!(format_local(at), "01.02.2026 01:05");
    }
}
