use chrono::{DateTime, Datelike, Utc};

pub fn week_key(timestamp: &DateTime<Utc>) -> String {
    let week = timestamp.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn week_key_uses_iso_year() {
        // Sunday 2023-01-01 still belongs to ISO week 52 of 2022.
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(week_key(&ts), "2022-W52");
        let ts = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(week_key(&ts), "2024-W10");
    }
}
