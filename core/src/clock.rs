use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::error::ConfigError;

pub fn fixed_offset(hours: i32) -> Result<FixedOffset, ConfigError> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| ConfigError::Invalid(format!("invalid UTC offset: {hours}h")))
}

/// Calendar day of `now` as seen from `offset`.
pub fn local_date(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

pub fn today(offset: FixedOffset) -> NaiveDate {
    local_date(Utc::now(), offset)
}

/// `YYYY-MM-DD`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_utc_evening_is_next_day_in_plus_nine() {
        let now = Utc.with_ymd_and_hms(2024, 4, 30, 15, 30, 0).unwrap();
        let jst = fixed_offset(9).unwrap();
        assert_eq!(
            local_date(now, jst),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(
            local_date(now, fixed_offset(0).unwrap()),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
        );
    }

    #[test]
    fn iso_date_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(iso_date(d), "2024-01-02");
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(fixed_offset(30).is_err());
    }
}
