//! Trading-day arithmetic on UTC calendar dates.
//!
//! Only weekends are treated as closed; exchange holidays are not modelled.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First trading day strictly after `date`.
pub fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    loop {
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => return day,
        };
        if !is_weekend(day) {
            return day;
        }
    }
}

/// The `count` most recent trading days up to and including `end`, ascending.
pub fn previous_trading_days(end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut cursor = Some(end);
    while days.len() < count {
        let Some(day) = cursor else { break };
        if !is_weekend(day) {
            days.push(day);
        }
        cursor = day.checked_sub_days(Days::new(1));
    }
    days.reverse();
    days
}

/// The first `count` trading days strictly after `start`, ascending.
pub fn trading_days_after(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut cursor = start;
    while days.len() < count {
        let next = next_trading_day(cursor);
        if next == cursor {
            break;
        }
        days.push(next);
        cursor = next;
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(ymd(2024, 4, 6)));
        assert!(is_weekend(ymd(2024, 4, 7)));
        assert!(!is_weekend(ymd(2024, 4, 8)));
    }

    #[test]
    fn next_trading_day_skips_weekend() {
        // Friday -> Monday
        assert_eq!(next_trading_day(ymd(2024, 4, 5)), ymd(2024, 4, 8));
        // Saturday -> Monday
        assert_eq!(next_trading_day(ymd(2024, 4, 6)), ymd(2024, 4, 8));
        assert_eq!(next_trading_day(ymd(2024, 4, 8)), ymd(2024, 4, 9));
    }

    #[test]
    fn previous_days_from_sunday() {
        let days = previous_trading_days(ymd(2024, 4, 7), 3);
        assert_eq!(days, vec![ymd(2024, 4, 3), ymd(2024, 4, 4), ymd(2024, 4, 5)]);
    }

    #[test]
    fn previous_days_includes_trading_end() {
        let days = previous_trading_days(ymd(2024, 4, 8), 2);
        assert_eq!(days, vec![ymd(2024, 4, 5), ymd(2024, 4, 8)]);
    }

    #[test]
    fn days_after_thursday() {
        let days = trading_days_after(ymd(2024, 4, 4), 3);
        assert_eq!(days, vec![ymd(2024, 4, 5), ymd(2024, 4, 8), ymd(2024, 4, 9)]);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(previous_trading_days(ymd(2024, 4, 8), 0).is_empty());
        assert!(trading_days_after(ymd(2024, 4, 8), 0).is_empty());
    }
}
