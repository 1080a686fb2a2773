//! The "hundred years together" countdown on the wedding arrival card.

use chrono::NaiveDate;

/// Counting starts from this day.
pub const TOGETHER_SINCE: (i32, u32, u32) = (2016, 5, 17);
/// A hundred years of 365 days.
pub const HUNDRED_YEARS_DAYS: i64 = 100 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub elapsed_days: i64,
    pub remaining_years: i64,
    pub remaining_days: i64,
}

impl Countdown {
    /// Countdown as seen on `today`. Dates before the start count the same
    /// distance forwards.
    pub fn on(today: NaiveDate) -> Self {
        let (y, m, d) = TOGETHER_SINCE;
        let elapsed_days = NaiveDate::from_ymd_opt(y, m, d)
            .map(|start| (today - start).num_days().abs())
            .unwrap_or_default();
        let remaining = HUNDRED_YEARS_DAYS - elapsed_days;
        Self {
            elapsed_days,
            remaining_years: remaining / 365,
            remaining_days: remaining % 365,
        }
    }

    pub fn today() -> Self {
        Self::on(chrono::Local::now().date_naive())
    }

    pub fn marquee_text(&self) -> String {
        format!(
            "Hand in hand, growing old together · {} years {} days to go until our hundredth anniversary",
            self.remaining_years, self.remaining_days
        )
    }
}

/// Horizontal offset of marquee text scrolling right to left across a lane.
///
/// The text enters at the right edge, leaves past the left edge, then wraps.
pub fn marquee_offset(elapsed_secs: f32, speed: f32, text_width: f32, lane_width: f32) -> f32 {
    let cycle = (text_width + lane_width).max(1.0);
    lane_width - (elapsed_secs * speed).rem_euclid(cycle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_day_has_full_century_left() {
        let countdown = Countdown::on(date(2016, 5, 17));
        assert_eq!(countdown.elapsed_days, 0);
        assert_eq!(countdown.remaining_years, 100);
        assert_eq!(countdown.remaining_days, 0);
    }

    #[test]
    fn test_one_day_later() {
        let countdown = Countdown::on(date(2016, 5, 18));
        assert_eq!(countdown.elapsed_days, 1);
        assert_eq!(countdown.remaining_years, 99);
        assert_eq!(countdown.remaining_days, 364);
    }

    #[test]
    fn test_leap_days_count_as_elapsed() {
        // Ten years plus the leap days of 2020 and 2024.
        let countdown = Countdown::on(date(2026, 5, 17));
        assert_eq!(countdown.elapsed_days, 3652);
        let remaining = HUNDRED_YEARS_DAYS - 3652;
        assert_eq!(countdown.remaining_years, remaining / 365);
        assert_eq!(countdown.remaining_days, remaining % 365);
    }

    #[test]
    fn test_dates_before_start_count_forward() {
        assert_eq!(Countdown::on(date(2016, 5, 10)).elapsed_days, 7);
    }

    #[test]
    fn test_marquee_text_mentions_remaining_time() {
        let text = Countdown::on(date(2016, 5, 18)).marquee_text();
        assert!(text.contains("99 years 364 days"));
    }

    #[test]
    fn test_marquee_offset_wraps() {
        assert_eq!(marquee_offset(0.0, 50.0, 200.0, 300.0), 300.0);
        assert_eq!(marquee_offset(2.0, 50.0, 200.0, 300.0), 200.0);
        // One full cycle later the text is back at the right edge.
        assert_eq!(marquee_offset(10.0, 50.0, 200.0, 300.0), 300.0);
    }
}
