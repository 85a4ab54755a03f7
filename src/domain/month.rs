use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A calendar month (year + month), the granularity the dashboard works at.
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    /// The zero month used as fallback for unparsable stored month strings.
    pub const EPOCH: Month = Month {
        year: 1970,
        month: 1,
    };

    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month a given date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a strict "YYYY-MM" string (4-digit year, 2-digit month, 01-12).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (year_str, month_str) = input.split_once('-')?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return None;
        }

        let year: i32 = year_str.parse().ok()?;
        let month: u32 = month_str.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }

        Some(Self { year, month })
    }

    /// The previous calendar month, rolling over year boundaries.
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next calendar month, rolling over year boundaries.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of this month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// Months travel as "YYYY-MM" strings everywhere (storage, CLI, JSON output),
// so they serialize in string form rather than as a struct.
impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Month::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid month: {s}")))
    }
}

/// Outcome of interpreting a month string: either it parsed, or an explicit
/// fallback was taken. Parse failures never surface as errors; they always
/// degrade to a fallback month, and this type keeps that branch visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthResolution {
    Parsed(Month),
    Fallback(Month),
}

impl MonthResolution {
    /// Parse `input`, falling back to the given month when it does not parse.
    pub fn parse_or(input: &str, fallback: Month) -> Self {
        match Month::parse(input) {
            Some(month) => MonthResolution::Parsed(month),
            None => MonthResolution::Fallback(fallback),
        }
    }

    /// Resolve an optional user-supplied month string. Absent or unparsable
    /// input falls back to the month `today` falls in.
    pub fn from_input(input: Option<&str>, today: NaiveDate) -> Self {
        match input {
            Some(s) => Self::parse_or(s, Month::from_date(today)),
            None => MonthResolution::Fallback(Month::from_date(today)),
        }
    }

    pub fn month(&self) -> Month {
        match self {
            MonthResolution::Parsed(month) | MonthResolution::Fallback(month) => *month,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MonthResolution::Fallback(_))
    }
}

/// The target month together with its neighbors, for dashboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub target: Month,
    pub prev: Month,
    pub next: Month,
}

impl MonthWindow {
    pub fn around(target: Month) -> Self {
        Self {
            target,
            prev: target.prev(),
            next: target.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Month::parse("2023-10"), Some(Month::new(2023, 10)));
        assert_eq!(Month::parse("1970-01"), Some(Month::EPOCH));
        assert_eq!(Month::parse(" 2024-02 "), Some(Month::new(2024, 2)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Month::parse(""), None);
        assert_eq!(Month::parse("2023"), None);
        assert_eq!(Month::parse("2023-13"), None);
        assert_eq!(Month::parse("2023-00"), None);
        assert_eq!(Month::parse("2023-1"), None); // month must be zero-padded
        assert_eq!(Month::parse("23-10"), None);
        assert_eq!(Month::parse("2023-10-05"), None);
        assert_eq!(Month::parse("next month"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Month::new(2023, 10).to_string(), "2023-10");
        assert_eq!(Month::new(870, 3).to_string(), "0870-03");
    }

    #[test]
    fn test_prev_next_rollover() {
        assert_eq!(Month::new(2024, 1).prev(), Month::new(2023, 12));
        assert_eq!(Month::new(2023, 12).next(), Month::new(2024, 1));
        assert_eq!(Month::new(2023, 6).prev(), Month::new(2023, 5));
        assert_eq!(Month::new(2023, 6).next(), Month::new(2023, 7));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(Month::new(2023, 12) < Month::new(2024, 1));
        assert!(Month::new(2023, 5) < Month::new(2023, 6));
        assert!(Month::new(2023, 6) <= Month::new(2023, 6));
    }

    #[test]
    fn test_first_day() {
        let day = Month::new(2024, 2).first_day();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_resolution_parsed() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let resolved = MonthResolution::from_input(Some("2023-10"), today);
        assert_eq!(resolved, MonthResolution::Parsed(Month::new(2023, 10)));
        assert!(!resolved.is_fallback());
        assert_eq!(resolved.month(), Month::new(2023, 10));
    }

    #[test]
    fn test_resolution_falls_back_to_current_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        for input in [None, Some(""), Some("not-a-month"), Some("2024-13")] {
            let resolved = MonthResolution::from_input(input, today);
            assert!(resolved.is_fallback(), "input {:?}", input);
            assert_eq!(resolved.month(), Month::new(2024, 3));
        }
    }

    #[test]
    fn test_parse_or_epoch() {
        let resolved = MonthResolution::parse_or("garbage", Month::EPOCH);
        assert_eq!(resolved, MonthResolution::Fallback(Month::EPOCH));

        let resolved = MonthResolution::parse_or("2023-04", Month::EPOCH);
        assert_eq!(resolved, MonthResolution::Parsed(Month::new(2023, 4)));
    }

    #[test]
    fn test_window_around() {
        let window = MonthWindow::around(Month::new(2023, 10));
        assert_eq!(window.prev, Month::new(2023, 9));
        assert_eq!(window.target, Month::new(2023, 10));
        assert_eq!(window.next, Month::new(2023, 11));

        let window = MonthWindow::around(Month::new(2024, 1));
        assert_eq!(window.prev, Month::new(2023, 12));
        assert_eq!(window.next, Month::new(2024, 2));
    }

    #[test]
    fn test_serde_string_form() {
        let month = Month::new(2023, 10);
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2023-10\"");

        let parsed: Month = serde_json::from_str("\"2024-01\"").unwrap();
        assert_eq!(parsed, Month::new(2024, 1));

        assert!(serde_json::from_str::<Month>("\"2024-1\"").is_err());
    }
}
