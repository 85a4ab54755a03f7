use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, GroupId, Month, MonthResolution};

pub type CategoryId = Uuid;

/// A budget line within a group. `start_month` and `end_month` are stored as
/// raw "YYYY-MM" strings; unparsable values degrade to the epoch month in
/// `is_active_in` instead of erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub group_id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub budget: Amount,
    pub recurrent: bool,
    pub start_month: String,
    pub end_month: Option<String>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        group_id: GroupId,
        name: String,
        budget: Amount,
        recurrent: bool,
        start_month: Month,
        position: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            name,
            description: None,
            budget,
            recurrent,
            start_month: start_month.to_string(),
            end_month: None,
            position,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_end_month(mut self, end_month: Month) -> Self {
        self.end_month = Some(end_month.to_string());
        self
    }

    /// Whether this category appears on the dashboard for `target`.
    ///
    /// Non-recurrent categories are active only in their exact start month.
    /// Recurrent categories are active from the start month onward, bounded
    /// by the end month when one is set, both ends inclusive. An unparsable
    /// start month falls back to the epoch month, so a recurrent category
    /// with a broken start and no end is active in every month since 1970-01;
    /// an unparsable end month falls back the same way, which deactivates the
    /// category for any target after the epoch.
    pub fn is_active_in(&self, target: Month) -> bool {
        let start = MonthResolution::parse_or(&self.start_month, Month::EPOCH).month();

        if !self.recurrent {
            return start == target;
        }

        if target < start {
            return false;
        }

        match &self.end_month {
            Some(end) => target <= MonthResolution::parse_or(end, Month::EPOCH).month(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(recurrent: bool, start_month: &str, end_month: Option<&str>) -> Category {
        let mut category = Category::new(
            Uuid::new_v4(),
            "Groceries".to_string(),
            300.0,
            recurrent,
            Month::new(2023, 1),
            0,
        );
        category.start_month = start_month.to_string();
        category.end_month = end_month.map(str::to_string);
        category
    }

    #[test]
    fn test_non_recurrent_active_only_in_start_month() {
        let cat = category(false, "2023-10", None);

        assert!(cat.is_active_in(Month::new(2023, 10)));
        assert!(!cat.is_active_in(Month::new(2023, 9)));
        assert!(!cat.is_active_in(Month::new(2023, 11)));
        assert!(!cat.is_active_in(Month::new(2024, 10)));
    }

    #[test]
    fn test_recurrent_bounded_range_inclusive() {
        let cat = category(true, "2023-01", Some("2023-06"));

        for month in 1..=6 {
            assert!(cat.is_active_in(Month::new(2023, month)), "month {month}");
        }
        assert!(!cat.is_active_in(Month::new(2022, 12)));
        assert!(!cat.is_active_in(Month::new(2023, 7)));
    }

    #[test]
    fn test_recurrent_open_ended() {
        let cat = category(true, "2023-01", None);

        assert!(cat.is_active_in(Month::new(2023, 1)));
        assert!(cat.is_active_in(Month::new(2023, 2)));
        assert!(cat.is_active_in(Month::new(2031, 12)));
        assert!(!cat.is_active_in(Month::new(2022, 12)));
    }

    #[test]
    fn test_unparsable_start_falls_back_to_epoch() {
        // Recurrent with a broken start and no end: active everywhere since 1970-01.
        let cat = category(true, "not-a-month", None);
        assert!(cat.is_active_in(Month::EPOCH));
        assert!(cat.is_active_in(Month::new(2023, 10)));
        assert!(cat.is_active_in(Month::new(2099, 1)));
        assert!(!cat.is_active_in(Month::new(1969, 12)));

        // Non-recurrent: the epoch fallback only matches a 1970-01 target.
        let cat = category(false, "not-a-month", None);
        assert!(cat.is_active_in(Month::EPOCH));
        assert!(!cat.is_active_in(Month::new(2023, 10)));
    }

    #[test]
    fn test_unparsable_end_deactivates_after_epoch() {
        let cat = category(true, "2023-01", Some("junk"));

        assert!(!cat.is_active_in(Month::new(2023, 1)));
        assert!(!cat.is_active_in(Month::new(2023, 6)));
        assert!(!cat.is_active_in(Month::EPOCH)); // before the start month
    }

    #[test]
    fn test_builders_store_canonical_strings() {
        let cat = Category::new(
            Uuid::new_v4(),
            "Rent".to_string(),
            800.0,
            true,
            Month::new(2023, 4),
            2,
        )
        .with_end_month(Month::new(2024, 4))
        .with_description("apartment");

        assert_eq!(cat.start_month, "2023-04");
        assert_eq!(cat.end_month.as_deref(), Some("2024-04"));
        assert_eq!(cat.description.as_deref(), Some("apartment"));
    }
}
