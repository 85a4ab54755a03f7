use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, CategoryId, UserId};

pub type ExpenseId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paid" => Some(PaymentStatus::Paid),
            "unpaid" => Some(PaymentStatus::Unpaid),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single spend line. `paid_at` is present iff `paid` is true; the pair is
/// only ever set together through `mark_paid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub category_id: CategoryId,
    pub amount: Amount,
    pub description: Option<String>,
    pub spent_at: NaiveDate,
    pub paid: bool,
    pub paid_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(user_id: UserId, category_id: CategoryId, amount: Amount, spent_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            amount,
            description: None,
            spent_at,
            paid: false,
            paid_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn mark_paid(&mut self, paid_at: NaiveDate) {
        self.paid = true;
        self.paid_at = Some(paid_at);
    }

    pub fn payment_status(&self) -> PaymentStatus {
        if self.paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_payment_status_roundtrip() {
        for status in [PaymentStatus::Paid, PaymentStatus::Unpaid] {
            let s = status.as_str();
            let parsed = PaymentStatus::from_str(s).unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_new_expense_is_unpaid() {
        let expense = Expense::new(Uuid::new_v4(), Uuid::new_v4(), 45.9, day("2023-10-05"));

        assert!(!expense.paid);
        assert_eq!(expense.paid_at, None);
        assert_eq!(expense.payment_status(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_mark_paid_sets_flag_and_date() {
        let mut expense = Expense::new(Uuid::new_v4(), Uuid::new_v4(), 45.9, day("2023-10-05"));
        expense.mark_paid(day("2023-10-07"));

        assert!(expense.paid);
        assert_eq!(expense.paid_at, Some(day("2023-10-07")));
        assert_eq!(expense.payment_status(), PaymentStatus::Paid);
    }
}
