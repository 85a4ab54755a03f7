use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, UserId};

pub type IncomeId = Uuid;

/// Money coming in (salary, refunds, ...). Incomes only feed the monthly
/// total; they are not categorized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub user_id: UserId,
    pub amount: Amount,
    pub description: Option<String>,
    pub received_at: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Income {
    pub fn new(user_id: UserId, amount: Amount, received_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount,
            description: None,
            received_at,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
