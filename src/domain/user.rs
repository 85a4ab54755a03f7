use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// Owner of a budget: every group, expense and income belongs to a user.
/// The currency symbol travels with the user and ends up on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, currency: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            currency,
            created_at: Utc::now(),
        }
    }
}
