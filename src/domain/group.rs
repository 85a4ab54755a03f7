use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, UserId};

pub type GroupId = Uuid;

/// A display grouping of categories ("Household", "Leisure", ...).
/// Groups render in `position` order, independent of their categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(user_id: UserId, name: String, position: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            description: None,
            position,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A group with its categories attached, in storage order. This is the shape
/// the dashboard receives from the group listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupWithCategories {
    pub group: Group,
    pub categories: Vec<Category>,
}
