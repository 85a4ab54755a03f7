use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Group already exists: {0}")]
    GroupAlreadyExists(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category already exists in group {group}: {name}")]
    CategoryAlreadyExists { name: String, group: String },

    #[error("Category '{name}' exists in more than one group: {}", .groups.join(", "))]
    AmbiguousCategory { name: String, groups: Vec<String> },

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Expense already paid: {0}")]
    ExpenseAlreadyPaid(String),

    #[error("Income not found: {0}")]
    IncomeNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),

    #[error("Category end month {end} precedes start month {start}")]
    EndBeforeStart { start: String, end: String },

    #[error("Dashboard query failed ({query}): {source}")]
    UpstreamQuery {
        query: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl AppError {
    pub(crate) fn upstream(query: &'static str, source: anyhow::Error) -> Self {
        Self::UpstreamQuery { query, source }
    }
}
