// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use bilancio::application::BudgetService;
use bilancio::domain::User;
use chrono::NaiveDate;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(BudgetService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = BudgetService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_day(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: standard budget setup
pub struct StandardBudget;

impl StandardBudget {
    /// Create the default test user
    pub async fn create_user(service: &BudgetService) -> Result<User> {
        Ok(service.create_user("alice".into(), "€".into()).await?)
    }

    /// Create the test user plus Household and Leisure groups holding
    /// recurrent categories that start in 2023-01
    pub async fn create_with_categories(service: &BudgetService) -> Result<User> {
        let user = Self::create_user(service).await?;

        service
            .create_group(&user, "Household".into(), None)
            .await?;
        service.create_group(&user, "Leisure".into(), None).await?;

        service
            .create_category(
                &user,
                "Household",
                "Rent".into(),
                800.0,
                true,
                "2023-01",
                None,
                None,
            )
            .await?;
        service
            .create_category(
                &user,
                "Household",
                "Groceries".into(),
                300.0,
                true,
                "2023-01",
                None,
                None,
            )
            .await?;
        service
            .create_category(
                &user,
                "Leisure",
                "Dining".into(),
                150.0,
                true,
                "2023-01",
                None,
                None,
            )
            .await?;

        Ok(user)
    }
}
