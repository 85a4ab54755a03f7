use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::BudgetService;
use crate::domain::{Category, Expense, Group, Income, Month, User};

/// Database snapshot for full export/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
}

/// Exporter for converting budget data to various formats
pub struct Exporter<'a> {
    service: &'a BudgetService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BudgetService) -> Self {
        Self { service }
    }

    /// Export one month of expenses to CSV format
    pub async fn export_expenses_csv<W: Write>(
        &self,
        user: &User,
        month: Month,
        writer: W,
    ) -> Result<usize> {
        let expenses = self.service.list_expenses(user, month).await?;
        let names = self.service.category_names(user).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(&[
            "category",
            "amount",
            "description",
            "spent_at",
            "paid",
            "paid_at",
        ])?;

        let mut count = 0;
        for expense in &expenses {
            let category = names
                .get(&expense.category_id)
                .cloned()
                .unwrap_or_default();

            csv_writer.write_record(&[
                category,
                expense.amount.to_string(),
                expense.description.clone().unwrap_or_default(),
                expense.spent_at.format("%Y-%m-%d").to_string(),
                expense.paid.to_string(),
                expense
                    .paid_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export one month of incomes to CSV format
    pub async fn export_incomes_csv<W: Write>(
        &self,
        user: &User,
        month: Month,
        writer: W,
    ) -> Result<usize> {
        let incomes = self.service.list_incomes(user, month).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(&["amount", "description", "received_at"])?;

        let mut count = 0;
        for income in &incomes {
            csv_writer.write_record(&[
                income.amount.to_string(),
                income.description.clone().unwrap_or_default(),
                income.received_at.format("%Y-%m-%d").to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export full database as JSON snapshot
    pub async fn export_full_json<W: Write>(&self, mut writer: W) -> Result<DatabaseSnapshot> {
        let users = self.service.list_users().await?;
        let groups = self.service.list_all_groups().await?;
        let categories = self.service.list_all_categories().await?;
        let expenses = self.service.list_all_expenses().await?;
        let incomes = self.service.list_all_incomes().await?;

        let snapshot = DatabaseSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            users,
            groups,
            categories,
            expenses,
            incomes,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}
