use anyhow::Result;
use chrono::NaiveDate;
use std::io::Read;
use tracing::debug;

use crate::application::{AppError, BudgetService};
use crate::domain::{User, parse_amount};

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub skip_unknown_categories: bool,
    pub validate_only: bool,
}

/// Importer for loading data into the budget
pub struct Importer<'a> {
    service: &'a BudgetService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a BudgetService) -> Self {
        Self { service }
    }

    /// Import expenses from CSV
    ///
    /// Expected columns: category, amount, description, spent_at, paid,
    /// paid_at. A paid row keeps its paid_at date; when the column is
    /// absent or empty the spend date is used.
    pub async fn import_expenses_csv<R: Read>(
        &self,
        user: &User,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut skipped = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            // Parse CSV record
            let category_name = record.get(0).unwrap_or("");
            let amount_str = record.get(1).unwrap_or("");
            let description = record.get(2).and_then(|s| {
                if s.is_empty() {
                    None
                } else {
                    Some(s.to_string())
                }
            });
            let spent_at_str = record.get(3).unwrap_or("");
            let paid_str = record.get(4).unwrap_or("");
            let paid_at_str = record.get(5).unwrap_or("");

            // Validate and parse
            let amount = match parse_amount(amount_str) {
                Ok(a) => a,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("amount".to_string()),
                        error: format!("Invalid amount: {}", e),
                    });
                    continue;
                }
            };

            let spent_at = match NaiveDate::parse_from_str(spent_at_str, "%Y-%m-%d") {
                Ok(d) => d,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("spent_at".to_string()),
                        error: format!("Invalid date: {}", e),
                    });
                    continue;
                }
            };

            let paid = match parse_flag(paid_str) {
                Ok(p) => p,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("paid".to_string()),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let paid_on = if !paid {
                None
            } else if paid_at_str.is_empty() {
                Some(spent_at)
            } else {
                match NaiveDate::parse_from_str(paid_at_str, "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(e) => {
                        errors.push(ImportError {
                            line,
                            field: Some("paid_at".to_string()),
                            error: format!("Invalid date: {}", e),
                        });
                        continue;
                    }
                }
            };

            // Resolve the category up front so unknown names can be skipped
            match self.service.find_category(user, category_name, None).await {
                Ok(_) => {}
                Err(AppError::CategoryNotFound(_)) if options.skip_unknown_categories => {
                    debug!(line, category = category_name, "skipping row with unknown category");
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("category".to_string()),
                        error: e.to_string(),
                    });
                    continue;
                }
            }

            // Skip actual import if dry run or validate only
            if options.dry_run || options.validate_only {
                imported += 1;
                continue;
            }

            // Import the expense, then settle it on its recorded date
            let result = match self
                .service
                .add_expense(user, category_name, None, amount, spent_at, description, false)
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("Expense creation failed: {}", e),
                    });
                    continue;
                }
            };

            if let Some(paid_on) = paid_on {
                if let Err(e) = self
                    .service
                    .pay_expense(user, result.expense.id, paid_on)
                    .await
                {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("Could not mark expense paid: {}", e),
                    });
                    continue;
                }
            }

            imported += 1;
        }

        Ok(ImportResult {
            imported,
            skipped,
            errors,
        })
    }
}

// Helper function to parse the paid flag
fn parse_flag(s: &str) -> Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        other => anyhow::bail!("Invalid paid flag: {}", other),
    }
}
