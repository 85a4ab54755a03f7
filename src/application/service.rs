use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::domain::{
    Amount, Category, CategoryId, DashboardView, Expense, ExpenseId, Group, Income, IncomeId,
    Month, MonthResolution, MonthWindow, User, assemble_dashboard,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations for the budget.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct BudgetService {
    repo: Repository,
}

/// Result of recording an expense
#[derive(Debug, Clone)]
pub struct ExpenseResult {
    pub expense: Expense,
    pub category_name: String,
}

impl BudgetService {
    /// Create a new budget service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Close the underlying connection pool. Any operation after this fails.
    pub async fn close(&self) {
        self.repo.close().await;
    }

    // ========================
    // User operations
    // ========================

    /// Create a new user.
    pub async fn create_user(&self, name: String, currency: String) -> Result<User, AppError> {
        // Check if user already exists
        if self.repo.get_user_by_name(&name).await?.is_some() {
            return Err(AppError::UserAlreadyExists(name));
        }

        let user = User::new(name, currency);
        self.repo.save_user(&user).await?;
        Ok(user)
    }

    /// Get a user by name.
    pub async fn get_user(&self, name: &str) -> Result<User, AppError> {
        self.repo
            .get_user_by_name(name)
            .await?
            .ok_or_else(|| AppError::UserNotFound(name.to_string()))
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.repo.list_users().await?)
    }

    // ========================
    // Group operations
    // ========================

    /// Create a new category group.
    pub async fn create_group(
        &self,
        user: &User,
        name: String,
        description: Option<String>,
    ) -> Result<Group, AppError> {
        // Check if group already exists for this user
        if self.repo.get_group_by_name(user.id, &name).await?.is_some() {
            return Err(AppError::GroupAlreadyExists(name));
        }

        let position = self.repo.next_group_position(user.id).await?;
        let mut group = Group::new(user.id, name, position);
        if let Some(desc) = description {
            group = group.with_description(desc);
        }

        self.repo.save_group(&group).await?;
        Ok(group)
    }

    /// Get a group by name.
    pub async fn get_group(&self, user: &User, name: &str) -> Result<Group, AppError> {
        self.repo
            .get_group_by_name(user.id, name)
            .await?
            .ok_or_else(|| AppError::GroupNotFound(name.to_string()))
    }

    /// List all groups for a user, in dashboard order.
    pub async fn list_groups(&self, user: &User) -> Result<Vec<Group>, AppError> {
        Ok(self.repo.list_groups(user.id).await?)
    }

    /// Delete a group together with its categories and their expenses.
    pub async fn delete_group(&self, user: &User, name: &str) -> Result<Group, AppError> {
        let group = self.get_group(user, name).await?;
        self.repo.delete_group(group.id).await?;
        Ok(group)
    }

    /// List every group in the database (used by exports).
    pub async fn list_all_groups(&self) -> Result<Vec<Group>, AppError> {
        Ok(self.repo.list_all_groups().await?)
    }

    // ========================
    // Category operations
    // ========================

    /// Create a new category inside a group.
    ///
    /// Months given here are validated strictly; the lenient fallback only
    /// applies when reading months back out of storage.
    pub async fn create_category(
        &self,
        user: &User,
        group_name: &str,
        name: String,
        budget: Amount,
        recurrent: bool,
        start_month: &str,
        end_month: Option<&str>,
        description: Option<String>,
    ) -> Result<Category, AppError> {
        // Validate amount
        if !budget.is_finite() || budget < 0.0 {
            return Err(AppError::InvalidAmount(
                "Budget must not be negative".to_string(),
            ));
        }

        let start = Month::parse(start_month)
            .ok_or_else(|| AppError::InvalidMonth(start_month.to_string()))?;
        let end = match end_month {
            Some(raw) => {
                let end =
                    Month::parse(raw).ok_or_else(|| AppError::InvalidMonth(raw.to_string()))?;
                if end < start {
                    return Err(AppError::EndBeforeStart {
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                Some(end)
            }
            None => None,
        };

        let group = self.get_group(user, group_name).await?;

        // Check if category already exists in this group
        if self
            .repo
            .get_category_by_name(group.id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::CategoryAlreadyExists {
                name,
                group: group.name,
            });
        }

        let position = self.repo.next_category_position(group.id).await?;
        let mut category = Category::new(group.id, name, budget, recurrent, start, position);
        if let Some(end) = end {
            category = category.with_end_month(end);
        }
        if let Some(desc) = description {
            category = category.with_description(desc);
        }

        self.repo.save_category(&category).await?;
        Ok(category)
    }

    /// List categories, either for one group or across all of them.
    pub async fn list_categories(
        &self,
        user: &User,
        group_name: Option<&str>,
    ) -> Result<Vec<Category>, AppError> {
        match group_name {
            Some(name) => {
                let group = self.get_group(user, name).await?;
                Ok(self.repo.list_categories_for_group(group.id).await?)
            }
            None => Ok(self.repo.list_categories(user.id).await?),
        }
    }

    /// Resolve a category by name, optionally scoped to a group.
    ///
    /// Without a group the name must be unique across the whole budget.
    pub async fn find_category(
        &self,
        user: &User,
        name: &str,
        group_name: Option<&str>,
    ) -> Result<Category, AppError> {
        if let Some(group_name) = group_name {
            let group = self.get_group(user, group_name).await?;
            return self
                .repo
                .get_category_by_name(group.id, name)
                .await?
                .ok_or_else(|| AppError::CategoryNotFound(name.to_string()));
        }

        let mut matches = self.repo.find_categories_by_name(user.id, name).await?;
        match matches.len() {
            0 => Err(AppError::CategoryNotFound(name.to_string())),
            1 => Ok(matches.remove(0).0),
            _ => Err(AppError::AmbiguousCategory {
                name: name.to_string(),
                groups: matches.into_iter().map(|(_, group)| group).collect(),
            }),
        }
    }

    /// Delete a category together with its expenses.
    pub async fn delete_category(
        &self,
        user: &User,
        name: &str,
        group_name: Option<&str>,
    ) -> Result<Category, AppError> {
        let category = self.find_category(user, name, group_name).await?;
        self.repo.delete_category(category.id).await?;
        Ok(category)
    }

    /// Get a map of category IDs to names (useful for display).
    pub async fn category_names(
        &self,
        user: &User,
    ) -> Result<HashMap<CategoryId, String>, AppError> {
        let categories = self.repo.list_categories(user.id).await?;
        Ok(categories.into_iter().map(|c| (c.id, c.name)).collect())
    }

    /// List every category in the database (used by exports).
    pub async fn list_all_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.repo.list_all_categories().await?)
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense against a category.
    pub async fn add_expense(
        &self,
        user: &User,
        category_name: &str,
        group_name: Option<&str>,
        amount: Amount,
        spent_at: NaiveDate,
        description: Option<String>,
        paid: bool,
    ) -> Result<ExpenseResult, AppError> {
        // Validate amount
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let category = self.find_category(user, category_name, group_name).await?;

        let mut expense = Expense::new(user.id, category.id, amount, spent_at);
        if let Some(desc) = description {
            expense = expense.with_description(desc);
        }
        if paid {
            expense.mark_paid(spent_at);
        }

        self.repo.save_expense(&expense).await?;

        Ok(ExpenseResult {
            expense,
            category_name: category.name,
        })
    }

    /// List the expenses of one month, newest first.
    pub async fn list_expenses(&self, user: &User, month: Month) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses_for_month(user.id, month).await?)
    }

    /// Mark an expense as paid.
    pub async fn pay_expense(
        &self,
        user: &User,
        id: ExpenseId,
        paid_at: NaiveDate,
    ) -> Result<Expense, AppError> {
        let mut expense = self
            .repo
            .get_expense(id)
            .await?
            .filter(|e| e.user_id == user.id)
            .ok_or_else(|| AppError::ExpenseNotFound(id.to_string()))?;

        if expense.paid {
            return Err(AppError::ExpenseAlreadyPaid(id.to_string()));
        }

        expense.mark_paid(paid_at);
        self.repo.mark_expense_paid(id, paid_at).await?;
        Ok(expense)
    }

    /// Delete an expense.
    pub async fn delete_expense(&self, user: &User, id: ExpenseId) -> Result<Expense, AppError> {
        let expense = self
            .repo
            .get_expense(id)
            .await?
            .filter(|e| e.user_id == user.id)
            .ok_or_else(|| AppError::ExpenseNotFound(id.to_string()))?;

        self.repo.delete_expense(id).await?;
        Ok(expense)
    }

    /// List every expense in the database (used by exports).
    pub async fn list_all_expenses(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_all_expenses().await?)
    }

    // ========================
    // Income operations
    // ========================

    /// Record a new income.
    pub async fn add_income(
        &self,
        user: &User,
        amount: Amount,
        received_at: NaiveDate,
        description: Option<String>,
    ) -> Result<Income, AppError> {
        // Validate amount
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        let mut income = Income::new(user.id, amount, received_at);
        if let Some(desc) = description {
            income = income.with_description(desc);
        }

        self.repo.save_income(&income).await?;
        Ok(income)
    }

    /// List the incomes of one month, newest first.
    pub async fn list_incomes(&self, user: &User, month: Month) -> Result<Vec<Income>, AppError> {
        Ok(self.repo.list_incomes_for_month(user.id, month).await?)
    }

    /// Delete an income.
    pub async fn delete_income(&self, user: &User, id: IncomeId) -> Result<Income, AppError> {
        let income = self
            .repo
            .get_income(id)
            .await?
            .filter(|i| i.user_id == user.id)
            .ok_or_else(|| AppError::IncomeNotFound(id.to_string()))?;

        self.repo.delete_income(id).await?;
        Ok(income)
    }

    /// List every income in the database (used by exports).
    pub async fn list_all_incomes(&self) -> Result<Vec<Income>, AppError> {
        Ok(self.repo.list_all_incomes().await?)
    }

    // ========================
    // Dashboard operations
    // ========================

    /// Build the dashboard for the given month input.
    ///
    /// The input may be absent or malformed; both resolve to the current
    /// system month instead of failing. The four reads run in sequence and
    /// the first failure aborts the build, so a partial dashboard is never
    /// returned.
    pub async fn month_dashboard(
        &self,
        user: &User,
        month: Option<&str>,
    ) -> Result<DashboardView, AppError> {
        let resolution = MonthResolution::from_input(month, Utc::now().date_naive());
        if resolution.is_fallback() {
            if let Some(input) = month {
                debug!(input, month = %resolution.month(), "month input not parsable, falling back to current month");
            }
        }
        let window = MonthWindow::around(resolution.month());

        let total_income = self
            .repo
            .month_income_total(user.id, window.target)
            .await
            .map_err(|e| AppError::upstream("income total", e))?;

        let total_expenses = self
            .repo
            .month_expense_total(user.id, window.target)
            .await
            .map_err(|e| AppError::upstream("expense total", e))?;

        let groups = self
            .repo
            .list_groups_with_categories(user.id)
            .await
            .map_err(|e| AppError::upstream("group list", e))?;

        let expenses = self
            .repo
            .list_expenses_for_month(user.id, window.target)
            .await
            .map_err(|e| AppError::upstream("expense list", e))?;

        Ok(assemble_dashboard(
            window,
            &user.currency,
            total_income,
            total_expenses,
            &groups,
            &expenses,
        ))
    }
}
