use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    Amount, Category, CategoryId, Expense, ExpenseId, Group, GroupId, GroupWithCategories, Income,
    IncomeId, Month, User, UserId,
};

use super::{MIGRATION_001_INITIAL, MIGRATION_002_RECORDS};

/// Repository for persisting and querying users, groups, categories and
/// their monthly records.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        debug!("running database migrations");

        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        sqlx::query(MIGRATION_002_RECORDS)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 002")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Close the connection pool. Queries issued afterwards fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================
    // User operations
    // ========================

    /// Save a new user to the database.
    pub async fn save_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, currency, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.currency)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save user")?;
        Ok(())
    }

    /// Get a user by name.
    pub async fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, currency, created_at
            FROM users
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, currency, created_at
            FROM users
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list users")?;

        rows.iter().map(Self::row_to_user).collect()
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(User {
            id: Uuid::parse_str(&id_str).context("Invalid user ID")?,
            name: row.get("name"),
            currency: row.get("currency"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Group operations
    // ========================

    /// Save a new category group to the database.
    pub async fn save_group(&self, group: &Group) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO category_groups (id, user_id, name, description, position, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(group.id.to_string())
        .bind(group.user_id.to_string())
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.position)
        .bind(group.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save group")?;
        Ok(())
    }

    /// Get a group by name for a user.
    pub async fn get_group_by_name(&self, user_id: UserId, name: &str) -> Result<Option<Group>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, description, position, created_at
            FROM category_groups
            WHERE user_id = ? AND name = ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch group by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_group(&row)?)),
            None => Ok(None),
        }
    }

    /// List the groups of a user, in display order.
    pub async fn list_groups(&self, user_id: UserId) -> Result<Vec<Group>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, description, position, created_at
            FROM category_groups
            WHERE user_id = ?
            ORDER BY position, created_at
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list groups")?;

        rows.iter().map(Self::row_to_group).collect()
    }

    /// List every group in the database (used by exports).
    pub async fn list_all_groups(&self) -> Result<Vec<Group>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, description, position, created_at
            FROM category_groups
            ORDER BY position, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list groups")?;

        rows.iter().map(Self::row_to_group).collect()
    }

    /// Next free display position for a new group.
    pub async fn next_group_position(&self, user_id: UserId) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(MAX(position) + 1, 0) as next
            FROM category_groups
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .context("Failed to get next group position")?;

        Ok(row.get("next"))
    }

    /// Delete a group, its categories and their expenses.
    /// SQLite does not enforce foreign keys by default, so cascade by hand.
    pub async fn delete_group(&self, id: GroupId) -> Result<()> {
        let id_str = id.to_string();

        sqlx::query(
            "DELETE FROM expenses WHERE category_id IN (SELECT id FROM categories WHERE group_id = ?)",
        )
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .context("Failed to delete group expenses")?;

        sqlx::query("DELETE FROM categories WHERE group_id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .context("Failed to delete group categories")?;

        sqlx::query("DELETE FROM category_groups WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .context("Failed to delete group")?;

        Ok(())
    }

    /// List the groups of a user with their categories attached, both in
    /// display order. Two ordered queries joined in memory; the dashboard
    /// relies on this ordering, map lookups never drive it.
    pub async fn list_groups_with_categories(
        &self,
        user_id: UserId,
    ) -> Result<Vec<GroupWithCategories>> {
        let groups = self.list_groups(user_id).await?;

        let rows = sqlx::query(
            r#"
            SELECT c.id, c.group_id, c.name, c.description, c.budget, c.recurrent, c.start_month, c.end_month, c.position, c.created_at
            FROM categories c
            JOIN category_groups g ON g.id = c.group_id
            WHERE g.user_id = ?
            ORDER BY c.position, c.created_at
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories for groups")?;

        let mut by_group: std::collections::HashMap<GroupId, Vec<Category>> =
            std::collections::HashMap::new();
        for row in &rows {
            let category = Self::row_to_category(row)?;
            by_group
                .entry(category.group_id)
                .or_default()
                .push(category);
        }

        Ok(groups
            .into_iter()
            .map(|group| {
                let categories = by_group.remove(&group.id).unwrap_or_default();
                GroupWithCategories { group, categories }
            })
            .collect())
    }

    fn row_to_group(row: &sqlx::sqlite::SqliteRow) -> Result<Group> {
        let id_str: String = row.get("id");
        let user_id_str: String = row.get("user_id");
        let created_at_str: String = row.get("created_at");

        Ok(Group {
            id: Uuid::parse_str(&id_str).context("Invalid group ID")?,
            user_id: Uuid::parse_str(&user_id_str).context("Invalid user ID")?,
            name: row.get("name"),
            description: row.get("description"),
            position: row.get("position"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Category operations
    // ========================

    /// Save a new category to the database.
    pub async fn save_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, group_id, name, description, budget, recurrent, start_month, end_month, position, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(category.id.to_string())
        .bind(category.group_id.to_string())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.budget)
        .bind(category.recurrent)
        .bind(&category.start_month)
        .bind(&category.end_month)
        .bind(category.position)
        .bind(category.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save category")?;
        Ok(())
    }

    /// Get a category by name within a group.
    pub async fn get_category_by_name(
        &self,
        group_id: GroupId,
        name: &str,
    ) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, group_id, name, description, budget, recurrent, start_month, end_month, position, created_at
            FROM categories
            WHERE group_id = ? AND name = ?
            "#,
        )
        .bind(group_id.to_string())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch category by name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    /// List all categories of a user across groups, in display order.
    pub async fn list_categories(&self, user_id: UserId) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.group_id, c.name, c.description, c.budget, c.recurrent, c.start_month, c.end_month, c.position, c.created_at
            FROM categories c
            JOIN category_groups g ON g.id = c.group_id
            WHERE g.user_id = ?
            ORDER BY g.position, g.created_at, c.position, c.created_at
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories")?;

        rows.iter().map(Self::row_to_category).collect()
    }

    /// List the categories of one group, in display order.
    pub async fn list_categories_for_group(&self, group_id: GroupId) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_id, name, description, budget, recurrent, start_month, end_month, position, created_at
            FROM categories
            WHERE group_id = ?
            ORDER BY position, created_at
            "#,
        )
        .bind(group_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories for group")?;

        rows.iter().map(Self::row_to_category).collect()
    }

    /// List every category in the database (used by exports).
    pub async fn list_all_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_id, name, description, budget, recurrent, start_month, end_month, position, created_at
            FROM categories
            ORDER BY position, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories")?;

        rows.iter().map(Self::row_to_category).collect()
    }

    /// Find categories by name across all groups of a user.
    /// Returns each match together with its group name, in display order.
    pub async fn find_categories_by_name(
        &self,
        user_id: UserId,
        name: &str,
    ) -> Result<Vec<(Category, String)>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.group_id, c.name, c.description, c.budget, c.recurrent, c.start_month, c.end_month, c.position, c.created_at, g.name as group_name
            FROM categories c
            JOIN category_groups g ON g.id = c.group_id
            WHERE g.user_id = ? AND c.name = ?
            ORDER BY g.position, g.created_at
            "#,
        )
        .bind(user_id.to_string())
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .context("Failed to find categories by name")?;

        let mut matches = Vec::new();
        for row in &rows {
            let category = Self::row_to_category(row)?;
            let group_name: String = row.get("group_name");
            matches.push((category, group_name));
        }

        Ok(matches)
    }

    /// Next free display position for a new category in a group.
    pub async fn next_category_position(&self, group_id: GroupId) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(MAX(position) + 1, 0) as next
            FROM categories
            WHERE group_id = ?
            "#,
        )
        .bind(group_id.to_string())
        .fetch_one(&self.pool)
        .await
        .context("Failed to get next category position")?;

        Ok(row.get("next"))
    }

    /// Delete a category and its expenses.
    pub async fn delete_category(&self, id: CategoryId) -> Result<()> {
        let id_str = id.to_string();

        sqlx::query("DELETE FROM expenses WHERE category_id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .context("Failed to delete category expenses")?;

        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .context("Failed to delete category")?;

        Ok(())
    }

    fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Result<Category> {
        let id_str: String = row.get("id");
        let group_id_str: String = row.get("group_id");
        let created_at_str: String = row.get("created_at");

        Ok(Category {
            id: Uuid::parse_str(&id_str).context("Invalid category ID")?,
            group_id: Uuid::parse_str(&group_id_str).context("Invalid group ID")?,
            name: row.get("name"),
            description: row.get("description"),
            budget: row.get("budget"),
            recurrent: row.get::<i32, _>("recurrent") != 0,
            start_month: row.get("start_month"),
            end_month: row.get("end_month"),
            position: row.get("position"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense to the database.
    pub async fn save_expense(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (id, user_id, category_id, amount, description, spent_at, paid, paid_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id.to_string())
        .bind(expense.user_id.to_string())
        .bind(expense.category_id.to_string())
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(expense.spent_at.format("%Y-%m-%d").to_string())
        .bind(expense.paid)
        .bind(expense.paid_at.map(|d| d.format("%Y-%m-%d").to_string()))
        .bind(expense.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save expense")?;
        Ok(())
    }

    /// Get an expense by ID.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, category_id, amount, description, spent_at, paid, paid_at, created_at
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch expense")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_expense(&row)?)),
            None => Ok(None),
        }
    }

    /// Half-open ISO date range covering one month. Dates are stored as
    /// YYYY-MM-DD text, so lexicographic comparison matches chronology.
    fn month_bounds(month: Month) -> (String, String) {
        let from = month.first_day().format("%Y-%m-%d").to_string();
        let to = month.next().first_day().format("%Y-%m-%d").to_string();
        (from, to)
    }

    /// List the expenses of a user for one month, newest first.
    pub async fn list_expenses_for_month(
        &self,
        user_id: UserId,
        month: Month,
    ) -> Result<Vec<Expense>> {
        let (from, to) = Self::month_bounds(month);

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category_id, amount, description, spent_at, paid, paid_at, created_at
            FROM expenses
            WHERE user_id = ? AND spent_at >= ? AND spent_at < ?
            ORDER BY spent_at DESC, created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .bind(&from)
        .bind(&to)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses for month")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// List every expense in the database (used by exports).
    pub async fn list_all_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category_id, amount, description, spent_at, paid, paid_at, created_at
            FROM expenses
            ORDER BY spent_at, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Sum the expenses of a user for one month using SQL aggregation.
    /// Returns the raw float sum; rounding happens at the presentation edge.
    pub async fn month_expense_total(&self, user_id: UserId, month: Month) -> Result<Amount> {
        let (from, to) = Self::month_bounds(month);

        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount), 0.0) as total
            FROM expenses
            WHERE user_id = ? AND spent_at >= ? AND spent_at < ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(&from)
        .bind(&to)
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum expenses for month")?;

        Ok(row.get("total"))
    }

    /// Mark an expense as paid on the given date.
    pub async fn mark_expense_paid(&self, id: ExpenseId, paid_at: NaiveDate) -> Result<()> {
        sqlx::query("UPDATE expenses SET paid = 1, paid_at = ? WHERE id = ?")
            .bind(paid_at.format("%Y-%m-%d").to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to mark expense paid")?;
        Ok(())
    }

    /// Delete an expense.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<()> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;
        Ok(())
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let id_str: String = row.get("id");
        let user_id_str: String = row.get("user_id");
        let category_id_str: String = row.get("category_id");
        let spent_at_str: String = row.get("spent_at");
        let paid_at_str: Option<String> = row.get("paid_at");
        let created_at_str: String = row.get("created_at");

        Ok(Expense {
            id: Uuid::parse_str(&id_str).context("Invalid expense ID")?,
            user_id: Uuid::parse_str(&user_id_str).context("Invalid user ID")?,
            category_id: Uuid::parse_str(&category_id_str).context("Invalid category ID")?,
            amount: row.get("amount"),
            description: row.get("description"),
            spent_at: NaiveDate::parse_from_str(&spent_at_str, "%Y-%m-%d")
                .context("Invalid spent_at date")?,
            paid: row.get::<i32, _>("paid") != 0,
            paid_at: paid_at_str
                .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
                .transpose()
                .context("Invalid paid_at date")?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Income operations
    // ========================

    /// Save a new income to the database.
    pub async fn save_income(&self, income: &Income) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO incomes (id, user_id, amount, description, received_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(income.id.to_string())
        .bind(income.user_id.to_string())
        .bind(income.amount)
        .bind(&income.description)
        .bind(income.received_at.format("%Y-%m-%d").to_string())
        .bind(income.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save income")?;
        Ok(())
    }

    /// Get an income by ID.
    pub async fn get_income(&self, id: IncomeId) -> Result<Option<Income>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, amount, description, received_at, created_at
            FROM incomes
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch income")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_income(&row)?)),
            None => Ok(None),
        }
    }

    /// List the incomes of a user for one month, newest first.
    pub async fn list_incomes_for_month(
        &self,
        user_id: UserId,
        month: Month,
    ) -> Result<Vec<Income>> {
        let (from, to) = Self::month_bounds(month);

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, description, received_at, created_at
            FROM incomes
            WHERE user_id = ? AND received_at >= ? AND received_at < ?
            ORDER BY received_at DESC, created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .bind(&from)
        .bind(&to)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list incomes for month")?;

        rows.iter().map(Self::row_to_income).collect()
    }

    /// List every income in the database (used by exports).
    pub async fn list_all_incomes(&self) -> Result<Vec<Income>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, description, received_at, created_at
            FROM incomes
            ORDER BY received_at, created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list incomes")?;

        rows.iter().map(Self::row_to_income).collect()
    }

    /// Sum the incomes of a user for one month using SQL aggregation.
    /// Returns the raw float sum; rounding happens at the presentation edge.
    pub async fn month_income_total(&self, user_id: UserId, month: Month) -> Result<Amount> {
        let (from, to) = Self::month_bounds(month);

        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount), 0.0) as total
            FROM incomes
            WHERE user_id = ? AND received_at >= ? AND received_at < ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(&from)
        .bind(&to)
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum incomes for month")?;

        Ok(row.get("total"))
    }

    /// Delete an income.
    pub async fn delete_income(&self, id: IncomeId) -> Result<()> {
        sqlx::query("DELETE FROM incomes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete income")?;
        Ok(())
    }

    fn row_to_income(row: &sqlx::sqlite::SqliteRow) -> Result<Income> {
        let id_str: String = row.get("id");
        let user_id_str: String = row.get("user_id");
        let received_at_str: String = row.get("received_at");
        let created_at_str: String = row.get("created_at");

        Ok(Income {
            id: Uuid::parse_str(&id_str).context("Invalid income ID")?,
            user_id: Uuid::parse_str(&user_id_str).context("Invalid user ID")?,
            amount: row.get("amount"),
            description: row.get("description"),
            received_at: NaiveDate::parse_from_str(&received_at_str, "%Y-%m-%d")
                .context("Invalid received_at date")?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
