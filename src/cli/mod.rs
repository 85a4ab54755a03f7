use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::BudgetService;
use crate::domain::{
    DashboardView, Month, MonthResolution, User, format_amount, parse_amount,
};

/// Bilancio - Household Budget Dashboard
#[derive(Parser)]
#[command(name = "bilancio")]
#[command(about = "A local-first household budgeting tool with a month-scoped dashboard")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "bilancio.db")]
    pub database: String,

    /// Budget owner to operate on
    #[arg(short, long, default_value = "default")]
    pub user: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database with a default user
    Init {
        /// Currency symbol for the default user
        #[arg(short, long, default_value = "€")]
        currency: String,
    },

    /// Show the monthly dashboard
    Dashboard {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output format: table, json
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Category group management commands
    #[command(subcommand)]
    Group(GroupCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Export data to CSV or JSON
    Export {
        /// What to export: expenses, incomes, full
        export_type: String,

        /// Month to export records for (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import data from CSV
    Import {
        /// What to import: expenses
        import_type: String,

        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,

        /// Skip rows whose category does not exist
        #[arg(long)]
        skip_unknown: bool,

        /// Validate without importing
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new user
    Create {
        /// User name (must be unique)
        name: String,

        /// Currency symbol shown on the dashboard
        #[arg(short, long, default_value = "€")]
        currency: String,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a new category group
    Create {
        /// Group name (must be unique per user)
        name: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all groups
    List,

    /// Delete a group, its categories and their expenses
    Delete {
        /// Group name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category inside a group
    Create {
        /// Category name (must be unique per group)
        name: String,

        /// Group to put the category in
        #[arg(short, long)]
        group: String,

        /// Monthly budget (e.g., "300" or "300.00")
        #[arg(short, long, default_value = "0")]
        budget: String,

        /// Repeat every month instead of applying to a single one
        #[arg(short, long)]
        recurrent: bool,

        /// First month the category applies to (YYYY-MM, defaults to the current month)
        #[arg(long)]
        start: Option<String>,

        /// Last month a recurrent category applies to (YYYY-MM)
        #[arg(long)]
        end: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// List categories
    List {
        /// Only categories of this group
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Delete a category and its expenses
    Delete {
        /// Category name
        name: String,

        /// Group the category belongs to (needed when the name is ambiguous)
        #[arg(short, long)]
        group: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "45.90" or "45")
        amount: String,

        /// Category to book the expense under
        #[arg(short, long)]
        category: String,

        /// Group the category belongs to (needed when the name is ambiguous)
        #[arg(short, long)]
        group: Option<String>,

        /// Description of the expense
        #[arg(long)]
        description: Option<String>,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Mark the expense as already paid
        #[arg(long)]
        paid: bool,
    },

    /// List the expenses of a month
    List {
        /// Month to list (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Mark an expense as paid
    Pay {
        /// Expense ID
        id: String,

        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record a new income
    Add {
        /// Amount received (e.g., "1800" or "1800.00")
        amount: String,

        /// Description of the income
        #[arg(long)]
        description: Option<String>,

        /// Date of the income (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List the incomes of a month
    List {
        /// Month to list (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete an income
    Delete {
        /// Income ID
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init { currency } => {
                let service = BudgetService::init(&self.database).await?;
                service.create_user(self.user.clone(), currency).await?;
                println!("Database initialized: {}", self.database);
                println!("Created user: {}", self.user);
            }

            Commands::Dashboard { month, format } => {
                let service = BudgetService::connect(&self.database).await?;
                let user = service.get_user(&self.user).await?;
                run_dashboard_command(&service, &user, month.as_deref(), &format, self.verbose)
                    .await?;
            }

            Commands::User(user_cmd) => {
                let service = BudgetService::connect(&self.database).await?;
                run_user_command(&service, user_cmd).await?;
            }

            Commands::Group(group_cmd) => {
                let service = BudgetService::connect(&self.database).await?;
                let user = service.get_user(&self.user).await?;
                run_group_command(&service, &user, group_cmd).await?;
            }

            Commands::Category(category_cmd) => {
                let service = BudgetService::connect(&self.database).await?;
                let user = service.get_user(&self.user).await?;
                run_category_command(&service, &user, category_cmd).await?;
            }

            Commands::Expense(expense_cmd) => {
                let service = BudgetService::connect(&self.database).await?;
                let user = service.get_user(&self.user).await?;
                run_expense_command(&service, &user, expense_cmd).await?;
            }

            Commands::Income(income_cmd) => {
                let service = BudgetService::connect(&self.database).await?;
                let user = service.get_user(&self.user).await?;
                run_income_command(&service, &user, income_cmd).await?;
            }

            Commands::Export {
                export_type,
                month,
                output,
            } => {
                let service = BudgetService::connect(&self.database).await?;
                let user = service.get_user(&self.user).await?;
                run_export_command(
                    &service,
                    &user,
                    &export_type,
                    month.as_deref(),
                    output.as_deref(),
                )
                .await?;
            }

            Commands::Import {
                import_type,
                input,
                dry_run,
                skip_unknown,
                validate,
            } => {
                let service = BudgetService::connect(&self.database).await?;
                let user = service.get_user(&self.user).await?;
                run_import_command(
                    &service,
                    &user,
                    &import_type,
                    input.as_deref(),
                    dry_run,
                    skip_unknown,
                    validate,
                )
                .await?;
            }
        }

        Ok(())
    }
}

async fn run_dashboard_command(
    service: &BudgetService,
    user: &User,
    month: Option<&str>,
    format: &str,
    verbose: bool,
) -> Result<()> {
    let view = service.month_dashboard(user, month).await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        _ => {
            // Table format
            print_dashboard_table(&view, verbose);
        }
    }

    Ok(())
}

fn print_dashboard_table(view: &DashboardView, verbose: bool) {
    println!("Dashboard for {}", view.window.target);
    println!(
        "(previous: {}, next: {})",
        view.window.prev, view.window.next
    );
    println!();
    println!(
        "Income:   {:>12} {}",
        format_amount(view.total_income),
        view.currency
    );
    println!(
        "Expenses: {:>12} {}",
        format_amount(view.total_expenses),
        view.currency
    );
    println!("{}", "-".repeat(24));
    println!(
        "Balance:  {:>12} {}",
        format_amount(view.balance),
        view.currency
    );

    for group in &view.groups {
        println!();
        println!("{}", group.name);
        println!("{}", "=".repeat(group.name.chars().count()));

        if group.categories.is_empty() {
            println!("  (no active categories this month)");
            continue;
        }

        println!("  {:<20} {:>12} {:>12}", "CATEGORY", "BUDGET", "SPENT");
        println!("  {}", "-".repeat(46));

        for category in &group.categories {
            println!(
                "  {:<20} {:>12} {:>12}",
                truncate(&category.name, 20),
                format_amount(category.budget),
                format_amount(category.spent)
            );

            if verbose {
                for expense in &category.expenses {
                    println!(
                        "    {:<10} {:>10} {:<6} {}",
                        expense.spent_on,
                        format_amount(expense.amount),
                        expense.status,
                        truncate(&expense.description, 30)
                    );
                }
            }
        }
    }
}

async fn run_user_command(service: &BudgetService, cmd: UserCommands) -> Result<()> {
    match cmd {
        UserCommands::Create { name, currency } => {
            let user = service.create_user(name, currency).await?;
            println!("Created user: {} ({})", user.name, user.currency);
        }

        UserCommands::List => {
            let users = service.list_users().await?;
            if users.is_empty() {
                println!("No users found.");
            } else {
                println!("{:<20} {:<8}", "NAME", "CURRENCY");
                println!("{}", "-".repeat(30));
                for user in users {
                    println!("{:<20} {:<8}", user.name, user.currency);
                }
            }
        }
    }
    Ok(())
}

async fn run_group_command(service: &BudgetService, user: &User, cmd: GroupCommands) -> Result<()> {
    match cmd {
        GroupCommands::Create { name, description } => {
            let group = service.create_group(user, name, description).await?;
            println!("Created group: {}", group.name);
        }

        GroupCommands::List => {
            let groups = service.list_groups(user).await?;
            if groups.is_empty() {
                println!("No groups found.");
            } else {
                println!("{:<20} DESCRIPTION", "NAME");
                println!("{}", "-".repeat(50));
                for group in groups {
                    println!(
                        "{:<20} {}",
                        group.name,
                        group.description.as_deref().unwrap_or("")
                    );
                }
            }
        }

        GroupCommands::Delete { name } => {
            let group = service.delete_group(user, &name).await?;
            println!("Deleted group: {}", group.name);
        }
    }
    Ok(())
}

async fn run_category_command(
    service: &BudgetService,
    user: &User,
    cmd: CategoryCommands,
) -> Result<()> {
    match cmd {
        CategoryCommands::Create {
            name,
            group,
            budget,
            recurrent,
            start,
            end,
            description,
        } => {
            let budget =
                parse_amount(&budget).context("Invalid budget format. Use '300.00' or '300'")?;

            // Default start is the current month
            let start = match start {
                Some(s) => s,
                None => Month::from_date(Utc::now().date_naive()).to_string(),
            };

            let category = service
                .create_category(
                    user,
                    &group,
                    name,
                    budget,
                    recurrent,
                    &start,
                    end.as_deref(),
                    description,
                )
                .await?;
            println!(
                "Created category: {} (from {})",
                category.name, category.start_month
            );
        }

        CategoryCommands::List { group } => {
            let categories = service.list_categories(user, group.as_deref()).await?;
            if categories.is_empty() {
                println!("No categories found.");
            } else {
                println!(
                    "{:<20} {:>12} {:<10} {:<8} {:<8}",
                    "NAME", "BUDGET", "RECURRENT", "FROM", "TO"
                );
                println!("{}", "-".repeat(64));
                for category in categories {
                    println!(
                        "{:<20} {:>12} {:<10} {:<8} {:<8}",
                        truncate(&category.name, 20),
                        format_amount(category.budget),
                        if category.recurrent { "yes" } else { "no" },
                        category.start_month,
                        category.end_month.as_deref().unwrap_or("-")
                    );
                }
            }
        }

        CategoryCommands::Delete { name, group } => {
            let category = service
                .delete_category(user, &name, group.as_deref())
                .await?;
            println!("Deleted category: {}", category.name);
        }
    }
    Ok(())
}

async fn run_expense_command(
    service: &BudgetService,
    user: &User,
    cmd: ExpenseCommands,
) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            group,
            description,
            date,
            paid,
        } => {
            let amount =
                parse_amount(&amount).context("Invalid amount format. Use '45.90' or '45'")?;

            // Parse date or use today
            let spent_at = match date {
                Some(date_str) => parse_day(&date_str).with_context(|| {
                    format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                })?,
                None => Utc::now().date_naive(),
            };

            let result = service
                .add_expense(
                    user,
                    &category,
                    group.as_deref(),
                    amount,
                    spent_at,
                    description,
                    paid,
                )
                .await?;

            println!(
                "Recorded expense: {} {} in {} ({})",
                format_amount(result.expense.amount),
                user.currency,
                result.category_name,
                result.expense.id
            );
        }

        ExpenseCommands::List { month } => {
            let month = resolve_month(month.as_deref());
            let expenses = service.list_expenses(user, month).await?;

            if expenses.is_empty() {
                println!("No expenses found for {}.", month);
            } else {
                let names = service.category_names(user).await?;

                println!(
                    "{:<36} {:<12} {:>10} {:<15} {:<7} DESCRIPTION",
                    "ID", "DATE", "AMOUNT", "CATEGORY", "PAID"
                );
                println!("{}", "-".repeat(100));
                for expense in expenses {
                    let category = names
                        .get(&expense.category_id)
                        .map(|s| s.as_str())
                        .unwrap_or("?");
                    println!(
                        "{:<36} {:<12} {:>10} {:<15} {:<7} {}",
                        expense.id,
                        expense.spent_at.format("%Y-%m-%d"),
                        format_amount(expense.amount),
                        truncate(category, 15),
                        if expense.paid { "paid" } else { "unpaid" },
                        truncate(expense.description.as_deref().unwrap_or(""), 30)
                    );
                }
            }
        }

        ExpenseCommands::Pay { id, date } => {
            let expense_id =
                Uuid::parse_str(&id).context("Invalid expense ID format (expected UUID)")?;

            let paid_at = match date {
                Some(date_str) => parse_day(&date_str).with_context(|| {
                    format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                })?,
                None => Utc::now().date_naive(),
            };

            let expense = service.pay_expense(user, expense_id, paid_at).await?;
            println!(
                "Marked expense as paid on {}: {}",
                paid_at.format("%Y-%m-%d"),
                expense.id
            );
        }

        ExpenseCommands::Delete { id } => {
            let expense_id =
                Uuid::parse_str(&id).context("Invalid expense ID format (expected UUID)")?;
            let expense = service.delete_expense(user, expense_id).await?;
            println!(
                "Deleted expense: {} ({})",
                format_amount(expense.amount),
                expense.id
            );
        }
    }
    Ok(())
}

async fn run_income_command(
    service: &BudgetService,
    user: &User,
    cmd: IncomeCommands,
) -> Result<()> {
    match cmd {
        IncomeCommands::Add {
            amount,
            description,
            date,
        } => {
            let amount =
                parse_amount(&amount).context("Invalid amount format. Use '1800.00' or '1800'")?;

            // Parse date or use today
            let received_at = match date {
                Some(date_str) => parse_day(&date_str).with_context(|| {
                    format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                })?,
                None => Utc::now().date_naive(),
            };

            let income = service
                .add_income(user, amount, received_at, description)
                .await?;

            println!(
                "Recorded income: {} {} ({})",
                format_amount(income.amount),
                user.currency,
                income.id
            );
        }

        IncomeCommands::List { month } => {
            let month = resolve_month(month.as_deref());
            let incomes = service.list_incomes(user, month).await?;

            if incomes.is_empty() {
                println!("No incomes found for {}.", month);
            } else {
                println!(
                    "{:<36} {:<12} {:>10} DESCRIPTION",
                    "ID", "DATE", "AMOUNT"
                );
                println!("{}", "-".repeat(80));
                for income in incomes {
                    println!(
                        "{:<36} {:<12} {:>10} {}",
                        income.id,
                        income.received_at.format("%Y-%m-%d"),
                        format_amount(income.amount),
                        truncate(income.description.as_deref().unwrap_or(""), 30)
                    );
                }
            }
        }

        IncomeCommands::Delete { id } => {
            let income_id =
                Uuid::parse_str(&id).context("Invalid income ID format (expected UUID)")?;
            let income = service.delete_income(user, income_id).await?;
            println!(
                "Deleted income: {} ({})",
                format_amount(income.amount),
                income.id
            );
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &BudgetService,
    user: &User,
    export_type: &str,
    month: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(service);
    let month = resolve_month(month);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match export_type {
        "expenses" => {
            let count = exporter.export_expenses_csv(user, month, writer).await?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
        "incomes" => {
            let count = exporter.export_incomes_csv(user, month, writer).await?;
            if output.is_some() {
                eprintln!("Exported {} incomes", count);
            }
        }
        "full" => {
            let snapshot = exporter.export_full_json(writer).await?;
            if output.is_some() {
                eprintln!(
                    "Exported full database: {} users, {} groups, {} categories, {} expenses, {} incomes",
                    snapshot.users.len(),
                    snapshot.groups.len(),
                    snapshot.categories.len(),
                    snapshot.expenses.len(),
                    snapshot.incomes.len()
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: expenses, incomes, full",
                export_type
            );
        }
    }

    Ok(())
}

async fn run_import_command(
    service: &BudgetService,
    user: &User,
    import_type: &str,
    input: Option<&str>,
    dry_run: bool,
    skip_unknown: bool,
    validate: bool,
) -> Result<()> {
    use crate::io::{ImportOptions, Importer};
    use std::fs::File;
    use std::io::{Read, stdin};

    let importer = Importer::new(service);

    // Determine input reader
    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let options = ImportOptions {
        dry_run,
        skip_unknown_categories: skip_unknown,
        validate_only: validate,
    };

    let result = match import_type {
        "expenses" => importer.import_expenses_csv(user, reader, options).await?,
        _ => {
            anyhow::bail!(
                "Invalid import type '{}'. Valid types: expenses",
                import_type
            );
        }
    };

    // Display results
    if validate || dry_run {
        println!("Validation successful");
    } else {
        println!("Import complete");
    }
    println!("  Imported: {}", result.imported);
    println!("  Skipped:  {}", result.skipped);
    println!("  Errors:   {}", result.errors.len());

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in result.errors.iter().take(10) {
            println!(
                "  Line {}: {}",
                error.line,
                error
                    .field
                    .as_ref()
                    .map(|f| format!("{}: ", f))
                    .unwrap_or_default()
                    + &error.error
            );
        }
        if result.errors.len() > 10 {
            println!("  ... and {} more errors", result.errors.len() - 10);
        }
    }

    Ok(())
}

/// Resolve an optional month argument, falling back to the current month.
fn resolve_month(month: Option<&str>) -> Month {
    MonthResolution::from_input(month, Utc::now().date_naive()).month()
}

/// Truncate a string to `max_len` characters, appending `...` when cut.
/// Counts chars, not bytes, so multi-byte names never split mid-character.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn parse_day(date_str: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .context("Date must be in YYYY-MM-DD format")
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("a very long description indeed", 10), "a very ...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 13 chars but 26 bytes; must come back whole, not split mid-char.
        let name = "é".repeat(13);
        assert_eq!(truncate(&name, 20), name);

        let long = "é".repeat(24);
        assert_eq!(truncate(&long, 20), format!("{}...", "é".repeat(17)));
    }
}
