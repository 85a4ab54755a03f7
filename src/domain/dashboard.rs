use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    Amount, CategoryId, Expense, ExpenseId, GroupId, GroupWithCategories, MonthWindow,
    round_to_cents,
};

/// Render-ready view of one expense line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseView {
    pub id: ExpenseId,
    pub amount: Amount,
    pub description: String,
    pub spent_on: String,
    pub status: String,
    pub paid_on: Option<String>,
}

impl ExpenseView {
    fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            amount: expense.amount,
            description: expense.description.clone().unwrap_or_default(),
            spent_on: expense.spent_at.format("%Y-%m-%d").to_string(),
            status: expense.payment_status().to_string(),
            paid_on: expense.paid_at.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub budget: Amount,
    pub spent: Amount,
    pub currency: String,
    pub expenses: Vec<ExpenseView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub categories: Vec<CategoryView>,
}

/// The fully aggregated dashboard for one user and one month. Built in one
/// piece and returned by value; never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub window: MonthWindow,
    pub currency: String,
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub balance: Amount,
    pub groups: Vec<GroupView>,
}

/// Month expenses bucketed by category: ordered line items plus a per-category
/// sum rounded once after summation. Consumed by key lookup only; rendering
/// order always comes from the group and category sequences, never from map
/// iteration.
#[derive(Debug, Default)]
pub struct ExpenseBreakdown {
    line_items: HashMap<CategoryId, Vec<ExpenseView>>,
    totals: HashMap<CategoryId, Amount>,
}

impl ExpenseBreakdown {
    /// Bucket every expense, whether or not its category ends up visible:
    /// activation filtering is the assembler's concern, not the aggregator's.
    /// Input order is preserved within each category; nothing is re-sorted.
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut line_items: HashMap<CategoryId, Vec<ExpenseView>> = HashMap::new();
        let mut sums: HashMap<CategoryId, Amount> = HashMap::new();

        for expense in expenses {
            line_items
                .entry(expense.category_id)
                .or_default()
                .push(ExpenseView::from_expense(expense));
            *sums.entry(expense.category_id).or_insert(0.0) += expense.amount;
        }

        let totals = sums
            .into_iter()
            .map(|(id, sum)| (id, round_to_cents(sum)))
            .collect();

        Self { line_items, totals }
    }

    /// Line items for a category, in input order. Empty when none.
    pub fn line_items_for(&self, category: CategoryId) -> &[ExpenseView] {
        self.line_items
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rounded spend for a category. Absence means nothing was spent: 0.0.
    pub fn total_for(&self, category: CategoryId) -> Amount {
        self.totals.get(&category).copied().unwrap_or(0.0)
    }
}

/// Merge the four upstream query results into one dashboard view.
///
/// Pure: everything comes in as arguments and the view goes out as a value.
/// Groups are emitted even when none of their categories is active for the
/// target month. The top-level totals pass through unrounded; balance is
/// their exact difference.
pub fn assemble_dashboard(
    window: MonthWindow,
    currency: &str,
    total_income: Amount,
    total_expenses: Amount,
    groups: &[GroupWithCategories],
    expenses: &[Expense],
) -> DashboardView {
    let breakdown = ExpenseBreakdown::from_expenses(expenses);

    let group_views = groups
        .iter()
        .map(|entry| GroupView {
            id: entry.group.id,
            name: entry.group.name.clone(),
            description: entry.group.description.clone(),
            categories: entry
                .categories
                .iter()
                .filter(|category| category.is_active_in(window.target))
                .map(|category| CategoryView {
                    id: category.id,
                    name: category.name.clone(),
                    description: category.description.clone(),
                    budget: category.budget,
                    spent: breakdown.total_for(category.id),
                    currency: currency.to_string(),
                    expenses: breakdown.line_items_for(category.id).to_vec(),
                })
                .collect(),
        })
        .collect();

    DashboardView {
        window,
        currency: currency.to_string(),
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        groups: group_views,
    }
}
