use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseSummary {
    pub total_income: Cents,
    pub total_expenses: Cents,
    pub balance: Cents,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Cents,
    pub count: usize,
    pub percentage: f64,
}

/// Spending against one configured limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: Cents,
    pub spent: Cents,
    pub remaining: Cents,
    /// Set only when the limit is positive and spending is over it
    pub exceeded_by: Option<Cents>,
}

impl BudgetStatus {
    pub fn is_exceeded(&self) -> bool {
        self.exceeded_by.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub spending: Cents,
}
