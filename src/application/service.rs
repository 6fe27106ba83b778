use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{Month, NaiveDate};
use tracing::{debug, info, warn};

use crate::domain::{
    Budget, Cents, Ledger, MAX_AMOUNT_CENTS, Transaction, TransactionKind, format_cents,
    month_bounds, sum_amounts,
};

use super::{AppError, BudgetStatus, CategoryReport, CategorySummary, IncomeExpenseSummary, MonthlyReport};

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (shell, exporter, tests).
///
/// It owns exactly one `Ledger`. Mutations are validated and logged here;
/// queries pass straight through to the ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerService {
    ledger: Ledger,
}

impl LedgerService {
    /// Create a service with an empty ledger and a budget of the given name.
    pub fn new(budget_name: impl Into<String>) -> Self {
        Self::from_ledger(Ledger::with_budget(Budget::new(budget_name)))
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a new transaction. The amount must be positive and at most
    /// `MAX_AMOUNT_CENTS`.
    pub fn record_transaction(
        &mut self,
        description: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Result<Transaction, AppError> {
        check_amount(amount_cents, "Amount")?;

        let transaction = Transaction::new(description, amount_cents, date, category, kind);
        info!(
            id = %transaction.id,
            kind = %transaction.kind,
            category = %transaction.category,
            amount = %format_cents(transaction.amount_cents),
            date = %transaction.date,
            "recorded transaction"
        );

        self.ledger.add_transaction(transaction.clone());
        Ok(transaction)
    }

    /// Remove a transaction by its position in `all_transactions`.
    pub fn remove_transaction(&mut self, index: usize) -> bool {
        let removed = self.ledger.transaction(index).map(|t| t.id);
        if self.ledger.remove_transaction(index) {
            if let Some(id) = removed {
                info!(index, %id, "removed transaction");
            }
            true
        } else {
            warn!(index, count = self.ledger.len(), "no transaction at index");
            false
        }
    }

    pub fn all_transactions(&self) -> Vec<Transaction> {
        self.ledger.all_transactions()
    }

    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.ledger.transactions_by_kind(kind)
    }

    pub fn transactions_by_category(&self, category: &str) -> Vec<Transaction> {
        self.ledger.transactions_by_category(category)
    }

    pub fn transactions_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        if start > end {
            debug!(%start, %end, "date range is reversed");
        }
        self.ledger.transactions_by_date_range(start, end)
    }

    pub fn total_income(&self) -> Cents {
        self.ledger.total_income()
    }

    pub fn total_expenses(&self) -> Cents {
        self.ledger.total_expenses()
    }

    pub fn balance(&self) -> Cents {
        self.ledger.balance()
    }

    pub fn expenses_by_category(&self) -> BTreeMap<String, Cents> {
        self.ledger.expenses_by_category()
    }

    pub fn monthly_spending(&self, year: i32, month: Month) -> Cents {
        self.ledger.monthly_spending(year, month)
    }

    // ========================
    // Budget operations
    // ========================

    pub fn budget(&self) -> &Budget {
        self.ledger.budget()
    }

    pub fn set_budget(&mut self, budget: Budget) {
        info!(name = budget.name(), "replaced budget");
        self.ledger.set_budget(budget);
    }

    /// Set a spending limit for a category. The limit must be positive and at
    /// most `MAX_AMOUNT_CENTS`; use `remove_category_limit` to lift a limit.
    pub fn set_category_limit(
        &mut self,
        category: impl Into<String>,
        limit_cents: Cents,
    ) -> Result<(), AppError> {
        check_amount(limit_cents, "Limit")?;

        let category = category.into();
        info!(%category, limit = %format_cents(limit_cents), "set category limit");
        self.ledger
            .budget_mut()
            .set_category_limit(category, limit_cents);
        Ok(())
    }

    /// Lift the limit on a category. Returns whether a limit existed.
    pub fn remove_category_limit(&mut self, category: &str) -> bool {
        let removed = self.ledger.budget_mut().remove_category_limit(category);
        match removed {
            Some(limit) => info!(category, limit = %format_cents(limit), "removed category limit"),
            None => debug!(category, "no limit to remove"),
        }
        removed.is_some()
    }

    pub fn budget_exceeded(&self) -> BTreeMap<String, Cents> {
        let exceeded = self.ledger.budget_exceeded();
        for (category, over) in &exceeded {
            warn!(%category, over_by = %format_cents(*over), "category over budget");
        }
        exceeded
    }

    // ========================
    // Reports
    // ========================

    pub fn summary(&self) -> IncomeExpenseSummary {
        IncomeExpenseSummary {
            total_income: self.ledger.total_income(),
            total_expenses: self.ledger.total_expenses(),
            balance: self.ledger.balance(),
            transaction_count: self.ledger.len(),
        }
    }

    /// Expense breakdown by exact category, largest first.
    pub fn category_report(&self) -> CategoryReport {
        let expenses = self.ledger.transactions_by_kind(TransactionKind::Expense);
        let total = sum_amounts(&expenses);

        let mut categories: Vec<CategorySummary> = self
            .ledger
            .expenses_by_category()
            .into_iter()
            .map(|(category, amount)| {
                let count = expenses.iter().filter(|t| t.category == category).count();
                let percentage = if total > 0 {
                    (amount as f64 / total as f64) * 100.0
                } else {
                    0.0
                };
                CategorySummary {
                    category,
                    total: amount,
                    count,
                    percentage,
                }
            })
            .collect();

        // BTreeMap order already sorts names; a stable sort keeps it for ties
        categories.sort_by_key(|c| Reverse(c.total));

        CategoryReport { categories, total }
    }

    /// One row per configured limit, in category order.
    pub fn budget_status(&self) -> Vec<BudgetStatus> {
        let spent_by_category = self.ledger.expenses_by_category();
        let exceeded = self.ledger.budget_exceeded();

        self.ledger
            .budget()
            .all_category_limits()
            .into_iter()
            .map(|(category, limit)| {
                let spent = spent_by_category.get(&category).copied().unwrap_or(0);
                let exceeded_by = exceeded.get(&category).copied();
                BudgetStatus {
                    category,
                    limit,
                    spent,
                    remaining: limit.saturating_sub(spent),
                    exceeded_by,
                }
            })
            .collect()
    }

    pub fn monthly_report(&self, year: i32, month: Month) -> Option<MonthlyReport> {
        let (start, end) = month_bounds(year, month)?;
        Some(MonthlyReport {
            year,
            month: month.number_from_month(),
            start,
            end,
            spending: self.ledger.monthly_spending(year, month),
        })
    }
}

fn check_amount(cents: Cents, what: &str) -> Result<(), AppError> {
    if cents <= 0 {
        return Err(AppError::InvalidAmount(format!("{} must be positive", what)));
    }
    if cents > MAX_AMOUNT_CENTS {
        return Err(AppError::InvalidAmount(format!(
            "{} must be at most {}",
            what,
            format_cents(MAX_AMOUNT_CENTS)
        )));
    }
    Ok(())
}
