use std::collections::BTreeMap;

use chrono::{Month, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Budget, Cents, Transaction, TransactionKind};

/// First and last calendar day of a month, both inclusive.
/// Returns `None` only when the year is outside chrono's supported range.
pub fn month_bounds(year: i32, month: Month) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((start, end))
}

/// Sum of amounts over a set of transactions, clamped to the `Cents` range.
pub fn sum_amounts<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Cents {
    transactions
        .into_iter()
        .fold(0, |total: Cents, t| total.saturating_add(t.amount_cents))
}

/// The aggregate root: every recorded transaction, in insertion order,
/// plus the one active budget.
///
/// Nothing here fails. Out-of-range indexes and missing data come back as
/// `false`, zero, or an empty collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    budget: Budget,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(budget: Budget) -> Self {
        Self {
            transactions: Vec::new(),
            budget,
        }
    }

    // ========================
    // Transactions
    // ========================

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Remove the transaction at a 0-based position.
    /// Returns false (and changes nothing) when the index is out of range.
    pub fn remove_transaction(&mut self, index: usize) -> bool {
        if index < self.transactions.len() {
            self.transactions.remove(index);
            true
        } else {
            false
        }
    }

    pub fn transaction(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Copy of every transaction in insertion order.
    pub fn all_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.filtered(|t| t.kind == kind)
    }

    /// Category match ignores case here, unlike `expenses_by_category`.
    pub fn transactions_by_category(&self, category: &str) -> Vec<Transaction> {
        self.filtered(|t| t.in_category(category))
    }

    /// Transactions with `start <= date <= end`. Empty when `start > end`.
    pub fn transactions_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        self.filtered(|t| start <= t.date && t.date <= end)
    }

    fn filtered(&self, predicate: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|&t| predicate(t))
            .cloned()
            .collect()
    }

    // ========================
    // Totals
    // ========================

    pub fn total_income(&self) -> Cents {
        sum_amounts(self.transactions.iter().filter(|t| t.is_income()))
    }

    pub fn total_expenses(&self) -> Cents {
        sum_amounts(self.transactions.iter().filter(|t| t.is_expense()))
    }

    /// Balance = total income - total expenses
    pub fn balance(&self) -> Cents {
        self.total_income().saturating_sub(self.total_expenses())
    }

    /// Expense totals keyed by the category string exactly as stored.
    /// "Food" and "food" are separate keys. Only categories with expenses appear.
    pub fn expenses_by_category(&self) -> BTreeMap<String, Cents> {
        let mut totals: BTreeMap<String, Cents> = BTreeMap::new();

        for transaction in self.transactions.iter().filter(|t| t.is_expense()) {
            let total = totals.entry(transaction.category.clone()).or_insert(0);
            *total = total.saturating_add(transaction.amount_cents);
        }

        totals
    }

    /// Expenses dated within the given calendar month, first to last day inclusive.
    pub fn monthly_spending(&self, year: i32, month: Month) -> Cents {
        let Some((start, end)) = month_bounds(year, month) else {
            return 0;
        };

        sum_amounts(
            self.transactions
                .iter()
                .filter(|t| t.is_expense() && start <= t.date && t.date <= end),
        )
    }

    // ========================
    // Budget
    // ========================

    /// Categories whose expenses are over a positive limit, mapped to the overage.
    /// A limit of 0 (or no limit at all) never flags a category.
    pub fn budget_exceeded(&self) -> BTreeMap<String, Cents> {
        self.expenses_by_category()
            .into_iter()
            .filter_map(|(category, spent)| {
                let limit = self.budget.category_limit(&category);
                (limit > 0 && spent > limit).then(|| (category, spent.saturating_sub(limit)))
            })
            .collect()
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn budget_mut(&mut self) -> &mut Budget {
        &mut self.budget
    }

    pub fn set_budget(&mut self, budget: Budget) {
        self.budget = budget;
    }
}
