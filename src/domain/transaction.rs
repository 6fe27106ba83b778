use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, format_cents};

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, gifts)
    Income,
    /// Money going out; the only kind that counts against budget limits
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Capitalised label used in rendered tables.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded money movement.
///
/// This is a plain value holder: `amount_cents` is expected to be positive,
/// but the check lives at the input boundary (`LedgerService`), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount_cents: Cents,
    pub date: NaiveDate,
    pub category: String,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount_cents,
            date,
            category: category.into(),
            kind,
        }
    }

    pub fn income(
        description: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self::new(description, amount_cents, date, category, TransactionKind::Income)
    }

    pub fn expense(
        description: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self::new(description, amount_cents, date, category, TransactionKind::Expense)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Case-insensitive category comparison, as used by category filters.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} | {:<10} | {:<15} | ${:<10} | {}",
            self.date.format("%Y-%m-%d").to_string(),
            self.kind.label(),
            self.category,
            format_cents(self.amount_cents),
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("income".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!("EXPENSE".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert_eq!(" Expense ".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_constructors_set_kind() {
        let salary = Transaction::income("Salary", 100000, date("2024-01-05"), "Job");
        let groceries = Transaction::expense("Groceries", 15000, date("2024-01-10"), "Food");

        assert!(salary.is_income());
        assert!(!salary.is_expense());
        assert!(groceries.is_expense());
        assert_eq!(groceries.category, "Food");
        assert_ne!(salary.id, groceries.id);
    }

    #[test]
    fn test_in_category_ignores_case() {
        let t = Transaction::expense("Dining", 6000, date("2024-02-01"), "Food");
        assert!(t.in_category("food"));
        assert!(t.in_category("FOOD"));
        assert!(!t.in_category("Foods"));
    }

    #[test]
    fn test_display_is_column_aligned() {
        let t = Transaction::expense("Groceries", 15000, date("2024-01-10"), "Food");
        assert_eq!(
            t.to_string(),
            "2024-01-10 | Expense    | Food            | $150.00     | Groceries"
        );
    }
}
