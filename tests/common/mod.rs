// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use budget_tracker::application::LedgerService;
use budget_tracker::domain::TransactionKind;
use chrono::NaiveDate;

/// Helper to create an empty service with the default budget
pub fn test_service() -> LedgerService {
    LedgerService::default()
}

/// Helper to parse a YYYY-MM-DD string
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: the salary/groceries/dining ledger used across tests
pub struct StandardLedger;

impl StandardLedger {
    /// Income 1000.00 on 2024-01-05, Food expenses 150.00 (Jan) and 60.00 (Feb)
    pub fn create(service: &mut LedgerService) -> Result<()> {
        service.record_transaction(
            "Salary",
            100000,
            parse_date("2024-01-05"),
            "Job",
            TransactionKind::Income,
        )?;
        service.record_transaction(
            "Groceries",
            15000,
            parse_date("2024-01-10"),
            "Food",
            TransactionKind::Expense,
        )?;
        service.record_transaction(
            "Dining",
            6000,
            parse_date("2024-02-01"),
            "Food",
            TransactionKind::Expense,
        )?;
        Ok(())
    }

    /// Standard ledger plus rent and entertainment spending
    pub fn create_with_more_expenses(service: &mut LedgerService) -> Result<()> {
        Self::create(service)?;
        service.record_transaction(
            "January rent",
            90000,
            parse_date("2024-01-01"),
            "Rent",
            TransactionKind::Expense,
        )?;
        service.record_transaction(
            "Cinema",
            2500,
            parse_date("2024-01-20"),
            "Entertainment",
            TransactionKind::Expense,
        )?;
        service.record_transaction(
            "Concert",
            7500,
            parse_date("2024-02-14"),
            "Entertainment",
            TransactionKind::Expense,
        )?;
        Ok(())
    }
}
