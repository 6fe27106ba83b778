mod common;

use anyhow::Result;
use budget_tracker::application::AppError;
use budget_tracker::domain::TransactionKind;
use chrono::Month;
use common::{StandardLedger, parse_date, test_service};

#[test]
fn test_standard_scenario_totals() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;

    assert_eq!(service.total_income(), 100000);
    assert_eq!(service.total_expenses(), 21000);
    assert_eq!(service.balance(), 79000);

    let by_category = service.expenses_by_category();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category.get("Food"), Some(&21000));

    assert_eq!(service.monthly_spending(2024, Month::January), 15000);
    assert_eq!(service.monthly_spending(2024, Month::February), 6000);

    Ok(())
}

#[test]
fn test_balance_always_income_minus_expenses() -> Result<()> {
    let mut service = test_service();
    let amounts = [
        (1250, TransactionKind::Expense),
        (99, TransactionKind::Income),
        (500000, TransactionKind::Income),
        (1, TransactionKind::Expense),
        (73020, TransactionKind::Expense),
    ];

    for (i, (amount, kind)) in amounts.into_iter().enumerate() {
        service.record_transaction(
            format!("entry {}", i),
            amount,
            parse_date("2024-05-01"),
            "Misc",
            kind,
        )?;
        assert_eq!(
            service.balance(),
            service.total_income() - service.total_expenses()
        );
    }

    assert_eq!(service.total_income(), 500099);
    assert_eq!(service.total_expenses(), 74271);
    Ok(())
}

#[test]
fn test_count_tracks_adds_and_removes() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create_with_more_expenses(&mut service)?;
    assert_eq!(service.all_transactions().len(), 6);

    assert!(service.remove_transaction(0));
    assert!(service.remove_transaction(4));
    assert!(!service.remove_transaction(4));
    assert!(!service.remove_transaction(100));

    // 6 adds - 2 successful removes
    assert_eq!(service.all_transactions().len(), 4);
    Ok(())
}

#[test]
fn test_out_of_range_remove_leaves_ledger_unchanged() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;
    let before = service.all_transactions();

    assert!(!service.remove_transaction(3));
    assert_eq!(service.all_transactions(), before);
    Ok(())
}

#[test]
fn test_remove_shifts_later_positions() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;

    assert!(service.remove_transaction(0));
    let remaining = service.all_transactions();
    assert_eq!(remaining[0].description, "Groceries");
    assert_eq!(remaining[1].description, "Dining");
    Ok(())
}

#[test]
fn test_category_filter_ignores_case_but_aggregation_does_not() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;

    let food = service.transactions_by_category("food");
    assert_eq!(food.len(), 2);
    assert!(food.iter().all(|t| t.category == "Food"));

    let by_category = service.expenses_by_category();
    assert!(by_category.contains_key("Food"));
    assert!(!by_category.contains_key("food"));
    Ok(())
}

#[test]
fn test_mixed_case_categories_aggregate_separately() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;
    service.record_transaction(
        "Bakery",
        400,
        parse_date("2024-02-03"),
        "food",
        TransactionKind::Expense,
    )?;

    assert_eq!(service.transactions_by_category("FOOD").len(), 3);

    let by_category = service.expenses_by_category();
    assert_eq!(by_category.get("Food"), Some(&21000));
    assert_eq!(by_category.get("food"), Some(&400));
    Ok(())
}

#[test]
fn test_income_categories_not_in_expense_breakdown() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;
    assert!(!service.expenses_by_category().contains_key("Job"));
    Ok(())
}

#[test]
fn test_date_range_includes_both_endpoints() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;

    let range = service.transactions_by_date_range(parse_date("2024-01-05"), parse_date("2024-01-10"));
    let descriptions: Vec<_> = range.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Salary", "Groceries"]);

    let feb = service.transactions_by_date_range(parse_date("2024-02-01"), parse_date("2024-02-29"));
    assert_eq!(feb.len(), 1);
    Ok(())
}

#[test]
fn test_date_range_reversed_is_empty() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;
    assert!(service
        .transactions_by_date_range(parse_date("2024-02-01"), parse_date("2024-01-01"))
        .is_empty());
    Ok(())
}

#[test]
fn test_filter_by_kind() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;

    assert_eq!(service.transactions_by_kind(TransactionKind::Income).len(), 1);
    assert_eq!(service.transactions_by_kind(TransactionKind::Expense).len(), 2);
    Ok(())
}

#[test]
fn test_monthly_spending_leap_february() -> Result<()> {
    let mut service = test_service();
    service.record_transaction(
        "Leap day dinner",
        4200,
        parse_date("2024-02-29"),
        "Food",
        TransactionKind::Expense,
    )?;
    service.record_transaction(
        "March 1st",
        1000,
        parse_date("2024-03-01"),
        "Food",
        TransactionKind::Expense,
    )?;

    assert_eq!(service.monthly_spending(2024, Month::February), 4200);
    assert_eq!(service.monthly_spending(2024, Month::March), 1000);
    assert_eq!(service.monthly_spending(2023, Month::February), 0);
    Ok(())
}

#[test]
fn test_monthly_spending_excludes_income() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;
    service.record_transaction(
        "Bonus",
        50000,
        parse_date("2024-01-31"),
        "Job",
        TransactionKind::Income,
    )?;

    assert_eq!(service.monthly_spending(2024, Month::January), 15000);
    Ok(())
}

#[test]
fn test_rejected_amount_leaves_ledger_unchanged() -> Result<()> {
    let mut service = test_service();
    StandardLedger::create(&mut service)?;

    let result = service.record_transaction(
        "Refund",
        -500,
        parse_date("2024-01-15"),
        "Food",
        TransactionKind::Expense,
    );
    assert!(matches!(result, Err(AppError::InvalidAmount(_))));
    assert_eq!(service.all_transactions().len(), 3);
    assert_eq!(service.total_expenses(), 21000);
    Ok(())
}
