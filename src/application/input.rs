//! Parsing of raw user text into validated values.
//!
//! These helpers are the only place malformed input is detected. The shell
//! re-prompts on any `Err` and hands the `Ok` values to `LedgerService`.

use chrono::{Month, NaiveDate};

use crate::domain::{Cents, MAX_AMOUNT_CENTS, TransactionKind, format_cents, parse_cents};

use super::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a money amount in `1..=MAX_AMOUNT_CENTS`.
pub fn parse_amount(input: &str) -> Result<Cents, AppError> {
    let cents = parse_cents(input)
        .map_err(|e| AppError::InvalidAmount(format!("'{}' ({})", input.trim(), e)))?;
    if cents <= 0 {
        return Err(AppError::InvalidAmount(
            "Amount must be positive".to_string(),
        ));
    }
    if cents > MAX_AMOUNT_CENTS {
        return Err(AppError::InvalidAmount(format!(
            "Amount must be at most {}",
            format_cents(MAX_AMOUNT_CENTS)
        )));
    }
    Ok(cents)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| AppError::InvalidDate(trimmed.to_string()))
}

/// Like `parse_date`, but blank input means `today`.
pub fn parse_date_or_today(input: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    if input.trim().is_empty() {
        Ok(today)
    } else {
        parse_date(input)
    }
}

/// Menu choice `1`/`2`, or the kind name itself.
pub fn parse_kind(input: &str) -> Result<TransactionKind, AppError> {
    match input.trim() {
        "1" => Ok(TransactionKind::Income),
        "2" => Ok(TransactionKind::Expense),
        other => other
            .parse()
            .map_err(|_| AppError::InvalidKind(other.to_string())),
    }
}

pub fn parse_month(number: u32) -> Result<Month, AppError> {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .ok_or(AppError::InvalidMonth(number))
}
