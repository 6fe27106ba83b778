use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid transaction type '{0}'. Enter 1 for Income or 2 for Expense")]
    InvalidKind(String),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Unknown export format '{0}'. Valid formats: csv, json")]
    InvalidExportFormat(String),

    #[error("Export failed: {0:#}")]
    Export(#[from] anyhow::Error),
}
