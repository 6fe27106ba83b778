use std::fmt;
use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::{
    AppError, BudgetStatus, CategoryReport, IncomeExpenseSummary, LedgerService,
};
use crate::domain::{Transaction, format_cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time view of the ledger and every computed report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub budget_name: String,
    pub transactions: Vec<Transaction>,
    pub summary: IncomeExpenseSummary,
    pub categories: CategoryReport,
    pub budget_status: Vec<BudgetStatus>,
}

/// Exporter for rendering ledger data as CSV or JSON.
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Write in the given format; returns the number of transactions written.
    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_transactions_csv(writer),
            ExportFormat::Json => self
                .export_snapshot_json(writer)
                .map(|snapshot| snapshot.transactions.len()),
        }
    }

    /// Export transactions to CSV, one row per transaction in ledger order.
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "kind", "category", "amount", "description"])?;

        let transactions = self.service.all_transactions();
        for transaction in &transactions {
            csv_writer.write_record([
                transaction.id.to_string(),
                transaction.date.format("%Y-%m-%d").to_string(),
                transaction.kind.as_str().to_string(),
                transaction.category.clone(),
                format_cents(transaction.amount_cents),
                transaction.description.clone(),
            ])?;
        }

        csv_writer.flush().context("Failed to flush CSV output")?;
        info!(count = transactions.len(), "exported transactions as csv");
        Ok(transactions.len())
    }

    /// Export the full snapshot as pretty-printed JSON.
    pub fn export_snapshot_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            budget_name: self.service.budget().name().to_string(),
            transactions: self.service.all_transactions(),
            summary: self.service.summary(),
            categories: self.service.category_report(),
            budget_status: self.service.budget_status(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!(
            count = snapshot.transactions.len(),
            "exported ledger snapshot as json"
        );
        Ok(snapshot)
    }
}
