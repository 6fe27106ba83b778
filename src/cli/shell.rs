use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::application::{
    AppError, LedgerService, parse_amount, parse_date, parse_date_or_today, parse_kind,
    parse_month,
};
use crate::domain::{Transaction, format_cents};
use crate::io::{ExportFormat, Exporter};

const TRANSACTION_HEADER: &str =
    "Date       | Type       | Category        | Amount      | Description";

/// What the menu loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    AddTransaction,
    ViewTransactions,
    Summary,
    ExpensesByCategory,
    SetLimit,
    ViewBudget,
    BudgetStatus,
    Exit,
    RemoveTransaction,
    FilterByCategory,
    FilterByDateRange,
    MonthlySpending,
    RemoveLimit,
    Export,
}

impl MenuChoice {
    const ALL: [MenuChoice; 14] = [
        MenuChoice::AddTransaction,
        MenuChoice::ViewTransactions,
        MenuChoice::Summary,
        MenuChoice::ExpensesByCategory,
        MenuChoice::SetLimit,
        MenuChoice::ViewBudget,
        MenuChoice::BudgetStatus,
        MenuChoice::Exit,
        MenuChoice::RemoveTransaction,
        MenuChoice::FilterByCategory,
        MenuChoice::FilterByDateRange,
        MenuChoice::MonthlySpending,
        MenuChoice::RemoveLimit,
        MenuChoice::Export,
    ];

    /// Menu numbers start at 1, in `ALL` order.
    fn from_input(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        Self::ALL.get(number.checked_sub(1)?).copied()
    }

    fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddTransaction => "Add a transaction",
            MenuChoice::ViewTransactions => "View all transactions",
            MenuChoice::Summary => "View income/expense summary",
            MenuChoice::ExpensesByCategory => "View expenses by category",
            MenuChoice::SetLimit => "Set budget limit for category",
            MenuChoice::ViewBudget => "View budget",
            MenuChoice::BudgetStatus => "Check budget status",
            MenuChoice::Exit => "Exit",
            MenuChoice::RemoveTransaction => "Remove a transaction",
            MenuChoice::FilterByCategory => "View transactions by category",
            MenuChoice::FilterByDateRange => "View transactions by date range",
            MenuChoice::MonthlySpending => "View monthly spending",
            MenuChoice::RemoveLimit => "Remove budget limit for category",
            MenuChoice::Export => "Export ledger",
        }
    }
}

/// Interactive menu over a line-based reader and a writer.
///
/// Every prompt that expects a number, date or type loops until it gets a
/// valid answer. End of input ends the session from any prompt.
pub struct Shell<R, W> {
    input: R,
    output: W,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, today: NaiveDate) -> Self {
        Self {
            input,
            output,
            today,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input runs out.
    pub fn run(&mut self, service: &mut LedgerService) -> Result<()> {
        writeln!(self.output, "===== Budget Tracker =====")?;

        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let flow = match MenuChoice::from_input(&line) {
                Some(choice) => {
                    debug!(?choice, "menu selection");
                    self.dispatch(choice, service)?
                }
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
            writeln!(self.output)?;
        }

        writeln!(self.output, "Thank you for using Budget Tracker!")?;
        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice, service: &mut LedgerService) -> Result<Flow> {
        match choice {
            MenuChoice::AddTransaction => self.add_transaction(service),
            MenuChoice::ViewTransactions => self.view_transactions(service),
            MenuChoice::Summary => self.view_summary(service),
            MenuChoice::ExpensesByCategory => self.view_category_expenses(service),
            MenuChoice::SetLimit => self.set_limit(service),
            MenuChoice::ViewBudget => self.view_budget(service),
            MenuChoice::BudgetStatus => self.view_budget_status(service),
            MenuChoice::Exit => Ok(Flow::Quit),
            MenuChoice::RemoveTransaction => self.remove_transaction(service),
            MenuChoice::FilterByCategory => self.filter_by_category(service),
            MenuChoice::FilterByDateRange => self.filter_by_date_range(service),
            MenuChoice::MonthlySpending => self.view_monthly_spending(service),
            MenuChoice::RemoveLimit => self.remove_limit(service),
            MenuChoice::Export => self.export(service),
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nPlease select an option:")?;
        for (number, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", number + 1, choice.label())?;
        }
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    // ========================
    // Commands
    // ========================

    fn add_transaction(&mut self, service: &mut LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Add Transaction ===")?;

        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(amount) = self.prompt_until("Enter amount: $", parse_amount)? else {
            return Ok(Flow::Quit);
        };
        let today = self.today;
        let Some(date) = self.prompt_until(
            "Enter date (yyyy-MM-dd) or leave blank for today: ",
            |s| parse_date_or_today(s, today),
        )?
        else {
            return Ok(Flow::Quit);
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(kind) =
            self.prompt_until("Enter type (1 for Income, 2 for Expense): ", parse_kind)?
        else {
            return Ok(Flow::Quit);
        };

        match service.record_transaction(description, amount, date, category.trim(), kind) {
            Ok(_) => writeln!(self.output, "Transaction added successfully!")?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn view_transactions(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== All Transactions ===")?;
        self.print_transactions(&service.all_transactions(), true)?;
        Ok(Flow::Continue)
    }

    fn view_summary(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Income/Expense Summary ===")?;

        let summary = service.summary();
        writeln!(self.output, "Total Income: ${}", format_cents(summary.total_income))?;
        writeln!(self.output, "Total Expenses: ${}", format_cents(summary.total_expenses))?;
        writeln!(self.output, "Balance: ${}", format_cents(summary.balance))?;
        Ok(Flow::Continue)
    }

    fn view_category_expenses(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Expenses by Category ===")?;

        let report = service.category_report();
        if report.categories.is_empty() {
            writeln!(self.output, "No expenses found.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "Category            | Amount      | Share")?;
        writeln!(self.output, "{}", "-".repeat(42))?;
        for summary in &report.categories {
            writeln!(
                self.output,
                "{:<20}| ${:<10} | {:>5.1}%",
                summary.category,
                format_cents(summary.total),
                summary.percentage
            )?;
        }
        Ok(Flow::Continue)
    }

    fn set_limit(&mut self, service: &mut LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Set Budget Limit ===")?;

        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(limit) = self.prompt_until("Enter limit amount: $", parse_amount)? else {
            return Ok(Flow::Quit);
        };

        match service.set_category_limit(category.trim(), limit) {
            Ok(()) => writeln!(self.output, "Budget limit set successfully!")?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn view_budget(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Budget ===")?;

        let budget = service.budget();
        writeln!(self.output, "{}", budget)?;
        if !budget.has_limits() {
            writeln!(self.output, "No budget limits set yet.")?;
        }
        Ok(Flow::Continue)
    }

    fn view_budget_status(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Budget Status ===")?;

        let exceeded = service.budget_exceeded();
        if exceeded.is_empty() {
            writeln!(self.output, "All categories are within budget!")?;
            return Ok(Flow::Continue);
        }

        writeln!(
            self.output,
            "The following categories have exceeded their budget:"
        )?;
        writeln!(self.output, "Category            | Exceeded By")?;
        writeln!(self.output, "{}", "-".repeat(35))?;
        for (category, over) in &exceeded {
            writeln!(self.output, "{:<20}| ${}", category, format_cents(*over))?;
        }
        Ok(Flow::Continue)
    }

    fn remove_transaction(&mut self, service: &mut LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Remove Transaction ===")?;

        if service.ledger().is_empty() {
            writeln!(self.output, "No transactions found.")?;
            return Ok(Flow::Continue);
        }
        self.print_transactions(&service.all_transactions(), true)?;

        let Some(index) = self.prompt_until("Enter transaction number: ", parse_index)? else {
            return Ok(Flow::Quit);
        };

        if service.remove_transaction(index) {
            writeln!(self.output, "Transaction removed.")?;
        } else {
            writeln!(self.output, "No transaction with number {}.", index)?;
        }
        Ok(Flow::Continue)
    }

    fn filter_by_category(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Transactions by Category ===")?;

        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Quit);
        };
        self.print_transactions(&service.transactions_by_category(category.trim()), false)?;
        Ok(Flow::Continue)
    }

    fn filter_by_date_range(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Transactions by Date Range ===")?;

        let Some(start) = self.prompt_until("Enter start date (yyyy-MM-dd): ", parse_date)? else {
            return Ok(Flow::Quit);
        };
        let Some(end) = self.prompt_until("Enter end date (yyyy-MM-dd): ", parse_date)? else {
            return Ok(Flow::Quit);
        };

        self.print_transactions(&service.transactions_by_date_range(start, end), false)?;
        Ok(Flow::Continue)
    }

    fn view_monthly_spending(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Monthly Spending ===")?;

        let Some(year) = self.prompt_until("Enter year: ", parse_year)? else {
            return Ok(Flow::Quit);
        };
        let Some(month) = self.prompt_until("Enter month (1-12): ", |s| {
            let number = s
                .trim()
                .parse()
                .map_err(|_| AppError::InvalidNumber(s.trim().to_string()))?;
            parse_month(number)
        })?
        else {
            return Ok(Flow::Quit);
        };

        match service.monthly_report(year, month) {
            Some(report) => writeln!(
                self.output,
                "Spending for {}-{:02} ({} to {}): ${}",
                report.year,
                report.month,
                report.start,
                report.end,
                format_cents(report.spending)
            )?,
            None => writeln!(self.output, "Year {} is out of range.", year)?,
        }
        Ok(Flow::Continue)
    }

    fn remove_limit(&mut self, service: &mut LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Remove Budget Limit ===")?;

        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Quit);
        };

        let category = category.trim();
        if service.remove_category_limit(category) {
            writeln!(self.output, "Budget limit removed.")?;
        } else {
            writeln!(self.output, "No budget limit set for '{}'.", category)?;
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self, service: &LedgerService) -> Result<Flow> {
        writeln!(self.output, "\n=== Export ===")?;

        let Some(format) = self.prompt_until("Enter format (csv or json): ", |s| {
            s.parse::<ExportFormat>()
        })?
        else {
            return Ok(Flow::Quit);
        };
        let Some(path) = self.prompt("Enter output file or leave blank to print: ")? else {
            return Ok(Flow::Quit);
        };

        let exporter = Exporter::new(service);
        let path = path.trim();
        if path.is_empty() {
            if let Err(e) = exporter.export(format, &mut self.output) {
                self.report_export_failure(e)?;
            }
            return Ok(Flow::Continue);
        }

        let result = File::create(path)
            .with_context(|| format!("Failed to create export file '{}'", path))
            .and_then(|file| exporter.export(format, BufWriter::new(file)));
        match result {
            Ok(count) => writeln!(
                self.output,
                "Exported {} transaction(s) as {} to {}",
                count, format, path
            )?,
            Err(e) => self.report_export_failure(e)?,
        }
        Ok(Flow::Continue)
    }

    /// The ledger only lives in memory, so a failed export must not end the session.
    fn report_export_failure(&mut self, error: anyhow::Error) -> Result<()> {
        let error = AppError::from(error);
        warn!(%error, "export failed");
        writeln!(self.output, "{}", error)?;
        Ok(())
    }

    // ========================
    // Input/output helpers
    // ========================

    fn print_transactions(&mut self, transactions: &[Transaction], numbered: bool) -> Result<()> {
        if transactions.is_empty() {
            writeln!(self.output, "No transactions found.")?;
            return Ok(());
        }

        let indent = if numbered { "   " } else { "" };
        writeln!(self.output, "{}{}", indent, TRANSACTION_HEADER)?;
        writeln!(self.output, "{}{}", indent, "-".repeat(74))?;
        for (index, transaction) in transactions.iter().enumerate() {
            if numbered {
                writeln!(self.output, "{}. {}", index, transaction)?;
            } else {
                writeln!(self.output, "{}", transaction)?;
            }
        }
        Ok(())
    }

    /// Read one line without its line ending; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask until `parse` accepts the answer.
    fn prompt_until<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, AppError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{}. Please try again.", e)?,
            }
        }
    }
}

fn parse_index(input: &str) -> Result<usize, AppError> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidNumber(input.trim().to_string()))
}

fn parse_year(input: &str) -> Result<i32, AppError> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidNumber(input.trim().to_string()))
}
