mod shell;

pub use shell::Shell;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::LedgerService;
use crate::domain::DEFAULT_BUDGET_NAME;

/// Budget Tracker - Personal Finance Ledger
#[derive(Parser, Debug)]
#[command(name = "budget-tracker")]
#[command(about = "Record income and expenses, and check spending against per-category limits")]
#[command(version)]
pub struct Cli {
    /// Name of the budget holding the category limits
    #[arg(short, long, default_value = DEFAULT_BUDGET_NAME)]
    pub budget_name: String,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose, self.log_format);

        // one service for the whole session, handed to every command
        let mut service = LedgerService::new(self.budget_name);
        info!(budget = service.budget().name(), "starting session");

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut shell = Shell::new(stdin.lock(), stdout.lock(), Local::now().date_naive());
        shell.run(&mut service)?;

        info!(
            transactions = service.ledger().len(),
            "session ended"
        );
        Ok(())
    }
}

/// Install the global tracing subscriber. Logs go to stderr so they never
/// interleave with the menu on stdout. `RUST_LOG` overrides `--verbose`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // try_init fails only when a global subscriber is already installed,
    // which happens when tests or embedders call this twice.
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(false, LogFormat::Pretty);
        init_tracing(true, LogFormat::Json);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["budget-tracker"]).unwrap();
        assert_eq!(cli.budget_name, "Default Budget");
        assert!(!cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "budget-tracker",
            "--budget-name",
            "Household",
            "-v",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.budget_name, "Household");
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
