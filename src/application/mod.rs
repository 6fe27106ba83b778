// Application layer: input validation, logging and report building
// on top of the in-memory ledger. Any front end (the interactive shell,
// tests, an exporter) goes through `LedgerService`.

pub mod error;
pub mod input;
pub mod reporting;
pub mod service;

pub use error::*;
pub use input::*;
pub use reporting::*;
pub use service::*;
