mod budget;
mod ledger;
mod money;
mod transaction;

pub use budget::*;
pub use ledger::*;
pub use money::*;
pub use transaction::*;
