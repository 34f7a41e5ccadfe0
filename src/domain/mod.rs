mod expense;
mod ledger;
mod money;
mod week;

pub use expense::*;
pub use ledger::*;
pub use money::*;
pub use week::*;
