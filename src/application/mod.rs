// Application layer: the session ledger and the reports built from it.

pub mod error;
pub mod reporting;
pub mod tracker;

pub use error::*;
pub use reporting::*;
pub use tracker::*;
