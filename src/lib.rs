pub mod application;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod storage;

pub use application::ExpenseTracker;
pub use domain::*;
