// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use spendlog::ExpenseTracker;
use spendlog::domain::Expense;
use tempfile::TempDir;

/// Helper to create an empty tracker bound to a file inside a temporary directory
pub fn test_tracker() -> Result<(ExpenseTracker, TempDir)> {
    let temp_dir = TempDir::new()?;
    let tracker = ExpenseTracker::new(expense_file(&temp_dir));
    Ok((tracker, temp_dir))
}

/// Path of the expense file used by `test_tracker`
pub fn expense_file(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.csv")
}

/// Helper to build an expense from its textual fields
pub fn expense(date: &str, amount: &str, category: &str) -> Expense {
    Expense::parse(date, amount, category).unwrap()
}

/// The three expenses used throughout the reporting scenarios
pub fn sample_expenses() -> Vec<Expense> {
    vec![
        expense("2024-01-05", "12.50", "food"),
        expense("2024-01-06", "40.00", "food"),
        expense("2024-01-10", "20.00", "transport"),
    ]
}

/// Tracker pre-filled with `sample_expenses`
pub fn sample_tracker() -> Result<(ExpenseTracker, TempDir)> {
    let (mut tracker, temp_dir) = test_tracker()?;
    for expense in sample_expenses() {
        tracker.add(expense);
    }
    Ok((tracker, temp_dir))
}
