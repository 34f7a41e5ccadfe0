use std::path::{Path, PathBuf};

use crate::domain::{DATE_FORMAT, Expense, format_cents};
use crate::storage::CsvStore;

use super::{AppError, SpendingReport, WeeklyReport};

/// How `load_with` treats rows that fail validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip malformed rows (logging a warning) instead of aborting the load
    pub skip_invalid: bool,
}

/// Result of loading the expense file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file at the storage path; the ledger starts empty
    Missing,
    Loaded { count: usize, skipped: Vec<SkippedRow> },
}

/// A row left out of the ledger because it did not validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// The expense ledger for one session: the in-memory records plus the file
/// they are loaded from and saved to.
///
/// Nothing touches the file except `load*` and `save*`; `add` only changes
/// the in-memory list.
///
/// Rows skipped by the last load still exist only in the file. `save`
/// refuses to overwrite them; `save_discarding_skipped` drops them.
pub struct ExpenseTracker {
    store: CsvStore,
    expenses: Vec<Expense>,
    skipped_on_load: usize,
}

impl ExpenseTracker {
    /// Create an empty tracker bound to the given file. The file is not read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: CsvStore::new(path),
            expenses: Vec::new(),
            skipped_on_load: 0,
        }
    }

    /// Create a tracker and load it, failing on the first malformed row.
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, LoadOutcome), AppError> {
        let mut tracker = Self::new(path);
        let outcome = tracker.load()?;
        Ok((tracker, outcome))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn add(&mut self, expense: Expense) {
        tracing::info!(
            "Added expense: {} - ${} on {}",
            expense.category,
            format_cents(expense.amount_cents),
            expense.date.format(DATE_FORMAT)
        );
        self.expenses.push(expense);
    }

    pub fn load(&mut self) -> Result<LoadOutcome, AppError> {
        self.load_with(LoadOptions::default())
    }

    /// Replace the in-memory expenses with the contents of the file.
    ///
    /// On error the in-memory expenses are left untouched.
    pub fn load_with(&mut self, options: LoadOptions) -> Result<LoadOutcome, AppError> {
        let Some(rows) = self.store.read()? else {
            tracing::info!(
                path = %self.path().display(),
                "No existing file found. Starting fresh."
            );
            self.expenses.clear();
            self.skipped_on_load = 0;
            return Ok(LoadOutcome::Missing);
        };

        let mut expenses = Vec::with_capacity(rows.len());
        let mut skipped = Vec::new();

        for stored in rows {
            let parsed = stored
                .row
                .and_then(|row| Expense::from_row(&row).map_err(|e| e.to_string()));

            match parsed {
                Ok(expense) => expenses.push(expense),
                Err(reason) if options.skip_invalid => {
                    tracing::warn!(line = stored.line, %reason, "skipping malformed row");
                    skipped.push(SkippedRow {
                        line: stored.line,
                        reason,
                    });
                }
                Err(reason) => {
                    return Err(AppError::MalformedRow {
                        line: stored.line,
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            path = %self.path().display(),
            count = expenses.len(),
            skipped = skipped.len(),
            "Expenses loaded"
        );
        let count = expenses.len();
        self.expenses = expenses;
        self.skipped_on_load = skipped.len();
        Ok(LoadOutcome::Loaded { count, skipped })
    }

    /// Number of file rows the last load left out of the ledger.
    pub fn skipped_on_load(&self) -> usize {
        self.skipped_on_load
    }

    /// Overwrite the file with every in-memory expense, in insertion order.
    ///
    /// Fails with `AppError::SkippedRowsWouldBeLost` when the last load
    /// skipped rows, leaving the file as it was.
    pub fn save(&self) -> Result<usize, AppError> {
        if self.skipped_on_load > 0 {
            return Err(AppError::SkippedRowsWouldBeLost {
                count: self.skipped_on_load,
            });
        }
        self.write()
    }

    /// Like `save`, but overwrites the file even if that deletes rows the
    /// last load skipped.
    pub fn save_discarding_skipped(&mut self) -> Result<usize, AppError> {
        if self.skipped_on_load > 0 {
            tracing::warn!(
                path = %self.path().display(),
                discarded = self.skipped_on_load,
                "discarding malformed rows from file"
            );
        }
        let count = self.write()?;
        self.skipped_on_load = 0;
        Ok(count)
    }

    fn write(&self) -> Result<usize, AppError> {
        let count = self.store.write(&self.expenses)?;
        tracing::info!(path = %self.path().display(), count, "Expenses saved");
        Ok(count)
    }

    /// Category breakdown and grand total; `None` when there are no expenses.
    pub fn report(&self) -> Option<SpendingReport> {
        SpendingReport::build(&self.expenses)
    }

    /// Per-week totals; `None` when there are no expenses.
    pub fn weekly_report(&self) -> Option<WeeklyReport> {
        WeeklyReport::build(&self.expenses)
    }
}
