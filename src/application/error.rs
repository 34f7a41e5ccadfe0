use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed row on line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error(
        "{count} malformed row(s) were skipped on load; saving would delete them from the file"
    )]
    SkippedRowsWouldBeLost { count: usize },

    #[error("Failed to write chart: {0}")]
    Chart(#[source] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
