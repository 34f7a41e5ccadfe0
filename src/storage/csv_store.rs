use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::domain::{Expense, ExpenseRow};

/// Column names, in the order they are written.
pub const HEADER: [&str; 3] = ["date", "amount", "category"];

/// One data row as read from the file, before validation.
#[derive(Debug, Clone)]
pub struct StoredRow {
    /// 1-based line in the file (the header is line 1)
    pub line: u64,
    /// The raw fields, or why the line could not be read as a row
    pub row: Result<ExpenseRow, String>,
}

/// Flat CSV file holding every expense of the ledger.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all rows. Returns `None` when the file does not exist.
    pub fn read(&self) -> Result<Option<Vec<StoredRow>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open {}", self.path.display()));
            }
        };

        let rows = read_rows(file)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "read expense file");
        Ok(Some(rows))
    }

    /// Replace the file contents with the given expenses, in order.
    pub fn write(&self, expenses: &[Expense]) -> Result<usize> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        let count = write_rows(file, expenses)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), rows = count, "wrote expense file");
        Ok(count)
    }
}

/// Parse CSV rows keyed by header name. Row-level problems are returned
/// per row; only I/O failures abort the whole read.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<StoredRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for result in csv_reader.records() {
        match result {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                let row = record
                    .deserialize::<ExpenseRow>(Some(&headers))
                    .map_err(|e| e.to_string());
                rows.push(StoredRow { line, row });
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                rows.push(StoredRow {
                    line,
                    row: Err(format!("CSV parse error: {}", e)),
                });
            }
        }
    }

    Ok(rows)
}

/// Write the header and one row per expense.
pub fn write_rows<W: Write>(writer: W, expenses: &[Expense]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    let mut count = 0;
    for expense in expenses {
        let row = expense.to_row();
        csv_writer.write_record([&row.date, &row.amount, &row.category])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(date: &str, amount: &str, category: &str) -> Expense {
        Expense::parse(date, amount, category).unwrap()
    }

    #[test]
    fn test_write_rows_format() {
        let mut out = Vec::new();
        let count = write_rows(
            &mut out,
            &[
                expense("2024-01-05", "12.5", "food"),
                expense("2024-01-10", "20", "bus, train"),
            ],
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,amount,category\n2024-01-05,12.50,food\n2024-01-10,20.00,\"bus, train\"\n"
        );
    }

    #[test]
    fn test_write_rows_empty_still_has_header() {
        let mut out = Vec::new();
        write_rows(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "date,amount,category\n");
    }

    #[test]
    fn test_read_rows_by_header_name() {
        let data = "category,date,amount\nfood,2024-01-05,12.50\n";
        let rows = read_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);
        let row = rows[0].row.as_ref().unwrap();
        assert_eq!(row.date, "2024-01-05");
        assert_eq!(row.amount, "12.50");
        assert_eq!(row.category, "food");
    }

    #[test]
    fn test_read_rows_reports_bad_lines() {
        let data = "date,amount,category\n2024-01-05,12.50,food\n2024-01-06,oops\n2024-01-07,1,x\n";
        let rows = read_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].row.is_ok());
        assert_eq!(rows[1].line, 3);
        assert!(rows[1].row.is_err());
        assert_eq!(rows[2].line, 4);
        assert!(rows[2].row.is_ok());
    }

    #[test]
    fn test_read_rows_empty_input() {
        assert!(read_rows("".as_bytes()).unwrap().is_empty());
        assert!(read_rows("date,amount,category\n".as_bytes()).unwrap().is_empty());
    }
}
