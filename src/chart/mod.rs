//! SVG charts for the categorical and weekly views.
//!
//! Both entry points are read-only over the expenses and write a single SVG
//! file. An empty expense list writes nothing and yields [`ChartOutcome::NoData`].

mod bar;
mod pie;

use std::path::{Path, PathBuf};

use svg::Document;

use crate::application::AppError;
use crate::domain::{Cents, Expense, totals_by_category, totals_by_week};

pub use bar::BarChart;
pub use pie::PieChart;

pub const DEFAULT_PIE_FILE: &str = "spending_by_category.svg";
pub const DEFAULT_BAR_FILE: &str = "weekly_spending.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    NoData,
    Written(PathBuf),
}

/// A labelled numeric series, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<(String, Cents)>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: Cents) {
        self.points.push((label.into(), value));
    }

    pub fn points(&self) -> &[(String, Cents)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total(&self) -> Cents {
        self.points.iter().map(|(_, v)| v).sum()
    }

    pub fn max(&self) -> Cents {
        self.points.iter().map(|(_, v)| *v).max().unwrap_or(0)
    }
}

impl<L: Into<String>> FromIterator<(L, Cents)> for Series {
    fn from_iter<I: IntoIterator<Item = (L, Cents)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(|(l, v)| (l.into(), v)).collect(),
        }
    }
}

/// Spending per category, sorted by category name.
pub fn category_series(expenses: &[Expense]) -> Series {
    totals_by_category(expenses)
        .into_iter()
        .map(|(category, tally)| (category, tally.total))
        .collect()
}

/// Spending per week, oldest week first.
pub fn weekly_series(expenses: &[Expense]) -> Series {
    totals_by_week(expenses)
        .into_iter()
        .map(|(week, tally)| (week.to_string(), tally.total))
        .collect()
}

/// Render the share of spending per category as a pie chart.
pub fn category_pie(expenses: &[Expense], output: &Path) -> Result<ChartOutcome, AppError> {
    if expenses.is_empty() {
        return Ok(ChartOutcome::NoData);
    }
    let chart = PieChart::new("Spending by Category", category_series(expenses));
    match chart.document() {
        Some(document) => write_chart(output, &document),
        None => Ok(ChartOutcome::NoData),
    }
}

/// Render spending summed per week as a bar chart.
pub fn weekly_bars(expenses: &[Expense], output: &Path) -> Result<ChartOutcome, AppError> {
    if expenses.is_empty() {
        return Ok(ChartOutcome::NoData);
    }
    let chart = BarChart::new("Weekly Spending", weekly_series(expenses))
        .with_axis_labels("Week Number", "Total Spending ($)");
    write_chart(output, &chart.document())
}

fn write_chart(output: &Path, document: &Document) -> Result<ChartOutcome, AppError> {
    svg::save(output, document).map_err(AppError::Chart)?;
    tracing::info!(path = %output.display(), "chart written");
    Ok(ChartOutcome::Written(output.to_path_buf()))
}

/// Text nodes are written verbatim, so markup characters in labels must be escaped.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const COLORS: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Expense> {
        vec![
            Expense::parse("2024-01-05", "12.50", "food").unwrap(),
            Expense::parse("2024-01-06", "40.00", "food").unwrap(),
            Expense::parse("2024-01-10", "20.00", "transport").unwrap(),
        ]
    }

    #[test]
    fn test_category_series() {
        let series = category_series(&sample());
        assert_eq!(
            series.points(),
            &[("food".to_string(), 5250), ("transport".to_string(), 2000)]
        );
        assert_eq!(series.total(), 7250);
        assert_eq!(series.max(), 5250);
    }

    #[test]
    fn test_weekly_series() {
        let series = weekly_series(&sample());
        assert_eq!(
            series.points(),
            &[("2024-W00".to_string(), 5250), ("2024-W01".to_string(), 2000)]
        );
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let path = Path::new("never-written.svg");
        assert_eq!(category_pie(&[], path).unwrap(), ChartOutcome::NoData);
        assert_eq!(weekly_bars(&[], path).unwrap(), ChartOutcome::NoData);
        assert!(!path.exists());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("food & drink"), "food &amp; drink");
        assert_eq!(escape("<b>"), "&lt;b&gt;");
        assert_eq!(escape("plain"), "plain");
    }
}
