use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Expense, WeekKey, percentage, totals_by_category, totals_by_week};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Cents,
    pub count: i64,
    pub average: Cents,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub weeks: Vec<WeekSummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week: WeekKey,
    pub total: Cents,
    pub count: i64,
}

impl SpendingReport {
    /// Build the category breakdown. `None` when there is nothing to report.
    pub fn build(expenses: &[Expense]) -> Option<Self> {
        if expenses.is_empty() {
            return None;
        }

        let totals = totals_by_category(expenses);
        let total: Cents = totals.values().map(|t| t.total).sum();
        let categories = totals
            .into_iter()
            .map(|(category, tally)| CategorySummary {
                category,
                total: tally.total,
                count: tally.count,
                average: tally.total / tally.count,
                percentage: percentage(tally.total, total),
            })
            .collect();

        Some(Self { categories, total })
    }

    pub fn category(&self, name: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == name)
    }
}

impl WeeklyReport {
    /// Build per-week totals, oldest week first. `None` when there is nothing to report.
    pub fn build(expenses: &[Expense]) -> Option<Self> {
        if expenses.is_empty() {
            return None;
        }

        let weeks: Vec<WeekSummary> = totals_by_week(expenses)
            .into_iter()
            .map(|(week, tally)| WeekSummary {
                week,
                total: tally.total,
                count: tally.count,
            })
            .collect();
        let total = weeks.iter().map(|w| w.total).sum();

        Some(Self { weeks, total })
    }
}
