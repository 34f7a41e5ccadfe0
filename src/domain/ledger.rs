use std::collections::BTreeMap;

use super::{Cents, Expense, WeekKey};

/// Running totals for one group of expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: Cents,
    pub count: i64,
}

impl Tally {
    fn add(&mut self, amount: Cents) {
        self.total += amount;
        self.count += 1;
    }
}

/// Sum expenses per category.
/// Categories come back sorted by name, so the result does not depend on insertion order.
pub fn totals_by_category(expenses: &[Expense]) -> BTreeMap<String, Tally> {
    let mut totals: BTreeMap<String, Tally> = BTreeMap::new();
    for expense in expenses {
        totals
            .entry(expense.category.clone())
            .or_default()
            .add(expense.amount_cents);
    }
    totals
}

/// Sum expenses per week, ordered by week.
pub fn totals_by_week(expenses: &[Expense]) -> BTreeMap<WeekKey, Tally> {
    let mut totals: BTreeMap<WeekKey, Tally> = BTreeMap::new();
    for expense in expenses {
        totals.entry(expense.week()).or_default().add(expense.amount_cents);
    }
    totals
}

pub fn grand_total(expenses: &[Expense]) -> Cents {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Share of `part` in `total`, in percent. Zero when the total is zero.
pub fn percentage(part: Cents, total: Cents) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(date: &str, amount: &str, category: &str) -> Expense {
        Expense::parse(date, amount, category).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("2024-01-05", "12.50", "food"),
            expense("2024-01-06", "40.00", "food"),
            expense("2024-01-10", "20.00", "transport"),
        ]
    }

    #[test]
    fn test_totals_by_category_empty() {
        assert!(totals_by_category(&[]).is_empty());
        assert_eq!(grand_total(&[]), 0);
    }

    #[test]
    fn test_totals_by_category() {
        let totals = totals_by_category(&sample());

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["food"], Tally { total: 5250, count: 2 });
        assert_eq!(totals["transport"], Tally { total: 2000, count: 1 });
        assert_eq!(grand_total(&sample()), 7250);
    }

    #[test]
    fn test_category_totals_sum_to_grand_total() {
        let mut expenses = sample();
        expenses.push(expense("2024-02-01", "0.01", "Food"));
        expenses.push(expense("2024-02-01", "0.01", "Food")); // duplicate counts twice

        let totals = totals_by_category(&expenses);
        let sum: Cents = totals.values().map(|t| t.total).sum();

        assert_eq!(totals["Food"], Tally { total: 2, count: 2 });
        assert_eq!(sum, grand_total(&expenses));
    }

    #[test]
    fn test_category_order_is_independent_of_insertion() {
        let mut reversed = sample();
        reversed.reverse();

        let forward: Vec<_> = totals_by_category(&sample()).into_iter().collect();
        let backward: Vec<_> = totals_by_category(&reversed).into_iter().collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_totals_by_week() {
        let totals = totals_by_week(&sample());
        let weeks: Vec<_> = totals.iter().collect();

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].0, &WeekKey { year: 2024, week: 0 });
        assert_eq!(weeks[0].1.total, 5250);
        assert_eq!(weeks[1].0, &WeekKey { year: 2024, week: 1 });
        assert_eq!(weeks[1].1.total, 2000);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert!((percentage(5250, 7250) - 72.41).abs() < 0.01);
        assert_eq!(percentage(2000, 2000), 100.0);
    }
}
