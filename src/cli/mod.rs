use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::{ExpenseTracker, LoadOptions, LoadOutcome, SpendingReport, WeeklyReport};
use crate::chart::{self, ChartOutcome, DEFAULT_BAR_FILE, DEFAULT_PIE_FILE};
use crate::domain::{DATE_FORMAT, Expense, format_cents};

/// Spendlog - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Record expenses in a CSV file and see where the money goes")]
#[command(version)]
pub struct Cli {
    /// Expense file path
    #[arg(short, long, env = "SPENDLOG_FILE", default_value = "expenses.csv")]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip malformed rows in the expense file instead of refusing to load it
    #[arg(long, global = true)]
    pub skip_invalid: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g., "12.50" or "40")
        amount: String,

        /// Category (e.g., "food", "transport")
        #[arg(short, long)]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Save even though rows skipped by --skip-invalid will be deleted from the file
        #[arg(long)]
        discard_invalid: bool,
    },

    /// List recorded expenses
    List {
        /// Show only the last N expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Spending per category with the grand total
    Report {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Spending summed per week
    Weekly {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Render charts as SVG files
    #[command(subcommand)]
    Chart(ChartCommands),
}

#[derive(Subcommand)]
pub enum ChartCommands {
    /// Pie chart of spending by category
    Pie {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_PIE_FILE)]
        output: PathBuf,
    },

    /// Bar chart of weekly spending
    Weekly {
        /// Output file
        #[arg(short, long, default_value = DEFAULT_BAR_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut tracker = ExpenseTracker::new(&self.file);
        let outcome = tracker
            .load_with(LoadOptions {
                skip_invalid: self.skip_invalid,
            })
            .with_context(|| format!("Could not load {}", self.file.display()))?;
        self.report_load(&outcome);

        match self.command {
            Commands::Add {
                amount,
                category,
                date,
                discard_invalid,
            } => {
                let date = date.unwrap_or_else(today);
                let expense = Expense::parse(&date, &amount, &category)?;
                let confirmation = format!(
                    "Added expense: {} - ${} on {}",
                    expense.category,
                    format_cents(expense.amount_cents),
                    expense.date.format(DATE_FORMAT)
                );
                tracker.add(expense);
                if discard_invalid {
                    tracker.save_discarding_skipped()?;
                } else {
                    tracker.save().context(
                        "Nothing was saved. Fix the rows or pass --discard-invalid to drop them",
                    )?;
                }
                println!("{}", confirmation);
                if self.verbose {
                    eprintln!(
                        "Saved {} expense(s) to {}",
                        tracker.len(),
                        self.file.display()
                    );
                }
            }

            Commands::List { limit } => {
                print_expenses(&tracker, limit);
            }

            Commands::Report { format } => match tracker.report() {
                Some(report) => print_spending_report(&report, &format)?,
                None => println!("No expenses to display."),
            },

            Commands::Weekly { format } => match tracker.weekly_report() {
                Some(report) => print_weekly_report(&report, &format)?,
                None => println!("No expenses to display."),
            },

            Commands::Chart(ChartCommands::Pie { output }) => {
                match chart::category_pie(tracker.expenses(), &output)? {
                    ChartOutcome::Written(path) => {
                        println!("Pie chart written to {}", path.display())
                    }
                    ChartOutcome::NoData => println!("No data to show."),
                }
            }

            Commands::Chart(ChartCommands::Weekly { output }) => {
                match chart::weekly_bars(tracker.expenses(), &output)? {
                    ChartOutcome::Written(path) => {
                        println!("Bar chart written to {}", path.display())
                    }
                    ChartOutcome::NoData => println!("No data to visualize."),
                }
            }
        }

        Ok(())
    }

    fn report_load(&self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Missing => {
                if self.verbose {
                    eprintln!("No existing file found. Starting fresh.");
                }
            }
            LoadOutcome::Loaded { count, skipped } => {
                if self.verbose {
                    eprintln!("Loaded {} expense(s) from {}", count, self.file.display());
                }
                if !skipped.is_empty() {
                    eprintln!("Skipped {} malformed row(s):", skipped.len());
                    for row in skipped.iter().take(10) {
                        eprintln!("  Line {}: {}", row.line, row.reason);
                    }
                    if skipped.len() > 10 {
                        eprintln!("  ... and {} more", skipped.len() - 10);
                    }
                }
            }
        }
    }
}

fn print_expenses(tracker: &ExpenseTracker, limit: Option<usize>) {
    if tracker.is_empty() {
        println!("No expenses to display.");
        return;
    }

    let expenses = tracker.expenses();
    let start = limit.map_or(0, |n| expenses.len().saturating_sub(n));

    println!("{:<12} {:>12}  {}", "DATE", "AMOUNT", "CATEGORY");
    println!("{}", "-".repeat(46));
    for expense in &expenses[start..] {
        println!(
            "{:<12} {:>12}  {}",
            expense.date.format(DATE_FORMAT).to_string(),
            format_cents(expense.amount_cents),
            truncate(&expense.category, 30)
        );
    }
}

fn print_spending_report(report: &SpendingReport, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["category", "total", "count", "average", "percentage"])?;
            for cat in &report.categories {
                writer.write_record([
                    cat.category.clone(),
                    format_cents(cat.total),
                    cat.count.to_string(),
                    format_cents(cat.average),
                    format!("{:.2}", cat.percentage),
                ])?;
            }
            writer.flush()?;
        }
        _ => {
            println!("Spending Report");
            println!();
            println!(
                "{:<20} {:>12} {:>8} {:>12} {:>8}",
                "CATEGORY", "TOTAL", "COUNT", "AVERAGE", "PERCENT"
            );
            println!("{}", "-".repeat(65));

            for cat in &report.categories {
                println!(
                    "{:<20} {:>12} {:>8} {:>12} {:>7.1}%",
                    truncate(&cat.category, 20),
                    format_cents(cat.total),
                    cat.count,
                    format_cents(cat.average),
                    cat.percentage
                );
            }

            println!("{}", "-".repeat(65));
            println!("Total Spending: ${}", format_cents(report.total));
        }
    }
    Ok(())
}

fn print_weekly_report(report: &WeeklyReport, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["week", "total", "count"])?;
            for week in &report.weeks {
                writer.write_record([
                    week.week.to_string(),
                    format_cents(week.total),
                    week.count.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        _ => {
            println!("Weekly Spending");
            println!();
            println!("{:<10} {:>12} {:>8}", "WEEK", "TOTAL", "COUNT");
            println!("{}", "-".repeat(32));
            for week in &report.weeks {
                println!(
                    "{:<10} {:>12} {:>8}",
                    week.week.to_string(),
                    format_cents(week.total),
                    week.count
                );
            }
            println!("{}", "-".repeat(32));
            println!("Total Spending: ${}", format_cents(report.total));
        }
    }
    Ok(())
}

fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
