mod calendar;
mod config;
mod ledger;
mod summary;
mod ui;
mod view;

use std::error::Error;
use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::calendar::month_grid;
use crate::config::{load_config, resolve_config_path};
use crate::summary::build_series;
use crate::ui::run_dashboard;

#[derive(Debug, Parser)]
#[command(name = "punchboard", about = "Terminal punch-clock dashboard")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive dashboard (default).
    Dashboard,
    /// Print a month grid.
    Calendar {
        /// Month as YYYY-MM; defaults to the current month.
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the reference weekly series.
    Week {
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config);
    let config = load_config(&config_path)?;

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => run_dashboard(&config)?,
        Command::Calendar { month, json } => {
            let today = Local::now().date_naive();
            let reference = parse_month(month.as_deref(), today)?;
            print_calendar(reference, today, json)?;
        }
        Command::Week { json } => {
            let series = build_series(&config.reference_week);
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                let max_hours = series.values.iter().cloned().fold(0.0f64, f64::max).max(1.0);
                for (label, hours) in series.labels.iter().zip(&series.values) {
                    let bar_width = ((hours / max_hours) * 24.0).round() as usize;
                    let bar = if *hours > 0.0 {
                        "=".repeat(bar_width.max(1))
                    } else {
                        String::new()
                    };
                    println!("{label:<2} {hours:>5.1}h {bar}");
                }
            }
        }
    }

    Ok(())
}

fn parse_month(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, Box<dyn Error>> {
    match input {
        Some(raw) => Ok(NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")?),
        None => Ok(NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .expect("first day of current month must be valid")),
    }
}

fn print_calendar(reference: NaiveDate, today: NaiveDate, json: bool) -> Result<(), Box<dyn Error>> {
    let cells = month_grid(reference, today);
    if json {
        println!("{}", serde_json::to_string_pretty(&cells)?);
        return Ok(());
    }

    println!("{} {}", reference.format("%B"), reference.year());
    println!("Mo Tu We Th Fr Sa Su");
    for week in cells.chunks(7) {
        let mut row = String::new();
        for cell in week {
            match cell.day {
                None => row.push_str("   "),
                Some(day) if cell.today => row.push_str(&format!("{day:>2}*")),
                Some(day) => row.push_str(&format!("{day:>2} ")),
            }
        }
        println!("{}", row.trim_end());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::parse_month;

    #[test]
    fn parses_month_argument() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(
            parse_month(Some("2026-04"), today).expect("valid month"),
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
        );
        assert_eq!(
            parse_month(None, today).expect("default month"),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert!(parse_month(Some("2026-13"), today).is_err());
    }
}
