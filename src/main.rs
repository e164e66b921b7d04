//! Example CLI: aggregates one date's SFT files and prints the report as JSON.

use std::env;

use chrono::NaiveDate;
use sft_sales_report::{AggregateOutcome, DirectoryStore, ReportService};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let (Some(root), Some(date)) = (args.next(), args.next()) else {
        println!("Usage: sft-sales-report <reports-root-dir> <YYYY-MM-DD>");
        return Ok(());
    };
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?;

    let mut service = ReportService::new(DirectoryStore::new(root));
    match service.aggregate(date)? {
        AggregateOutcome::NoFilesFound => {
            println!("No SFT files found for {date}");
        }
        AggregateOutcome::Report(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
