//! scanmerge CLI
//!
//! Merges an orders CSV file and a barcodes CSV file by order_id, writes one
//! report row per order with its barcodes, and prints the top customers.

use clap::Parser;
use log::info;
use scanmerge_core::{
    load_barcodes, load_orders, rank, reconcile, CsvReport, Diagnostic, DEFAULT_TOP_K,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scanmerge")]
#[command(
    about = "Merge orders and barcodes CSV files by order_id and write to output CSV file",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to orders CSV file
    #[arg(long, default_value = "orders.csv")]
    orders: PathBuf,

    /// Path to barcodes CSV file
    #[arg(long, default_value = "barcodes.csv")]
    barcodes: PathBuf,

    /// Path to output CSV file
    #[arg(long, default_value = "output.csv")]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> scanmerge_core::Result<()> {
    let cli = Cli::parse();

    let orders = load_orders(&cli.orders)?;

    let loaded = load_barcodes(&cli.barcodes)?;
    print_diagnostics(&loaded.diagnostics);
    println!("Unused barcodes: {}", loaded.unused_count);

    let mut report = CsvReport::create(&cli.output)?;
    let reconciliation = reconcile(&orders, &loaded.barcodes, &mut report)?;
    print_diagnostics(&reconciliation.diagnostics);
    let output = report.commit()?;
    info!(
        "{} orders written to {}",
        reconciliation.rows_written,
        output.display()
    );

    println!("Top {} customers:", DEFAULT_TOP_K);
    for entry in rank(&reconciliation.tally, DEFAULT_TOP_K) {
        println!("{}, {}", entry.customer_id, entry.count);
    }

    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);
    }
}
