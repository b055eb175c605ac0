//! scanmerge-core: Core library for reconciling orders with scanned barcodes
//!
//! This library provides functionality to:
//! - Load orders and barcodes CSV files into sorted, normalized sequences
//! - Reconcile both sequences with a single-pass merge-join
//! - Tally matched barcodes per customer and rank the top customers
//! - Write the per-order report atomically

pub mod diagnostic;
pub mod error;
pub mod loader;
pub mod reconciler;
pub mod records;
pub mod report;
pub mod tally;

pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use loader::{load_barcodes, load_orders, read_barcodes, read_orders, LoadedBarcodes};
pub use reconciler::{reconcile, reconcile_with, EndOfInput, Reconciliation, ReportSink};
pub use records::{BarcodeRecord, NormalizedBarcode, OrderOutputRow, OrderRecord};
pub use report::CsvReport;
pub use tally::{rank, CustomerTally, RankedEntry, DEFAULT_TOP_K};
