//! Non-fatal data anomalies reported while loading and reconciling

use std::fmt;

/// A human-readable notice about a data anomaly; never aborts a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A later occurrence of an already seen barcode was discarded
    DuplicateBarcode { barcode_id: String },
    /// An order has no barcodes ahead of it in the merge
    OrderMissingBarcodes { order_id: String },
    /// Barcodes reference an order with no customer
    OrderMissingCustomer { order_id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateBarcode { barcode_id } => {
                write!(f, "Duplicate barcode {}", barcode_id)
            }
            Diagnostic::OrderMissingBarcodes { order_id } => {
                write!(f, "Order {} is missing barcodes", order_id)
            }
            Diagnostic::OrderMissingCustomer { order_id } => {
                write!(f, "Order {} is missing customer", order_id)
            }
        }
    }
}
