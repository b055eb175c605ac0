//! Merge-join of sorted orders and sorted barcodes
//!
//! Both inputs must be sorted ascending by order_id, which the loader
//! guarantees. The pass is single and forward: an order's barcodes are
//! only emitted once a barcode for a later order is seen. By default the
//! group pending when either side runs out is never written; see
//! [`EndOfInput`] for the draining alternative.

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::records::{NormalizedBarcode, OrderOutputRow, OrderRecord};
use crate::tally::CustomerTally;
use log::{debug, info};
use std::cmp::Ordering;

/// Destination for reconciled order rows
pub trait ReportSink {
    /// Write one row; an error aborts the reconciliation
    fn write_row(&mut self, row: &OrderOutputRow) -> Result<()>;
}

impl ReportSink for Vec<OrderOutputRow> {
    fn write_row(&mut self, row: &OrderOutputRow) -> Result<()> {
        self.push(row.clone());
        Ok(())
    }
}

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Matched barcodes per customer
    pub tally: CustomerTally,
    /// Reconciliation gaps, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
    /// Number of rows handed to the sink
    pub rows_written: usize,
}

impl Reconciliation {
    fn report(&mut self, diagnostic: Diagnostic) {
        debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

/// What to do with whatever is left when one side runs out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndOfInput {
    /// Stop at once: the pending group and every trailing record are dropped
    /// without output or diagnostics
    #[default]
    Truncate,
    /// Close the pending order, then report every trailing order as missing
    /// barcodes and every trailing barcode as missing its customer
    Drain,
}

/// Reconcile orders with barcodes, writing one row per matched order
///
/// Uses [`EndOfInput::Truncate`].
pub fn reconcile<S: ReportSink + ?Sized>(
    orders: &[OrderRecord],
    barcodes: &[NormalizedBarcode],
    sink: &mut S,
) -> Result<Reconciliation> {
    reconcile_with(orders, barcodes, sink, EndOfInput::default())
}

/// Reconcile orders with barcodes with an explicit end-of-input policy
pub fn reconcile_with<S: ReportSink + ?Sized>(
    orders: &[OrderRecord],
    barcodes: &[NormalizedBarcode],
    sink: &mut S,
    end: EndOfInput,
) -> Result<Reconciliation> {
    let mut result = Reconciliation::default();
    let mut current_order: Vec<String> = Vec::new();

    let mut i = 0;
    let mut j = 0;

    while i < orders.len() && j < barcodes.len() {
        let order = &orders[i];
        let barcode = &barcodes[j];

        match order.order_id.cmp(&barcode.order_id) {
            Ordering::Equal => {
                current_order.push(barcode.barcode_id.clone());
                j += 1;
            }
            Ordering::Less => {
                close_order(order, &mut current_order, sink, &mut result)?;
                i += 1;
            }
            Ordering::Greater => {
                result.report(Diagnostic::OrderMissingCustomer {
                    order_id: barcode.order_id.clone(),
                });
                j += 1;
            }
        }
    }

    match end {
        EndOfInput::Truncate => {
            if let Some(order) = orders.get(i).filter(|_| !current_order.is_empty()) {
                debug!(
                    "dropping {} pending barcodes for order {} at end of input",
                    current_order.len(),
                    order.order_id
                );
            }
        }
        EndOfInput::Drain => {
            for order in &orders[i..] {
                close_order(order, &mut current_order, sink, &mut result)?;
            }
            for barcode in &barcodes[j..] {
                result.report(Diagnostic::OrderMissingCustomer {
                    order_id: barcode.order_id.clone(),
                });
            }
        }
    }

    info!(
        "reconciled {} orders with {} barcodes: {} rows written, {} diagnostics",
        orders.len(),
        barcodes.len(),
        result.rows_written,
        result.diagnostics.len()
    );
    Ok(result)
}

/// Emit the group collected for `order`, or report it as missing barcodes
fn close_order<S: ReportSink + ?Sized>(
    order: &OrderRecord,
    current_order: &mut Vec<String>,
    sink: &mut S,
    result: &mut Reconciliation,
) -> Result<()> {
    if current_order.is_empty() {
        result.report(Diagnostic::OrderMissingBarcodes {
            order_id: order.order_id.clone(),
        });
        return Ok(());
    }

    let row = OrderOutputRow {
        order_id: order.order_id.clone(),
        customer_id: order.customer_id.clone(),
        barcodes: std::mem::take(current_order),
    };
    debug!(
        "order {} ({}): {} barcodes",
        row.order_id,
        row.customer_id,
        row.barcodes.len()
    );
    sink.write_row(&row)?;
    result.tally.add(&row.customer_id, row.barcodes.len());
    result.rows_written += 1;
    Ok(())
}
