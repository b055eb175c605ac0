//! Record types flowing through the loader and the reconciler

use serde::Deserialize;

/// One row of the orders file
///
/// Field order gives whole-row ordering: by `order_id`, then `customer_id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
}

impl OrderRecord {
    pub fn new(order_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: customer_id.into(),
        }
    }
}

/// One row of the barcodes file, as scanned
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BarcodeRecord {
    pub barcode_id: String,
    /// Empty when the barcode is not assigned to any order
    pub order_id: String,
}

impl BarcodeRecord {
    pub fn new(barcode_id: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            barcode_id: barcode_id.into(),
            order_id: order_id.into(),
        }
    }

    /// Re-key an assigned barcode for merging; `None` if it has no order
    pub fn normalize(self) -> Option<NormalizedBarcode> {
        if self.order_id.is_empty() {
            None
        } else {
            Some(NormalizedBarcode {
                order_id: self.order_id,
                barcode_id: self.barcode_id,
            })
        }
    }
}

/// A barcode assigned to an order, keyed by `(order_id, barcode_id)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NormalizedBarcode {
    pub order_id: String,
    pub barcode_id: String,
}

impl NormalizedBarcode {
    pub fn new(order_id: impl Into<String>, barcode_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            barcode_id: barcode_id.into(),
        }
    }
}

/// A reconciled order: one line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOutputRow {
    pub order_id: String,
    pub customer_id: String,
    /// Matched barcodes, ascending
    pub barcodes: Vec<String>,
}

impl OrderOutputRow {
    /// Flatten into report fields: order, customer, then one field per barcode
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        [self.order_id.as_str(), self.customer_id.as_str()]
            .into_iter()
            .chain(self.barcodes.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_sort_by_whole_row() {
        let mut orders = vec![
            OrderRecord::new("A2", "C1"),
            OrderRecord::new("A1", "C9"),
            OrderRecord::new("A1", "C3"),
        ];
        orders.sort();

        assert_eq!(orders[0], OrderRecord::new("A1", "C3"));
        assert_eq!(orders[1], OrderRecord::new("A1", "C9"));
        assert_eq!(orders[2], OrderRecord::new("A2", "C1"));
    }

    #[test]
    fn test_normalize_swaps_fields() {
        let normalized = BarcodeRecord::new("B1", "A1").normalize();
        assert_eq!(normalized, Some(NormalizedBarcode::new("A1", "B1")));
    }

    #[test]
    fn test_normalize_unassigned() {
        assert_eq!(BarcodeRecord::new("B1", "").normalize(), None);
    }

    #[test]
    fn test_output_row_fields() {
        let row = OrderOutputRow {
            order_id: "A1".to_string(),
            customer_id: "C1".to_string(),
            barcodes: vec!["B1".to_string(), "B2".to_string()],
        };
        let fields: Vec<&str> = row.fields().collect();
        assert_eq!(fields, vec!["A1", "C1", "B1", "B2"]);
    }
}
