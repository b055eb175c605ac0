//! Per-customer barcode counts and top-customer ranking

use std::collections::BTreeMap;

/// Number of customers reported by default
pub const DEFAULT_TOP_K: usize = 5;

/// Running count of matched barcodes per customer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerTally {
    counts: BTreeMap<String, usize>,
}

impl CustomerTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` matched barcodes to a customer, starting from zero
    pub fn add(&mut self, customer_id: &str, count: usize) {
        match self.counts.get_mut(customer_id) {
            Some(total) => *total += count,
            None => {
                self.counts.insert(customer_id.to_string(), count);
            }
        }
    }

    /// Count for a customer; zero if never seen
    pub fn get(&self, customer_id: &str) -> usize {
        self.counts.get(customer_id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over all customers
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Customers in ascending customer_id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(id, &count)| (id.as_str(), count))
    }
}

/// A customer and its matched barcode count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub customer_id: String,
    pub count: usize,
}

impl RankedEntry {
    pub fn new(customer_id: impl Into<String>, count: usize) -> Self {
        Self {
            customer_id: customer_id.into(),
            count,
        }
    }
}

/// The `k` customers with the most matched barcodes
///
/// Sorted by count descending; equal counts are ordered by ascending
/// customer_id.
pub fn rank(tally: &CustomerTally, k: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<(&str, usize)> = tally.iter().collect();
    // iter() is already ascending by id, so a stable sort keeps the tie order
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(k);

    entries
        .into_iter()
        .map(|(id, count)| RankedEntry::new(id, count))
        .collect()
}
