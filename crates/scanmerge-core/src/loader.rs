//! CSV loader for orders and barcodes files
//!
//! Both loaders share the same row policy: the first line is a header and is
//! discarded even when blank, and any row without exactly two columns is
//! skipped silently.
//! Only stream-level failures (open, read, invalid UTF-8) are errors.

use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::records::{BarcodeRecord, NormalizedBarcode, OrderRecord};
use log::{debug, info, trace};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const COLUMN_COUNT: usize = 2;

/// Barcodes ready for merging, plus what was filtered out on the way
#[derive(Debug, Clone, Default)]
pub struct LoadedBarcodes {
    /// Assigned, unique barcodes sorted by `(order_id, barcode_id)`
    pub barcodes: Vec<NormalizedBarcode>,
    /// Unique barcodes with an empty order_id
    pub unused_count: usize,
    /// One `DuplicateBarcode` per discarded repeat, in file order
    pub diagnostics: Vec<Diagnostic>,
}

/// Load and sort an orders CSV file
pub fn load_orders<P: AsRef<Path>>(path: P) -> Result<Vec<OrderRecord>> {
    let path = path.as_ref();
    let file = open(path)?;
    read_orders(file, path)
}

/// Read orders from any reader; `source` is only used in error messages
pub fn read_orders<R: Read>(reader: R, source: &Path) -> Result<Vec<OrderRecord>> {
    let mut orders: Vec<OrderRecord> = read_two_column_rows(reader, source)?;
    orders.sort();

    info!("loaded {} orders from {}", orders.len(), source.display());
    Ok(orders)
}

/// Load, deduplicate, normalize and sort a barcodes CSV file
pub fn load_barcodes<P: AsRef<Path>>(path: P) -> Result<LoadedBarcodes> {
    let path = path.as_ref();
    let file = open(path)?;
    read_barcodes(file, path)
}

/// Read barcodes from any reader; `source` is only used in error messages
pub fn read_barcodes<R: Read>(reader: R, source: &Path) -> Result<LoadedBarcodes> {
    let rows: Vec<BarcodeRecord> = read_two_column_rows(reader, source)?;

    let mut loaded = LoadedBarcodes::default();
    let mut seen: HashSet<String> = HashSet::new();

    for row in rows {
        if !seen.insert(row.barcode_id.clone()) {
            let diagnostic = Diagnostic::DuplicateBarcode {
                barcode_id: row.barcode_id,
            };
            debug!("{}", diagnostic);
            loaded.diagnostics.push(diagnostic);
            continue;
        }

        match row.normalize() {
            Some(barcode) => loaded.barcodes.push(barcode),
            None => loaded.unused_count += 1,
        }
    }

    loaded.barcodes.sort();

    info!(
        "loaded {} barcodes from {} ({} unused, {} duplicates)",
        loaded.barcodes.len(),
        source.display(),
        loaded.unused_count,
        loaded.diagnostics.len()
    );
    Ok(loaded)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Deserialize every well-shaped data row, in file order
fn read_two_column_rows<R, T>(reader: R, source: &Path) -> Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(reader);

    // The csv reader skips blank lines, so the header line is consumed here
    let mut header = Vec::new();
    reader
        .read_until(b'\n', &mut header)
        .map_err(|e| Error::FileRead {
            path: source.to_path_buf(),
            source: e,
        })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // Row shape is checked below
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: source.to_path_buf(),
            source: e,
        })?;

        if record.len() != COLUMN_COUNT {
            trace!(
                "skipping row {} in {}: expected {} columns, found {}",
                row_idx + 1,
                source.display(),
                COLUMN_COUNT,
                record.len()
            );
            continue;
        }

        let row = record.deserialize(None).map_err(|e| Error::Csv {
            path: source.to_path_buf(),
            source: e,
        })?;
        rows.push(row);
    }

    Ok(rows)
}
