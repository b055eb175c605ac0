//! CSV report output
//!
//! The report has a fixed `order_id,customer_id,barcodes` header followed by
//! one row per reconciled order with a variable number of barcode columns.
//! File reports are staged in a temporary file next to the destination and
//! only renamed into place by [`CsvReport::commit`], so an aborted run never
//! leaves a partial report behind. A committed report keeps the mode of the
//! file it replaces, or gets a world-readable mode when it is new.

use crate::error::{Error, Result};
use crate::reconciler::ReportSink;
use crate::records::OrderOutputRow;
use log::info;
use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const HEADER: [&str; 3] = ["order_id", "customer_id", "barcodes"];

/// A report writer over any byte sink
pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
    /// Destination, for error messages and the final rename
    path: PathBuf,
    rows: usize,
}

impl<W: Write> CsvReport<W> {
    /// Wrap a writer and emit the header row
    pub fn from_writer<P: AsRef<Path>>(inner: W, path: P) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .flexible(true) // One column per barcode
            .from_writer(inner);

        let mut report = Self {
            writer,
            path: path.as_ref().to_path_buf(),
            rows: 0,
        };
        report
            .writer
            .write_record(HEADER)
            .map_err(|e| report.write_error(e))?;
        Ok(report)
    }

    /// Number of order rows written so far
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        let path = self.path;
        self.writer.into_inner().map_err(|e| Error::FileWrite {
            path,
            source: e.into_error(),
        })
    }

    fn write_error(&self, source: csv::Error) -> Error {
        Error::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl CsvReport<NamedTempFile> {
    /// Start a report that will be moved to `path` on commit
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let staging = NamedTempFile::new_in(dir).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_writer(staging, path)
    }

    /// Flush the staged report and atomically rename it to its destination
    pub fn commit(self) -> Result<PathBuf> {
        let path = self.path.clone();
        let rows = self.rows;
        let staging = self.into_inner()?;

        if let Some(permissions) = report_permissions(&path) {
            staging
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| Error::FileWrite {
                    path: path.clone(),
                    source: e,
                })?;
        }

        staging.persist(&path).map_err(|e| Error::FileWrite {
            path: path.clone(),
            source: e.error,
        })?;

        info!("wrote {} rows to {}", rows, path.display());
        Ok(path)
    }
}

/// Mode for a committed report: the replaced file's, else 0644 on unix
fn report_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

impl<W: Write> ReportSink for CsvReport<W> {
    fn write_row(&mut self, row: &OrderOutputRow) -> Result<()> {
        self.writer
            .write_record(row.fields())
            .map_err(|e| self.write_error(e))?;
        self.rows += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order_id: &str, customer_id: &str, codes: &[&str]) -> OrderOutputRow {
        OrderOutputRow {
            order_id: order_id.to_string(),
            customer_id: customer_id.to_string(),
            barcodes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_rows_have_variable_width() {
        let mut report = CsvReport::from_writer(Vec::new(), "output.csv").unwrap();
        report.write_row(&row("A1", "C1", &["B1", "B2"])).unwrap();
        report.write_row(&row("A2", "C2", &["B3"])).unwrap();
        assert_eq!(report.row_count(), 2);

        let bytes = report.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "order_id,customer_id,barcodes\nA1,C1,B1,B2\nA2,C2,B3\n"
        );
    }

    #[test]
    fn test_fields_are_quoted() {
        let mut report = CsvReport::from_writer(Vec::new(), "output.csv").unwrap();
        report.write_row(&row("A,1", "C1", &["B\"1"])).unwrap();

        let bytes = report.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "order_id,customer_id,barcodes\n\"A,1\",C1,\"B\"\"1\"\n"
        );
    }

    #[test]
    fn test_commit_writes_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");

        let mut report = CsvReport::create(&path).unwrap();
        report.write_row(&row("A1", "C1", &["B1"])).unwrap();
        assert!(!path.exists());

        let written = report.commit().unwrap();
        assert_eq!(written, path);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "order_id,customer_id,barcodes\nA1,C1,B1\n"
        );
    }

    #[test]
    fn test_commit_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        fs::write(&path, "stale").unwrap();

        let report = CsvReport::create(&path).unwrap();
        report.commit().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "order_id,customer_id,barcodes\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_committed_report_is_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");

        CsvReport::create(&path).unwrap().commit().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_commit_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        fs::write(&path, "stale").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o640)).unwrap();

        CsvReport::create(&path).unwrap().commit().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn test_abandoned_report_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");

        let mut report = CsvReport::create(&path).unwrap();
        report.write_row(&row("A1", "C1", &["B1"])).unwrap();
        drop(report);

        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_create_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output.csv");

        assert!(matches!(
            CsvReport::create(&path),
            Err(Error::FileWrite { .. })
        ));
    }
}
