use crate::error::{Result, SalesGridError};
use crate::schema::RawBatch;
use csv::ReaderBuilder;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read every source file into a `RawBatch`, in the order given.
///
/// An empty path list is rejected before any file is opened. Each source
/// keeps its own header row; the required-column check happens later, in
/// normalization, so that a schema problem names the offending source.
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawBatch>> {
    if paths.is_empty() {
        return Err(SalesGridError::EmptyInput);
    }

    let mut batches = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let label = path.display().to_string();
        let file = File::open(path)?;
        batches.push(read_batch(label, file)?);
    }
    Ok(batches)
}

/// Read one CSV source from any reader.
///
/// `flexible(true)` tolerates rows with a varying column count; short rows
/// surface later as empty cells, which normalization then rejects where the
/// cell was required.
pub fn read_batch<R: Read>(label: impl Into<String>, reader: R) -> Result<RawBatch> {
    let label = label.into();
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(
        "source '{}': {} columns, {} rows",
        label,
        headers.len(),
        rows.len()
    );
    Ok(RawBatch::new(label, headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_batch_from_reader() {
        let data = "Periodo,Fecha,Marca\nMES,15/01/2023,Acme\nYTD,15/01/2023,Acme\n";
        let batch = read_batch("inline", Cursor::new(data)).unwrap();

        assert_eq!(batch.label, "inline");
        assert_eq!(batch.headers, vec!["Periodo", "Fecha", "Marca"]);
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rows[0][2], "Acme");
    }

    #[test]
    fn test_empty_source_list_rejected_before_io() {
        let paths: [&str; 0] = [];
        let err = load_sources(&paths).unwrap_err();
        assert!(matches!(err, SalesGridError::EmptyInput));
    }

    #[test]
    fn test_unreadable_source_is_io_error() {
        let err = load_sources(&["/nonexistent/ventas.csv"]).unwrap_err();
        assert!(matches!(err, SalesGridError::IoError(_)));
    }
}
