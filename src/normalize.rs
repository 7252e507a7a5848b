use crate::error::{Result, SalesGridError};
use crate::schema::{
    RawBatch, SalesRecord, BRAND_COLUMN, CATEGORY_COLUMN, DATE_COLUMN, DATE_FORMAT,
    DROPPED_COLUMNS, MONTHLY_SENTINEL, PERIOD_COLUMN, REGION_COLUMN, REQUIRED_COLUMNS,
    SALES_COLUMN, VOLUME_COLUMN,
};
use crate::RowOrigin;
use chrono::{Datelike, NaiveDate};
use log::debug;

/// Filter and normalize every loaded source into one flat record collection.
///
/// Only rows whose period-type column equals the monthly sentinel are
/// retained. The calendar date is parsed with the fixed day/month/year
/// format and the integer year and month are derived from it. Columns the
/// grid model does not use are dropped here by simply not copying them.
///
/// Any schema or parse problem is fatal to the whole run; rows are never
/// silently skipped.
pub fn normalize_batches(batches: &[RawBatch]) -> Result<Vec<SalesRecord>> {
    let mut records = Vec::new();
    for batch in batches {
        normalize_batch(batch, &mut records)?;
    }
    Ok(records)
}

fn normalize_batch(batch: &RawBatch, out: &mut Vec<SalesRecord>) -> Result<()> {
    let period_idx = batch.require_column(PERIOD_COLUMN)?;
    let date_idx = batch.require_column(DATE_COLUMN)?;
    let brand_idx = batch.require_column(BRAND_COLUMN)?;
    let region_idx = batch.require_column(REGION_COLUMN)?;
    let category_idx = batch.require_column(CATEGORY_COLUMN)?;
    let volume_idx = batch.require_column(VOLUME_COLUMN)?;
    let sales_idx = batch.require_column(SALES_COLUMN)?;

    let unmodeled: Vec<&str> = batch
        .headers
        .iter()
        .map(String::as_str)
        .filter(|h| !REQUIRED_COLUMNS.contains(h) && !DROPPED_COLUMNS.contains(h))
        .collect();
    if !unmodeled.is_empty() {
        debug!(
            "source '{}' carries unmodeled columns {:?}; they are dropped",
            batch.label, unmodeled
        );
    }

    let mut retained = 0usize;
    for (row_idx, row) in batch.rows.iter().enumerate() {
        let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

        if cell(period_idx).trim() != MONTHLY_SENTINEL {
            continue;
        }

        let date_value = cell(date_idx).trim();
        let date = NaiveDate::parse_from_str(date_value, DATE_FORMAT).map_err(|_| {
            SalesGridError::DateParse {
                source: batch.label.clone(),
                row: row_idx + 1,
                value: date_value.to_string(),
            }
        })?;

        let volume = parse_measure(batch, row_idx, VOLUME_COLUMN, cell(volume_idx))?;
        let sales = parse_measure(batch, row_idx, SALES_COLUMN, cell(sales_idx))?;

        let category = cell(category_idx).trim();
        let category = if category.is_empty() {
            None
        } else {
            Some(category.to_string())
        };

        out.push(SalesRecord {
            brand: cell(brand_idx).trim().to_string(),
            region: cell(region_idx).trim().to_string(),
            year: date.year(),
            month: Some(date.month()),
            date: Some(date),
            category,
            volume,
            sales,
            origin: RowOrigin::Observed,
        });
        retained += 1;
    }

    debug!(
        "source '{}': retained {} monthly rows of {}",
        batch.label,
        retained,
        batch.rows.len()
    );
    Ok(())
}

fn parse_measure(batch: &RawBatch, row_idx: usize, column: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| SalesGridError::MeasureParse {
            source: batch.label.clone(),
            row: row_idx + 1,
            column: column.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        vec![
            "Periodo", "Fecha", "Marca", "Region", "Categoria", "CajasVirt", "Venta",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_retains_only_monthly_rows() {
        let batch = RawBatch::new(
            "ventas.csv",
            headers(),
            vec![
                row(&["MES", "15/01/2023", "Acme", "North", "Spirits", "5", "100"]),
                row(&["YTD", "15/01/2023", "Acme", "North", "Spirits", "60", "1200"]),
                row(&["MES", "15/02/2023", "Acme", "North", "Spirits", "7", "140"]),
            ],
        );

        let records = normalize_batches(&[batch]).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.origin == RowOrigin::Observed));
    }

    #[test]
    fn test_derives_year_and_month() {
        let batch = RawBatch::new(
            "ventas.csv",
            headers(),
            vec![row(&[
                "MES",
                "31/12/2022",
                "Acme",
                "North",
                "Spirits",
                "5.5",
                "100.25",
            ])],
        );

        let records = normalize_batches(&[batch]).unwrap();
        let record = &records[0];
        assert_eq!(record.year, 2022);
        assert_eq!(record.month, Some(12));
        assert_eq!(
            record.date,
            NaiveDate::from_ymd_opt(2022, 12, 31)
        );
        assert_eq!(record.volume, 5.5);
        assert_eq!(record.sales, 100.25);
    }

    #[test]
    fn test_missing_period_column_is_fatal() {
        let batch = RawBatch::new(
            "broken.csv",
            vec!["Fecha".to_string(), "Marca".to_string()],
            vec![],
        );

        let err = normalize_batches(&[batch]).unwrap_err();
        assert!(matches!(
            err,
            SalesGridError::MissingColumn { ref column, .. } if column == "Periodo"
        ));
    }

    #[test]
    fn test_unparseable_date_is_fatal() {
        let batch = RawBatch::new(
            "ventas.csv",
            headers(),
            vec![row(&[
                "MES", "2023-01-15", "Acme", "North", "Spirits", "5", "100",
            ])],
        );

        let err = normalize_batches(&[batch]).unwrap_err();
        assert!(matches!(
            err,
            SalesGridError::DateParse { ref value, .. } if value == "2023-01-15"
        ));
    }

    #[test]
    fn test_unparseable_measure_is_fatal() {
        let batch = RawBatch::new(
            "ventas.csv",
            headers(),
            vec![row(&[
                "MES", "15/01/2023", "Acme", "North", "Spirits", "n/a", "100",
            ])],
        );

        let err = normalize_batches(&[batch]).unwrap_err();
        assert!(matches!(
            err,
            SalesGridError::MeasureParse { ref column, .. } if column == "CajasVirt"
        ));
    }

    #[test]
    fn test_extra_columns_are_tolerated() {
        let mut hdrs = headers();
        hdrs.push("Contml".to_string());
        hdrs.push("Graduación".to_string());
        let batch = RawBatch::new(
            "ventas.csv",
            hdrs,
            vec![row(&[
                "MES", "15/01/2023", "Acme", "North", "Spirits", "5", "100", "750", "40",
            ])],
        );

        let records = normalize_batches(&[batch]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].brand, "Acme");
    }

    #[test]
    fn test_empty_category_cell_is_none() {
        let batch = RawBatch::new(
            "ventas.csv",
            headers(),
            vec![row(&["MES", "15/01/2023", "Acme", "North", "", "5", "100"])],
        );

        let records = normalize_batches(&[batch]).unwrap();
        assert_eq!(records[0].category, None);
    }
}
