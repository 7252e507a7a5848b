use crate::error::{Result, SalesGridError};
use crate::RowOrigin;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel value of the period-type column for monthly-granularity rows.
/// Every other granularity (weekly, YTD, ...) is filtered out.
pub const MONTHLY_SENTINEL: &str = "MES";

/// Input date format: day/month/year, as written by the upstream exports.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

pub const PERIOD_COLUMN: &str = "Periodo";
pub const DATE_COLUMN: &str = "Fecha";
pub const BRAND_COLUMN: &str = "Marca";
pub const REGION_COLUMN: &str = "Region";
pub const CATEGORY_COLUMN: &str = "Categoria";
pub const VOLUME_COLUMN: &str = "CajasVirt";
pub const SALES_COLUMN: &str = "Venta";

/// Columns that every source must carry for processing to succeed.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    PERIOD_COLUMN,
    DATE_COLUMN,
    BRAND_COLUMN,
    REGION_COLUMN,
    CATEGORY_COLUMN,
    VOLUME_COLUMN,
    SALES_COLUMN,
];

/// Source-specific columns the grid model does not use. Tolerated when
/// present, never required.
pub const DROPPED_COLUMNS: [&str; 6] = [
    "Contml",
    "Graduación",
    "Segmento",
    "SubMarcaEsp",
    "Presentación",
    "BandaPrecio",
];

/// One loaded tabular source: a header row plus unparsed data rows.
///
/// The loader produces these from CSV files; tests build them directly.
/// Cells are kept as strings until normalization so that a schema problem
/// in one source is reported against that source's label.
#[derive(Debug, Clone)]
pub struct RawBatch {
    pub label: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawBatch {
    pub fn new(
        label: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            label: label.into(),
            headers,
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a required column, or a `MissingColumn` error naming this
    /// source.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| SalesGridError::MissingColumn {
                source: self.label.clone(),
                column: name.to_string(),
            })
    }
}

/// A normalized row of the output collection.
///
/// Observed rows keep their calendar date alongside the derived year and
/// month. Synthesized rows exist only at (brand, region, year) granularity,
/// so their date, month and period fields are absent and their measures are
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub brand: String,
    pub region: String,
    pub year: i32,
    pub month: Option<u32>,
    pub date: Option<NaiveDate>,
    /// Absent on a synthesized row whose brand never appeared in the
    /// observed data; never defaulted to a fabricated value.
    pub category: Option<String>,
    pub volume: f64,
    pub sales: f64,
    pub origin: RowOrigin,
}

/// A (brand, region, year) cell of the full cartesian grid, before and after
/// category resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCombination {
    pub brand: String,
    pub region: String,
    pub year: i32,
    pub category: Option<String>,
}

impl GridCombination {
    /// Turn a resolved grid cell into an output row with zero measures.
    pub fn into_record(self) -> SalesRecord {
        SalesRecord {
            brand: self.brand,
            region: self.region,
            year: self.year,
            month: None,
            date: None,
            category: self.category,
            volume: 0.0,
            sales: 0.0,
            origin: RowOrigin::Synthesized,
        }
    }
}
