//! # Sales Grid Builder
//!
//! A library for reconciling sparse periodic sales records against the
//! complete combinatorial grid of (brand x region x year), so that every
//! theoretically possible combination is present in the output even when no
//! sales occurred for it.
//!
//! ## Core Concepts
//!
//! - **Observed record**: a monthly sales row present in the input sources
//!   after filtering and normalization
//! - **Grid**: the cartesian product of all distinct brands, regions and
//!   years seen in the observed data
//! - **Synthesized combination**: a grid cell added to the output with zero
//!   measures and a category backfilled from a brand lookup
//!
//! ## Example
//!
//! ```rust,ignore
//! use sales_grid_builder::*;
//!
//! let batches = load_sources(&["ventas_2022.csv", "ventas_2023.csv"])?;
//! let output = process_sales_grid(&batches)?;
//! save_collection(&output, "ventas_completas.csv")?;
//! ```
//!
//! The pipeline is a strictly sequential, single-threaded chain: load,
//! filter/normalize, extract dimensions, generate the grid, resolve
//! categories, merge. Every stage materializes its full output before the
//! next stage runs, and every error is fatal to the run, so no partial
//! output is ever produced.

pub mod category;
pub mod engine;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod merge;
pub mod normalize;
pub mod schema;

pub use category::CategoryLookup;
pub use engine::{extract_dimensions, DimensionSets};
pub use error::{Result, SalesGridError};
pub use export::{save_collection, write_collection};
pub use ingestion::{load_sources, read_batch};
pub use merge::merge_records;
pub use normalize::normalize_batches;
pub use schema::*;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Provenance of an output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOrigin {
    /// Present in the input sources after filtering and normalization
    Observed,
    /// Generated to complete the brand x region x year grid
    Synthesized,
}

pub struct SalesGridProcessor;

impl SalesGridProcessor {
    /// Run the full pipeline over already-loaded sources.
    ///
    /// Fails fast with `EmptyInput` before touching any batch when no
    /// sources were supplied. The output contains every observed row
    /// followed by one synthesized row per grid combination; a combination
    /// whose key matches an observed row is NOT dropped, so that logical
    /// key appears twice.
    pub fn process(batches: &[RawBatch]) -> Result<Vec<SalesRecord>> {
        if batches.is_empty() {
            return Err(SalesGridError::EmptyInput);
        }

        info!("processing {} source batch(es)", batches.len());

        let observed = normalize_batches(batches)?;
        debug!("normalized {} monthly records", observed.len());

        let dimensions = extract_dimensions(&observed);
        debug!(
            "dimensions: {} brands x {} regions x {} years = {} grid cells",
            dimensions.brands.len(),
            dimensions.regions.len(),
            dimensions.years.len(),
            dimensions.grid_size()
        );

        let mut combinations = dimensions.combinations();
        let lookup = CategoryLookup::from_records(&observed);
        lookup.apply(&mut combinations);
        debug!("category lookup covers {} brand(s)", lookup.len());

        info!(
            "merging {} observed rows with {} synthesized rows",
            observed.len(),
            combinations.len()
        );
        Ok(merge_records(observed, combinations))
    }
}

/// Free-function alias for [`SalesGridProcessor::process`].
pub fn process_sales_grid(batches: &[RawBatch]) -> Result<Vec<SalesRecord>> {
    SalesGridProcessor::process(batches)
}
