use crate::schema::{GridCombination, SalesRecord};
use std::collections::HashSet;

/// The distinct values observed along each grid dimension.
///
/// Values are kept in first-seen order over the normalized collection so
/// that the generated grid, and therefore the final output row order, is
/// reproducible run to run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionSets {
    pub brands: Vec<String>,
    pub regions: Vec<String>,
    pub years: Vec<i32>,
}

impl DimensionSets {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() || self.regions.is_empty() || self.years.is_empty()
    }

    /// Number of cells in the full grid.
    pub fn grid_size(&self) -> usize {
        self.brands.len() * self.regions.len() * self.years.len()
    }

    /// The full cartesian product, brand-major, then region, then year.
    ///
    /// Each tuple is distinct by construction; an empty dimension yields an
    /// empty product rather than an error. Grid sizes are bounded by the
    /// dimension cardinalities (tens of brands and regions, a handful of
    /// years), so plain nested iteration is all this needs.
    pub fn combinations(&self) -> Vec<GridCombination> {
        let mut combinations = Vec::with_capacity(self.grid_size());
        for brand in &self.brands {
            for region in &self.regions {
                for year in &self.years {
                    combinations.push(GridCombination {
                        brand: brand.clone(),
                        region: region.clone(),
                        year: *year,
                        category: None,
                    });
                }
            }
        }
        combinations
    }
}

/// Compute the distinct-value sets for the three grid dimensions.
///
/// Pure over the record collection; an empty input yields three empty sets
/// and downstream grid generation then produces zero combinations.
pub fn extract_dimensions(records: &[SalesRecord]) -> DimensionSets {
    let mut dimensions = DimensionSets::default();
    let mut seen_brands = HashSet::new();
    let mut seen_regions = HashSet::new();
    let mut seen_years = HashSet::new();

    for record in records {
        if seen_brands.insert(record.brand.clone()) {
            dimensions.brands.push(record.brand.clone());
        }
        if seen_regions.insert(record.region.clone()) {
            dimensions.regions.push(record.region.clone());
        }
        if seen_years.insert(record.year) {
            dimensions.years.push(record.year);
        }
    }

    dimensions
}
