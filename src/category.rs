use crate::schema::{GridCombination, SalesRecord};
use std::collections::{HashMap, HashSet};

/// Brand-to-category mapping derived from the observed records.
///
/// Built with one pass per distinct category value, categories taken in
/// first-seen order over the collection. Every brand appearing under a
/// category is (re)inserted during that category's pass, so a brand that
/// shows up under two categories deterministically keeps the category
/// scanned last. Reordering the observed records can change the result,
/// which is why normalization preserves source order.
#[derive(Debug, Clone, Default)]
pub struct CategoryLookup {
    by_brand: HashMap<String, String>,
}

impl CategoryLookup {
    pub fn from_records(records: &[SalesRecord]) -> Self {
        let mut categories = Vec::new();
        let mut seen = HashSet::new();
        for record in records {
            if let Some(category) = &record.category {
                if seen.insert(category.clone()) {
                    categories.push(category.clone());
                }
            }
        }

        let mut by_brand = HashMap::new();
        for category in &categories {
            for record in records {
                if record.category.as_deref() == Some(category.as_str()) {
                    by_brand.insert(record.brand.clone(), category.clone());
                }
            }
        }

        Self { by_brand }
    }

    pub fn get(&self, brand: &str) -> Option<&str> {
        self.by_brand.get(brand).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_brand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_brand.is_empty()
    }

    /// Stamp each combination with its brand's category.
    ///
    /// A brand with no mapping leaves the category unset; a synthesized row
    /// for a never-classified brand must stay representable as "no
    /// category" rather than receive a made-up default.
    pub fn apply(&self, combinations: &mut [GridCombination]) {
        for combination in combinations {
            combination.category = self.get(&combination.brand).map(str::to_string);
        }
    }
}
