use crate::schema::{GridCombination, SalesRecord};

/// Union the observed records with the category-resolved grid combinations.
///
/// Observed rows come first, synthesized rows second, both in their
/// existing order, so reruns on identical sources produce byte-identical
/// collections. Synthesized rows get zero measures via the combination
/// conversion.
///
/// No deduplication happens here: a combination whose (brand, region, year)
/// triple matches an observed row still lands in the output, so that
/// logical key appears twice. Downstream consumers that sum duplicates rely
/// on this padding; see DESIGN.md before changing it.
pub fn merge_records(
    observed: Vec<SalesRecord>,
    combinations: Vec<GridCombination>,
) -> Vec<SalesRecord> {
    let mut output = observed;
    output.reserve(combinations.len());
    output.extend(combinations.into_iter().map(GridCombination::into_record));
    output
}
