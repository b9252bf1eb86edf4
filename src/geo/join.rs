//! Left join of region shapes with computed counts.

use std::collections::HashMap;

use super::Region;

/// A region shape annotated with its station count.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCount {
    pub region: Region,
    pub count: usize,
}

/// Annotate every shape with its count from `counts`.
///
/// Regions absent from `counts` get 0 so all of them render; output order is
/// the shape order, each region exactly once.
pub fn join_counts_to_regions(
    regions: Vec<Region>,
    counts: &[(String, usize)],
) -> Vec<RegionCount> {
    let lookup: HashMap<&str, usize> = counts
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();

    regions
        .into_iter()
        .map(|region| {
            let count = lookup.get(region.name.as_str()).copied().unwrap_or(0);
            RegionCount { region, count }
        })
        .collect()
}
