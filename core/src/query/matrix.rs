//! Region × product revenue grid for the heatmap.

use hashbrown::HashMap;
use salesdash_types::RegionProductMatrix;

use crate::context::{IStr, lookup};
use crate::dataset::{SalesRecord, distinct};

/// Revenue summed per (region, product), densified over the regions present in
/// `rows` and the full `products` axis. Missing combinations hold 0.
///
/// An empty subset yields the single-cell placeholder instead of a 0×0 grid.
pub fn revenue_matrix(rows: &[&SalesRecord], products: &[String]) -> RegionProductMatrix {
    if rows.is_empty() {
        return RegionProductMatrix::placeholder();
    }

    let mut cells: HashMap<(IStr, IStr), f64> = HashMap::new();
    for r in rows {
        *cells.entry((r.region, r.product)).or_insert(0.0) += r.revenue;
    }

    let regions = distinct(rows.iter().map(|r| r.region));
    let product_keys: Vec<Option<IStr>> = products.iter().map(|p| lookup(p)).collect();

    let values = regions
        .iter()
        .map(|region| {
            let region_key = lookup(region);
            product_keys
                .iter()
                .map(|product_key| match (region_key, *product_key) {
                    (Some(r), Some(p)) => cells.get(&(r, p)).copied().unwrap_or(0.0),
                    _ => 0.0,
                })
                .collect()
        })
        .collect();

    RegionProductMatrix {
        labels: RegionProductMatrix::chart_labels(),
        regions,
        products: products.to_vec(),
        values,
    }
}
