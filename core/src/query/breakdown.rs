//! Per-product unit breakdown.

use hashbrown::HashMap;
use salesdash_types::{ProductSummary, ProductSummaryRow};

use crate::context::{IStr, resolve};
use crate::dataset::SalesRecord;

/// Mean units per order for each product, highest first.
/// Equal means are ordered by product name.
pub fn units_by_product(rows: &[&SalesRecord]) -> ProductSummary {
    let mut totals: HashMap<IStr, (f64, usize)> = HashMap::new();
    for r in rows {
        let entry = totals.entry(r.product).or_insert((0.0, 0));
        entry.0 += r.units;
        entry.1 += 1;
    }

    let mut summary: Vec<ProductSummaryRow> = totals
        .into_iter()
        .map(|(product, (units, count))| ProductSummaryRow {
            product: resolve(product).to_string(),
            mean_units: units / count as f64,
        })
        .collect();

    summary.sort_by(|a, b| {
        b.mean_units
            .total_cmp(&a.mean_units)
            .then_with(|| a.product.cmp(&b.product))
    });
    ProductSummary::new(summary)
}
