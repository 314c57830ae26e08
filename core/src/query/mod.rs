//! Aggregation engine: filtered subset -> KPIs plus three chart-ready views.
//!
//! Every call recomputes from the base records. Nothing is cached between
//! calls, so identical inputs always produce identical views.

mod breakdown;
mod matrix;
mod overview;
mod time_series;


pub use breakdown::units_by_product;
pub use matrix::revenue_matrix;
pub use overview::kpis;
pub use time_series::revenue_over_time;

use salesdash_types::{DashboardViews, GroupingMode, RegionSet};

use crate::context::{IStr, lookup};
use crate::dataset::{Dataset, SalesRecord, distinct};

/// Recompute every view for the given selection against a loaded dataset.
pub fn aggregate(dataset: &Dataset, regions: &RegionSet, mode: GroupingMode) -> DashboardViews {
    aggregate_with(
        dataset.records(),
        regions,
        mode,
        dataset.distinct_products(),
    )
}

/// Same as [`aggregate`] over a bare record slice. The product axis of the
/// matrix is derived from `records` instead of a cached dataset sequence.
pub fn aggregate_records(
    records: &[SalesRecord],
    regions: &RegionSet,
    mode: GroupingMode,
) -> DashboardViews {
    let products = distinct(records.iter().map(|r| r.product));
    aggregate_with(records, regions, mode, &products)
}

fn aggregate_with(
    records: &[SalesRecord],
    regions: &RegionSet,
    mode: GroupingMode,
    products: &[String],
) -> DashboardViews {
    let rows = filter_records(records, regions);

    tracing::debug!(
        selected = regions.len(),
        rows = rows.len(),
        mode = %mode,
        "Recomputing dashboard views"
    );

    DashboardViews {
        kpis: kpis(&rows),
        time_series: revenue_over_time(&rows, mode),
        product_summary: units_by_product(&rows),
        matrix: revenue_matrix(&rows, products),
    }
}

/// Records whose region is selected. An empty selection selects nothing.
pub fn filter_records<'a>(records: &'a [SalesRecord], regions: &RegionSet) -> Vec<&'a SalesRecord> {
    if regions.is_empty() {
        return Vec::new();
    }

    let keys: hashbrown::HashSet<IStr> = regions.iter().filter_map(|r| lookup(r)).collect();
    records
        .iter()
        .filter(|r| keys.contains(&r.region))
        .collect()
}
