//! Headline KPIs over the filtered subset.

use salesdash_types::KpiTriple;

use crate::dataset::SalesRecord;

/// Total revenue, mean units per order and row count. Zero, never NaN, when
/// `rows` is empty.
pub fn kpis(rows: &[&SalesRecord]) -> KpiTriple {
    if rows.is_empty() {
        return KpiTriple::default();
    }

    let (revenue, units) = rows
        .iter()
        .fold((0.0, 0.0), |(rev, units), r| (rev + r.revenue, units + r.units));

    KpiTriple {
        total_revenue: revenue,
        mean_units: units / rows.len() as f64,
        row_count: rows.len(),
    }
}
