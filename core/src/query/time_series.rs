//! Weekly revenue over time, optionally split by region or product.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use salesdash_types::{GroupingMode, TimeSeries, TimeSeriesRow};

use crate::dataset::SalesRecord;

/// Sum revenue per date (and per group when the mode splits the series).
///
/// Rows come out ascending by date, then by group name. An empty subset gives
/// an empty series, not a zero row.
pub fn revenue_over_time(rows: &[&SalesRecord], mode: GroupingMode) -> TimeSeries {
    let mut buckets: BTreeMap<(NaiveDate, Option<&'static str>), f64> = BTreeMap::new();

    for r in rows {
        let group = match mode {
            GroupingMode::Total => None,
            GroupingMode::ByRegion => Some(r.region_name()),
            GroupingMode::ByProduct => Some(r.product_name()),
        };
        *buckets.entry((r.date, group)).or_insert(0.0) += r.revenue;
    }

    TimeSeries {
        mode,
        labels: mode.chart_labels(),
        rows: buckets
            .into_iter()
            .map(|((date, group), revenue)| TimeSeriesRow {
                date,
                group: group.map(String::from),
                revenue,
            })
            .collect(),
    }
}
