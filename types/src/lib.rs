//! Shared view and configuration types for salesdash
//!
//! This crate contains the serializable values that cross the boundary between
//! the aggregation core (salesdash-core) and whatever renders the dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Selected regions. Ordered so every derived view iterates deterministically.
pub type RegionSet = BTreeSet<String>;

// ─────────────────────────────────────────────────────────────────────────────
// Filter Inputs
// ─────────────────────────────────────────────────────────────────────────────

/// How the revenue time series is split into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingMode {
    /// Single series summed over every selected row
    #[default]
    Total,
    /// One series per region
    ByRegion,
    /// One series per product
    ByProduct,
}

impl GroupingMode {
    pub const ALL: [GroupingMode; 3] = [
        GroupingMode::Total,
        GroupingMode::ByRegion,
        GroupingMode::ByProduct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingMode::Total => "total",
            GroupingMode::ByRegion => "by-region",
            GroupingMode::ByProduct => "by-product",
        }
    }

    /// Name of the grouping dimension, if the series is split at all
    pub fn dimension(&self) -> Option<&'static str> {
        match self {
            GroupingMode::Total => None,
            GroupingMode::ByRegion => Some("region"),
            GroupingMode::ByProduct => Some("product"),
        }
    }

    /// Axis and title text for the time-series chart in this mode
    pub fn chart_labels(&self) -> ChartLabels {
        let (title, series) = match self {
            GroupingMode::Total => ("Weekly Revenue (Total)", None),
            GroupingMode::ByRegion => ("Weekly Revenue by Region", Some("Region")),
            GroupingMode::ByProduct => ("Weekly Revenue by Product", Some("Product")),
        };
        ChartLabels::new(title, "Date (2023) Weekly", "Revenue ($)", series)
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" => Ok(GroupingMode::Total),
            "by-region" | "region" => Ok(GroupingMode::ByRegion),
            "by-product" | "product" => Ok(GroupingMode::ByProduct),
            other => Err(format!(
                "unknown grouping mode '{other}' (expected total, by-region or by-product)"
            )),
        }
    }
}

/// Which bulk-selection control fired in the current event cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionTrigger {
    /// No bulk control fired; the region set passes through
    #[default]
    None,
    ClearAll,
    SelectAll,
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregated Views
// ─────────────────────────────────────────────────────────────────────────────

/// Headline metrics over the filtered subset. All zero when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiTriple {
    pub total_revenue: f64,
    pub mean_units: f64,
    pub row_count: usize,
}

/// KPI values already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDisplay {
    pub total_revenue: String,
    pub mean_units: String,
    pub row_count: String,
}

/// Title and axis labels for a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLabels {
    pub title: String,
    pub x: String,
    pub y: String,
    /// Legend title when the chart has more than one series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

impl ChartLabels {
    pub fn new(title: &str, x: &str, y: &str, series: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            x: x.to_string(),
            y: y.to_string(),
            series: series.map(String::from),
        }
    }
}

/// One point of the weekly revenue chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    /// Region or product name; absent in total mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub mode: GroupingMode,
    pub labels: ChartLabels,
    /// Ascending by date, then by group name
    pub rows: Vec<TimeSeriesRow>,
}

impl TimeSeries {
    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|r| r.revenue).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Average units sold per order for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummaryRow {
    pub product: String,
    pub mean_units: f64,
}

/// Bar chart of average units per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub labels: ChartLabels,
    /// Descending by mean units, ties by product name
    pub rows: Vec<ProductSummaryRow>,
}

impl ProductSummary {
    pub fn new(rows: Vec<ProductSummaryRow>) -> Self {
        Self {
            labels: Self::chart_labels(),
            rows,
        }
    }

    pub fn chart_labels() -> ChartLabels {
        ChartLabels::new("Average Units by Product", "Product", "Average Units", None)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Dense region × product revenue grid.
///
/// `values[i][j]` is the revenue for `regions[i]` and `products[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProductMatrix {
    /// `series` names the colour scale
    pub labels: ChartLabels,
    pub regions: Vec<String>,
    pub products: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl RegionProductMatrix {
    /// Label used for both axes of the empty-selection placeholder
    pub const PLACEHOLDER_LABEL: &'static str = "-";

    pub fn chart_labels() -> ChartLabels {
        ChartLabels::new(
            "Revenue by Region & Product",
            "Product",
            "Region",
            Some("Revenue ($)"),
        )
    }

    /// Single zero cell so a heatmap stays drawable with no data
    pub fn placeholder() -> Self {
        Self {
            labels: Self::chart_labels(),
            regions: vec![Self::PLACEHOLDER_LABEL.to_string()],
            products: vec![Self::PLACEHOLDER_LABEL.to_string()],
            values: vec![vec![0.0]],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    pub fn get(&self, region: &str, product: &str) -> Option<f64> {
        let row = self.regions.iter().position(|r| r == region)?;
        let col = self.products.iter().position(|p| p == product)?;
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.regions.len(), self.products.len())
    }
}

/// Everything the dashboard renders after one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardViews {
    pub kpis: KpiTriple,
    pub time_series: TimeSeries,
    pub product_summary: ProductSummary,
    pub matrix: RegionProductMatrix,
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sales CSV loaded at startup
    pub data_path: String,
    /// chrono format string for the `date` column
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Grouping mode the dashboard opens with
    #[serde(default)]
    pub default_mode: GroupingMode,
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: "./data/toy-sales.csv".to_string(),
            date_format: default_date_format(),
            default_mode: GroupingMode::Total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_mode_parses_names_and_aliases() {
        assert_eq!("total".parse::<GroupingMode>(), Ok(GroupingMode::Total));
        assert_eq!("By-Region".parse::<GroupingMode>(), Ok(GroupingMode::ByRegion));
        assert_eq!("region".parse::<GroupingMode>(), Ok(GroupingMode::ByRegion));
        assert_eq!("product".parse::<GroupingMode>(), Ok(GroupingMode::ByProduct));
        assert!("weekly".parse::<GroupingMode>().is_err());
    }

    #[test]
    fn grouping_mode_display_round_trips() {
        for mode in GroupingMode::ALL {
            assert_eq!(mode.to_string().parse::<GroupingMode>(), Ok(mode));
        }
    }

    #[test]
    fn chart_labels_follow_mode() {
        assert_eq!(GroupingMode::Total.chart_labels().series, None);
        assert_eq!(
            GroupingMode::ByProduct.chart_labels().title,
            "Weekly Revenue by Product"
        );
    }

    #[test]
    fn time_series_x_axis_is_weekly_date() {
        for mode in GroupingMode::ALL {
            let labels = mode.chart_labels();
            assert_eq!(labels.x, "Date (2023) Weekly");
            assert_eq!(labels.y, "Revenue ($)");
        }
    }

    #[test]
    fn bar_and_heatmap_carry_labels() {
        let summary = ProductSummary::new(Vec::new());
        assert!(summary.is_empty());
        assert_eq!(summary.labels.title, "Average Units by Product");
        assert_eq!(summary.labels.y, "Average Units");

        let m = RegionProductMatrix::placeholder();
        assert_eq!(m.labels.title, "Revenue by Region & Product");
        assert_eq!((m.labels.x.as_str(), m.labels.y.as_str()), ("Product", "Region"));
        assert_eq!(m.labels.series.as_deref(), Some("Revenue ($)"));
    }

    #[test]
    fn placeholder_matrix_is_single_zero_cell() {
        let m = RegionProductMatrix::placeholder();
        assert_eq!(m.shape(), (1, 1));
        assert_eq!(m.get("-", "-"), Some(0.0));
        assert!(m.is_placeholder());
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.date_format, "%Y-%m-%d");
        assert_eq!(cfg.default_mode, GroupingMode::Total);
    }
}
