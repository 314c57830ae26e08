pub mod context;
pub mod dataset;
pub mod dispatch;
pub mod filter;
pub mod format;
pub mod query;
pub mod selection;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt};
pub use dataset::{Dataset, DatasetError, LoadOptions, SalesRecord};
pub use dispatch::{DashboardSession, InputEvent, Update, ViewDispatcher};
pub use filter::FilterSelection;
pub use format::{KpiTripleExt, format_amount, format_count, format_currency, format_number};
pub use query::{aggregate, aggregate_records};
pub use selection::{ControlActivity, SelectionController};

pub use salesdash_types::{
    ChartLabels, DashboardViews, GroupingMode, KpiDisplay, KpiTriple, ProductSummary,
    ProductSummaryRow, RegionProductMatrix, RegionSet, SelectionTrigger, TimeSeries,
    TimeSeriesRow,
};
