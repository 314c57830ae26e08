//! View dispatcher: routes control-surface events to the selection controller
//! and the aggregation engine.
//!
//! Input domains:
//! - Aggregation engine: `{selected regions, grouping mode}`
//! - Selection controller: `{clear-all, select-all, current regions}`
//!
//! A cycle recomputes the views exactly once if and only if an aggregation
//! input changed, and emits a region set only when a bulk control changed it.

use std::sync::Arc;

use salesdash_types::{DashboardViews, GroupingMode, RegionSet, SelectionTrigger};

use crate::dataset::Dataset;
use crate::filter::FilterSelection;
use crate::query::aggregate;
use crate::selection::SelectionController;

/// A signal from the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The region multi-select took a new value
    SetRegions(RegionSet),
    /// One region was added to or removed from the selection
    ToggleRegion(String),
    SetMode(GroupingMode),
    ClearAll,
    SelectAll,
}

impl InputEvent {
    fn bulk_trigger(&self) -> Option<SelectionTrigger> {
        match self {
            InputEvent::ClearAll => Some(SelectionTrigger::ClearAll),
            InputEvent::SelectAll => Some(SelectionTrigger::SelectAll),
            _ => None,
        }
    }
}

/// Outputs produced by one event cycle. Fields are `None` when their inputs
/// did not change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    /// New value for the region selector, set by a bulk control
    pub regions: Option<RegionSet>,
    pub views: Option<DashboardViews>,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.regions.is_none() && self.views.is_none()
    }
}

/// Mutable per-client state. The dataset it filters is shared separately.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    filter: FilterSelection,
    controller: SelectionController,
}

impl DashboardSession {
    pub fn new(dataset: &Dataset, mode: GroupingMode) -> Self {
        Self {
            filter: FilterSelection::with_mode(dataset, mode),
            controller: SelectionController::new(),
        }
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }
}

pub struct ViewDispatcher {
    dataset: Arc<Dataset>,
    session: DashboardSession,
}

impl ViewDispatcher {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_mode(dataset, GroupingMode::Total)
    }

    pub fn with_mode(dataset: Arc<Dataset>, mode: GroupingMode) -> Self {
        let session = DashboardSession::new(&dataset, mode);
        Self { dataset, session }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.session.filter
    }

    /// Views for the current selection. Used for the first render; bulk
    /// controls do not fire at startup.
    pub fn render(&self) -> DashboardViews {
        let filter = &self.session.filter;
        aggregate(&self.dataset, filter.regions(), filter.mode())
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Update {
        self.dispatch_cycle([event])
    }

    /// Apply every event of one cycle in order, then emit once.
    ///
    /// Consecutive bulk activations are resolved together by the selection
    /// controller, so the most recently activated control wins.
    pub fn dispatch_cycle(&mut self, events: impl IntoIterator<Item = InputEvent>) -> Update {
        let before = self.session.filter.clone();
        let mut pending: Vec<SelectionTrigger> = Vec::new();
        let mut bulk_fired = false;

        for event in events {
            if let Some(trigger) = event.bulk_trigger() {
                pending.push(trigger);
                bulk_fired = true;
                continue;
            }
            self.flush_bulk(&mut pending);

            match event {
                InputEvent::SetRegions(regions) => {
                    self.session.filter.set_regions(&self.dataset, regions);
                }
                InputEvent::ToggleRegion(region) => {
                    self.session.filter.toggle_region(&self.dataset, &region);
                }
                InputEvent::SetMode(mode) => {
                    self.session.filter.set_mode(mode);
                }
                InputEvent::ClearAll | InputEvent::SelectAll => {}
            }
        }
        self.flush_bulk(&mut pending);

        let filter = &self.session.filter;
        let regions_changed = filter.regions() != before.regions();
        let mode_changed = filter.mode() != before.mode();

        let update = Update {
            // a bulk control always re-emits the region value, even when unchanged
            regions: bulk_fired.then(|| filter.regions().clone()),
            views: (regions_changed || mode_changed)
                .then(|| aggregate(&self.dataset, filter.regions(), filter.mode())),
        };

        tracing::debug!(
            regions_changed,
            mode_changed,
            selected = filter.regions().len(),
            mode = %filter.mode(),
            "Dispatched event cycle"
        );
        update
    }

    fn flush_bulk(&mut self, pending: &mut Vec<SelectionTrigger>) {
        if pending.is_empty() {
            return;
        }
        let next = self.session.controller.resolve_cycle(
            pending,
            self.session.filter.regions(),
            self.dataset.distinct_regions(),
        );
        self.session.filter.replace_regions(next);
        pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SalesRecord;
    use chrono::NaiveDate;
    use salesdash_types::KpiTriple;

    fn dataset() -> Arc<Dataset> {
        let w1 = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        Arc::new(Dataset::from_records(vec![
            SalesRecord::new(w1, "East", "Robot", 10.0, 100.0),
            SalesRecord::new(w1, "West", "Robot", 20.0, 200.0),
        ]))
    }

    fn set(names: &[&str]) -> RegionSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn initial_render_uses_all_regions() {
        let dispatcher = ViewDispatcher::new(dataset());
        let views = dispatcher.render();
        assert_eq!(views.kpis.row_count, 2);
        assert_eq!(views.kpis.total_revenue, 300.0);
    }

    #[test]
    fn region_value_change_recomputes_without_echoing_regions() {
        let mut dispatcher = ViewDispatcher::new(dataset());
        let update = dispatcher.dispatch(InputEvent::SetRegions(set(&["East"])));
        assert!(update.regions.is_none());
        let views = update.views.unwrap();
        assert_eq!(
            views.kpis,
            KpiTriple {
                total_revenue: 100.0,
                mean_units: 10.0,
                row_count: 1,
            }
        );
    }

    #[test]
    fn clear_all_emits_empty_regions_and_degenerate_views() {
        let mut dispatcher = ViewDispatcher::new(dataset());
        let update = dispatcher.dispatch(InputEvent::ClearAll);
        assert_eq!(update.regions, Some(RegionSet::new()));

        let views = update.views.unwrap();
        assert_eq!(views.kpis, KpiTriple::default());
        assert!(views.time_series.is_empty());
        assert!(views.product_summary.is_empty());
        assert!(views.matrix.is_placeholder());
    }

    #[test]
    fn select_all_restores_full_region_sequence() {
        let ds = dataset();
        let mut dispatcher = ViewDispatcher::new(Arc::clone(&ds));
        dispatcher.dispatch(InputEvent::ClearAll);
        let update = dispatcher.dispatch(InputEvent::SelectAll);
        assert_eq!(update.regions, Some(ds.all_regions()));
        assert_eq!(update.views.unwrap().kpis.row_count, 2);
    }

    #[test]
    fn bulk_control_at_target_still_emits_regions() {
        let ds = dataset();
        let mut dispatcher = ViewDispatcher::new(Arc::clone(&ds));

        let update = dispatcher.dispatch(InputEvent::SelectAll);
        assert_eq!(update.regions, Some(ds.all_regions()));
        assert!(update.views.is_none());

        dispatcher.dispatch(InputEvent::ClearAll);
        let update = dispatcher.dispatch(InputEvent::ClearAll);
        assert_eq!(update.regions, Some(RegionSet::new()));
        assert!(update.views.is_none());

        let activity = dispatcher.session().controller().activity();
        assert_eq!(activity.clicks(SelectionTrigger::SelectAll), 1);
        assert_eq!(activity.clicks(SelectionTrigger::ClearAll), 2);
    }

    #[test]
    fn unchanged_inputs_emit_nothing() {
        let mut dispatcher = ViewDispatcher::new(dataset());
        assert!(dispatcher.dispatch(InputEvent::SetMode(GroupingMode::Total)).is_empty());
        assert!(dispatcher.dispatch(InputEvent::ToggleRegion("Mars".into())).is_empty());
        assert!(dispatcher.dispatch_cycle(Vec::new()).is_empty());
    }

    #[test]
    fn mode_change_recomputes_views_only() {
        let mut dispatcher = ViewDispatcher::new(dataset());
        let update = dispatcher.dispatch(InputEvent::SetMode(GroupingMode::ByRegion));
        assert!(update.regions.is_none());
        let series = update.views.unwrap().time_series;
        assert_eq!(series.mode, GroupingMode::ByRegion);
        assert_eq!(series.rows.len(), 2);
    }

    #[test]
    fn last_bulk_control_in_cycle_wins() {
        let mut dispatcher = ViewDispatcher::new(dataset());
        let update = dispatcher.dispatch_cycle([InputEvent::SelectAll, InputEvent::ClearAll]);
        assert_eq!(update.regions, Some(RegionSet::new()));

        let update = dispatcher.dispatch_cycle([InputEvent::ClearAll, InputEvent::SelectAll]);
        assert_eq!(update.regions.map(|r| r.len()), Some(2));
    }

    #[test]
    fn toggle_after_bulk_in_same_cycle_applies_in_order() {
        let mut dispatcher = ViewDispatcher::new(dataset());
        let update = dispatcher.dispatch_cycle([
            InputEvent::ClearAll,
            InputEvent::ToggleRegion("West".into()),
        ]);
        assert_eq!(dispatcher.filter().regions(), &set(&["West"]));
        assert_eq!(update.views.unwrap().kpis.total_revenue, 200.0);
    }

    #[test]
    fn sessions_share_dataset_but_not_selection() {
        let ds = dataset();
        let mut a = ViewDispatcher::new(Arc::clone(&ds));
        let b = ViewDispatcher::new(Arc::clone(&ds));
        a.dispatch(InputEvent::ClearAll);
        assert!(a.filter().regions().is_empty());
        assert_eq!(b.filter().regions().len(), 2);
        assert!(Arc::ptr_eq(a.dataset(), b.dataset()));
    }
}
