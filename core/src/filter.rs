//! Filter state: the selected regions and the time-series grouping mode.
//!
//! One instance per session. Only region values the dataset actually contains
//! are ever stored.

use salesdash_types::{GroupingMode, RegionSet};

use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    regions: RegionSet,
    mode: GroupingMode,
}

impl FilterSelection {
    /// All regions selected, total mode.
    pub fn initial(dataset: &Dataset) -> Self {
        Self::with_mode(dataset, GroupingMode::Total)
    }

    pub fn with_mode(dataset: &Dataset, mode: GroupingMode) -> Self {
        Self {
            regions: dataset.all_regions(),
            mode,
        }
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Replace the region selection. Values not present in the dataset are
    /// dropped. Returns true if the selection changed.
    pub fn set_regions<I, S>(&mut self, dataset: &Dataset, regions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = RegionSet::new();
        for region in regions {
            let region = region.into();
            if dataset.has_region(&region) {
                next.insert(region);
            } else {
                tracing::warn!(region = %region, "Ignoring unknown region");
            }
        }
        self.replace_regions(next)
    }

    /// Flip one region in or out of the selection. Unknown regions are ignored.
    pub fn toggle_region(&mut self, dataset: &Dataset, region: &str) -> bool {
        if !dataset.has_region(region) {
            tracing::warn!(region = %region, "Ignoring toggle of unknown region");
            return false;
        }
        if !self.regions.remove(region) {
            self.regions.insert(region.to_string());
        }
        true
    }

    pub fn set_mode(&mut self, mode: GroupingMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub(crate) fn replace_regions(&mut self, regions: RegionSet) -> bool {
        if self.regions == regions {
            return false;
        }
        self.regions = regions;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SalesRecord;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let d = NaiveDate::from_ymd_opt(2023, 3, 6).unwrap();
        Dataset::from_records(vec![
            SalesRecord::new(d, "South", "Kite", 1.0, 10.0),
            SalesRecord::new(d, "East", "Kite", 2.0, 20.0),
        ])
    }

    #[test]
    fn initial_selects_everything_in_total_mode() {
        let ds = dataset();
        let filter = FilterSelection::initial(&ds);
        assert_eq!(filter.mode(), GroupingMode::Total);
        assert_eq!(filter.regions(), &ds.all_regions());
    }

    #[test]
    fn set_regions_drops_unknown_values() {
        let ds = dataset();
        let mut filter = FilterSelection::initial(&ds);
        assert!(filter.set_regions(&ds, ["East", "Mars"]));
        assert_eq!(filter.regions().iter().collect::<Vec<_>>(), ["East"]);
        assert!(!filter.set_regions(&ds, ["East"]));
    }

    #[test]
    fn toggle_region_flips_membership() {
        let ds = dataset();
        let mut filter = FilterSelection::initial(&ds);
        assert!(filter.toggle_region(&ds, "South"));
        assert!(!filter.regions().contains("South"));
        assert!(filter.toggle_region(&ds, "South"));
        assert!(filter.regions().contains("South"));
        assert!(!filter.toggle_region(&ds, "Mars"));
    }

    #[test]
    fn set_mode_reports_change() {
        let ds = dataset();
        let mut filter = FilterSelection::initial(&ds);
        assert!(!filter.set_mode(GroupingMode::Total));
        assert!(filter.set_mode(GroupingMode::ByProduct));
        assert_eq!(filter.mode(), GroupingMode::ByProduct);
    }
}
