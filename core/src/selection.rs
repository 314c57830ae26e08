//! Selection controller for the "Clear All" / "Select All" controls.
//!
//! The controller is told explicitly which control fired. It never infers
//! intent by diffing region sets: a shrunken set could be a user removing one
//! region or a bulk clear, and only the trigger identity tells them apart.

use salesdash_types::{RegionSet, SelectionTrigger};

/// Next region set for a single trigger.
///
/// - `ClearAll`  -> empty set
/// - `SelectAll` -> every region the dataset was loaded with
/// - `None`      -> `current`, unchanged
pub fn resolve(trigger: SelectionTrigger, current: &RegionSet, all_regions: &[String]) -> RegionSet {
    match trigger {
        SelectionTrigger::ClearAll => RegionSet::new(),
        SelectionTrigger::SelectAll => all_regions.iter().cloned().collect(),
        SelectionTrigger::None => current.clone(),
    }
}

/// Activation bookkeeping for the bulk controls: click counts per control and
/// the identity of the control that fired last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlActivity {
    clear_all_clicks: u64,
    select_all_clicks: u64,
    last_fired: SelectionTrigger,
}

impl ControlActivity {
    pub fn record(&mut self, trigger: SelectionTrigger) {
        match trigger {
            SelectionTrigger::ClearAll => self.clear_all_clicks += 1,
            SelectionTrigger::SelectAll => self.select_all_clicks += 1,
            SelectionTrigger::None => return,
        }
        self.last_fired = trigger;
    }

    pub fn clicks(&self, trigger: SelectionTrigger) -> u64 {
        match trigger {
            SelectionTrigger::ClearAll => self.clear_all_clicks,
            SelectionTrigger::SelectAll => self.select_all_clicks,
            SelectionTrigger::None => 0,
        }
    }

    /// Most recently activated control over the session, `None` before any click.
    pub fn last_fired(&self) -> SelectionTrigger {
        self.last_fired
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    activity: ControlActivity,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(&self) -> &ControlActivity {
        &self.activity
    }

    /// Resolve one event cycle. `fired` lists the controls activated during
    /// the cycle in activation order; the most recent one wins. A cycle in
    /// which nothing fired passes `current` through.
    pub fn resolve_cycle(
        &mut self,
        fired: &[SelectionTrigger],
        current: &RegionSet,
        all_regions: &[String],
    ) -> RegionSet {
        let mut latest = SelectionTrigger::None;
        for &trigger in fired {
            self.activity.record(trigger);
            if trigger != SelectionTrigger::None {
                latest = trigger;
            }
        }

        tracing::debug!(trigger = ?latest, "Resolving region selection");
        resolve(latest, current, all_regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<String> {
        vec!["East".into(), "North".into(), "West".into()]
    }

    fn set(names: &[&str]) -> RegionSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn clear_all_always_empties() {
        for current in [set(&[]), set(&["East"]), set(&["East", "North", "West"])] {
            assert!(resolve(SelectionTrigger::ClearAll, &current, &all()).is_empty());
        }
    }

    #[test]
    fn select_all_always_restores_full_sequence() {
        for current in [set(&[]), set(&["West"]), set(&["East", "North", "West"])] {
            let next = resolve(SelectionTrigger::SelectAll, &current, &all());
            assert_eq!(next.into_iter().collect::<Vec<_>>(), all());
        }
    }

    #[test]
    fn no_trigger_passes_through() {
        let current = set(&["North"]);
        assert_eq!(resolve(SelectionTrigger::None, &current, &all()), current);
    }

    #[test]
    fn most_recent_control_wins_within_a_cycle() {
        let mut controller = SelectionController::new();
        let current = set(&["East"]);

        let next = controller.resolve_cycle(
            &[SelectionTrigger::ClearAll, SelectionTrigger::SelectAll],
            &current,
            &all(),
        );
        assert_eq!(next.len(), 3);

        let next = controller.resolve_cycle(
            &[SelectionTrigger::SelectAll, SelectionTrigger::ClearAll],
            &current,
            &all(),
        );
        assert!(next.is_empty());
        assert_eq!(controller.activity().last_fired(), SelectionTrigger::ClearAll);
    }

    #[test]
    fn quiet_cycle_ignores_earlier_clicks() {
        let mut controller = SelectionController::new();
        controller.resolve_cycle(&[SelectionTrigger::ClearAll], &set(&["East"]), &all());

        let current = set(&["West"]);
        assert_eq!(controller.resolve_cycle(&[], &current, &all()), current);
    }

    #[test]
    fn activity_counts_clicks() {
        let mut activity = ControlActivity::default();
        activity.record(SelectionTrigger::SelectAll);
        activity.record(SelectionTrigger::SelectAll);
        activity.record(SelectionTrigger::None);
        assert_eq!(activity.clicks(SelectionTrigger::SelectAll), 2);
        assert_eq!(activity.clicks(SelectionTrigger::ClearAll), 0);
        assert_eq!(activity.last_fired(), SelectionTrigger::SelectAll);
    }
}
