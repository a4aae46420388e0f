//! Tab strip state for the availability component on the real-time page.

use std::fmt;

/// One of the three availability features, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    RealTime,
    Predict,
    History,
}

impl Tab {
    /// Fixed tab ordering used for rendering and arrow-key navigation.
    pub const ALL: [Tab; 3] = [Tab::RealTime, Tab::Predict, Tab::History];

    pub fn id(self) -> &'static str {
        match self {
            Tab::RealTime => "real-time",
            Tab::Predict => "predict",
            Tab::History => "history",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::RealTime => "Real-Time Availability",
            Tab::Predict => "Predict Availability",
            Tab::History => "Historical Trends",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.id() == id)
    }

    pub fn index(self) -> usize {
        match self {
            Tab::RealTime => 0,
            Tab::Predict => 1,
            Tab::History => 2,
        }
    }

    fn offset(self, step: isize) -> Tab {
        let len = Tab::ALL.len() as isize;
        let idx = (self.index() as isize + step).rem_euclid(len);
        Tab::ALL[idx as usize]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Arrow-key direction along the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Holds the active tab and whether the strip currently owns keyboard focus.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: Tab,
    focused: bool,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Selects a tab by its id. Unknown ids leave the state untouched.
    ///
    /// Returns `true` when the active tab changed.
    pub fn select_tab(&mut self, id: &str) -> bool {
        match Tab::from_id(id) {
            Some(tab) => self.select(tab),
            None => {
                tracing::debug!("Ignoring unknown tab id '{}'", id);
                false
            }
        }
    }

    /// Pointer selection. Clicking a tab also gives the strip focus.
    pub fn select(&mut self, tab: Tab) -> bool {
        self.focused = true;
        let changed = self.active != tab;
        self.active = tab;
        changed
    }

    /// Moves to the adjacent tab, wrapping at either end.
    ///
    /// Only acts while the strip has focus. Returns `true` when the active tab moved.
    pub fn handle_directional_key(&mut self, direction: Direction) -> bool {
        if !self.focused {
            return false;
        }
        let step = match direction {
            Direction::Previous => -1,
            Direction::Next => 1,
        };
        let next = self.active.offset(step);
        let changed = next != self.active;
        self.active = next;
        changed
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_initial_tab_is_first_in_order() {
        let tabs = TabController::new();
        assert_eq!(tabs.active(), Tab::ALL[0]);
        assert!(!tabs.has_focus());
    }

    #[test]
    fn test_select_every_known_tab() {
        for tab in Tab::ALL {
            let mut tabs = TabController::new();
            tabs.select_tab(tab.id());
            assert_eq!(tabs.active(), tab);
        }
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut tabs = TabController::new();
        tabs.select_tab("predict");
        assert!(!tabs.select_tab("settings"));
        assert!(!tabs.select_tab(""));
        assert_eq!(tabs.active(), Tab::Predict);
    }

    #[test]
    fn test_select_same_tab_twice_is_idempotent() {
        let mut tabs = TabController::new();
        assert!(tabs.select_tab("history"));
        let snapshot = tabs.clone();
        assert!(!tabs.select_tab("history"));
        assert_eq!(tabs.active(), snapshot.active());
        assert_eq!(tabs.has_focus(), snapshot.has_focus());
    }

    #[test]
    fn test_next_wraps_from_last_to_first() {
        let mut tabs = TabController::new();
        tabs.select(Tab::History);
        tabs.handle_directional_key(Direction::Next);
        assert_eq!(tabs.active(), Tab::RealTime);
    }

    #[test]
    fn test_previous_wraps_from_first_to_last() {
        let mut tabs = TabController::new();
        tabs.select(Tab::RealTime);
        tabs.handle_directional_key(Direction::Previous);
        assert_eq!(tabs.active(), Tab::History);
    }

    #[test]
    fn test_arrow_keys_ignored_without_focus() {
        let mut tabs = TabController::new();
        assert!(!tabs.handle_directional_key(Direction::Next));
        assert_eq!(tabs.active(), Tab::RealTime);

        tabs.select(Tab::Predict);
        tabs.blur();
        assert!(!tabs.handle_directional_key(Direction::Next));
        assert_eq!(tabs.active(), Tab::Predict);
    }

    #[test]
    fn test_tab_ids_round_trip() {
        assert_eq!(Tab::from_id("real-time"), Some(Tab::RealTime));
        assert_eq!(Tab::from_id("predict"), Some(Tab::Predict));
        assert_eq!(Tab::from_id("history"), Some(Tab::History));
        assert_eq!(Tab::from_id("History"), None);
        assert_eq!(Tab::History.to_string(), "history");
    }

    fn any_tab() -> impl Strategy<Value = Tab> {
        prop::sample::select(Tab::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_next_then_previous_is_identity(tab in any_tab()) {
            let mut tabs = TabController::new();
            tabs.select(tab);
            tabs.handle_directional_key(Direction::Next);
            tabs.handle_directional_key(Direction::Previous);
            prop_assert_eq!(tabs.active(), tab);
        }

        #[test]
        fn prop_full_cycle_returns_to_start(tab in any_tab(), forward in any::<bool>()) {
            let mut tabs = TabController::new();
            tabs.select(tab);
            let direction = if forward { Direction::Next } else { Direction::Previous };
            for _ in 0..Tab::ALL.len() {
                tabs.handle_directional_key(direction);
            }
            prop_assert_eq!(tabs.active(), tab);
        }

        #[test]
        fn prop_arbitrary_ids_never_leave_known_set(id in ".*") {
            let mut tabs = TabController::new();
            tabs.select_tab(&id);
            prop_assert!(Tab::ALL.contains(&tabs.active()));
        }
    }
}
