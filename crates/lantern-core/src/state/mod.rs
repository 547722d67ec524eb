//! Single source of truth for the application state, with change detection
//! and a bounded ring of previous snapshots.

mod diff;

pub use diff::{FieldChange, StateDiff};

use core::fmt;

use heapless::Deque;
use log::debug;

use crate::reactions::{self, Reactions};

/// Previous state snapshots retained for diagnostics.
pub const STATE_HISTORY_CAPACITY: usize = 10;

/// Current state of the presentation. Owned exclusively by [`StateStore`];
/// everything else sees copies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppState {
    /// 1-based index of the slide presently shown.
    pub current_slide: u32,
    /// Slide shown before the last committed transition.
    pub prev_slide: Option<u32>,
    /// Pending target of an in-flight transition. Presence is the signal
    /// that a transition is running.
    pub next_slide: Option<u32>,
    /// Slides discovered by the deck loader. Fixed between deck loads.
    pub total_slides: u32,
    /// Latched once per deck load, after the first slide's entry hook ran.
    pub initialized: bool,
    /// Full-screen cover, shown while loading or toggled for blackout.
    pub dimmer: bool,
    /// Navigation chrome shown.
    pub ui_visible: bool,
    /// Slide-local hooks loaded and installed.
    pub events_ready: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_slide: 1,
            prev_slide: None,
            next_slide: None,
            total_slides: 0,
            initialized: false,
            dimmer: false,
            ui_visible: false,
            events_ready: false,
        }
    }
}

/// Partial state update. Fields left as `None` keep their current value;
/// the merge is shallow and field-by-field, never nested.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StateUpdate {
    pub current_slide: Option<u32>,
    pub prev_slide: Option<Option<u32>>,
    pub next_slide: Option<Option<u32>>,
    pub total_slides: Option<u32>,
    pub initialized: Option<bool>,
    pub dimmer: Option<bool>,
    pub ui_visible: Option<bool>,
    pub events_ready: Option<bool>,
}

impl StateUpdate {
    pub const fn new() -> Self {
        Self {
            current_slide: None,
            prev_slide: None,
            next_slide: None,
            total_slides: None,
            initialized: None,
            dimmer: None,
            ui_visible: None,
            events_ready: None,
        }
    }

    pub const fn current_slide(mut self, slide: u32) -> Self {
        self.current_slide = Some(slide);
        self
    }

    pub const fn prev_slide(mut self, slide: Option<u32>) -> Self {
        self.prev_slide = Some(slide);
        self
    }

    pub const fn next_slide(mut self, slide: Option<u32>) -> Self {
        self.next_slide = Some(slide);
        self
    }

    pub const fn total_slides(mut self, total: u32) -> Self {
        self.total_slides = Some(total);
        self
    }

    pub const fn initialized(mut self, value: bool) -> Self {
        self.initialized = Some(value);
        self
    }

    pub const fn dimmer(mut self, active: bool) -> Self {
        self.dimmer = Some(active);
        self
    }

    pub const fn ui_visible(mut self, visible: bool) -> Self {
        self.ui_visible = Some(visible);
        self
    }

    pub const fn events_ready(mut self, ready: bool) -> Self {
        self.events_ready = Some(ready);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    fn merge_over(&self, base: AppState) -> AppState {
        AppState {
            current_slide: self.current_slide.unwrap_or(base.current_slide),
            prev_slide: self.prev_slide.unwrap_or(base.prev_slide),
            next_slide: self.next_slide.unwrap_or(base.next_slide),
            total_slides: self.total_slides.unwrap_or(base.total_slides),
            initialized: self.initialized.unwrap_or(base.initialized),
            dimmer: self.dimmer.unwrap_or(base.dimmer),
            ui_visible: self.ui_visible.unwrap_or(base.ui_visible),
            events_ready: self.events_ready.unwrap_or(base.events_ready),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// History lookup past the populated range. An index within capacity
    /// but not yet populated also fails, so bugs are not masked by a
    /// silent `None`.
    HistoryIndexOutOfRange { index: usize, populated: usize },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HistoryIndexOutOfRange { index, populated } => write!(
                f,
                "history index {index} out of range ({populated} snapshots recorded)"
            ),
        }
    }
}

impl std::error::Error for StateError {}

/// Holder of the one mutable [`AppState`]. All mutation funnels through
/// [`apply`](Self::apply); reads hand out copies.
pub struct StateStore {
    state: AppState,
    history: Deque<AppState, STATE_HISTORY_CAPACITY>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            history: Deque::new(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Merge `update` over the current state and commit the result.
    ///
    /// In order: the outgoing state is snapshotted into the history ring
    /// (evicting the oldest entry at capacity), the shallow merge and diff
    /// are computed, the merged state is committed, reactions are
    /// dispatched for a non-empty diff, and the `did_update` hook runs
    /// last. Everything is synchronous; no other update can interleave.
    pub fn apply<R: Reactions>(&mut self, update: StateUpdate, reactions: &mut R) -> StateDiff {
        let previous = self.state;

        if self.history.is_full() {
            self.history.pop_back();
        }
        let _ = self.history.push_front(previous);

        let merged = update.merge_over(previous);
        let diff = StateDiff::between(&previous, &merged);
        self.state = merged;

        if !diff.is_empty() {
            debug!("state: update committed changed_fields={}", diff.changed_count());
            reactions::dispatch(&previous, &merged, &diff, reactions);
        }

        reactions.did_update(&previous, &self.state);
        diff
    }

    /// Previous snapshots, newest first.
    pub fn history(&self) -> impl Iterator<Item = &AppState> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Snapshot at `index` positions back, 0 being the most recent.
    pub fn history_at(&self, index: usize) -> Result<AppState, StateError> {
        self.history
            .iter()
            .nth(index)
            .copied()
            .ok_or(StateError::HistoryIndexOutOfRange {
                index,
                populated: self.history.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactions::{ChromeView, TransitionPlan};

    /// Records dispatched reactions; optionally fails one of them.
    #[derive(Default)]
    struct Recorder {
        dimmer: Vec<bool>,
        ui_visible: Vec<bool>,
        transitions: Vec<TransitionPlan>,
        chrome: Vec<ChromeView>,
        initialized: u32,
        did_update: u32,
        fail_dimmer: bool,
    }

    impl Reactions for Recorder {
        type Error = &'static str;

        fn set_dimmer(&mut self, active: bool) -> Result<(), Self::Error> {
            if self.fail_dimmer {
                return Err("dimmer backend gone");
            }
            self.dimmer.push(active);
            Ok(())
        }

        fn set_ui_visible(&mut self, visible: bool) -> Result<(), Self::Error> {
            self.ui_visible.push(visible);
            Ok(())
        }

        fn begin_transition(&mut self, plan: TransitionPlan) -> Result<(), Self::Error> {
            self.transitions.push(plan);
            Ok(())
        }

        fn refresh_chrome(&mut self, view: ChromeView) -> Result<(), Self::Error> {
            self.chrome.push(view);
            Ok(())
        }

        fn app_initialized(&mut self) -> Result<(), Self::Error> {
            self.initialized += 1;
            Ok(())
        }

        fn did_update(&mut self, _previous: &AppState, _current: &AppState) {
            self.did_update += 1;
        }
    }

    #[test]
    fn partial_update_keeps_unnamed_fields() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();

        store.apply(
            StateUpdate::new().total_slides(5).current_slide(2),
            &mut recorder,
        );
        let before = store.state();

        store.apply(StateUpdate::new().dimmer(true), &mut recorder);
        let after = store.state();

        assert!(after.dimmer);
        assert_eq!(after.current_slide, before.current_slide);
        assert_eq!(after.total_slides, before.total_slides);
        assert_eq!(after.prev_slide, before.prev_slide);
        assert_eq!(after.initialized, before.initialized);
    }

    #[test]
    fn empty_update_fires_no_reactions_but_runs_did_update() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();

        let diff = store.apply(StateUpdate::new(), &mut recorder);

        assert!(diff.is_empty());
        assert!(recorder.dimmer.is_empty());
        assert!(recorder.transitions.is_empty());
        assert_eq!(recorder.did_update, 1);
    }

    #[test]
    fn update_to_identical_values_is_a_no_op() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();
        store.apply(StateUpdate::new().dimmer(true), &mut recorder);

        let diff = store.apply(StateUpdate::new().dimmer(true), &mut recorder);

        assert!(diff.is_empty());
        assert_eq!(recorder.dimmer, vec![true]);
    }

    #[test]
    fn history_keeps_newest_first_and_evicts_at_capacity() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();

        for slide in 1..=(STATE_HISTORY_CAPACITY as u32 + 1) {
            store.apply(StateUpdate::new().current_slide(slide), &mut recorder);
        }

        assert_eq!(store.history_len(), STATE_HISTORY_CAPACITY);

        // Most recent snapshot is the state before the 11th update.
        let newest = store.history_at(0).unwrap();
        assert_eq!(newest.current_slide, STATE_HISTORY_CAPACITY as u32);

        // The pristine default snapshot (before the 1st update) was evicted;
        // the oldest survivor predates the 2nd update.
        let oldest = store.history_at(STATE_HISTORY_CAPACITY - 1).unwrap();
        assert_eq!(oldest.current_slide, 1);
    }

    #[test]
    fn history_lookup_past_populated_range_fails() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();
        store.apply(StateUpdate::new().dimmer(true), &mut recorder);

        assert!(store.history_at(0).is_ok());
        assert_eq!(
            store.history_at(3),
            Err(StateError::HistoryIndexOutOfRange {
                index: 3,
                populated: 1
            })
        );
    }

    #[test]
    fn failing_reaction_does_not_block_siblings() {
        let mut store = StateStore::new();
        let mut recorder = Recorder {
            fail_dimmer: true,
            ..Recorder::default()
        };

        store.apply(
            StateUpdate::new().dimmer(true).ui_visible(true),
            &mut recorder,
        );

        assert!(recorder.dimmer.is_empty());
        assert_eq!(recorder.ui_visible, vec![true]);
    }

    #[test]
    fn pending_transition_dispatches_render_start() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();
        store.apply(
            StateUpdate::new().total_slides(3).current_slide(1),
            &mut recorder,
        );

        store.apply(StateUpdate::new().next_slide(Some(2)), &mut recorder);

        assert_eq!(recorder.transitions, vec![TransitionPlan { from: 1, to: 2 }]);
        assert!(recorder.chrome.is_empty());
    }

    #[test]
    fn clearing_pending_transition_dispatches_chrome_refresh() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();
        store.apply(
            StateUpdate::new().total_slides(3).current_slide(1),
            &mut recorder,
        );
        store.apply(StateUpdate::new().next_slide(Some(2)), &mut recorder);

        store.apply(
            StateUpdate::new()
                .current_slide(2)
                .prev_slide(Some(1))
                .next_slide(None),
            &mut recorder,
        );

        assert_eq!(recorder.transitions.len(), 1);
        assert_eq!(
            recorder.chrome,
            vec![ChromeView {
                current_slide: 2,
                total_slides: 3
            }]
        );
    }

    #[test]
    fn initialized_rising_edge_fires_once() {
        let mut store = StateStore::new();
        let mut recorder = Recorder::default();

        store.apply(StateUpdate::new().initialized(true), &mut recorder);
        store.apply(StateUpdate::new().initialized(true), &mut recorder);
        store.apply(StateUpdate::new().initialized(false), &mut recorder);

        assert_eq!(recorder.initialized, 1);
    }
}
