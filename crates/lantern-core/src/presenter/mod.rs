//! Presentation session: wires the state store, the deck, the navigation
//! engine and the slide hooks behind the one surface UI layers may touch.

use core::fmt;

use log::{debug, info, warn};

use crate::{
    deck::SlideDeck,
    hooks::SlideHooks,
    nav::{self, MoveRequest, NavError},
    reactions::Reactions,
    state::{AppState, StateDiff, StateError, StateStore, StateUpdate},
};

/// Session configuration, the analog of the slideshow picker form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresenterConfig {
    /// Folder the numbered slide resources live in.
    pub folder: String,
    /// Prefix of the published location tag.
    pub location_prefix: String,
    /// Reveal the navigation buttons after initialization.
    pub show_buttons: bool,
    /// Show the slide counter.
    pub show_counter: bool,
    /// Try to load the deck's script resource for slide hooks.
    pub fetch_script: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            folder: "slides".to_owned(),
            location_prefix: "slide".to_owned(),
            show_buttons: true,
            show_counter: true,
            fetch_script: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PresenterError {
    /// Finalization ran while this deck was already initialized. Non-fatal;
    /// the duplicate call did nothing.
    AlreadyInitialized,
}

impl fmt::Display for PresenterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "initialization already finalized"),
        }
    }
}

impl std::error::Error for PresenterError {}

/// One presentation session.
///
/// Hosts drive it through `begin_load` / `install_deck` / `finalize` when
/// a deck comes in, and `request_move` / `complete_transition` afterwards.
/// Direct field mutation is impossible by construction: every change goes
/// through the store and comes back out through the reactions sink.
pub struct Presenter<R: Reactions> {
    config: PresenterConfig,
    store: StateStore,
    deck: Option<SlideDeck>,
    hooks: SlideHooks,
    reactions: R,
}

impl<R: Reactions> Presenter<R> {
    pub fn new(config: PresenterConfig, reactions: R) -> Self {
        Self {
            config,
            store: StateStore::new(),
            deck: None,
            hooks: SlideHooks::new(),
            reactions,
        }
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    pub fn state(&self) -> AppState {
        self.store.state()
    }

    pub fn deck(&self) -> Option<&SlideDeck> {
        self.deck.as_ref()
    }

    pub fn reactions_mut(&mut self) -> &mut R {
        &mut self.reactions
    }

    /// Previous state snapshots, newest first.
    pub fn history(&self) -> impl Iterator<Item = &AppState> {
        self.store.history()
    }

    pub fn history_at(&self, index: usize) -> Result<AppState, StateError> {
        self.store.history_at(index)
    }

    /// Route a raw partial update from the UI layer.
    pub fn apply(&mut self, update: StateUpdate) -> StateDiff {
        self.store.apply(update, &mut self.reactions)
    }

    /// Start (or restart) a deck load: raise the dimmer over the stage and
    /// reset the initialization latch. Any live deck and hooks are dropped.
    pub fn begin_load(&mut self) {
        let mut update = StateUpdate::new().dimmer(true);
        if self.store.state().initialized {
            update = update.initialized(false);
        }

        self.deck = None;
        self.hooks = SlideHooks::new();
        self.store.apply(update, &mut self.reactions);
        debug!("presenter: load started folder={}", self.config.folder);
    }

    /// Publish a freshly loaded deck, replacing any previous one wholesale,
    /// and commit its slide count with the cursor on the first slide.
    pub fn install_deck(&mut self, deck: SlideDeck) {
        let total = deck.total_slides();
        let start = deck.start_index();
        info!("presenter: deck installed total_slides={total}");

        self.deck = Some(deck);
        self.store.apply(
            StateUpdate::new()
                .total_slides(total)
                .current_slide(start)
                .prev_slide(None)
                .next_slide(None),
            &mut self.reactions,
        );
    }

    /// Install slide-local hooks once the script resource is in. Ignored
    /// with a warning when the session is not configured to fetch scripts.
    pub fn hooks_loaded(&mut self, hooks: SlideHooks) {
        if !self.config.fetch_script {
            warn!("presenter: slide hooks offered but script fetching is off, ignoring");
            return;
        }

        debug!("presenter: slide hooks installed {hooks:?}");
        self.hooks = hooks;
        self.store
            .apply(StateUpdate::new().events_ready(true), &mut self.reactions);
    }

    /// Finalize initialization: run the first slide's entry hook, then drop
    /// the dimmer and latch `initialized` (which lets hosts schedule their
    /// chrome reveal). Calling this twice for one deck is a warned no-op.
    pub fn finalize(&mut self) -> Result<(), PresenterError> {
        if self.store.state().initialized {
            warn!("presenter: finalize called more than once, ignoring");
            return Err(PresenterError::AlreadyInitialized);
        }

        self.hooks.run_on_enter(self.store.state().current_slide);
        self.store.apply(
            StateUpdate::new().dimmer(false).initialized(true),
            &mut self.reactions,
        );
        Ok(())
    }

    /// Toggle the blackout dimmer.
    pub fn toggle_dimmer(&mut self) {
        let active = !self.store.state().dimmer;
        self.store
            .apply(StateUpdate::new().dimmer(active), &mut self.reactions);
    }

    /// Toggle the navigation chrome.
    pub fn toggle_ui(&mut self) {
        let visible = !self.store.state().ui_visible;
        self.store
            .apply(StateUpdate::new().ui_visible(visible), &mut self.reactions);
    }
}

include!("navigation.rs");
