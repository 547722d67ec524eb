//! Navigation engine: turn symbolic directions or absolute indices into
//! validated slide targets.

use core::fmt;

use log::warn;

use crate::state::AppState;

/// A navigation request from the UI layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveRequest {
    Next,
    Prev,
    First,
    Last,
    Absolute(u32),
}

impl MoveRequest {
    /// Parse the symbolic direction names UI layers pass around.
    pub fn parse(direction: &str) -> Result<Self, NavError> {
        match direction {
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            other => Err(NavError::InvalidDirection(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NavError {
    /// Not one of `next`, `prev`, `first`, `last`.
    InvalidDirection(String),
    /// A transition toward this target is already running. One transition
    /// may be pending at a time; overlapping requests are rejected rather
    /// than queued.
    TransitionPending { pending: u32 },
    /// Navigation requested before a deck finished loading.
    DeckNotLoaded,
    /// The loaded deck has no slides; there is nothing to move to.
    EmptyDeck,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection(direction) => {
                write!(f, "unknown direction {direction:?}")
            }
            Self::TransitionPending { pending } => {
                write!(f, "transition to slide {pending} still pending")
            }
            Self::DeckNotLoaded => write!(f, "no deck loaded"),
            Self::EmptyDeck => write!(f, "deck has no slides"),
        }
    }
}

impl std::error::Error for NavError {}

/// Resolve a request against the current state.
///
/// `Next` and `Prev` are plain arithmetic: the engine does not clamp them
/// at the deck edges, callers suppress those moves at the boundaries (and
/// an out-of-range result never panics here). `Absolute` targets clamp
/// into `1..=total_slides` with a logged warning.
pub fn resolve_target(state: &AppState, request: MoveRequest) -> u32 {
    let current = state.current_slide;
    let last = state.total_slides;

    match request {
        MoveRequest::Next => current.saturating_add(1),
        MoveRequest::Prev => current.saturating_sub(1),
        MoveRequest::First => 1,
        MoveRequest::Last => last,
        MoveRequest::Absolute(0) => {
            warn!("nav: absolute target 0 below range, clamping to 1");
            1
        }
        MoveRequest::Absolute(n) if n > last => {
            warn!("nav: absolute target {n} beyond last slide {last}, clamping");
            // Resolution never drops below slide 1, even for a deck with
            // no slides.
            last.max(1)
        }
        MoveRequest::Absolute(n) => n,
    }
}
