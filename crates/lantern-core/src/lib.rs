//! Core logic for a slide presenter: the application state container, the
//! deck acquisition state machine and the navigation engine.
//!
//! Rendering, input and resource fetching are host concerns. The host talks
//! to the core through three seams: [`deck::SlideProbe`] for resource
//! existence checks, [`reactions::Reactions`] for derived side effects, and
//! the [`presenter::Presenter`] surface for state updates and navigation
//! requests.

pub mod deck;
pub mod hooks;
pub mod nav;
pub mod presenter;
pub mod reactions;
pub mod state;
