//! Derived side effects: a fixed table mapping state-field changes to
//! rendering-layer actions.

use core::fmt;

use log::warn;

use crate::state::{AppState, StateDiff};

/// Animation played on one side of a transition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Animation {
    FadeLeft,
    FadeRight,
}

/// Transition handed to the renderer when a move request sets `next_slide`.
///
/// The animation pair is derived, never requested: moving to a higher index
/// leaves toward the right and enters from the left, moving to a lower
/// index the other way around. Renderers must follow this comparison rule
/// so decks animate consistently everywhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransitionPlan {
    /// Slide shown when the transition starts.
    pub from: u32,
    /// Slide the deck is moving to.
    pub to: u32,
}

impl TransitionPlan {
    pub fn is_forward(self) -> bool {
        self.to > self.from
    }

    pub fn leave_animation(self) -> Animation {
        if self.from > self.to {
            Animation::FadeLeft
        } else {
            Animation::FadeRight
        }
    }

    pub fn enter_animation(self) -> Animation {
        match self.leave_animation() {
            Animation::FadeLeft => Animation::FadeRight,
            Animation::FadeRight => Animation::FadeLeft,
        }
    }
}

/// Enabled state of the four navigation buttons.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ButtonStates {
    pub first: bool,
    pub prev: bool,
    pub next: bool,
    pub last: bool,
}

/// Navigation chrome data refreshed after every committed transition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChromeView {
    pub current_slide: u32,
    pub total_slides: u32,
}

impl ChromeView {
    /// Counter text, e.g. `2 of 3`.
    pub fn counter_label(&self) -> String {
        format!("{} of {}", self.current_slide, self.total_slides)
    }

    /// Location tag published to the address indicator: the configured
    /// prefix followed by the decimal slide index, e.g. `slide2`.
    pub fn location_tag(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.current_slide)
    }

    /// Backward buttons are disabled on the first slide, forward buttons on
    /// the last; a single-slide deck disables all four.
    pub fn button_states(&self) -> ButtonStates {
        if self.total_slides <= 1 {
            return ButtonStates {
                first: false,
                prev: false,
                next: false,
                last: false,
            };
        }

        let backward = self.current_slide > 1;
        let forward = self.current_slide < self.total_slides;
        ButtonStates {
            first: backward,
            prev: backward,
            next: forward,
            last: forward,
        }
    }
}

/// Rendering-layer collaborator notified after committed state changes.
///
/// Every method defaults to a no-op. Reactions receive read-only data; a
/// reaction that fails is logged by the dispatcher and never blocks its
/// siblings, since the state commit already happened.
pub trait Reactions {
    type Error: fmt::Debug;

    /// `dimmer` changed.
    fn set_dimmer(&mut self, _active: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `ui_visible` changed.
    fn set_ui_visible(&mut self, _visible: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `next_slide` was set: start rendering the transition.
    fn begin_transition(&mut self, _plan: TransitionPlan) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `next_slide` was cleared: the transition committed, refresh the
    /// counter, buttons and location indicator.
    fn refresh_chrome(&mut self, _view: ChromeView) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `initialized` latched true. Hosts configured to show chrome
    /// typically schedule their delayed UI reveal here.
    fn app_initialized(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs after every applied update, diff or not.
    fn did_update(&mut self, _previous: &AppState, _current: &AppState) {}
}

/// Evaluate the reaction table for one committed update, in fixed order,
/// only for fields present in the diff. The `next_slide` rules are mutually
/// exclusive within one diff: the field has exactly one new value.
pub(crate) fn dispatch<R: Reactions>(
    previous: &AppState,
    current: &AppState,
    diff: &StateDiff,
    reactions: &mut R,
) {
    if let Some(change) = diff.dimmer {
        if let Err(err) = reactions.set_dimmer(change.next) {
            warn!("reaction: set_dimmer failed err={err:?}");
        }
    }

    if let Some(change) = diff.ui_visible {
        if let Err(err) = reactions.set_ui_visible(change.next) {
            warn!("reaction: set_ui_visible failed err={err:?}");
        }
    }

    if let Some(change) = diff.next_slide {
        match change.next {
            Some(to) => {
                let plan = TransitionPlan {
                    from: previous.current_slide,
                    to,
                };
                if let Err(err) = reactions.begin_transition(plan) {
                    warn!("reaction: begin_transition failed err={err:?}");
                }
            }
            None => {
                let view = ChromeView {
                    current_slide: current.current_slide,
                    total_slides: current.total_slides,
                };
                if let Err(err) = reactions.refresh_chrome(view) {
                    warn!("reaction: refresh_chrome failed err={err:?}");
                }
            }
        }
    }

    if let Some(change) = diff.initialized {
        if change.next {
            if let Err(err) = reactions.app_initialized() {
                warn!("reaction: app_initialized failed err={err:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transition_leaves_right_enters_left() {
        let plan = TransitionPlan { from: 2, to: 5 };
        assert!(plan.is_forward());
        assert_eq!(plan.leave_animation(), Animation::FadeRight);
        assert_eq!(plan.enter_animation(), Animation::FadeLeft);
    }

    #[test]
    fn backward_transition_leaves_left_enters_right() {
        let plan = TransitionPlan { from: 5, to: 2 };
        assert!(!plan.is_forward());
        assert_eq!(plan.leave_animation(), Animation::FadeLeft);
        assert_eq!(plan.enter_animation(), Animation::FadeRight);
    }

    #[test]
    fn counter_and_location_formats() {
        let view = ChromeView {
            current_slide: 2,
            total_slides: 3,
        };
        assert_eq!(view.counter_label(), "2 of 3");
        assert_eq!(view.location_tag("slide"), "slide2");
    }

    #[test]
    fn buttons_disable_at_deck_edges() {
        let first = ChromeView {
            current_slide: 1,
            total_slides: 4,
        }
        .button_states();
        assert!(!first.first && !first.prev);
        assert!(first.next && first.last);

        let last = ChromeView {
            current_slide: 4,
            total_slides: 4,
        }
        .button_states();
        assert!(last.first && last.prev);
        assert!(!last.next && !last.last);

        let middle = ChromeView {
            current_slide: 2,
            total_slides: 4,
        }
        .button_states();
        assert!(middle.first && middle.prev && middle.next && middle.last);
    }

    #[test]
    fn single_slide_deck_disables_everything() {
        let states = ChromeView {
            current_slide: 1,
            total_slides: 1,
        }
        .button_states();
        assert!(!states.first && !states.prev && !states.next && !states.last);
    }
}
