use super::AppState;

/// Before/after pair for one changed field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldChange<T> {
    pub previous: T,
    pub next: T,
}

fn change<T: Copy + PartialEq>(previous: T, next: T) -> Option<FieldChange<T>> {
    (previous != next).then_some(FieldChange { previous, next })
}

/// Field-by-field difference between two state snapshots. Comparison is
/// plain equality per field; there are no nested structures to deep-merge.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StateDiff {
    pub current_slide: Option<FieldChange<u32>>,
    pub prev_slide: Option<FieldChange<Option<u32>>>,
    pub next_slide: Option<FieldChange<Option<u32>>>,
    pub total_slides: Option<FieldChange<u32>>,
    pub initialized: Option<FieldChange<bool>>,
    pub dimmer: Option<FieldChange<bool>>,
    pub ui_visible: Option<FieldChange<bool>>,
    pub events_ready: Option<FieldChange<bool>>,
}

impl StateDiff {
    pub fn between(previous: &AppState, next: &AppState) -> Self {
        Self {
            current_slide: change(previous.current_slide, next.current_slide),
            prev_slide: change(previous.prev_slide, next.prev_slide),
            next_slide: change(previous.next_slide, next.next_slide),
            total_slides: change(previous.total_slides, next.total_slides),
            initialized: change(previous.initialized, next.initialized),
            dimmer: change(previous.dimmer, next.dimmer),
            ui_visible: change(previous.ui_visible, next.ui_visible),
            events_ready: change(previous.events_ready, next.events_ready),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn changed_count(&self) -> usize {
        usize::from(self.current_slide.is_some())
            + usize::from(self.prev_slide.is_some())
            + usize::from(self.next_slide.is_some())
            + usize::from(self.total_slides.is_some())
            + usize::from(self.initialized.is_some())
            + usize::from(self.dimmer.is_some())
            + usize::from(self.ui_visible.is_some())
            + usize::from(self.events_ready.is_some())
    }
}
