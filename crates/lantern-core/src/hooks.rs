//! Slide-local enter/leave callbacks, populated from a deck's optional
//! script resource.

use core::fmt;
use std::collections::BTreeMap;

use log::debug;

type Hook = Box<dyn FnMut()>;

#[derive(Default)]
struct SlideCallbacks {
    on_enter: Option<Hook>,
    on_leave: Option<Hook>,
}

/// Registry of per-slide callbacks, keyed by slide index. Slides without
/// an entry, or entries without the requested callback, are a no-op.
#[derive(Default)]
pub struct SlideHooks {
    entries: BTreeMap<u32, SlideCallbacks>,
}

impl SlideHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_on_enter(&mut self, slide: u32, hook: impl FnMut() + 'static) {
        self.entries.entry(slide).or_default().on_enter = Some(Box::new(hook));
    }

    pub fn set_on_leave(&mut self, slide: u32, hook: impl FnMut() + 'static) {
        self.entries.entry(slide).or_default().on_leave = Some(Box::new(hook));
    }

    pub fn run_on_enter(&mut self, slide: u32) {
        if let Some(hook) = self
            .entries
            .get_mut(&slide)
            .and_then(|callbacks| callbacks.on_enter.as_mut())
        {
            debug!("hooks: on_enter slide={slide}");
            hook();
        }
    }

    pub fn run_on_leave(&mut self, slide: u32) {
        if let Some(hook) = self
            .entries
            .get_mut(&slide)
            .and_then(|callbacks| callbacks.on_leave.as_mut())
        {
            debug!("hooks: on_leave slide={slide}");
            hook();
        }
    }
}

impl fmt::Debug for SlideHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideHooks")
            .field("slides", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn registered_hooks_run_missing_hooks_do_not() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = SlideHooks::new();

        let entered = Rc::clone(&log);
        hooks.set_on_enter(2, move || entered.borrow_mut().push("enter 2"));
        let left = Rc::clone(&log);
        hooks.set_on_leave(1, move || left.borrow_mut().push("leave 1"));

        hooks.run_on_leave(1);
        hooks.run_on_enter(2);
        // No entries at all for slide 3.
        hooks.run_on_enter(3);
        hooks.run_on_leave(3);
        // Entry exists for 2 but has no leave hook.
        hooks.run_on_leave(2);

        assert_eq!(*log.borrow(), vec!["leave 1", "enter 2"]);
    }
}
