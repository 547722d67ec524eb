impl<R: Reactions> Presenter<R> {
    /// Request a move through the deck.
    ///
    /// Resolves the target, then issues exactly one state update setting
    /// `next_slide`, which dispatches the render-start reaction. The
    /// renderer confirms later via [`Self::complete_transition`]. Only one
    /// transition may be pending at a time; overlapping requests are
    /// rejected, not queued.
    pub fn request_move(&mut self, request: MoveRequest) -> Result<u32, NavError> {
        let state = self.store.state();

        match &self.deck {
            None => return Err(NavError::DeckNotLoaded),
            Some(deck) if deck.is_empty() => return Err(NavError::EmptyDeck),
            Some(_) => {}
        }
        if let Some(pending) = state.next_slide {
            warn!("nav: move requested while transition to {pending} is pending");
            return Err(NavError::TransitionPending { pending });
        }

        let target = nav::resolve_target(&state, request);
        debug!(
            "nav: request={request:?} current={} target={target}",
            state.current_slide
        );
        self.store.apply(
            StateUpdate::new().next_slide(Some(target)),
            &mut self.reactions,
        );
        Ok(target)
    }

    /// Parse and route a symbolic direction coming from a UI layer.
    pub fn request_move_named(&mut self, direction: &str) -> Result<u32, NavError> {
        self.request_move(MoveRequest::parse(direction)?)
    }

    /// Renderer callback: the transition animation finished.
    ///
    /// Runs the outgoing slide's leave hook and the target's enter hook,
    /// then commits the move in one update (`current_slide` to the target,
    /// `prev_slide` to the outgoing slide, `next_slide` cleared), which
    /// dispatches the chrome-refresh reaction. A completion with nothing
    /// pending is a warned no-op.
    pub fn complete_transition(&mut self) {
        let state = self.store.state();
        let Some(target) = state.next_slide else {
            warn!("nav: transition completion with nothing pending");
            return;
        };

        self.hooks.run_on_leave(state.current_slide);
        self.hooks.run_on_enter(target);

        self.store.apply(
            StateUpdate::new()
                .current_slide(target)
                .prev_slide(Some(state.current_slide))
                .next_slide(None),
            &mut self.reactions,
        );
    }
}
