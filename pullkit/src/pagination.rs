use crate::{
    Error, Footer, FooterState, PaginationOptions, PaginationSnapshot, Result, Schedule,
    ScrollHost, ScrollPhase, VisiblePositions,
};

/// The load-more state machine.
///
/// It tracks how many data items are loaded and treats the footer as a synthetic row at index
/// `data_count` (present only when load-more is enabled and at least one item is loaded). Scroll
/// reports drive both the load-more trigger and the footer's display state.
///
/// Two strategies are supported:
/// - auto: trigger as soon as the footer scrolls into view. The first time the footer is seen
///   out of view, the controller downgrades itself to manual for the rest of the data set.
/// - manual: the footer must be fully revealed, then released (scroll idle) or tapped.
#[derive(Clone, Debug)]
pub struct PaginationController<F> {
    options: PaginationOptions,
    footer: F,
    data_count: usize,
    auto_load_more: bool,
    is_loading: bool,
    footer_state: FooterState,
    footer_visible: bool,
    phase: ScrollPhase,
    last_load_succeeded: Option<bool>,
    settle: Schedule<u64>,
}

impl<F: Footer> PaginationController<F> {
    pub fn new(options: PaginationOptions, footer: F) -> Self {
        pdebug!(
            load_more_enabled = options.load_more_enabled,
            auto_load_more = options.auto_load_more,
            "PaginationController::new"
        );
        Self {
            auto_load_more: options.auto_load_more,
            options,
            footer,
            data_count: 0,
            is_loading: false,
            footer_state: FooterState::Idle,
            footer_visible: false,
            phase: ScrollPhase::Idle,
            last_load_succeeded: None,
            settle: Schedule::new(),
        }
    }

    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    pub fn footer(&self) -> &F {
        &self.footer
    }

    pub fn footer_mut(&mut self) -> &mut F {
        &mut self.footer
    }

    pub fn into_footer(self) -> F {
        self.footer
    }

    pub fn data_count(&self) -> usize {
        self.data_count
    }

    pub fn is_load_more_enabled(&self) -> bool {
        self.options.load_more_enabled
    }

    pub fn is_auto_load_more(&self) -> bool {
        self.auto_load_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn footer_state(&self) -> FooterState {
        self.footer_state
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.phase
    }

    /// The `success` flag of the most recent [`Self::resolve_load`].
    pub fn last_load_succeeded(&self) -> Option<bool> {
        self.last_load_succeeded
    }

    pub fn is_settle_pending(&self) -> bool {
        self.settle.is_pending()
    }

    pub fn has_footer(&self) -> bool {
        self.options.load_more_enabled && self.data_count > 0
    }

    /// Index of the footer row, if there is one.
    pub fn footer_index(&self) -> Option<usize> {
        self.has_footer().then_some(self.data_count)
    }

    /// Number of rows including the footer.
    pub fn item_count(&self) -> usize {
        self.data_count + usize::from(self.has_footer())
    }

    pub fn is_footer(&self, index: usize) -> bool {
        self.footer_index() == Some(index)
    }

    pub fn snapshot(&self) -> PaginationSnapshot {
        PaginationSnapshot {
            data_count: self.data_count,
            load_more_enabled: self.options.load_more_enabled,
            auto_load_more: self.auto_load_more,
            is_loading: self.is_loading,
            footer_state: self.footer_state,
        }
    }

    pub fn set_on_load_more(&mut self, on_load_more: Option<impl Fn() + Send + Sync + 'static>) {
        self.options.on_load_more = on_load_more.map(|f| alloc::sync::Arc::new(f) as _);
    }

    pub fn set_load_more_enabled(&mut self, enabled: bool) {
        if self.options.load_more_enabled == enabled {
            return;
        }
        self.options.load_more_enabled = enabled;
        if !enabled {
            self.settle.cancel();
            self.footer_visible = false;
            if !self.is_loading {
                self.set_footer_state(FooterState::Idle);
            }
        }
    }

    pub fn set_auto_load_more(&mut self, auto: bool) {
        self.options.auto_load_more = auto;
        self.auto_load_more = auto;
        if auto {
            // The next scroll that shows the footer counts as it coming into view.
            self.footer_visible = false;
        }
    }

    /// Updates the footer's message, typically right before [`Self::resolve_load`].
    pub fn set_footer_message(&mut self, message: impl Into<alloc::string::String>) {
        self.footer.set_message(message.into());
    }

    /// Replaces the whole data set and returns to the initial state.
    ///
    /// A pending load is dropped, the settle delay is cancelled and auto mode is restored to
    /// the configured value.
    pub fn set_data_count(&mut self, count: usize) {
        ptrace!(count, "set_data_count");
        self.data_count = count;
        self.is_loading = false;
        self.auto_load_more = self.options.auto_load_more;
        self.footer_visible = false;
        self.last_load_succeeded = None;
        self.settle.cancel();
        self.set_footer_state(FooterState::Idle);
    }

    /// Records `count` items appended (`index = None`) or inserted at `index`.
    ///
    /// Loading and footer state are left alone. Returns the position the items start at, or
    /// [`Error::InsertOutOfRange`] without changing anything.
    pub fn insert_data(&mut self, count: usize, index: Option<usize>) -> Result<usize> {
        let at = index.unwrap_or(self.data_count);
        if at > self.data_count {
            pwarn!(index = at, len = self.data_count, "insert index out of range");
            return Err(Error::InsertOutOfRange {
                index: at,
                len: self.data_count,
            });
        }
        self.data_count = self.data_count.saturating_add(count);
        Ok(at)
    }

    /// Reports a scroll-state change from the host. Becoming idle runs the idle checks against
    /// the host's current visible positions.
    pub fn on_scroll_state_changed(&mut self, host: &impl ScrollHost, phase: ScrollPhase) {
        self.phase = phase;
        if phase == ScrollPhase::Idle {
            self.on_scroll_idle(host.visible_positions());
        }
    }

    /// Reports a scroll delta (or a layout pass) with the current visible positions.
    pub fn on_scrolled(
        &mut self,
        host: &mut impl ScrollHost,
        positions: impl Into<VisiblePositions>,
    ) {
        let positions = positions.into();
        let Some(footer) = self.footer_index() else {
            return;
        };
        let visible = positions.last == Some(footer);
        let fully = visible && positions.last_fully == Some(footer);

        if self.auto_load_more {
            if visible {
                let became_visible = !self.footer_visible;
                self.footer_visible = true;
                if became_visible {
                    self.call_load_more();
                }
                return;
            }
            ptrace!("footer left the viewport, auto load more disabled");
            self.auto_load_more = false;
        }

        self.footer_visible = visible;
        if self.is_loading || self.settle.is_pending() {
            return;
        }
        if !visible {
            self.set_footer_state(FooterState::Idle);
        } else if !fully {
            self.set_footer_state(FooterState::PullToLoad);
        } else if self.phase == ScrollPhase::Idle {
            self.reveal_or_hide_footer(host);
        } else {
            self.set_footer_state(FooterState::ReleaseToLoad);
        }
    }

    /// Reports that scrolling stopped.
    ///
    /// In manual mode, a fully revealed footer counts as released and triggers a load; a
    /// partially revealed one falls back to idle.
    pub fn on_scroll_idle(&mut self, positions: impl Into<VisiblePositions>) {
        let positions = positions.into();
        self.phase = ScrollPhase::Idle;
        let Some(footer) = self.footer_index() else {
            return;
        };
        self.footer_visible = positions.last == Some(footer);
        if self.auto_load_more || self.is_loading || self.settle.is_pending() {
            return;
        }

        if self.footer_visible && positions.last_fully == Some(footer) {
            self.call_load_more();
        } else {
            self.set_footer_state(FooterState::Idle);
        }
    }

    /// The user tapped the footer row.
    pub fn on_footer_click(&mut self) -> bool {
        self.call_load_more()
    }

    /// Fires the load-more callback unless a load is already pending.
    ///
    /// Returns `true` if the callback was invoked.
    pub fn call_load_more(&mut self) -> bool {
        if !self.has_footer() {
            return false;
        }
        if self.is_loading {
            ptrace!("load more already pending");
            return false;
        }
        self.settle.cancel();
        self.is_loading = true;
        self.set_footer_state(FooterState::Loading);
        pdebug!(data_count = self.data_count, "load more triggered");
        if let Some(cb) = &self.options.on_load_more {
            cb();
        }
        true
    }

    /// Reports that the pending load finished.
    ///
    /// The footer shows the caller's message until the settle delay elapses (see
    /// [`Self::tick`]). Returns `false` if no load was pending.
    pub fn resolve_load(&mut self, success: bool, now_ms: u64) -> bool {
        if !self.is_loading {
            pwarn!(success, "resolve_load without a pending load");
            return false;
        }
        pdebug!(success, "load more resolved");
        self.is_loading = false;
        self.last_load_succeeded = Some(success);
        self.set_footer_state(FooterState::Finished);
        self.settle.start(now_ms.saturating_add(self.options.settle_delay_ms));
        true
    }

    /// Runs the post-load settle check once its delay has elapsed.
    ///
    /// Returns `true` while the check is still pending.
    pub fn tick(&mut self, host: &mut impl ScrollHost, now_ms: u64) -> bool {
        let (Some(token), Some(&due_ms)) = (self.settle.token(), self.settle.current()) else {
            return false;
        };
        if now_ms < due_ms {
            return true;
        }
        if self.settle.take_if_current(token).is_some() {
            self.after_settle(host);
        }
        self.settle.is_pending()
    }

    fn after_settle(&mut self, host: &mut impl ScrollHost) {
        let Some(footer) = self.footer_index() else {
            self.set_footer_state(FooterState::Idle);
            return;
        };
        let positions = host.visible_positions();
        self.footer_visible = positions.last == Some(footer);
        if !self.footer_visible {
            self.set_footer_state(FooterState::Idle);
        } else if positions.last_fully == Some(footer) {
            self.reveal_or_hide_footer(host);
        } else {
            self.set_footer_state(FooterState::PullToLoad);
        }
    }

    /// The footer is fully visible at rest: scroll it back out of view when the content allows
    /// it, otherwise leave it revealed for a tap.
    fn reveal_or_hide_footer(&mut self, host: &mut impl ScrollHost) {
        if host.can_scroll_up() {
            host.smooth_scroll_by(-self.footer.view_height());
            self.set_footer_state(FooterState::Idle);
        } else {
            self.set_footer_state(FooterState::FullyRevealed);
        }
    }

    fn set_footer_state(&mut self, state: FooterState) {
        if self.footer_state == state {
            return;
        }
        debug_assert!(
            !self.is_loading || state == FooterState::Loading,
            "footer must show Loading while a load is pending"
        );
        ptrace!(from = ?self.footer_state, to = ?state, "footer state");
        self.footer_state = state;
        match state {
            FooterState::Idle => self.footer.show_idle(),
            FooterState::PullToLoad => self.footer.show_pull_to_load(),
            FooterState::FullyRevealed => self.footer.show_full_to_load(),
            FooterState::ReleaseToLoad => self.footer.show_release_to_load(),
            FooterState::Loading => self.footer.show_loading(),
            FooterState::Finished => self.footer.finish_loading(),
        }
    }
}
