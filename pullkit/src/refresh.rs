use crate::interpolator::Timing;
use crate::physics::{SlingshotGeometry, custom_slingshot, lerp_offset, overscroll_for};
use crate::{
    Error, Interpolator, PointerId, ProgressIndicator, RefreshOptions, RefreshSnapshot,
    RefreshState, Result, Schedule, ScrollHost, Token,
};

/// Duration of the scale-down animations.
pub const SCALE_DOWN_DURATION_MS: u64 = 150;
/// Duration of the settle animation after a pull crossed the trigger distance.
pub const ANIMATE_TO_TRIGGER_DURATION_MS: u64 = 200;
/// Duration of the return animation after a pull was released early.
pub const ANIMATE_TO_START_DURATION_MS: u64 = 200;

/// Per-gesture touch tracking.
///
/// Created on touch-down and cleared on touch-up, cancel, or reset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragSession {
    active_pointer: Option<PointerId>,
    initial_down_y: f32,
    initial_motion_y: f32,
    is_being_dragged: bool,
}

impl DragSession {
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    pub fn initial_down_y(&self) -> f32 {
        self.initial_down_y
    }

    /// The touch-slop-adjusted origin of the drag. Only meaningful once dragging.
    pub fn initial_motion_y(&self) -> f32 {
        self.initial_motion_y
    }

    pub fn is_being_dragged(&self) -> bool {
        self.is_being_dragged
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum AnimationKind {
    /// Settle at the refreshing offset after a successful pull.
    ToRefreshingPosition { from: i32 },
    /// Slide back to the start offset after an early release.
    ToStart { from: i32 },
    /// Slide back while shrinking (scale mode).
    ScaleDownToStart { from: i32, starting_scale: f32 },
    /// Shrink in place.
    ScaleDown,
    /// Indicator entry animation for a programmatic refresh.
    AutoRefresh,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Animation {
    kind: AnimationKind,
    /// `None` while the indicator drives the animation itself.
    timing: Option<Timing>,
}

/// The pull-to-refresh state machine.
///
/// This type owns the indicator but only borrows the scroll host: every event that needs to move
/// the indicator takes `&mut impl ScrollHost`. Time is explicit (`now_ms`); adapters call
/// [`RefreshController::tick`] each frame while [`RefreshController::is_animating`] is `true`.
#[derive(Clone, Debug)]
pub struct RefreshController<P> {
    options: RefreshOptions,
    indicator: P,
    geometry: SlingshotGeometry,
    state: RefreshState,
    refreshing: bool,
    notify: bool,
    attached: bool,
    session: DragSession,
    offset_top: i32,
    scale_progress: f32,
    total_unconsumed: f32,
    nested_scroll_in_progress: bool,
    animation: Schedule<Animation>,
}

impl<P: ProgressIndicator> RefreshController<P> {
    /// Creates a controller with the indicator parked at its start offset.
    ///
    /// Fails if the configured geometry cannot drive the slingshot formula.
    pub fn new(options: RefreshOptions, indicator: P) -> Result<Self> {
        let indicator_height = indicator.view_height();
        options.validate(indicator_height)?;
        let geometry = SlingshotGeometry {
            total_drag_distance: options.resolved_total_drag_distance(),
            start_offset: options
                .start_offset
                .unwrap_or(indicator_height.saturating_neg()),
            end_offset: options.end_offset,
            using_custom_start: options.start_offset.is_some(),
        };
        pdebug!(
            total_drag_distance = geometry.total_drag_distance,
            start_offset = geometry.start_offset,
            end_offset = geometry.end_offset,
            "RefreshController::new"
        );
        Ok(Self {
            offset_top: geometry.start_offset,
            options,
            indicator,
            geometry,
            state: RefreshState::Idle,
            refreshing: false,
            notify: false,
            attached: true,
            session: DragSession::default(),
            scale_progress: 1.0,
            total_unconsumed: 0.0,
            nested_scroll_in_progress: false,
            animation: Schedule::new(),
        })
    }

    pub fn options(&self) -> &RefreshOptions {
        &self.options
    }

    pub fn geometry(&self) -> SlingshotGeometry {
        self.geometry
    }

    pub fn indicator(&self) -> &P {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut P {
        &mut self.indicator
    }

    pub fn into_indicator(self) -> P {
        self.indicator
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The indicator's live top offset. Hosts read this during layout.
    pub fn offset_top(&self) -> i32 {
        self.offset_top
    }

    /// Current indicator scale in `[0, 1]`.
    pub fn scale_progress(&self) -> f32 {
        self.scale_progress
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_nested_scroll_in_progress(&self) -> bool {
        self.nested_scroll_in_progress
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_pending()
    }

    /// Token of the pending animation, if any.
    pub fn animation_token(&self) -> Option<Token> {
        self.animation.token()
    }

    /// Top of the content for target-pull layouts.
    ///
    /// With target pull enabled the content sits just below the indicator (never above 0);
    /// otherwise it stays at 0.
    pub fn content_offset(&self) -> i32 {
        if !self.options.target_pull {
            return 0;
        }
        let top = self
            .offset_top
            .saturating_add(self.indicator.view_height())
            .saturating_add(self.options.target_pull_margin_top);
        top.max(0)
    }

    pub fn snapshot(&self) -> RefreshSnapshot {
        RefreshSnapshot {
            state: self.state,
            offset_top: self.offset_top,
            enabled: self.options.enabled,
            is_being_dragged: self.session.is_being_dragged,
            unconsumed: self.total_unconsumed,
        }
    }

    pub fn set_on_refresh(&mut self, on_refresh: Option<impl Fn() + Send + Sync + 'static>) {
        self.options.on_refresh = on_refresh.map(|f| alloc::sync::Arc::new(f) as _);
    }

    /// Sets the overscroll needed to trigger a refresh.
    pub fn set_distance_to_trigger_sync(&mut self, distance: f32) -> Result<()> {
        if distance.is_nan() || distance <= 0.0 {
            return Err(Error::InvalidTriggerDistance(distance));
        }
        self.options.total_drag_distance = Some(distance);
        self.geometry.total_drag_distance = distance;
        Ok(())
    }

    /// Sets both indicator offsets. The start becomes custom and the controller is reset.
    pub fn set_progress_view_offsets(
        &mut self,
        host: &mut impl ScrollHost,
        scale: bool,
        start: i32,
        end: i32,
    ) -> Result<()> {
        if custom_slingshot(start, end).is_none() {
            return Err(Error::InvalidSlingshot { start, end });
        }
        self.options.scale = scale;
        self.options.start_offset = Some(start);
        self.options.end_offset = end;
        self.geometry.start_offset = start;
        self.geometry.end_offset = end;
        self.geometry.using_custom_start = true;
        self.reset(host);
        Ok(())
    }

    /// Moves only the refreshing offset.
    pub fn set_progress_view_end_target(&mut self, scale: bool, end: i32) -> Result<()> {
        let valid = if self.geometry.using_custom_start {
            custom_slingshot(self.geometry.start_offset, end).is_some()
        } else {
            end > 0
        };
        if !valid {
            return Err(Error::InvalidSlingshot {
                start: self.geometry.start_offset,
                end,
            });
        }
        self.options.scale = scale;
        self.options.end_offset = end;
        self.geometry.end_offset = end;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: bool) {
        self.options.scale = scale;
    }

    pub fn set_target_pull(&mut self, target_pull: bool, margin_top: i32) {
        self.options.target_pull = target_pull;
        self.options.target_pull_margin_top = margin_top;
    }

    /// Enables or disables the gesture. Disabling resets any drag or refresh immediately.
    pub fn set_enabled(&mut self, host: &mut impl ScrollHost, enabled: bool) {
        self.options.enabled = enabled;
        if !enabled {
            self.reset(host);
        }
    }

    pub fn on_attached(&mut self) {
        self.attached = true;
    }

    /// Resets everything and stops accepting gestures until [`Self::on_attached`].
    pub fn on_detached(&mut self, host: &mut impl ScrollHost) {
        self.reset(host);
        self.nested_scroll_in_progress = false;
        self.attached = false;
    }

    /// Starts or stops a refresh on behalf of the application.
    ///
    /// Starting jumps the indicator to its refreshing offset and plays the indicator's entry
    /// animation without notifying the refresh callback. Stopping always goes through the
    /// scale-down path. Repeating the current value is a no-op.
    pub fn set_refreshing(&mut self, host: &mut impl ScrollHost, refreshing: bool, now_ms: u64) {
        if !refreshing || self.refreshing {
            self.set_refreshing_with_notify(refreshing, false, now_ms);
            return;
        }

        pdebug!("programmatic refresh");
        self.refreshing = true;
        self.state = RefreshState::Refreshing;
        self.session = DragSession::default();
        let end_target = self.geometry.auto_refresh_target();
        self.move_indicator_to(host, end_target);
        self.notify = false;
        self.indicator.set_visible(true);

        let token = self.animation.start(Animation {
            kind: AnimationKind::AutoRefresh,
            timing: None,
        });
        let Some(duration_ms) = self.indicator.auto_to_anim_refreshing(token) else {
            return;
        };
        if let Some(animation) = self.animation.current_mut() {
            animation.timing = Some(Timing::new(now_ms, duration_ms, Interpolator::Linear));
        }
    }

    fn accepts_gesture(&self, host: &impl ScrollHost) -> bool {
        self.attached
            && self.options.enabled
            && !self.refreshing
            && !self.nested_scroll_in_progress
            && !host.can_scroll_up()
    }

    /// Begins tracking a touch sequence.
    ///
    /// Returns `false` when the gesture is rejected (disabled, detached, refreshing, nested
    /// scrolling, or the content is not at its top). An accepted touch cancels a pending
    /// return-to-start animation.
    pub fn on_touch_down(
        &mut self,
        host: &mut impl ScrollHost,
        pointer: PointerId,
        y: f32,
    ) -> bool {
        if !self.accepts_gesture(host) {
            ptrace!(?pointer, "touch down rejected");
            return false;
        }
        if self.state == RefreshState::Returning {
            ptrace!("touch down cancels return to start");
            self.animation.cancel();
            self.state = RefreshState::Idle;
        }

        let start = self.geometry.start_offset;
        self.move_indicator_to(host, start);
        self.session = DragSession {
            active_pointer: Some(pointer),
            initial_down_y: y,
            initial_motion_y: y,
            is_being_dragged: false,
        };
        true
    }

    /// Feeds a move of `pointer` to `y`.
    ///
    /// Returns whether the controller is dragging (i.e. intercepts the gesture). Moves of an
    /// untracked pointer are ignored.
    pub fn on_touch_move(
        &mut self,
        host: &mut impl ScrollHost,
        pointer: PointerId,
        y: f32,
    ) -> bool {
        if !self.accepts_gesture(host) {
            return false;
        }
        if self.session.active_pointer != Some(pointer) {
            pwarn!(?pointer, "touch move without a matching active pointer");
            return false;
        }

        self.start_dragging(y);
        if !self.session.is_being_dragged {
            return false;
        }
        let overscroll_top = overscroll_for(y, self.session.initial_motion_y);
        if overscroll_top > 0.0 {
            self.move_spinner(host, overscroll_top);
        }
        true
    }

    /// A secondary pointer went down; it becomes the tracked pointer.
    pub fn on_pointer_down(&mut self, pointer: PointerId) {
        if self.session.active_pointer.is_some() {
            self.session.active_pointer = Some(pointer);
        }
    }

    /// A non-final pointer went up. If it was the tracked one, `remaining` takes over.
    ///
    /// With no pointer left to take over the gesture ends like a cancel: a pulled indicator
    /// returns to start without triggering.
    pub fn on_pointer_up(&mut self, lifted: PointerId, remaining: Option<PointerId>, now_ms: u64) {
        if self.session.active_pointer != Some(lifted) {
            return;
        }
        match remaining {
            Some(next) => self.session.active_pointer = Some(next),
            None => self.on_touch_cancel(now_ms),
        }
    }

    /// Finishes the gesture.
    ///
    /// Returns `true` if a drag was in progress and has been finished (triggering a refresh or
    /// a return to start).
    pub fn on_touch_up(
        &mut self,
        host: &mut impl ScrollHost,
        pointer: PointerId,
        y: f32,
        now_ms: u64,
    ) -> bool {
        if self.session.active_pointer != Some(pointer) {
            pwarn!(?pointer, "touch up without a matching active pointer");
            return false;
        }
        let session = core::mem::take(&mut self.session);
        if !session.is_being_dragged || self.refreshing {
            return false;
        }
        let overscroll_top = overscroll_for(y, session.initial_motion_y);
        self.finish_spinner(overscroll_top, now_ms);
        true
    }

    /// The touch sequence was cancelled by the host. A pulled indicator returns to start
    /// without triggering.
    pub fn on_touch_cancel(&mut self, now_ms: u64) {
        let session = core::mem::take(&mut self.session);
        if session.is_being_dragged && self.state == RefreshState::Dragging {
            self.animate_offset_to_start(now_ms);
        }
    }

    /// Whether to take part in a nested scroll started by a descendant.
    pub fn on_start_nested_scroll(&self, vertical: bool) -> bool {
        self.attached
            && self.options.enabled
            && self.state != RefreshState::Returning
            && !self.refreshing
            && vertical
    }

    pub fn on_nested_scroll_accepted(&mut self) {
        self.total_unconsumed = 0.0;
        self.nested_scroll_in_progress = true;
    }

    /// Offers a scroll of `dy` before the child consumes it.
    ///
    /// While the indicator is pulled, scrolling back toward the content (`dy > 0`) pushes the
    /// indicator back up first. Whatever is left is offered to the host's ancestors. Returns the
    /// amount consumed.
    pub fn on_nested_pre_scroll(&mut self, host: &mut impl ScrollHost, dy: i32) -> i32 {
        let mut consumed = 0;
        if dy > 0 && self.total_unconsumed > 0.0 {
            if dy as f32 > self.total_unconsumed {
                consumed = dy - self.total_unconsumed as i32;
                self.total_unconsumed = 0.0;
            } else {
                self.total_unconsumed -= dy as f32;
                consumed = dy;
            }
            self.move_spinner(host, self.total_unconsumed);
            if self.total_unconsumed == 0.0 && self.state == RefreshState::Dragging {
                self.state = RefreshState::Idle;
            }
        }

        // A custom start sits over the content; keep it hidden once the pull is fully undone.
        if self.geometry.using_custom_start
            && dy > 0
            && self.total_unconsumed == 0.0
            && dy - consumed != 0
        {
            self.indicator.set_visible(false);
        }

        consumed.saturating_add(host.dispatch_nested_pre_scroll(dy - consumed))
    }

    /// Reports the part of a nested scroll the child could not consume.
    pub fn on_nested_scroll(
        &mut self,
        host: &mut impl ScrollHost,
        dy_consumed: i32,
        dy_unconsumed: i32,
    ) {
        if !self.nested_scroll_in_progress {
            return;
        }
        let offset_in_window = host.dispatch_nested_scroll(dy_consumed, dy_unconsumed);
        let dy = dy_unconsumed.saturating_add(offset_in_window);
        if dy < 0 && !host.can_scroll_up() {
            self.total_unconsumed += dy.unsigned_abs() as f32;
            self.move_spinner(host, self.total_unconsumed);
        }
    }

    pub fn on_stop_nested_scroll(&mut self, now_ms: u64) {
        self.nested_scroll_in_progress = false;
        if self.total_unconsumed > 0.0 {
            let overscroll_top = self.total_unconsumed;
            self.total_unconsumed = 0.0;
            self.finish_spinner(overscroll_top, now_ms);
        } else if self.state == RefreshState::Dragging {
            self.state = RefreshState::Idle;
        }
    }

    /// Advances the pending animation.
    ///
    /// Returns `true` while an animation is still pending.
    pub fn tick(&mut self, host: &mut impl ScrollHost, now_ms: u64) -> bool {
        let (Some(token), Some(animation)) = (self.animation.token(), self.animation.current())
        else {
            return false;
        };
        let animation = *animation;
        let Some(timing) = animation.timing else {
            return true;
        };

        self.apply_frame(host, animation.kind, timing.sample(now_ms));
        if timing.is_done(now_ms) && self.animation.take_if_current(token).is_some() {
            self.on_animation_end(host, animation.kind, now_ms);
        }
        self.animation.is_pending()
    }

    /// Completes an animation the indicator ran on its own clock.
    ///
    /// Stale tokens (from animations that were cancelled or replaced) are ignored.
    pub fn on_indicator_animation_end(
        &mut self,
        host: &mut impl ScrollHost,
        token: Token,
        now_ms: u64,
    ) -> bool {
        let Some(animation) = self.animation.take_if_current(token) else {
            ptrace!(?token, "stale indicator animation end");
            return false;
        };
        self.on_animation_end(host, animation.kind, now_ms);
        true
    }

    fn start_dragging(&mut self, y: f32) {
        let y_diff = y - self.session.initial_down_y;
        if y_diff > self.options.touch_slop && !self.session.is_being_dragged {
            self.session.initial_motion_y = self.session.initial_down_y + self.options.touch_slop;
            self.session.is_being_dragged = true;
            self.indicator.start_dragging();
            ptrace!(y, "drag started");
        }
    }

    fn move_spinner(&mut self, host: &mut impl ScrollHost, overscroll_top: f32) {
        let motion = self.geometry.motion(overscroll_top);
        self.indicator.set_visible(true);
        if self.options.scale {
            self.set_animation_progress((overscroll_top / motion.total_drag_distance).min(1.0));
        } else {
            self.set_animation_progress(1.0);
        }
        self.indicator.move_spinner(
            motion.overscroll_top,
            motion.total_drag_distance,
            motion.adjusted_percent,
            motion.tension_percent,
            motion.target_y,
        );
        self.move_indicator_to(host, motion.target_y);
        if !self.refreshing {
            self.state = RefreshState::Dragging;
        }
    }

    fn finish_spinner(&mut self, overscroll_top: f32, now_ms: u64) {
        let total = self.geometry.total_drag_distance;
        if overscroll_top > total {
            self.set_refreshing_with_notify(true, true, now_ms);
        } else {
            self.refreshing = false;
            self.animate_offset_to_start(now_ms);
        }
        self.indicator.finish_spinner(overscroll_top, total);
    }

    fn set_refreshing_with_notify(&mut self, refreshing: bool, notify: bool, now_ms: u64) {
        if self.refreshing == refreshing {
            return;
        }
        self.notify = notify;
        self.refreshing = refreshing;
        if refreshing {
            ptrace!(notify, "refresh started");
            self.state = RefreshState::Refreshing;
            self.animation.start(Animation {
                kind: AnimationKind::ToRefreshingPosition {
                    from: self.offset_top,
                },
                timing: Some(Timing::new(
                    now_ms,
                    ANIMATE_TO_TRIGGER_DURATION_MS,
                    Interpolator::DECELERATE,
                )),
            });
        } else {
            ptrace!("refresh stopped");
            self.state = RefreshState::Returning;
            self.start_scale_down(now_ms);
        }
    }

    fn animate_offset_to_start(&mut self, now_ms: u64) {
        self.state = RefreshState::Returning;
        let from = self.offset_top;
        let animation = if self.options.scale {
            Animation {
                kind: AnimationKind::ScaleDownToStart {
                    from,
                    starting_scale: self.scale_progress,
                },
                timing: Some(Timing::new(
                    now_ms,
                    SCALE_DOWN_DURATION_MS,
                    Interpolator::SmoothStep,
                )),
            }
        } else {
            Animation {
                kind: AnimationKind::ToStart { from },
                timing: Some(Timing::new(
                    now_ms,
                    ANIMATE_TO_START_DURATION_MS,
                    Interpolator::DECELERATE,
                )),
            }
        };
        self.animation.start(animation);
    }

    fn start_scale_down(&mut self, now_ms: u64) {
        self.animation.start(Animation {
            kind: AnimationKind::ScaleDown,
            timing: Some(Timing::new(
                now_ms,
                SCALE_DOWN_DURATION_MS,
                Interpolator::SmoothStep,
            )),
        });
    }

    fn apply_frame(&mut self, host: &mut impl ScrollHost, kind: AnimationKind, t: f32) {
        match kind {
            AnimationKind::ToRefreshingPosition { from } => {
                let target = lerp_offset(from, self.geometry.refreshing_target(), t);
                self.move_indicator_to(host, target);
                self.indicator.release_to_anim_refreshing(t);
            }
            AnimationKind::ToStart { from } => self.move_to_start(host, from, t),
            AnimationKind::ScaleDownToStart {
                from,
                starting_scale,
            } => {
                self.set_animation_progress(starting_scale - starting_scale * t);
                self.move_to_start(host, from, t);
            }
            AnimationKind::ScaleDown => self.set_animation_progress(1.0 - t),
            AnimationKind::AutoRefresh => {}
        }
    }

    fn on_animation_end(&mut self, host: &mut impl ScrollHost, kind: AnimationKind, now_ms: u64) {
        match kind {
            AnimationKind::ToStart { .. } if !self.options.scale => self.start_scale_down(now_ms),
            AnimationKind::ToStart { .. } | AnimationKind::ScaleDownToStart { .. } => {
                self.reset(host);
            }
            AnimationKind::ToRefreshingPosition { .. }
            | AnimationKind::ScaleDown
            | AnimationKind::AutoRefresh => self.on_refresh_animation_end(host),
        }
    }

    fn on_refresh_animation_end(&mut self, host: &mut impl ScrollHost) {
        if !self.refreshing {
            self.reset(host);
            return;
        }
        self.indicator.start_anim_refreshing();
        if core::mem::take(&mut self.notify) {
            pdebug!("refresh triggered");
            if let Some(cb) = &self.options.on_refresh {
                cb();
            }
        }
    }

    fn move_to_start(&mut self, host: &mut impl ScrollHost, from: i32, t: f32) {
        let target = lerp_offset(from, self.geometry.start_offset, t);
        self.move_indicator_to(host, target);
    }

    fn set_animation_progress(&mut self, progress: f32) {
        self.scale_progress = progress;
        self.indicator.set_animation_progress(progress);
    }

    fn move_indicator_to(&mut self, host: &mut impl ScrollHost, target: i32) {
        let delta = target.saturating_sub(self.offset_top);
        if delta == 0 {
            return;
        }
        host.offset_indicator_top(delta);
        self.offset_top = self.offset_top.saturating_add(delta);
    }

    /// Returns to the idle state: cancels animations, hides the indicator, and parks it at the
    /// start offset.
    fn reset(&mut self, host: &mut impl ScrollHost) {
        self.animation.cancel();
        self.indicator.stop_anim_refreshing();
        self.indicator.set_visible(false);
        if self.options.scale {
            self.set_animation_progress(0.0);
        }
        let start = self.geometry.start_offset;
        self.move_indicator_to(host, start);
        self.refreshing = false;
        self.notify = false;
        self.session = DragSession::default();
        self.total_unconsumed = 0.0;
        if self.state != RefreshState::Idle {
            ptrace!(from = ?self.state, "reset to idle");
        }
        self.state = RefreshState::Idle;
    }
}
