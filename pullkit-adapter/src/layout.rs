use alloc::sync::Arc;

use pullkit::{
    Error, PointerId, ProgressIndicator, Rect, RefreshController, RefreshOptions, RefreshState,
    Result, ScrollHost, Token, VisiblePositions,
};

/// Replaces the host's answer to "can the content still scroll up?".
///
/// Useful when the scrollable child is not the direct content of the container.
pub type CanChildScrollUpCallback = Arc<dyn Fn() -> bool + Send + Sync>;

/// Where the indicator and the content should be placed for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefreshFrame {
    pub indicator: Rect,
    pub content: Rect,
}

/// A refresh-capable container: owns the scroll host and a [`RefreshController`].
///
/// Events are forwarded to the controller with the host borrowed for the call. Hosts read
/// [`RefreshLayout::layout`] after each event (or each `tick`) to position their views.
#[derive(Clone)]
pub struct RefreshLayout<P, H> {
    controller: RefreshController<P>,
    host: H,
    can_child_scroll_up: Option<CanChildScrollUpCallback>,
}

/// The host as seen by the controller, with the child-scroll-up override applied.
struct HostView<'a, H> {
    host: &'a mut H,
    can_child_scroll_up: Option<&'a CanChildScrollUpCallback>,
}

impl<H: ScrollHost> ScrollHost for HostView<'_, H> {
    fn can_scroll_up(&self) -> bool {
        match self.can_child_scroll_up {
            Some(cb) => cb(),
            None => self.host.can_scroll_up(),
        }
    }

    fn offset_indicator_top(&mut self, delta: i32) {
        self.host.offset_indicator_top(delta);
    }

    fn smooth_scroll_by(&mut self, dy: i32) {
        self.host.smooth_scroll_by(dy);
    }

    fn visible_positions(&self) -> VisiblePositions {
        self.host.visible_positions()
    }

    fn dispatch_nested_pre_scroll(&mut self, dy: i32) -> i32 {
        self.host.dispatch_nested_pre_scroll(dy)
    }

    fn dispatch_nested_scroll(&mut self, dy_consumed: i32, dy_unconsumed: i32) -> i32 {
        self.host.dispatch_nested_scroll(dy_consumed, dy_unconsumed)
    }
}

impl<P: ProgressIndicator, H: ScrollHost> RefreshLayout<P, H> {
    pub fn new(options: RefreshOptions, indicator: P, host: H) -> Result<Self> {
        Ok(Self {
            controller: RefreshController::new(options, indicator)?,
            host,
            can_child_scroll_up: None,
        })
    }

    pub fn builder() -> RefreshLayoutBuilder<P, H> {
        RefreshLayoutBuilder::default()
    }

    pub fn controller(&self) -> &RefreshController<P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RefreshController<P> {
        &mut self.controller
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_parts(self) -> (RefreshController<P>, H) {
        (self.controller, self.host)
    }

    pub fn state(&self) -> RefreshState {
        self.controller.state()
    }

    pub fn is_refreshing(&self) -> bool {
        self.controller.is_refreshing()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    pub fn set_can_child_scroll_up(
        &mut self,
        cb: Option<impl Fn() -> bool + Send + Sync + 'static>,
    ) {
        self.can_child_scroll_up = cb.map(|f| Arc::new(f) as _);
    }

    /// Whether the content can scroll up, honoring the override.
    pub fn can_child_scroll_up(&self) -> bool {
        match &self.can_child_scroll_up {
            Some(cb) => cb(),
            None => self.host.can_scroll_up(),
        }
    }

    fn split(&mut self) -> (&mut RefreshController<P>, HostView<'_, H>) {
        let view = HostView {
            host: &mut self.host,
            can_child_scroll_up: self.can_child_scroll_up.as_ref(),
        };
        (&mut self.controller, view)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        let (c, mut host) = self.split();
        c.set_enabled(&mut host, enabled);
    }

    pub fn set_refreshing(&mut self, refreshing: bool, now_ms: u64) {
        let (c, mut host) = self.split();
        c.set_refreshing(&mut host, refreshing, now_ms);
    }

    pub fn set_progress_view_offsets(&mut self, scale: bool, start: i32, end: i32) -> Result<()> {
        let (c, mut host) = self.split();
        c.set_progress_view_offsets(&mut host, scale, start, end)
    }

    pub fn on_attached(&mut self) {
        self.controller.on_attached();
    }

    pub fn on_detached(&mut self) {
        let (c, mut host) = self.split();
        c.on_detached(&mut host);
    }

    pub fn on_touch_down(&mut self, pointer: PointerId, y: f32) -> bool {
        let (c, mut host) = self.split();
        c.on_touch_down(&mut host, pointer, y)
    }

    pub fn on_touch_move(&mut self, pointer: PointerId, y: f32) -> bool {
        let (c, mut host) = self.split();
        c.on_touch_move(&mut host, pointer, y)
    }

    pub fn on_pointer_down(&mut self, pointer: PointerId) {
        self.controller.on_pointer_down(pointer);
    }

    pub fn on_pointer_up(&mut self, lifted: PointerId, remaining: Option<PointerId>, now_ms: u64) {
        self.controller.on_pointer_up(lifted, remaining, now_ms);
    }

    pub fn on_touch_up(&mut self, pointer: PointerId, y: f32, now_ms: u64) -> bool {
        let (c, mut host) = self.split();
        c.on_touch_up(&mut host, pointer, y, now_ms)
    }

    pub fn on_touch_cancel(&mut self, now_ms: u64) {
        self.controller.on_touch_cancel(now_ms);
    }

    pub fn on_start_nested_scroll(&self, vertical: bool) -> bool {
        self.controller.on_start_nested_scroll(vertical)
    }

    pub fn on_nested_scroll_accepted(&mut self) {
        self.controller.on_nested_scroll_accepted();
    }

    pub fn on_nested_pre_scroll(&mut self, dy: i32) -> i32 {
        let (c, mut host) = self.split();
        c.on_nested_pre_scroll(&mut host, dy)
    }

    pub fn on_nested_scroll(&mut self, dy_consumed: i32, dy_unconsumed: i32) {
        let (c, mut host) = self.split();
        c.on_nested_scroll(&mut host, dy_consumed, dy_unconsumed);
    }

    pub fn on_stop_nested_scroll(&mut self, now_ms: u64) {
        self.controller.on_stop_nested_scroll(now_ms);
    }

    pub fn on_indicator_animation_end(&mut self, token: Token, now_ms: u64) -> bool {
        let (c, mut host) = self.split();
        c.on_indicator_animation_end(&mut host, token, now_ms)
    }

    /// Advances animations. Returns `true` while another frame is needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let (c, mut host) = self.split();
        c.tick(&mut host, now_ms)
    }

    /// Computes the frame for a container of `width` x `height`.
    ///
    /// The indicator is centred horizontally at the live offset; the content fills the container,
    /// pushed down below the indicator when target pull is on.
    pub fn layout(&self, width: i32, height: i32) -> RefreshFrame {
        let indicator = self.controller.indicator();
        let indicator_width = indicator.view_width();
        RefreshFrame {
            indicator: Rect {
                x: (width - indicator_width) / 2,
                y: self.controller.offset_top(),
                width: indicator_width,
                height: indicator.view_height(),
            },
            content: Rect {
                x: 0,
                y: self.controller.content_offset(),
                width,
                height,
            },
        }
    }
}

impl<P, H> core::fmt::Debug for RefreshLayout<P, H>
where
    P: core::fmt::Debug,
    H: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RefreshLayout")
            .field("controller", &self.controller)
            .field("host", &self.host)
            .field("can_child_scroll_up", &self.can_child_scroll_up.is_some())
            .finish()
    }
}

/// Assembles a [`RefreshLayout`] from its collaborators.
pub struct RefreshLayoutBuilder<P, H> {
    options: RefreshOptions,
    indicator: Option<P>,
    host: Option<H>,
    can_child_scroll_up: Option<CanChildScrollUpCallback>,
}

impl<P, H> Default for RefreshLayoutBuilder<P, H> {
    fn default() -> Self {
        Self {
            options: RefreshOptions::default(),
            indicator: None,
            host: None,
            can_child_scroll_up: None,
        }
    }
}

impl<P: ProgressIndicator, H: ScrollHost> RefreshLayoutBuilder<P, H> {
    pub fn options(mut self, options: RefreshOptions) -> Self {
        self.options = options;
        self
    }

    pub fn indicator(mut self, indicator: P) -> Self {
        self.indicator = Some(indicator);
        self
    }

    pub fn host(mut self, host: H) -> Self {
        self.host = Some(host);
        self
    }

    pub fn can_child_scroll_up(mut self, cb: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.can_child_scroll_up = Some(Arc::new(cb));
        self
    }

    /// Fails with [`Error::MissingCollaborator`] if the indicator or host was not supplied.
    pub fn build(self) -> Result<RefreshLayout<P, H>> {
        let indicator = self
            .indicator
            .ok_or(Error::MissingCollaborator("progress indicator"))?;
        let host = self.host.ok_or(Error::MissingCollaborator("scroll host"))?;
        let mut layout = RefreshLayout::new(self.options, indicator, host)?;
        layout.can_child_scroll_up = self.can_child_scroll_up;
        Ok(layout)
    }
}
