use alloc::sync::Arc;

use crate::{Error, Result};

/// Application callback fired when a pull gesture triggers a refresh.
pub type OnRefreshCallback = Arc<dyn Fn() + Send + Sync>;

/// Application callback fired when the list asks for more data.
///
/// The callback must return immediately; the result is reported later through
/// [`crate::PaginationController::resolve_load`].
pub type OnLoadMoreCallback = Arc<dyn Fn() + Send + Sync>;

/// Default touch slop in pixels.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;
/// Default offset from the top where the indicator rests while refreshing.
pub const DEFAULT_PROGRESS_END_OFFSET: i32 = 64;
/// Default pause before the footer reacts to a resolved load.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Configuration for [`crate::RefreshController`].
///
/// Cheap to clone: the callback lives behind an `Arc`.
#[derive(Clone)]
pub struct RefreshOptions {
    /// When disabled, gestures are rejected and any drag or refresh is reset.
    pub enabled: bool,

    /// Distance the finger must travel before a drag starts.
    pub touch_slop: f32,

    /// Overscroll needed to trigger a refresh. Defaults to `end_offset`.
    pub total_drag_distance: Option<f32>,

    /// Resting top offset of the indicator. `None` hides it just above the content
    /// (`-indicator height`); `Some` marks the start as custom.
    pub start_offset: Option<i32>,

    /// Top offset the indicator settles at while refreshing.
    pub end_offset: i32,

    /// Whether the indicator scales with the drag instead of being clipped.
    pub scale: bool,

    /// Whether the content follows the indicator down while pulling.
    pub target_pull: bool,

    /// Extra gap between the indicator and the pulled content.
    pub target_pull_margin_top: i32,

    pub on_refresh: Option<OnRefreshCallback>,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            touch_slop: DEFAULT_TOUCH_SLOP,
            total_drag_distance: None,
            start_offset: None,
            end_offset: DEFAULT_PROGRESS_END_OFFSET,
            scale: false,
            target_pull: false,
            target_pull_margin_top: 0,
            on_refresh: None,
        }
    }
}

impl RefreshOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    /// Sets the overscroll needed to trigger a refresh.
    pub fn with_distance_to_trigger_sync(mut self, distance: f32) -> Self {
        self.total_drag_distance = Some(distance);
        self
    }

    /// Sets both indicator offsets; the start becomes custom.
    pub fn with_progress_view_offsets(mut self, scale: bool, start: i32, end: i32) -> Self {
        self.scale = scale;
        self.start_offset = Some(start);
        self.end_offset = end;
        self
    }

    pub fn with_progress_view_end_target(mut self, scale: bool, end: i32) -> Self {
        self.scale = scale;
        self.end_offset = end;
        self
    }

    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_target_pull(mut self, target_pull: bool, margin_top: i32) -> Self {
        self.target_pull = target_pull;
        self.target_pull_margin_top = margin_top;
        self
    }

    pub fn with_on_refresh(
        mut self,
        on_refresh: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_refresh = on_refresh.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn resolved_total_drag_distance(&self) -> f32 {
        self.total_drag_distance.unwrap_or(self.end_offset as f32)
    }

    /// Checks that the geometry can drive the slingshot formula.
    pub(crate) fn validate(&self, indicator_height: i32) -> Result<()> {
        let total = self.resolved_total_drag_distance();
        if total.is_nan() || total <= 0.0 {
            return Err(Error::InvalidTriggerDistance(total));
        }
        let (start, valid) = match self.start_offset {
            Some(start) => (
                start,
                crate::physics::custom_slingshot(start, self.end_offset).is_some(),
            ),
            None => (indicator_height.saturating_neg(), self.end_offset > 0),
        };
        if !valid {
            return Err(Error::InvalidSlingshot {
                start,
                end: self.end_offset,
            });
        }
        Ok(())
    }
}

impl core::fmt::Debug for RefreshOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RefreshOptions")
            .field("enabled", &self.enabled)
            .field("touch_slop", &self.touch_slop)
            .field("total_drag_distance", &self.total_drag_distance)
            .field("start_offset", &self.start_offset)
            .field("end_offset", &self.end_offset)
            .field("scale", &self.scale)
            .field("target_pull", &self.target_pull)
            .field("target_pull_margin_top", &self.target_pull_margin_top)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::PaginationController`].
#[derive(Clone)]
pub struct PaginationOptions {
    /// When disabled, no footer row exists and no load is ever triggered.
    pub load_more_enabled: bool,

    /// Trigger as soon as the footer scrolls into view, instead of waiting for a release.
    ///
    /// This is the mode a fresh data set starts in. The controller downgrades to manual mode the
    /// first time the footer is scrolled out of view.
    pub auto_load_more: bool,

    /// Pause between resolving a load and re-evaluating the footer position.
    pub settle_delay_ms: u64,

    pub on_load_more: Option<OnLoadMoreCallback>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            load_more_enabled: true,
            auto_load_more: true,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            on_load_more: None,
        }
    }
}

impl PaginationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_load_more_enabled(mut self, enabled: bool) -> Self {
        self.load_more_enabled = enabled;
        self
    }

    pub fn with_auto_load_more(mut self, auto: bool) -> Self {
        self.auto_load_more = auto;
        self
    }

    pub fn with_settle_delay_ms(mut self, delay_ms: u64) -> Self {
        self.settle_delay_ms = delay_ms;
        self
    }

    pub fn with_on_load_more(
        mut self,
        on_load_more: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_load_more = on_load_more.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for PaginationOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PaginationOptions")
            .field("load_more_enabled", &self.load_more_enabled)
            .field("auto_load_more", &self.auto_load_more)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .finish_non_exhaustive()
    }
}
