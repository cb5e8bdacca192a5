//! Capabilities the controllers consume from the host UI.
//!
//! None of these traits assume a particular toolkit. Hosts implement them over their own view
//! objects; tests implement them with recording fakes.

use alloc::string::String;

use crate::Token;

/// Default length of the indicator's "enter refreshing" animation.
pub const DEFAULT_AUTO_REFRESH_DURATION_MS: u64 = 200;

/// The last visible and last fully visible positions of a scroll container.
///
/// `None` means no item matches (an empty list, or a single item taller than the viewport for
/// `last_fully`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisiblePositions {
    pub last: Option<usize>,
    pub last_fully: Option<usize>,
}

impl VisiblePositions {
    pub fn new(last: usize, last_fully: usize) -> Self {
        Self {
            last: Some(last),
            last_fully: Some(last_fully),
        }
    }
}

impl From<(usize, usize)> for VisiblePositions {
    fn from((last, last_fully): (usize, usize)) -> Self {
        Self::new(last, last_fully)
    }
}

impl From<(Option<usize>, Option<usize>)> for VisiblePositions {
    fn from((last, last_fully): (Option<usize>, Option<usize>)) -> Self {
        Self { last, last_fully }
    }
}

/// The scroll container hosting the list and the refresh indicator.
///
/// Controllers never own the host: it is borrowed for the duration of each event.
pub trait ScrollHost {
    /// Whether the content can still scroll toward its start (i.e. is not at the top).
    fn can_scroll_up(&self) -> bool;

    /// Physically moves the refresh indicator by `delta` pixels.
    fn offset_indicator_top(&mut self, delta: i32);

    /// Starts a smooth scroll of the content by `dy` pixels.
    ///
    /// Only pagination uses it, to scroll a settled footer out of view. Hosts that ignore it
    /// leave the footer on screen in the `Idle` state.
    fn smooth_scroll_by(&mut self, dy: i32) {
        let _ = dy;
    }

    /// The current last visible and last fully visible positions.
    ///
    /// Read when scrolling goes idle and when the post-load settle delay elapses. Hosts without
    /// a list (a refresh-only container) return [`VisiblePositions::default`].
    fn visible_positions(&self) -> VisiblePositions;

    /// Offers `dy` to the host's own nested-scroll ancestors before the indicator consumes it.
    ///
    /// Returns how much of `dy` the ancestors consumed.
    fn dispatch_nested_pre_scroll(&mut self, dy: i32) -> i32 {
        let _ = dy;
        0
    }

    /// Reports a nested scroll to the host's ancestors.
    ///
    /// Returns how far the ancestors moved this container in the window, which is added to the
    /// unconsumed distance.
    fn dispatch_nested_scroll(&mut self, dy_consumed: i32, dy_unconsumed: i32) -> i32 {
        let _ = (dy_consumed, dy_unconsumed);
        0
    }
}

/// The visual refresh indicator (spinner).
pub trait ProgressIndicator {
    fn view_width(&self) -> i32;

    fn view_height(&self) -> i32;

    /// Called once per gesture when the finger passes the touch slop.
    fn start_dragging(&mut self) {}

    fn move_spinner(
        &mut self,
        overscroll_top: f32,
        total_drag_distance: f32,
        adjusted_percent: f32,
        tension_percent: f32,
        target_y: i32,
    );

    fn finish_spinner(&mut self, overscroll_top: f32, total_drag_distance: f32) {
        let _ = (overscroll_top, total_drag_distance);
    }

    fn start_anim_refreshing(&mut self);

    fn stop_anim_refreshing(&mut self);

    /// Plays the entry animation for a programmatic refresh.
    ///
    /// Return `Some(duration_ms)` to let the controller finish the animation on its own clock, or
    /// `None` if the indicator runs the animation itself and will report the end through
    /// [`crate::RefreshController::on_indicator_animation_end`] with `token`.
    fn auto_to_anim_refreshing(&mut self, token: Token) -> Option<u64> {
        let _ = token;
        Some(DEFAULT_AUTO_REFRESH_DURATION_MS)
    }

    /// Progress of the settle animation that follows a successful pull.
    fn release_to_anim_refreshing(&mut self, interpolated_time: f32) {
        let _ = interpolated_time;
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = visible;
    }

    /// Scale of the indicator in `[0, 1]`.
    fn set_animation_progress(&mut self, progress: f32) {
        let _ = progress;
    }
}

/// The load-more footer row.
pub trait Footer {
    fn view_width(&self) -> i32;

    fn view_height(&self) -> i32;

    /// Text kept by the caller to describe the last load (shown by `finish_loading`).
    fn message(&self) -> &str;

    fn set_message(&mut self, message: String);

    fn show_idle(&mut self);

    fn show_pull_to_load(&mut self);

    fn show_full_to_load(&mut self);

    fn show_release_to_load(&mut self);

    fn show_loading(&mut self);

    fn finish_loading(&mut self);
}
