//! Drag physics for the refresh indicator.
//!
//! The indicator follows the finger linearly until the trigger distance is reached, then keeps
//! moving with increasing resistance ("slingshot" tension) so it never runs away from the
//! content.

/// Damping applied to raw finger motion: the indicator moves at half the finger's speed.
pub const DRAG_RATE: f32 = 0.5;

/// Fraction of the trigger distance after which the indicator's arrow starts to grow.
const ADJUSTED_PERCENT_FLOOR: f32 = 0.4;

/// Geometry the slingshot formula depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlingshotGeometry {
    /// Overscroll needed to trigger a refresh.
    pub total_drag_distance: f32,
    /// Resting (hidden) top offset of the indicator.
    pub start_offset: i32,
    /// Top offset the indicator settles at while refreshing.
    pub end_offset: i32,
    /// Whether `start_offset` was configured by the caller rather than derived from the
    /// indicator height.
    pub using_custom_start: bool,
}

impl SlingshotGeometry {
    /// The offset range over which drag tension is computed.
    pub fn slingshot_distance(&self) -> f32 {
        if self.using_custom_start {
            self.end_offset as f32 - self.start_offset as f32
        } else {
            self.end_offset as f32
        }
    }

    /// Where the indicator comes to rest when a gesture-driven refresh starts.
    pub fn refreshing_target(&self) -> i32 {
        if self.using_custom_start {
            self.end_offset
        } else {
            self.end_offset.saturating_sub(self.start_offset.saturating_abs())
        }
    }

    /// Where the indicator jumps to when a refresh is started programmatically.
    pub fn auto_refresh_target(&self) -> i32 {
        if self.using_custom_start {
            self.end_offset
        } else {
            self.end_offset.saturating_add(self.start_offset)
        }
    }

    /// Computes the indicator motion for a given overscroll.
    pub fn motion(&self, overscroll_top: f32) -> SpinnerMotion {
        let total = self.total_drag_distance;
        let distance = abs(overscroll_top);

        let drag_percent = (distance / total).min(1.0);
        let adjusted_percent = (drag_percent - ADJUSTED_PERCENT_FLOOR).max(0.0) * 5.0 / 3.0;

        let slingshot = self.slingshot_distance();
        let extra_overshoot = distance - total;
        let tension_slingshot_percent = (extra_overshoot.min(slingshot * 2.0) / slingshot).max(0.0);
        let quarter = tension_slingshot_percent / 4.0;
        let tension_percent = (quarter - quarter * quarter) * 2.0;
        let extra_move = slingshot * tension_percent * 2.0;

        let target_y = offset_by(self.start_offset, slingshot * drag_percent + extra_move);

        SpinnerMotion {
            overscroll_top,
            total_drag_distance: total,
            drag_percent,
            adjusted_percent,
            tension_percent,
            target_y,
        }
    }
}

/// The result of feeding one overscroll value through the slingshot formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinnerMotion {
    pub overscroll_top: f32,
    pub total_drag_distance: f32,
    /// `min(1, |overscroll| / total)`.
    pub drag_percent: f32,
    /// Arrow growth, `0` until 40% of the trigger distance and `1` at the trigger point.
    pub adjusted_percent: f32,
    /// Tension past the trigger point, in `[0, 0.5]`.
    pub tension_percent: f32,
    /// Top offset the indicator should be moved to.
    pub target_y: i32,
}

/// The slingshot distance for a custom `start..end` range, or `None` if it is empty or does not
/// fit in an `i32`.
pub(crate) fn custom_slingshot(start: i32, end: i32) -> Option<i32> {
    end.checked_sub(start).filter(|d| *d > 0)
}

/// Overscroll produced by a finger at `y` once dragging started at `initial_motion_y`.
pub fn overscroll_for(y: f32, initial_motion_y: f32) -> f32 {
    (y - initial_motion_y) * DRAG_RATE
}

pub(crate) fn abs(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

/// Linear interpolation between two offsets, truncated toward zero like the host's integer
/// layout math.
pub(crate) fn lerp_offset(from: i32, to: i32, t: f32) -> i32 {
    offset_by(from, (i64::from(to) - i64::from(from)) as f32 * t)
}

/// `base + delta` truncated toward zero, clamped to the `i32` range.
fn offset_by(base: i32, delta: f32) -> i32 {
    let sum = i64::from(base).saturating_add(delta as i64);
    sum.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
