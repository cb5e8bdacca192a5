/// Identifier of a touch point, as assigned by the host's event system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub i32);

/// Observable state of a [`crate::RefreshController`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefreshState {
    #[default]
    Idle,
    /// A touch or nested scroll is pulling the indicator.
    Dragging,
    /// The indicator is animating back to its start offset.
    Returning,
    /// A refresh is in progress (including the settle animation that precedes it).
    Refreshing,
}

/// Display state of the load-more footer row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FooterState {
    #[default]
    Idle,
    /// The footer is partially visible; pulling further reveals it.
    PullToLoad,
    /// The footer is fully visible at rest; a tap or release loads more.
    FullyRevealed,
    /// The footer is fully visible during a drag; releasing loads more.
    ReleaseToLoad,
    Loading,
    /// A load resolved and the footer shows the caller's message.
    Finished,
}

/// Motion phase reported by the scroll host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// The user's finger is moving the list.
    Dragging,
    /// The list is flinging or smooth-scrolling without a finger down.
    Settling,
}

/// An axis-aligned rectangle in host pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }
}
