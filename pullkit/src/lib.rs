//! Headless pull-to-refresh and load-more state machines for list UIs.
//!
//! For container/list composition helpers, see the `pullkit-adapter` crate.
//!
//! This crate turns raw touch and scroll reports into semantic events:
//! - [`RefreshController`] tracks a vertical pull, moves the refresh indicator with slingshot
//!   tension, and fires the refresh callback when the pull crosses the trigger distance.
//! - [`PaginationController`] watches the last visible positions of a list and fires the
//!   load-more callback, driving a six-state footer along the way.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - touch events (pointer id + y) and nested-scroll deltas
//! - visible positions and scroll-state changes of the list
//! - a frame/timer clock for `tick(now_ms)`
//! - implementations of [`ScrollHost`], [`ProgressIndicator`] and [`Footer`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod collab;
mod error;
mod interpolator;
mod options;
mod pagination;
pub mod physics;
mod refresh;
mod schedule;
mod state;
mod types;


pub use collab::{
    DEFAULT_AUTO_REFRESH_DURATION_MS, Footer, ProgressIndicator, ScrollHost, VisiblePositions,
};
pub use error::{Error, Result};
pub use interpolator::{Interpolator, Timing};
pub use options::{
    DEFAULT_PROGRESS_END_OFFSET, DEFAULT_SETTLE_DELAY_MS, DEFAULT_TOUCH_SLOP, OnLoadMoreCallback,
    OnRefreshCallback, PaginationOptions, RefreshOptions,
};
pub use pagination::PaginationController;
pub use physics::{DRAG_RATE, SlingshotGeometry, SpinnerMotion};
pub use refresh::{
    ANIMATE_TO_START_DURATION_MS, ANIMATE_TO_TRIGGER_DURATION_MS, DragSession,
    RefreshController, SCALE_DOWN_DURATION_MS,
};
pub use schedule::{Schedule, Token};
pub use state::{PaginationSnapshot, RefreshSnapshot};
pub use types::{FooterState, PointerId, Rect, RefreshState, ScrollPhase};
