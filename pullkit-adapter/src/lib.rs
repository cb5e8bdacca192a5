//! Adapter utilities for the `pullkit` crate.
//!
//! The `pullkit` controllers are UI-agnostic state machines. This crate provides small,
//! framework-neutral compositions commonly needed by adapters:
//!
//! - [`RefreshLayout`]: a refresh-capable container that owns the scroll host, forwards events
//!   and computes the indicator/content frame (including target pull)
//! - [`LoadMoreList`]: a list adapter that owns the data items and the load-more footer row
//! - [`ListWindow`] and [`staggered_positions`]: visible-position queries for hosts that only
//!   know item extents
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod layout;
mod list;
mod visible;

#[cfg(test)]
mod tests;

pub use layout::{CanChildScrollUpCallback, RefreshFrame, RefreshLayout, RefreshLayoutBuilder};
pub use list::{LoadMoreList, LoadMoreListBuilder, Row};
pub use visible::{ListWindow, staggered_positions};
