use crate::{FooterState, RefreshState};

/// A lightweight, serializable snapshot of a refresh controller.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefreshSnapshot {
    pub state: RefreshState,
    pub offset_top: i32,
    pub enabled: bool,
    pub is_being_dragged: bool,
    /// Accumulated nested-scroll distance that has not been handed back to the child.
    pub unconsumed: f32,
}

/// A lightweight, serializable snapshot of a pagination controller.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationSnapshot {
    pub data_count: usize,
    pub load_more_enabled: bool,
    pub auto_load_more: bool,
    pub is_loading: bool,
    pub footer_state: FooterState,
}
