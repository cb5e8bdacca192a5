use pullkit::VisiblePositions;

/// The visible part of a vertically scrolled list, in list coordinates.
///
/// Computes the positions [`pullkit::PaginationController`] needs from item extents, for hosts
/// that don't track them natively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListWindow {
    pub scroll_offset: u64,
    pub viewport_size: u64,
}

impl ListWindow {
    pub fn new(scroll_offset: u64, viewport_size: u64) -> Self {
        Self {
            scroll_offset,
            viewport_size,
        }
    }

    pub fn end(&self) -> u64 {
        self.scroll_offset.saturating_add(self.viewport_size)
    }

    /// Whether an item spanning `[start, start + size)` intersects the window.
    pub fn intersects(&self, start: u64, size: u64) -> bool {
        let end = start.saturating_add(size);
        size > 0 && start < self.end() && end > self.scroll_offset
    }

    /// Whether an item spanning `[start, start + size)` lies entirely inside the window.
    pub fn contains(&self, start: u64, size: u64) -> bool {
        start >= self.scroll_offset && start.saturating_add(size) <= self.end()
    }

    /// Visible positions for items laid out back to back with the given sizes and `gap` between
    /// them.
    pub fn positions_for_sizes(
        &self,
        sizes: impl IntoIterator<Item = u64>,
        gap: u64,
    ) -> VisiblePositions {
        let mut start = 0u64;
        let extents = sizes.into_iter().map(|size| {
            let item = (start, size);
            start = start.saturating_add(size).saturating_add(gap);
            item
        });
        self.positions_for_extents(extents)
    }

    /// Visible positions for items given as `(start, size)` pairs in index order.
    pub fn positions_for_extents(
        &self,
        extents: impl IntoIterator<Item = (u64, u64)>,
    ) -> VisiblePositions {
        let mut positions = VisiblePositions::default();
        for (index, (start, size)) in extents.into_iter().enumerate() {
            if start >= self.end() {
                break;
            }
            if self.intersects(start, size) {
                positions.last = Some(index);
                if self.contains(start, size) {
                    positions.last_fully = Some(index);
                }
            }
        }
        positions
    }
}

/// Combines per-span positions of a staggered grid: the list's last visible item is the largest
/// one any span reports.
pub fn staggered_positions(spans: impl IntoIterator<Item = VisiblePositions>) -> VisiblePositions {
    spans
        .into_iter()
        .fold(VisiblePositions::default(), |acc, span| VisiblePositions {
            last: acc.last.max(span.last),
            last_fully: acc.last_fully.max(span.last_fully),
        })
}
