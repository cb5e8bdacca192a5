use alloc::vec::Vec;

use pullkit::{
    Error, Footer, FooterState, PaginationController, PaginationOptions, Result, ScrollHost,
    ScrollPhase, VisiblePositions,
};

/// One row of a [`LoadMoreList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row<'a, T> {
    Data(&'a T),
    /// The synthetic load-more row after the last data item.
    Footer,
}

/// A pagination-capable list adapter: owns the data items and a [`PaginationController`] that
/// manages the footer row appended after them.
#[derive(Clone, Debug)]
pub struct LoadMoreList<T, F> {
    items: Vec<T>,
    pagination: PaginationController<F>,
}

impl<T, F: Footer> LoadMoreList<T, F> {
    pub fn new(options: PaginationOptions, footer: F) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationController::new(options, footer),
        }
    }

    pub fn builder() -> LoadMoreListBuilder<T, F> {
        LoadMoreListBuilder::default()
    }

    pub fn pagination(&self) -> &PaginationController<F> {
        &self.pagination
    }

    pub fn pagination_mut(&mut self) -> &mut PaginationController<F> {
        &mut self.pagination
    }

    pub fn data(&self) -> &[T] {
        &self.items
    }

    pub fn into_data(self) -> Vec<T> {
        self.items
    }

    pub fn footer_state(&self) -> FooterState {
        self.pagination.footer_state()
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    /// Replaces all items and resets the pagination state.
    pub fn set_data(&mut self, items: Vec<T>) {
        self.pagination.set_data_count(items.len());
        self.items = items;
    }

    /// Appends `items` (`index = None`) or inserts them at `index`.
    ///
    /// Fails with [`Error::InsertOutOfRange`] and leaves the list unchanged when `index` is past
    /// the end.
    pub fn add_data(
        &mut self,
        items: impl IntoIterator<Item = T>,
        index: Option<usize>,
    ) -> Result<usize> {
        let items: Vec<T> = items.into_iter().collect();
        let at = self.pagination.insert_data(items.len(), index)?;
        self.items.splice(at..at, items);
        Ok(at)
    }

    /// Number of rows including the footer.
    pub fn item_count(&self) -> usize {
        self.pagination.item_count()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_, T>> {
        if self.pagination.is_footer(index) {
            return Some(Row::Footer);
        }
        self.items.get(index).map(Row::Data)
    }

    /// Grid span of a row: the footer takes the full width.
    pub fn span_size(&self, index: usize, span_count: usize) -> usize {
        if self.pagination.is_footer(index) {
            span_count.max(1)
        } else {
            1
        }
    }

    /// Handles a tap on any row. Tapping the footer loads more; returns `true` if it did.
    pub fn on_row_click(&mut self, index: usize) -> bool {
        self.pagination.is_footer(index) && self.pagination.on_footer_click()
    }

    pub fn on_scroll_state_changed(&mut self, host: &impl ScrollHost, phase: ScrollPhase) {
        self.pagination.on_scroll_state_changed(host, phase);
    }

    pub fn on_scrolled(
        &mut self,
        host: &mut impl ScrollHost,
        positions: impl Into<VisiblePositions>,
    ) {
        self.pagination.on_scrolled(host, positions);
    }

    /// Appends the loaded page (if any) and reports the load as resolved.
    pub fn finish_load(&mut self, page: Option<Vec<T>>, now_ms: u64) -> bool {
        let success = page.is_some();
        if let Some(page) = page {
            // Appending can't go out of range.
            let _ = self.add_data(page, None);
        }
        self.pagination.resolve_load(success, now_ms)
    }

    pub fn tick(&mut self, host: &mut impl ScrollHost, now_ms: u64) -> bool {
        self.pagination.tick(host, now_ms)
    }
}

/// Assembles a [`LoadMoreList`].
pub struct LoadMoreListBuilder<T, F> {
    options: PaginationOptions,
    footer: Option<F>,
    items: Vec<T>,
}

impl<T, F> Default for LoadMoreListBuilder<T, F> {
    fn default() -> Self {
        Self {
            options: PaginationOptions::default(),
            footer: None,
            items: Vec::new(),
        }
    }
}

impl<T, F: Footer> LoadMoreListBuilder<T, F> {
    pub fn options(mut self, options: PaginationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn footer(mut self, footer: F) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn data(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Fails with [`Error::MissingCollaborator`] if no footer was supplied.
    pub fn build(self) -> Result<LoadMoreList<T, F>> {
        let footer = self.footer.ok_or(Error::MissingCollaborator("footer"))?;
        let mut list = LoadMoreList::new(self.options, footer);
        list.set_data(self.items);
        Ok(list)
    }
}
