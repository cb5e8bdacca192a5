use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pullkit::{Footer, PaginationOptions, ScrollHost, ScrollPhase, VisiblePositions};
use pullkit_adapter::{ListWindow, LoadMoreList, Row};

const ROW_HEIGHT: u64 = 40;
const VIEWPORT: u64 = 400;

#[derive(Debug, Default)]
struct LabelFooter {
    label: String,
}

impl Footer for LabelFooter {
    fn view_width(&self) -> i32 {
        360
    }

    fn view_height(&self) -> i32 {
        ROW_HEIGHT as i32
    }

    fn message(&self) -> &str {
        &self.label
    }

    fn set_message(&mut self, message: String) {
        self.label = message;
    }

    fn show_idle(&mut self) {
        self.label.clear();
    }

    fn show_pull_to_load(&mut self) {
        self.label = "pull up".into();
    }

    fn show_full_to_load(&mut self) {
        self.label = "tap to load".into();
    }

    fn show_release_to_load(&mut self) {
        self.label = "release to load".into();
    }

    fn show_loading(&mut self) {
        self.label = "loading".into();
    }

    fn finish_loading(&mut self) {}
}

#[derive(Debug)]
struct Scroller {
    window: ListWindow,
    item_count: usize,
}

impl ScrollHost for Scroller {
    fn can_scroll_up(&self) -> bool {
        self.window.scroll_offset > 0
    }

    fn offset_indicator_top(&mut self, _: i32) {}

    fn visible_positions(&self) -> VisiblePositions {
        let sizes = std::iter::repeat_n(ROW_HEIGHT, self.item_count);
        self.window.positions_for_sizes(sizes, 0)
    }
}

fn render(list: &LoadMoreList<String, LabelFooter>, window: ListWindow) {
    let first = (window.scroll_offset / ROW_HEIGHT) as usize;
    let rows: Vec<String> = (first..list.item_count())
        .take((VIEWPORT / ROW_HEIGHT) as usize)
        .filter_map(|i| match list.row(i)? {
            Row::Data(text) => Some(text.clone()),
            Row::Footer => Some(format!("[{}]", list.pagination().footer().message())),
        })
        .collect();
    println!("off={} rows={rows:?}", window.scroll_offset);
}

fn main() {
    // Example: a paged list. The footer starts in auto mode, but the first scroll report sees it
    // off screen, so the list falls back to "drag up and release" for this data set.
    let wants_more = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&wants_more);
    let options = PaginationOptions::new()
        .with_on_load_more(Some(move || flag.store(true, Ordering::Relaxed)));
    let mut list = LoadMoreList::new(options, LabelFooter::default());
    list.set_data((0..15).map(|i| format!("item {i}")).collect());

    let mut scroller = Scroller {
        window: ListWindow::new(0, VIEWPORT),
        item_count: list.item_count(),
    };
    let mut now_ms = 0u64;

    for round in 0..2 {
        list.on_scroll_state_changed(&scroller, ScrollPhase::Dragging);
        let max = (list.item_count() as u64 * ROW_HEIGHT).saturating_sub(VIEWPORT);
        while scroller.window.scroll_offset < max {
            now_ms += 16;
            scroller.window.scroll_offset = (scroller.window.scroll_offset + 40).min(max);
            let positions = scroller.visible_positions();
            list.on_scrolled(&mut scroller, positions);
            render(&list, scroller.window);
        }

        // Releasing with the footer fully revealed asks for the next page.
        list.on_scroll_state_changed(&scroller, ScrollPhase::Idle);
        if wants_more.swap(false, Ordering::Relaxed) {
            now_ms += 250;
            let start = list.data().len();
            let page = (start..start + 10).map(|i| format!("item {i}")).collect();
            list.pagination_mut().set_footer_message(format!("page {} loaded", round + 2));
            list.finish_load(Some(page), now_ms);
            scroller.item_count = list.item_count();
            render(&list, scroller.window);
        }
        while list.tick(&mut scroller, now_ms) {
            now_ms += 16;
        }
    }
    println!(
        "done: t={now_ms}ms items={} footer={:?}",
        list.data().len(),
        list.footer_state()
    );
}
