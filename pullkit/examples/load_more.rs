// Example: manual load-more driven by scroll reports, with a settle delay after each page.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pullkit::{
    Footer, PaginationController, PaginationOptions, ScrollHost, ScrollPhase, VisiblePositions,
};

#[derive(Debug, Default)]
struct TextFooter {
    message: String,
}

impl Footer for TextFooter {
    fn view_width(&self) -> i32 {
        320
    }

    fn view_height(&self) -> i32 {
        48
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn set_message(&mut self, message: String) {
        self.message = message;
    }

    fn show_idle(&mut self) {}

    fn show_pull_to_load(&mut self) {
        println!("footer: pull up to load more");
    }

    fn show_full_to_load(&mut self) {
        println!("footer: tap to load more");
    }

    fn show_release_to_load(&mut self) {
        println!("footer: release to load more");
    }

    fn show_loading(&mut self) {
        println!("footer: loading...");
    }

    fn finish_loading(&mut self) {
        println!("footer: {}", self.message);
    }
}

#[derive(Debug, Default)]
struct List {
    visible: VisiblePositions,
}

impl ScrollHost for List {
    fn can_scroll_up(&self) -> bool {
        true
    }

    fn offset_indicator_top(&mut self, _: i32) {}

    fn smooth_scroll_by(&mut self, dy: i32) {
        println!("list: smooth scroll by {dy}");
    }

    fn visible_positions(&self) -> VisiblePositions {
        self.visible
    }
}

fn main() {
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);
    let options = PaginationOptions::new()
        .with_auto_load_more(false)
        .with_on_load_more(Some(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        }));
    let mut c = PaginationController::new(options, TextFooter::default());
    c.set_data_count(20);
    let mut list = List::default();

    // The user drags until the footer (row 20) is fully on screen, then lets go.
    c.on_scroll_state_changed(&list, ScrollPhase::Dragging);
    for (last, last_fully) in [(17, 16), (19, 18), (20, 19), (20, 20)] {
        let positions = VisiblePositions::new(last, last_fully);
        list.visible = positions;
        c.on_scrolled(&mut list, positions);
    }
    c.on_scroll_state_changed(&list, ScrollPhase::Idle);
    println!("requests={}", requests.load(Ordering::Relaxed));

    // The page arrives 300ms later.
    let mut now_ms = 300u64;
    if let Err(err) = c.insert_data(20, None) {
        eprintln!("insert failed: {err}");
        return;
    }
    c.set_footer_message("20 more items");
    c.resolve_load(true, now_ms);

    list.visible = VisiblePositions::new(21, 20);
    while c.tick(&mut list, now_ms) {
        now_ms += 16;
    }
    println!(
        "done: t={now_ms}ms items={} footer={:?}",
        c.item_count(),
        c.footer_state()
    );
}
