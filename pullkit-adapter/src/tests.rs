use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pullkit::{
    Error, Footer, FooterState, PaginationOptions, PointerId, ProgressIndicator, Rect,
    RefreshOptions, RefreshState, ScrollHost, VisiblePositions,
};

#[derive(Debug, Default)]
struct Host {
    can_scroll_up: bool,
    indicator_top: i32,
    visible: VisiblePositions,
}

impl ScrollHost for Host {
    fn can_scroll_up(&self) -> bool {
        self.can_scroll_up
    }

    fn offset_indicator_top(&mut self, delta: i32) {
        self.indicator_top += delta;
    }

    fn visible_positions(&self) -> VisiblePositions {
        self.visible
    }
}

#[derive(Debug, Default)]
struct Spinner {
    spinning: bool,
}

impl ProgressIndicator for Spinner {
    fn view_width(&self) -> i32 {
        40
    }

    fn view_height(&self) -> i32 {
        40
    }

    fn move_spinner(&mut self, _: f32, _: f32, _: f32, _: f32, _: i32) {}

    fn start_anim_refreshing(&mut self) {
        self.spinning = true;
    }

    fn stop_anim_refreshing(&mut self) {
        self.spinning = false;
    }
}

#[derive(Debug, Default)]
struct TextFooter {
    text: String,
}

impl Footer for TextFooter {
    fn view_width(&self) -> i32 {
        200
    }

    fn view_height(&self) -> i32 {
        10
    }

    fn message(&self) -> &str {
        &self.text
    }

    fn set_message(&mut self, message: String) {
        self.text = message;
    }

    fn show_idle(&mut self) {
        self.text = String::from("idle");
    }

    fn show_pull_to_load(&mut self) {
        self.text = String::from("pull up to load more");
    }

    fn show_full_to_load(&mut self) {
        self.text = String::from("tap to load more");
    }

    fn show_release_to_load(&mut self) {
        self.text = String::from("release to load more");
    }

    fn show_loading(&mut self) {
        self.text = String::from("loading");
    }

    fn finish_loading(&mut self) {}
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_for_cb = Arc::clone(&calls);
    (calls, move || {
        calls_for_cb.fetch_add(1, Ordering::Relaxed);
    })
}

fn layout(options: RefreshOptions) -> RefreshLayout<Spinner, Host> {
    RefreshLayout::new(
        options,
        Spinner::default(),
        Host {
            indicator_top: -40,
            ..Host::default()
        },
    )
    .unwrap()
}

#[test]
fn builders_report_missing_collaborators() {
    let err = RefreshLayout::<Spinner, Host>::builder()
        .host(Host::default())
        .build()
        .unwrap_err();
    assert_eq!(err, Error::MissingCollaborator("progress indicator"));

    let err = RefreshLayout::<Spinner, Host>::builder()
        .indicator(Spinner::default())
        .build()
        .unwrap_err();
    assert_eq!(err, Error::MissingCollaborator("scroll host"));

    let err = LoadMoreList::<u32, TextFooter>::builder()
        .data(vec![1, 2, 3])
        .build()
        .unwrap_err();
    assert_eq!(err, Error::MissingCollaborator("footer"));

    let list = LoadMoreList::<u32, TextFooter>::builder()
        .footer(TextFooter::default())
        .data(vec![1, 2, 3])
        .build()
        .unwrap();
    assert_eq!(list.item_count(), 4);
}

#[test]
fn pull_through_layout_refreshes() {
    let (calls, cb) = counter();
    let mut l = layout(RefreshOptions::new().with_on_refresh(Some(cb)));

    let p = PointerId(0);
    assert!(l.on_touch_down(p, 0.0));
    assert!(l.on_touch_move(p, 20.0));
    assert!(l.on_touch_move(p, 300.0));
    assert_eq!(l.state(), RefreshState::Dragging);
    assert_eq!(l.host().indicator_top, l.controller().offset_top());

    assert!(l.on_touch_up(p, 300.0, 0));
    let mut now = 0;
    while l.tick(now) {
        now += 16;
    }
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert!(l.is_refreshing());
    assert!(l.controller().indicator().spinning);

    l.set_refreshing(false, now);
    while l.tick(now) {
        now += 16;
    }
    assert_eq!(l.state(), RefreshState::Idle);
    assert_eq!(l.host().indicator_top, -40);
}

#[test]
fn lifting_the_only_pointer_releases_the_indicator() {
    let (calls, cb) = counter();
    let mut l = layout(RefreshOptions::new().with_on_refresh(Some(cb)));

    let p = PointerId(0);
    assert!(l.on_touch_down(p, 0.0));
    assert!(l.on_touch_move(p, 20.0));
    assert!(l.on_touch_move(p, 300.0));
    l.on_pointer_up(p, None, 0);
    assert_eq!(l.state(), RefreshState::Returning);

    let mut now = 0;
    while l.tick(now) {
        now += 16;
    }
    assert_eq!(l.state(), RefreshState::Idle);
    assert_eq!(l.host().indicator_top, -40);
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn child_scroll_up_override_gates_the_gesture() {
    let mut l = layout(RefreshOptions::new());
    let scrolled = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&scrolled);
    l.set_can_child_scroll_up(Some(move || flag.load(Ordering::Relaxed)));

    assert!(l.can_child_scroll_up());
    assert!(!l.on_touch_down(PointerId(0), 0.0));

    scrolled.store(false, Ordering::Relaxed);
    assert!(l.on_touch_down(PointerId(0), 0.0));

    // The host itself claims to be scrolled, but the override wins.
    l.host_mut().can_scroll_up = true;
    assert!(l.on_touch_move(PointerId(0), 100.0));

    l.set_can_child_scroll_up(None::<fn() -> bool>);
    assert!(l.can_child_scroll_up());
}

#[test]
fn layout_centres_indicator_and_follows_target_pull() {
    let mut l = layout(RefreshOptions::new());
    let frame = l.layout(200, 400);
    assert_eq!(
        frame.indicator,
        Rect {
            x: 80,
            y: -40,
            width: 40,
            height: 40,
        }
    );
    assert_eq!(frame.content.y, 0);
    assert_eq!(frame.content.bottom(), 400);

    l.controller_mut().set_target_pull(true, 6);
    l.set_refreshing(true, 0);
    let frame = l.layout(200, 400);
    assert_eq!(frame.indicator.y, 24);
    assert_eq!(frame.content.y, 24 + 40 + 6);

    l.set_enabled(false);
    assert_eq!(l.layout(200, 400).content.y, 6);
}

#[test]
fn load_more_list_rows_include_footer() {
    let mut list = LoadMoreList::new(PaginationOptions::new(), TextFooter::default());
    assert_eq!(list.item_count(), 0);
    assert_eq!(list.row(0), None);

    list.set_data((0..9).collect());
    assert_eq!(list.item_count(), 10);
    assert_eq!(list.row(3), Some(Row::Data(&3)));
    assert_eq!(list.row(9), Some(Row::Footer));
    assert_eq!(list.row(10), None);
    assert_eq!(list.span_size(9, 3), 3);
    assert_eq!(list.span_size(2, 3), 1);

    list.pagination_mut().set_load_more_enabled(false);
    assert_eq!(list.item_count(), 9);
    assert_eq!(list.row(9), None);
}

#[test]
fn add_data_inserts_or_rejects() {
    let mut list = LoadMoreList::new(PaginationOptions::new(), TextFooter::default());
    list.set_data((0..9).collect());

    assert_eq!(list.add_data([100, 101], Some(5)), Ok(5));
    assert_eq!(list.data().len(), 11);
    assert_eq!(list.data()[5], 100);
    assert_eq!(list.data()[7], 5);
    assert_eq!(list.item_count(), 12);

    assert_eq!(
        list.add_data([7], Some(20)),
        Err(Error::InsertOutOfRange { index: 20, len: 11 })
    );
    assert_eq!(list.data().len(), 11);
    assert_eq!(list.pagination().data_count(), 11);

    assert_eq!(list.add_data([42], None), Ok(11));
    assert_eq!(list.data().last(), Some(&42));
}

#[test]
fn footer_tap_then_page_arrives() {
    let (calls, cb) = counter();
    let mut list = LoadMoreList::new(
        PaginationOptions::new()
            .with_auto_load_more(false)
            .with_on_load_more(Some(cb)),
        TextFooter::default(),
    );
    list.set_data((0..9).collect());
    let mut host = Host::default();

    assert!(!list.on_row_click(4));
    assert!(list.on_row_click(9));
    assert!(!list.on_row_click(9));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(list.pagination().footer().message(), "loading");

    list.pagination_mut().set_footer_message("3 more");
    assert!(list.finish_load(Some(vec![9, 10, 11]), 100));
    assert_eq!(list.data().len(), 12);
    assert_eq!(list.footer_state(), FooterState::Finished);
    assert_eq!(list.pagination().footer().message(), "3 more");

    list.tick(&mut host, 100 + pullkit::DEFAULT_SETTLE_DELAY_MS);
    assert_eq!(list.footer_state(), FooterState::Idle);

    assert!(list.on_row_click(12));
    assert!(list.finish_load(None, 2_000));
    assert_eq!(list.data().len(), 12);
    assert_eq!(list.pagination().last_load_succeeded(), Some(false));
}

#[test]
fn list_window_reports_last_visible_positions() {
    let sizes = [10u64; 10];
    let w = ListWindow::new(25, 30);
    assert_eq!(
        w.positions_for_sizes(sizes, 0),
        VisiblePositions {
            last: Some(5),
            last_fully: Some(4),
        }
    );

    let all = ListWindow::new(0, 1_000);
    assert_eq!(all.positions_for_sizes(sizes, 2), VisiblePositions::new(9, 9));

    // A single item taller than the viewport is visible but never fully.
    let tall = ListWindow::new(10, 20);
    assert_eq!(
        tall.positions_for_extents([(0, 100)]),
        VisiblePositions {
            last: Some(0),
            last_fully: None,
        }
    );

    assert_eq!(w.positions_for_sizes([], 0), VisiblePositions::default());
}

#[test]
fn staggered_positions_take_the_max_span() {
    let spans = [
        VisiblePositions::new(7, 5),
        VisiblePositions::new(8, 6),
        VisiblePositions::default(),
    ];
    assert_eq!(staggered_positions(spans), VisiblePositions::new(8, 6));
    assert_eq!(staggered_positions([]), VisiblePositions::default());
}

#[test]
fn list_window_drives_auto_load_more() {
    let (calls, cb) = counter();
    let mut list = LoadMoreList::new(
        PaginationOptions::new().with_on_load_more(Some(cb)),
        TextFooter::default(),
    );
    list.set_data((0..9).collect());
    let mut host = Host::default();
    let rows = || core::iter::repeat_n(10u64, 10);

    list.on_scrolled(&mut host, ListWindow::new(0, 30).positions_for_sizes(rows(), 0));
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert!(!list.pagination().is_auto_load_more());

    list.on_scroll_state_changed(&host, pullkit::ScrollPhase::Dragging);
    list.on_scrolled(&mut host, ListWindow::new(70, 30).positions_for_sizes(rows(), 0));
    assert_eq!(list.footer_state(), FooterState::ReleaseToLoad);

    host.visible = VisiblePositions::new(9, 9);
    list.on_scroll_state_changed(&host, pullkit::ScrollPhase::Idle);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert!(list.is_loading());
}
