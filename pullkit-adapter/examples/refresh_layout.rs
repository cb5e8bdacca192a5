use pullkit::{PointerId, ProgressIndicator, RefreshOptions, ScrollHost, VisiblePositions};
use pullkit_adapter::RefreshLayout;

#[derive(Debug, Default)]
struct Spinner;

impl ProgressIndicator for Spinner {
    fn view_width(&self) -> i32 {
        48
    }

    fn view_height(&self) -> i32 {
        48
    }

    fn move_spinner(&mut self, _: f32, _: f32, _: f32, _: f32, _: i32) {}

    fn start_anim_refreshing(&mut self) {}

    fn stop_anim_refreshing(&mut self) {}
}

#[derive(Debug, Default)]
struct Screen;

impl ScrollHost for Screen {
    fn can_scroll_up(&self) -> bool {
        false
    }

    // The layout frame is recomputed after each event, so there is nothing to move here.
    fn offset_indicator_top(&mut self, _: i32) {}

    fn visible_positions(&self) -> VisiblePositions {
        VisiblePositions::default()
    }
}

fn main() {
    // Example: a container that pulls its content down along with the indicator.
    //
    // An adapter would:
    // - forward touch events to the layout
    // - call tick(now_ms) while is_animating()
    // - place its views at the rects returned by layout(width, height)
    let layout = RefreshLayout::builder()
        .options(
            RefreshOptions::new()
                .with_target_pull(true, 8)
                .with_on_refresh(Some(|| println!("refresh!"))),
        )
        .indicator(Spinner)
        .host(Screen)
        .build();
    let mut layout = match layout {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let finger = PointerId(1);
    layout.on_touch_down(finger, 100.0);
    let mut now_ms = 0u64;
    for step in 1..=12 {
        now_ms += 16;
        let y = 100.0 + step as f32 * 25.0;
        layout.on_touch_move(finger, y);
        let frame = layout.layout(360, 640);
        println!(
            "t={now_ms} y={y} indicator={:?} content_top={}",
            frame.indicator, frame.content.y
        );
    }
    layout.on_touch_up(finger, 400.0, now_ms);

    while layout.tick(now_ms) {
        now_ms += 16;
    }
    let frame = layout.layout(360, 640);
    println!(
        "refreshing: t={now_ms} state={:?} indicator_top={} content_top={}",
        layout.state(),
        frame.indicator.y,
        frame.content.y
    );
}
