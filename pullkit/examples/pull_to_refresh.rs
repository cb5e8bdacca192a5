// Example: a simulated pull gesture driving the refresh controller at 60fps.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pullkit::{
    PointerId, ProgressIndicator, RefreshController, RefreshOptions, ScrollHost, VisiblePositions,
};

#[derive(Debug, Default)]
struct Spinner {
    arrow: f32,
    scale: f32,
}

impl ProgressIndicator for Spinner {
    fn view_width(&self) -> i32 {
        40
    }

    fn view_height(&self) -> i32 {
        40
    }

    fn move_spinner(&mut self, _: f32, _: f32, adjusted_percent: f32, _: f32, _: i32) {
        self.arrow = adjusted_percent;
    }

    fn start_anim_refreshing(&mut self) {
        println!("spinner: spinning");
    }

    fn stop_anim_refreshing(&mut self) {
        println!("spinner: stopped");
    }

    fn set_animation_progress(&mut self, progress: f32) {
        self.scale = progress;
    }
}

/// A list that is already scrolled to its top.
#[derive(Debug, Default)]
struct List {
    indicator_top: i32,
}

impl ScrollHost for List {
    fn can_scroll_up(&self) -> bool {
        false
    }

    fn offset_indicator_top(&mut self, delta: i32) {
        self.indicator_top += delta;
    }

    fn visible_positions(&self) -> VisiblePositions {
        VisiblePositions::default()
    }
}

fn main() {
    let refreshed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&refreshed);
    let options = RefreshOptions::new()
        .with_scale(true)
        .with_on_refresh(Some(move || flag.store(true, Ordering::Relaxed)));

    let mut c = match RefreshController::new(options, Spinner::default()) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("bad geometry: {err}");
            return;
        }
    };
    let mut list = List {
        indicator_top: c.offset_top(),
    };

    let finger = PointerId(0);
    c.on_touch_down(&mut list, finger, 0.0);

    // The finger travels 240px over ~250ms.
    let mut now_ms = 0u64;
    let mut y = 0.0;
    while y < 240.0 {
        now_ms += 16;
        y += 16.0;
        c.on_touch_move(&mut list, finger, y);
        println!(
            "t={now_ms}ms y={y} state={:?} top={} arrow={:.2} scale={:.2}",
            c.state(),
            c.offset_top(),
            c.indicator().arrow,
            c.indicator().scale
        );
    }
    c.on_touch_up(&mut list, finger, y, now_ms);

    while c.tick(&mut list, now_ms) {
        now_ms += 16;
    }
    println!(
        "t={now_ms}ms state={:?} top={} refreshed={}",
        c.state(),
        c.offset_top(),
        refreshed.load(Ordering::Relaxed)
    );

    // The application finishes its work and stops the refresh.
    c.set_refreshing(&mut list, false, now_ms);
    while c.tick(&mut list, now_ms) {
        now_ms += 16;
    }
    println!("done: t={now_ms}ms state={:?} top={}", c.state(), list.indicator_top);
}
