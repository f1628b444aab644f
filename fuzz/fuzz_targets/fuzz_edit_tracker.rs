#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rundo_runtime::undo::{EditTracker, StringSurface};
use rundo_runtime::TrackerConfig;
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Op {
    Edit { at: u8, len: u8, text: String },
    Wait(u8),
    Undo,
    Redo,
    Clear,
    Capacity(u8),
    OutOfBand(String),
}

fuzz_target!(|ops: Vec<Op>| {
    let t0 = Instant::now();
    let mut now_ms = 0u64;
    let Ok(mut tracker) = EditTracker::new(StringSurface::new(""), TrackerConfig::new(16, 4)) else {
        return;
    };

    for op in ops.into_iter().take(256) {
        let now = t0 + Duration::from_millis(now_ms);
        match op {
            Op::Edit { at, len, text } => {
                let current = tracker.surface().as_str().to_owned();
                let mut start = (at as usize).min(current.len());
                while !current.is_char_boundary(start) {
                    start -= 1;
                }
                let mut end = (start + len as usize).min(current.len());
                while !current.is_char_boundary(end) {
                    end += 1;
                }
                tracker.on_before_text_changes_at(now);
                let _ = tracker.surface_mut().replace(start..end, &text);
                tracker.on_after_text_changes_at(now);
            }
            Op::Wait(ms) => {
                now_ms += u64::from(ms);
                tracker.tick_at(t0 + Duration::from_millis(now_ms));
            }
            Op::Undo => {
                tracker.undo();
            }
            Op::Redo => {
                tracker.redo();
            }
            Op::Clear => tracker.clear_all_queues(),
            Op::Capacity(n) => {
                let _ = tracker.set_history_capacity(n as usize);
            }
            Op::OutOfBand(text) => tracker.surface_mut().set_text(text),
        }

        let capacity = tracker.config().history_capacity;
        assert!(tracker.undo_depth() <= capacity);
        assert!(tracker.redo_depth() <= capacity);
    }
});
