mod frame_timer;

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Measures the time between frames and, optionally, keeps the frame rate
/// below a target.
///
/// Vsync normally paces the main loop. When vsync is off the loop runs as
/// fast as it possibly can, which is rarely useful for a visualization, so a
/// frame rate limit can be imposed which just sleeps for a bit of time each
/// frame.
pub struct FrameTimer {
    frames_to_track: usize,
    frame_starts: VecDeque<Instant>,
    target_duration: Option<Duration>,
}
