use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use super::FrameTimer;

impl FrameTimer {
    /// Create a new frame timer.
    ///
    /// # Params
    ///
    /// * `fps_limit` - the maximum frame rate, or None to run unbounded.
    /// * `frames_to_track` - how many recent frames are averaged when
    ///   reporting the frame rate.
    pub fn new(fps_limit: Option<u32>, frames_to_track: usize) -> Self {
        let frames_to_track = frames_to_track.max(1);
        let mut frame_starts = VecDeque::with_capacity(frames_to_track + 1);
        frame_starts.push_front(Instant::now());
        Self {
            frames_to_track,
            frame_starts,
            target_duration: fps_limit
                .filter(|&fps| fps > 0)
                .map(|fps| Duration::from_secs(1) / fps),
        }
    }

    /// Call at the beginning of each frame. Returns the time elapsed since the
    /// previous frame started.
    pub fn start_frame(&mut self) -> Duration {
        self.start_frame_at(Instant::now())
    }

    fn start_frame_at(&mut self, now: Instant) -> Duration {
        let interval = self
            .frame_starts
            .front()
            .map(|&previous| now.saturating_duration_since(previous))
            .unwrap_or_default();
        if self.frame_starts.len() > self.frames_to_track {
            self.frame_starts.pop_back();
        }
        self.frame_starts.push_front(now);
        interval
    }

    /// Sleep for any remaining time in the target frame duration.
    pub fn sleep_to_limit(&self) {
        let (target, frame_start) =
            match (self.target_duration, self.frame_starts.front()) {
                (Some(target), Some(&start)) => (target, start),
                _ => return,
            };
        let elapsed = Instant::now() - frame_start;
        if elapsed < target {
            spin_sleep::sleep(target - elapsed);
        }
    }

    /// The average time between the tracked frame starts.
    pub fn avg_frame_time(&self) -> Duration {
        match (self.frame_starts.front(), self.frame_starts.back()) {
            (Some(&newest), Some(&oldest)) if self.frame_starts.len() > 1 => {
                newest.saturating_duration_since(oldest)
                    / (self.frame_starts.len() - 1) as u32
            }
            _ => Duration::default(),
        }
    }

    /// The average frames per second over the tracked frames.
    pub fn fps(&self) -> f32 {
        let avg = self.avg_frame_time().as_secs_f32();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn intervals_measure_the_gap_between_frames() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(None, 4);
        timer.frame_starts.clear();
        timer.frame_starts.push_front(start);

        let interval = timer.start_frame_at(start + Duration::from_millis(16));
        assert_eq!(interval, Duration::from_millis(16));

        let interval = timer.start_frame_at(start + Duration::from_millis(48));
        assert_eq!(interval, Duration::from_millis(32));
        assert_eq!(timer.avg_frame_time(), Duration::from_millis(24));
    }

    #[test]
    fn only_recent_frames_are_averaged() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(None, 2);
        timer.frame_starts.clear();
        timer.frame_starts.push_front(start);

        // One slow frame followed by fast ones.
        let mut now = start + Duration::from_secs(1);
        timer.start_frame_at(now);
        for _ in 0..4 {
            now += Duration::from_millis(10);
            timer.start_frame_at(now);
        }
        assert_eq!(timer.avg_frame_time(), Duration::from_millis(10));
        assert!((timer.fps() - 100.0).abs() < 0.01);
    }

    #[test]
    fn a_fresh_timer_reports_zero_fps() {
        let timer = FrameTimer::new(Some(60), 10);
        assert_eq!(timer.avg_frame_time(), Duration::default());
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn zero_fps_limit_means_unbounded() {
        let timer = FrameTimer::new(Some(0), 10);
        assert!(timer.target_duration.is_none());
    }
}
