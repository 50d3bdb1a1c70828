//! Host-side animation state.
//!
//! The GPU does the actual particle motion. The host only tracks whether the
//! image is collapsing and how far the colors have blended from the start
//! image toward the end image.

/// Whether the compute shader should let particles fall.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Collapsing,
}

/// Per-run animation state, updated once per frame.
#[derive(Debug, Clone)]
pub struct AnimationState {
    phase: Phase,
    color_interpolation: f32,
    last_interval: f32,
    frame_count: u64,
    collapse_duration: f32,
}

impl AnimationState {
    /// Create an idle animation.
    ///
    /// # Params
    ///
    /// * `collapse_duration` - seconds of collapsing needed for the color
    ///   interpolation to reach 1.0. Must be positive.
    pub fn new(collapse_duration: f32) -> Self {
        Self {
            phase: Phase::Idle,
            color_interpolation: 0.0,
            last_interval: 0.0,
            frame_count: 0,
            collapse_duration,
        }
    }

    /// Flip between idle and collapsing.
    ///
    /// The color interpolation is left as-is. Colors which have already
    /// blended toward the end image stay there.
    pub fn toggle_collapse(&mut self) {
        self.phase = match self.phase {
            Phase::Idle => Phase::Collapsing,
            Phase::Collapsing => Phase::Idle,
        };
        log::debug!(
            "Animation is now {:?} at color interpolation {}",
            self.phase,
            self.color_interpolation
        );
    }

    /// Advance the animation by one frame.
    ///
    /// # Params
    ///
    /// * `interval` - seconds elapsed since the previous frame.
    pub fn advance(&mut self, interval: f32) {
        self.last_interval = interval;
        self.frame_count += 1;
        if self.phase == Phase::Collapsing {
            let step = interval.max(0.0) / self.collapse_duration;
            self.color_interpolation =
                (self.color_interpolation + step).min(1.0);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The collapse flag as the compute shader expects it.
    pub fn collapse_flag(&self) -> i32 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Collapsing => 1,
        }
    }

    /// How far colors have blended from start (0.0) to end (1.0).
    pub fn color_interpolation(&self) -> f32 {
        self.color_interpolation
    }

    /// The interval given to the most recent call to `advance`.
    pub fn last_interval(&self) -> f32 {
        self.last_interval
    }

    /// The number of frames advanced so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_idle_and_unblended() {
        let state = AnimationState::new(5.0);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.collapse_flag(), 0);
        assert_eq!(state.color_interpolation(), 0.0);
        assert_eq!(state.frame_count(), 0);
    }

    #[test]
    fn idle_frames_do_not_blend() {
        let mut state = AnimationState::new(5.0);
        for _ in 0..100 {
            state.advance(0.5);
        }
        assert_eq!(state.color_interpolation(), 0.0);
        assert_eq!(state.frame_count(), 100);
        assert_eq!(state.last_interval(), 0.5);
    }

    #[test]
    fn collapsing_blends_by_interval_over_duration() {
        let mut state = AnimationState::new(5.0);
        state.toggle_collapse();
        assert_eq!(state.collapse_flag(), 1);

        state.advance(1.0);
        assert!((state.color_interpolation() - 0.2).abs() < 1e-6);
        state.advance(0.5);
        assert!((state.color_interpolation() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn interpolation_never_decreases_and_saturates() {
        let mut state = AnimationState::new(5.0);
        state.toggle_collapse();

        let mut last = state.color_interpolation();
        for _ in 0..1000 {
            state.advance(1.0 / 60.0);
            assert!(state.color_interpolation() >= last);
            assert!(state.color_interpolation() <= 1.0);
            last = state.color_interpolation();
        }
        assert_eq!(state.color_interpolation(), 1.0);

        state.advance(10.0);
        assert_eq!(state.color_interpolation(), 1.0);
    }

    #[test]
    fn negative_intervals_are_ignored() {
        let mut state = AnimationState::new(5.0);
        state.toggle_collapse();
        state.advance(1.0);
        let before = state.color_interpolation();
        state.advance(-1.0);
        assert_eq!(state.color_interpolation(), before);
    }

    #[test]
    fn toggling_twice_keeps_the_blend() {
        let mut state = AnimationState::new(5.0);
        state.toggle_collapse();
        state.advance(2.5);
        state.toggle_collapse();

        assert_eq!(state.phase(), Phase::Idle);
        assert!((state.color_interpolation() - 0.5).abs() < 1e-6);

        state.advance(2.5);
        assert!((state.color_interpolation() - 0.5).abs() < 1e-6);
    }
}
