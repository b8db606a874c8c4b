use std::time::{Duration, Instant};

/// How the recorded duration attached to each download job is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TimelineMode {
    /// Sum of the durations the playlist declares for each segment
    #[default]
    DeclaredDuration,
    /// Wall-clock time elapsed since monitoring started
    LocalTime,
}

/// Running timeline offset, owned by the playlist monitor.
#[derive(Debug)]
pub struct Timeline {
    mode: TimelineMode,
    started: Instant,
    recorded: Duration,
}

impl Timeline {
    pub fn new(mode: TimelineMode) -> Self {
        Self::starting_at(mode, Instant::now())
    }

    pub fn starting_at(mode: TimelineMode, started: Instant) -> Self {
        Self {
            mode,
            started,
            recorded: Duration::ZERO,
        }
    }

    /// Accounts for one newly discovered segment and returns the offset for its job.
    /// The result never decreases from one call to the next.
    pub fn advance(&mut self, segment_duration: Duration) -> Duration {
        let next = match self.mode {
            TimelineMode::DeclaredDuration => self.recorded.saturating_add(segment_duration),
            TimelineMode::LocalTime => self.started.elapsed(),
        };
        self.recorded = self.recorded.max(next);
        self.recorded
    }

    pub fn recorded(&self) -> Duration {
        self.recorded
    }

    pub fn mode(&self) -> TimelineMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_mode_accumulates_segment_durations() {
        let mut timeline = Timeline::new(TimelineMode::DeclaredDuration);
        assert_eq!(timeline.advance(Duration::from_secs(6)), Duration::from_secs(6));
        assert_eq!(
            timeline.advance(Duration::from_millis(5500)),
            Duration::from_millis(11500)
        );
        assert_eq!(timeline.advance(Duration::ZERO), Duration::from_millis(11500));
        assert_eq!(timeline.recorded(), Duration::from_millis(11500));
    }

    #[test]
    fn local_mode_tracks_elapsed_time_and_ignores_declared_durations() {
        let started = Instant::now() - Duration::from_secs(2);
        let mut timeline = Timeline::starting_at(TimelineMode::LocalTime, started);
        let first = timeline.advance(Duration::from_secs(3600));
        assert!(first >= Duration::from_secs(2));
        assert!(first < Duration::from_secs(3600));
        let second = timeline.advance(Duration::ZERO);
        assert!(second >= first);
    }

    #[test]
    fn offsets_are_non_decreasing_in_both_modes() {
        for mode in [TimelineMode::DeclaredDuration, TimelineMode::LocalTime] {
            let mut timeline = Timeline::new(mode);
            let mut last = Duration::ZERO;
            for secs in [4.0f32, 0.0, 2.5, 10.0] {
                let offset = timeline.advance(Duration::from_secs_f32(secs));
                assert!(offset >= last, "{mode:?} went backwards");
                last = offset;
            }
        }
    }
}
