//! Probe backoff for direct stream recording.
//!
//! While a target keeps answering with something that is not an audio
//! stream, probes are spaced out: first `max_ticks` probes one short interval
//! apart, then `max_ticks` more one long interval apart, then the recorder
//! gives up. Only a target that has been a stream at least once gets this
//! treatment; a target that was never a stream is abandoned on the first
//! miss.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    pub short_interval: Duration,
    pub long_interval: Duration,
    /// Ticks allowed in each of the short and long phases
    pub max_ticks: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            short_interval: Duration::from_secs(1),
            long_interval: Duration::from_secs(10),
            max_ticks: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    ShortPoll,
    LongPoll,
    GiveUp,
}

/// What to do after a probe that did not find a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeDecision {
    /// Wait, then probe again.
    Sleep(Duration),
    /// The target has never been a stream; stop immediately.
    Bail,
    /// Both phases are used up; stop probing.
    GiveUp,
}

#[derive(Debug, Clone)]
pub struct ProbeBackoff {
    config: BackoffConfig,
    short_ticks: u32,
    long_ticks: u32,
    should_wait: bool,
}

impl ProbeBackoff {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            short_ticks: 0,
            long_ticks: 0,
            should_wait: false,
        }
    }

    /// A probe found a stream: reset both phases and allow waiting from now on.
    pub fn on_stream(&mut self) {
        self.short_ticks = 0;
        self.long_ticks = 0;
        self.should_wait = true;
    }

    /// A probe did not find a stream. The tick is consumed before the
    /// never-streamed check, so a first miss still uses up a short tick.
    pub fn on_non_stream(&mut self) -> ProbeDecision {
        let interval = if self.short_ticks < self.config.max_ticks {
            self.short_ticks += 1;
            self.config.short_interval
        } else if self.long_ticks < self.config.max_ticks {
            self.long_ticks += 1;
            self.config.long_interval
        } else {
            return ProbeDecision::GiveUp;
        };

        if !self.should_wait {
            return ProbeDecision::Bail;
        }
        ProbeDecision::Sleep(interval)
    }

    pub fn state(&self) -> ProbeState {
        if self.short_ticks < self.config.max_ticks {
            ProbeState::ShortPoll
        } else if self.long_ticks < self.config.max_ticks {
            ProbeState::LongPoll
        } else {
            ProbeState::GiveUp
        }
    }

    pub fn has_streamed(&self) -> bool {
        self.should_wait
    }
}
