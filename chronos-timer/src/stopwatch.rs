//! Stopwatch state machine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tick granularity of the stopwatch
pub const STOPWATCH_TICK: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopwatchState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stopwatch {
    elapsed_ms: u64,
    state: StopwatchState,
    laps: Vec<String>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0,
            state: StopwatchState::Idle,
            laps: Vec::new(),
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Recorded laps, oldest first
    pub fn laps(&self) -> &[String] {
        &self.laps
    }

    pub fn formatted(&self) -> String {
        format_stopwatch(self.elapsed_ms)
    }

    /// Start or resume. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state == StopwatchState::Running {
            return false;
        }
        self.state = StopwatchState::Running;
        true
    }

    /// Pause. Returns false if not running.
    pub fn stop(&mut self) -> bool {
        if self.state != StopwatchState::Running {
            return false;
        }
        self.state = StopwatchState::Paused;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Append the current time to the laps; only while running.
    pub fn lap(&mut self) -> Option<&str> {
        if self.state != StopwatchState::Running {
            return None;
        }
        self.laps.push(self.formatted());
        self.laps.last().map(String::as_str)
    }

    pub fn tick(&mut self, ms: u64) {
        if self.state == StopwatchState::Running {
            self.elapsed_ms += ms;
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// `HH:MM:SS.cc` (centiseconds)
pub fn format_stopwatch(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
}
