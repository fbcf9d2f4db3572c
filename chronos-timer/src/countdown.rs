//! Countdown state machine
//!
//! Counts whole seconds down to zero. Expiry happens on the transition into
//! `Expired` and nowhere else, so the alarm fires once per run.

use crate::alarm::SoundSource;
use chronos_core::ChronosError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tick granularity of the countdown
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Start value: one hour
pub const DEFAULT_DURATION_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Result of a transition that may end the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Changed,
    /// Reached zero; the caller must sound the alarm
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Countdown {
    remaining_secs: u64,
    state: CountdownState,
    alarm_active: bool,
    sound: Option<SoundSource>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION_SECS)
    }

    pub fn with_duration(secs: u64) -> Self {
        Self {
            remaining_secs: secs,
            state: CountdownState::Idle,
            alarm_active: false,
            sound: None,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn alarm_active(&self) -> bool {
        self.alarm_active
    }

    pub fn sound(&self) -> Option<&SoundSource> {
        self.sound.as_ref()
    }

    pub fn set_sound(&mut self, sound: Option<SoundSource>) {
        self.sound = sound;
    }

    pub fn formatted(&self) -> String {
        format_countdown(self.remaining_secs)
    }

    pub fn start(&mut self) -> Transition {
        match self.state {
            CountdownState::Running | CountdownState::Expired => Transition::Unchanged,
            CountdownState::Idle | CountdownState::Paused if self.remaining_secs == 0 => self.expire(),
            CountdownState::Idle | CountdownState::Paused => {
                self.state = CountdownState::Running;
                Transition::Changed
            }
        }
    }

    pub fn stop(&mut self) -> Transition {
        if self.state != CountdownState::Running {
            return Transition::Unchanged;
        }
        self.state = CountdownState::Paused;
        Transition::Changed
    }

    /// Back to one hour, idle, alarm silenced. The sound choice is kept.
    pub fn reset(&mut self) {
        self.remaining_secs = DEFAULT_DURATION_SECS;
        self.state = CountdownState::Idle;
        self.alarm_active = false;
    }

    /// Replace the remaining time. An expired countdown becomes idle again.
    /// A duration too large to count in seconds leaves the countdown untouched.
    pub fn set_duration(&mut self, hours: u64, minutes: u64, seconds: u64) -> Result<(), ChronosError> {
        let total = hours
            .checked_mul(3600)
            .zip(minutes.checked_mul(60))
            .and_then(|(h, m)| h.checked_add(m))
            .and_then(|hm| hm.checked_add(seconds))
            .ok_or_else(|| {
                ChronosError::invalid_format(
                    &format!("{}h {}m {}s", hours, minutes, seconds),
                    "a duration of at most u64::MAX seconds",
                )
            })?;

        self.remaining_secs = total;
        if self.state == CountdownState::Expired {
            self.state = CountdownState::Idle;
        }
        Ok(())
    }

    /// Silence the alarm. Returns whether one was sounding.
    pub fn dismiss(&mut self) -> bool {
        std::mem::replace(&mut self.alarm_active, false)
    }

    pub fn tick(&mut self) -> Transition {
        if self.state != CountdownState::Running {
            return Transition::Unchanged;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.expire()
        } else {
            Transition::Changed
        }
    }

    fn expire(&mut self) -> Transition {
        self.remaining_secs = 0;
        self.state = CountdownState::Expired;
        self.alarm_active = true;
        Transition::Expired
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

/// `HH:MM:SS`
pub fn format_countdown(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
