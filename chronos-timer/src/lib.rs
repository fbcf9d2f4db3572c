//! Chronos Timers
//!
//! Stopwatch and countdown widgets. The state machines in [`stopwatch`] and
//! [`countdown`] are plain data advanced by `tick`; the handles in this crate
//! root drive them from tokio interval tasks and sound the alarm on expiry.

mod alarm;
pub mod countdown;
mod driver;
mod functions;
pub mod stopwatch;

pub use alarm::{AlarmPlayer, LogAlarm, PresetSound, SoundSource};
pub use countdown::{format_countdown, Countdown, CountdownState, DEFAULT_DURATION_SECS};
pub use driver::{CountdownHandle, StopwatchHandle};
pub use stopwatch::{format_stopwatch, Stopwatch, StopwatchState};

use chronos_plugin::PluginRegistry;

/// Load timer functions into registry
pub fn load_timer_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::FormatStopwatch)
        .with_function(functions::FormatCountdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_timer_library() {
        let registry = load_timer_library(PluginRegistry::new());
        assert_eq!(registry.len(), 2);
        assert!(registry.get_function("format_countdown").is_some());
    }
}
