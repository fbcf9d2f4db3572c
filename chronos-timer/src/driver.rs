//! Tick drivers
//!
//! Each handle owns its widget state behind a `tokio::sync::Mutex` and at
//! most one interval task feeding it ticks. The task is aborted on stop,
//! reset and drop; a countdown task also ends itself at expiry.

use crate::alarm::{AlarmPlayer, SoundSource};
use crate::countdown::{Countdown, Transition, COUNTDOWN_TICK};
use crate::stopwatch::{Stopwatch, STOPWATCH_TICK};
use chronos_core::ChronosError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

fn abort(ticker: &mut Option<JoinHandle<()>>) {
    if let Some(task) = ticker.take() {
        task.abort();
    }
}

// ============ Stopwatch ============

pub struct StopwatchHandle {
    state: Arc<Mutex<Stopwatch>>,
    ticker: Option<JoinHandle<()>>,
}

impl StopwatchHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Stopwatch::new())),
            ticker: None,
        }
    }

    pub async fn snapshot(&self) -> Stopwatch {
        self.state.lock().await.clone()
    }

    pub async fn start(&mut self) -> Stopwatch {
        let mut watch = self.state.lock().await;
        if watch.start() {
            abort(&mut self.ticker);
            tracing::info!(elapsed_ms = watch.elapsed_ms(), "stopwatch started");
            self.ticker = Some(spawn_stopwatch_ticker(Arc::clone(&self.state)));
        }
        watch.clone()
    }

    pub async fn stop(&mut self) -> Stopwatch {
        abort(&mut self.ticker);
        let mut watch = self.state.lock().await;
        if watch.stop() {
            tracing::info!(elapsed_ms = watch.elapsed_ms(), "stopwatch paused");
        }
        watch.clone()
    }

    pub async fn reset(&mut self) -> Stopwatch {
        abort(&mut self.ticker);
        let mut watch = self.state.lock().await;
        watch.reset();
        tracing::info!("stopwatch reset");
        watch.clone()
    }

    /// Record a lap; `None` unless running
    pub async fn lap(&self) -> Option<String> {
        self.state.lock().await.lap().map(str::to_string)
    }
}

impl Default for StopwatchHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StopwatchHandle {
    fn drop(&mut self) {
        abort(&mut self.ticker);
    }
}

fn spawn_stopwatch_ticker(state: Arc<Mutex<Stopwatch>>) -> JoinHandle<()> {
    let step = STOPWATCH_TICK.as_millis() as u64;
    let mut interval = time::interval_at(Instant::now() + STOPWATCH_TICK, STOPWATCH_TICK);
    tokio::spawn(async move {
        loop {
            interval.tick().await;
            state.lock().await.tick(step);
        }
    })
}

// ============ Countdown ============

pub struct CountdownHandle {
    state: Arc<Mutex<Countdown>>,
    player: Arc<dyn AlarmPlayer>,
    ticker: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    pub fn new(player: Arc<dyn AlarmPlayer>) -> Self {
        Self::with_countdown(Countdown::new(), player)
    }

    pub fn with_countdown(countdown: Countdown, player: Arc<dyn AlarmPlayer>) -> Self {
        Self {
            state: Arc::new(Mutex::new(countdown)),
            player,
            ticker: None,
        }
    }

    pub async fn snapshot(&self) -> Countdown {
        self.state.lock().await.clone()
    }

    pub async fn start(&mut self) -> Countdown {
        let mut countdown = self.state.lock().await;
        match countdown.start() {
            Transition::Expired => {
                tracing::info!("countdown started at zero, expired");
                self.player.play(countdown.sound());
            }
            Transition::Changed => {
                // A ticker left over from an earlier run may not have exited yet
                abort(&mut self.ticker);
                tracing::info!(remaining_secs = countdown.remaining_secs(), "countdown started");
                self.ticker = Some(spawn_countdown_ticker(
                    Arc::clone(&self.state),
                    Arc::clone(&self.player),
                ));
            }
            Transition::Unchanged => {}
        }
        countdown.clone()
    }

    pub async fn stop(&mut self) -> Countdown {
        abort(&mut self.ticker);
        let mut countdown = self.state.lock().await;
        if countdown.stop() == Transition::Changed {
            tracing::info!(remaining_secs = countdown.remaining_secs(), "countdown paused");
        }
        countdown.clone()
    }

    pub async fn reset(&mut self) -> Countdown {
        abort(&mut self.ticker);
        let mut countdown = self.state.lock().await;
        countdown.reset();
        self.player.stop();
        tracing::info!("countdown reset");
        countdown.clone()
    }

    pub async fn set_duration(&self, hours: u64, minutes: u64, seconds: u64) -> Result<Countdown, ChronosError> {
        let mut countdown = self.state.lock().await;
        countdown.set_duration(hours, minutes, seconds)?;
        tracing::info!(remaining_secs = countdown.remaining_secs(), "countdown duration set");
        Ok(countdown.clone())
    }

    pub async fn set_sound(&self, sound: Option<SoundSource>) -> Countdown {
        let mut countdown = self.state.lock().await;
        countdown.set_sound(sound);
        countdown.clone()
    }

    pub async fn dismiss(&self) -> Countdown {
        let mut countdown = self.state.lock().await;
        if countdown.dismiss() {
            self.player.stop();
            tracing::info!("alarm dismissed");
        }
        countdown.clone()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        abort(&mut self.ticker);
    }
}

fn spawn_countdown_ticker(state: Arc<Mutex<Countdown>>, player: Arc<dyn AlarmPlayer>) -> JoinHandle<()> {
    let mut interval = time::interval_at(Instant::now() + COUNTDOWN_TICK, COUNTDOWN_TICK);
    tokio::spawn(async move {
        loop {
            interval.tick().await;
            let mut countdown = state.lock().await;
            match countdown.tick() {
                Transition::Changed => {}
                Transition::Expired => {
                    tracing::info!("countdown expired");
                    player.play(countdown.sound());
                    break;
                }
                Transition::Unchanged => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::PresetSound;
    use crate::countdown::CountdownState;
    use crate::stopwatch::StopwatchState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingAlarm {
        played: AtomicUsize,
        stopped: AtomicUsize,
    }

    impl AlarmPlayer for CountingAlarm {
        fn play(&self, _sound: Option<&SoundSource>) {
            self.played.fetch_add(1, Ordering::SeqCst);
        }

        fn stop(&self) {
            self.stopped.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn countdown(secs: u64) -> (CountdownHandle, Arc<CountingAlarm>) {
        let alarm = Arc::new(CountingAlarm::default());
        let handle = CountdownHandle::with_countdown(Countdown::with_duration(secs), alarm.clone());
        (handle, alarm)
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopwatch_accumulates_ticks() {
        let mut sw = StopwatchHandle::new();
        sw.start().await;
        time::sleep(Duration::from_millis(1000)).await;
        let paused = sw.stop().await;
        assert_eq!(paused.state(), StopwatchState::Paused);
        assert!((990..=1000).contains(&paused.elapsed_ms()), "{}", paused.elapsed_ms());

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(sw.snapshot().await.elapsed_ms(), paused.elapsed_ms());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopwatch_double_start_single_ticker() {
        let mut sw = StopwatchHandle::new();
        sw.start().await;
        sw.start().await;
        time::sleep(Duration::from_millis(205)).await;
        let elapsed = sw.stop().await.elapsed_ms();
        assert!((190..=200).contains(&elapsed), "{}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopwatch_lap_and_reset() {
        let mut sw = StopwatchHandle::new();
        assert_eq!(sw.lap().await, None);
        sw.start().await;
        time::sleep(Duration::from_millis(1505)).await;
        assert_eq!(sw.lap().await.as_deref(), Some("00:00:01.50"));

        let reset = sw.reset().await;
        assert_eq!(reset.state(), StopwatchState::Idle);
        assert_eq!(reset.elapsed_ms(), 0);
        assert!(reset.laps().is_empty());
        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(sw.snapshot().await.elapsed_ms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_expires_with_one_alarm() {
        let (mut cd, alarm) = countdown(3);
        cd.start().await;
        time::sleep(Duration::from_millis(3500)).await;

        let snap = cd.snapshot().await;
        assert_eq!(snap.state(), CountdownState::Expired);
        assert_eq!(snap.remaining_secs(), 0);
        assert_eq!(alarm.played.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(5)).await;
        cd.start().await;
        assert_eq!(alarm.played.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_zero_expires_immediately() {
        let (mut cd, alarm) = countdown(0);
        let snap = cd.start().await;
        assert_eq!(snap.state(), CountdownState::Expired);
        assert!(snap.alarm_active());
        assert_eq!(alarm.played.load(Ordering::SeqCst), 1);
        assert!(cd.ticker.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_pause_and_reset() {
        let (mut cd, alarm) = countdown(10);
        cd.start().await;
        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(cd.stop().await.remaining_secs(), 8);
        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(cd.snapshot().await.remaining_secs(), 8);

        let reset = cd.reset().await;
        assert_eq!(reset.remaining_secs(), 3600);
        assert_eq!(reset.state(), CountdownState::Idle);
        assert_eq!(alarm.stopped.load(Ordering::SeqCst), 1);
        assert_eq!(alarm.played.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_stops_alarm_once() {
        let (mut cd, alarm) = countdown(1);
        cd.set_sound(Some(SoundSource::Preset(PresetSound::SonataFeliz))).await;
        cd.start().await;
        time::sleep(Duration::from_millis(1500)).await;

        assert!(!cd.dismiss().await.alarm_active());
        cd.dismiss().await;
        assert_eq!(alarm.stopped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_expiry_ticks_again() {
        let (mut cd, alarm) = countdown(1);
        cd.start().await;
        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(cd.snapshot().await.state(), CountdownState::Expired);

        cd.set_duration(0, 0, 2).await.unwrap();
        let restarted = cd.start().await;
        assert_eq!(restarted.state(), CountdownState::Running);
        assert!(cd.ticker.as_ref().is_some_and(|t| !t.is_finished()));

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(cd.snapshot().await.state(), CountdownState::Expired);
        assert_eq!(alarm.played.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_duration_keeps_state() {
        let (cd, _alarm) = countdown(30);
        assert!(cd.set_duration(u64::MAX, 0, 0).await.is_err());
        assert_eq!(cd.snapshot().await.remaining_secs(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_ticker() {
        let (mut cd, _alarm) = countdown(10);
        cd.start().await;
        let task = cd.ticker.as_ref().map(JoinHandle::abort_handle);
        drop(cd);
        time::sleep(Duration::from_millis(10)).await;
        assert!(task.is_some_and(|t| t.is_finished()));
    }
}
