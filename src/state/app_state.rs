//! Main application state management

use std::{
    ops::ControlFlow,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{Field, Phase, TimerController, TimerView};
use crate::{services::Alarm, tasks::Ticker};

pub type SharedController = TimerController<Box<dyn Alarm>>;

/// Controller plus the generation of the tick schedule that may drive it.
/// Ticks from an older generation are stale and ignored.
struct Timer {
    controller: SharedController,
    generation: u64,
}

/// Main application state that hosts the timer and its tick schedule
pub struct AppState {
    timer: Mutex<Timer>,
    ticker: Mutex<Ticker>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for view updates
    pub view_tx: watch::Sender<TimerView>,
    /// Keep the receiver alive to prevent channel closure
    pub _view_rx: watch::Receiver<TimerView>,
}

impl AppState {
    /// Create a new AppState around a freshly built controller
    pub fn new(port: u16, host: String, controller: SharedController, tick_period: Duration) -> Self {
        let (view_tx, view_rx) = watch::channel(controller.view());

        Self {
            timer: Mutex::new(Timer {
                controller,
                generation: 0,
            }),
            ticker: Mutex::new(Ticker::new(tick_period)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            view_tx,
            _view_rx: view_rx,
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, Timer>, String> {
        self.timer
            .lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    fn lock_ticker(&self) -> Result<MutexGuard<'_, Ticker>, String> {
        self.ticker
            .lock()
            .map_err(|e| format!("Failed to lock ticker: {}", e))
    }

    /// Apply a user action to the controller, record it and publish the view
    fn apply<R, F>(&self, action: &str, updater: F) -> Result<(R, TimerView), String>
    where
        F: FnOnce(&mut SharedController) -> R,
    {
        let mut timer = self.lock_timer()?;
        let result = updater(&mut timer.controller);
        let view = self.publish(&timer);
        drop(timer); // Release the lock early

        self.record_action(action);
        Ok((result, view))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Send the controller's view to watchers. Called with the timer lock
    /// held so views are published in the order their changes happened.
    fn publish(&self, timer: &Timer) -> TimerView {
        let view = timer.controller.view();
        self.view_tx.send_replace(view.clone());
        view
    }

    /// Start or resume the countdown, scheduling ticks when it begins running.
    /// Both locks are taken before the controller changes, so a failure to
    /// lock the ticker leaves the timer untouched and start, stop and reset
    /// cannot interleave their scheduling.
    pub fn start(self: &Arc<Self>) -> Result<(bool, TimerView), String> {
        let mut timer = self.lock_timer()?;
        let mut ticker = self.lock_ticker()?;

        let started = timer.controller.start();
        if started {
            timer.generation += 1;
            let generation = timer.generation;
            let weak = Arc::downgrade(self);
            ticker.schedule(move || match weak.upgrade() {
                Some(state) => match state.tick(generation) {
                    Ok(Phase::Running) => ControlFlow::Continue(()),
                    Ok(_) => ControlFlow::Break(()),
                    Err(e) => {
                        warn!("Tick failed: {}", e);
                        ControlFlow::Break(())
                    }
                },
                None => ControlFlow::Break(()),
            });
        }
        drop(ticker);
        let view = self.publish(&timer);
        drop(timer);

        self.record_action("start");
        Ok((started, view))
    }

    /// Pause a running countdown
    pub fn stop(&self) -> Result<(bool, TimerView), String> {
        self.apply_and_cancel("stop", |controller| controller.stop())
    }

    /// Reset to the last confirmed duration
    pub fn reset(&self) -> Result<TimerView, String> {
        self.apply_and_cancel("reset", |controller| controller.reset())
            .map(|((), view)| view)
    }

    fn apply_and_cancel<R, F>(&self, action: &str, updater: F) -> Result<(R, TimerView), String>
    where
        F: FnOnce(&mut SharedController) -> R,
    {
        let mut timer = self.lock_timer()?;
        let mut ticker = self.lock_ticker()?;
        let result = updater(&mut timer.controller);
        ticker.cancel();
        drop(ticker);
        let view = self.publish(&timer);
        drop(timer);

        self.record_action(action);
        Ok((result, view))
    }

    /// Toggle the alarm sound, returning the new setting
    pub fn toggle_sound(&self) -> Result<(bool, TimerView), String> {
        self.apply("sound", |controller| controller.toggle_sound())
    }

    /// Keystroke edit of a field
    pub fn edit_field(&self, field: Field, text: &str) -> Result<TimerView, String> {
        self.apply("input", |controller| controller.edit(field, text))
            .map(|((), view)| view)
    }

    /// Focus loss on a field
    pub fn blur_field(&self, field: Field) -> Result<TimerView, String> {
        self.apply("blur", |controller| controller.blur(field))
            .map(|((), view)| view)
    }

    /// Wheel over a field, returning whether the event was consumed
    pub fn scroll_field(&self, field: Field, delta_y: f64) -> Result<(bool, TimerView), String> {
        self.apply("wheel", |controller| controller.scroll(field, delta_y))
    }

    /// Deliver one tick from the schedule of `generation`
    pub fn tick(&self, generation: u64) -> Result<Phase, String> {
        let mut timer = self.lock_timer()?;
        if timer.generation != generation {
            debug!("Ignoring stale tick from generation {}", generation);
            return Ok(Phase::Idle);
        }

        let phase = timer.controller.tick();
        self.publish(&timer);
        Ok(phase)
    }

    /// Get the current view
    pub fn get_view(&self) -> Result<TimerView, String> {
        self.lock_timer().map(|timer| timer.controller.view())
    }

    /// Whether a tick schedule is currently live
    pub fn is_ticking(&self) -> Result<bool, String> {
        self.lock_ticker().map(|ticker| ticker.is_live())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::SilentAlarm, tasks::TICK_PERIOD};

    fn app_state() -> Arc<AppState> {
        let alarm: Box<dyn Alarm> = Box::new(SilentAlarm::default());
        let controller = TimerController::new(100.0, true, alarm);
        Arc::new(AppState::new(0, "127.0.0.1".to_string(), controller, TICK_PERIOD))
    }

    fn enter_seconds(state: &AppState, seconds: &str) {
        state.edit_field(Field::Seconds, seconds).unwrap();
    }

    async fn advance(secs: u64) {
        tokio::time::sleep(Duration::from_millis(secs * 1000 + 100)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_runs_to_expiry() {
        let state = app_state();
        enter_seconds(&state, "05");

        let (started, view) = state.start().unwrap();
        assert!(started);
        assert_eq!(view.phase, Phase::Running);

        advance(3).await;
        assert_eq!(state.get_view().unwrap().remaining_seconds, 2);

        advance(2).await;
        let view = state.get_view().unwrap();
        assert_eq!(view.phase, Phase::Expired);
        assert_eq!(view.title, "00:00:00");
        assert!(view.alarm_playing);
        assert!(!state.is_ticking().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticks_and_start_resumes() {
        let state = app_state();
        state.edit_field(Field::Minutes, "1").unwrap();
        state.start().unwrap();

        advance(10).await;
        let (stopped, view) = state.stop().unwrap();
        assert!(stopped);
        assert_eq!(view.remaining_seconds, 50);

        advance(5).await;
        assert_eq!(state.get_view().unwrap().remaining_seconds, 50);
        assert!(!state.is_ticking().unwrap());

        state.start().unwrap();
        advance(2).await;
        assert_eq!(state.get_view().unwrap().remaining_seconds, 48);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_start_keeps_single_schedule() {
        let state = app_state();
        enter_seconds(&state, "10");
        state.start().unwrap();
        let (started, _) = state.start().unwrap();
        assert!(!started);

        advance(3).await;
        assert_eq!(state.get_view().unwrap().remaining_seconds, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_tick_is_ignored() {
        let state = app_state();
        enter_seconds(&state, "10");
        state.start().unwrap();

        assert_eq!(state.tick(0).unwrap(), Phase::Idle);
        assert_eq!(state.get_view().unwrap().remaining_seconds, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_duration_and_publishes() {
        let state = app_state();
        let mut view_rx = state.view_tx.subscribe();
        enter_seconds(&state, "10");
        state.start().unwrap();
        advance(4).await;
        state.stop().unwrap();

        let view = state.reset().unwrap();
        assert_eq!(view.phase, Phase::Idle);
        assert_eq!(view.title, "00:00:10");
        assert_eq!(view.progress.offset, 0.0);

        assert!(view_rx.has_changed().unwrap());
        assert_eq!(view_rx.borrow_and_update().title, "00:00:10");
        assert_eq!(state.get_last_action().0.as_deref(), Some("reset"));
    }

    #[tokio::test(start_paused = true)]
    async fn last_published_view_follows_reset() {
        let state = app_state();
        let mut view_rx = state.view_tx.subscribe();
        state.edit_field(Field::Minutes, "02").unwrap();
        state.start().unwrap();
        advance(3).await;
        assert_eq!(view_rx.borrow_and_update().title, "00:01:57");

        state.reset().unwrap();
        advance(3).await;

        assert_eq!(view_rx.borrow_and_update().title, "00:02:00");
        assert_eq!(state.view_tx.borrow().title, state.get_view().unwrap().title);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn reset_racing_fast_ticks_publishes_final_view() {
        let alarm: Box<dyn Alarm> = Box::new(SilentAlarm::default());
        let controller = TimerController::new(100.0, true, alarm);
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            controller,
            Duration::from_micros(1),
        ));
        state.edit_field(Field::Hours, "99").unwrap();

        for _ in 0..200 {
            state.start().unwrap();
            tokio::time::sleep(Duration::from_micros(50)).await;
            state.reset().unwrap();
            tokio::time::sleep(Duration::from_micros(200)).await;

            let actual = state.get_view().unwrap();
            let published = state.view_tx.borrow().clone();
            assert_eq!(published, actual);
            assert_eq!(actual.title, "99:00:00");
        }
    }
}
