//! Countdown state machine
//!
//! [`TimerController`] owns the timer state, the input fields and every piece
//! of rendered output (title, progress ring, control set, sound icon). It is
//! purely synchronous: ticks are delivered from outside by whoever owns the
//! schedule, see [`crate::tasks::Ticker`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    fields::{clamp_raw_input, pad, Field, InputFields},
    ControlSet, Phase, ProgressRing, SoundIcon, TimerState,
};
use crate::services::Alarm;

/// Everything a renderer needs to draw the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub initial_duration_seconds: u32,
    pub last_confirmed_duration_seconds: u32,
    pub sound_enabled: bool,
    pub fields: InputFields,
    pub title: String,
    pub progress: ProgressRing,
    pub controls: ControlSet,
    pub sound_icon: SoundIcon,
    pub alarm_playing: bool,
}

pub struct TimerController<A: Alarm> {
    state: TimerState,
    fields: InputFields,
    title: String,
    progress: ProgressRing,
    controls: ControlSet,
    sound_icon: SoundIcon,
    alarm: A,
}

impl<A: Alarm> TimerController<A> {
    pub fn new(radius: f64, sound_enabled: bool, alarm: A) -> Self {
        let mut controller = Self {
            state: TimerState::new(sound_enabled),
            fields: InputFields::new(),
            title: String::new(),
            progress: ProgressRing::new(radius),
            controls: ControlSet::for_phase(Phase::Idle),
            sound_icon: SoundIcon::for_enabled(sound_enabled),
            alarm,
        };
        controller.render_time(0);
        controller
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn fields(&self) -> &InputFields {
        &self.fields
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn progress(&self) -> ProgressRing {
        self.progress
    }

    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    pub fn view(&self) -> TimerView {
        TimerView {
            phase: self.state.phase,
            remaining_seconds: self.state.remaining_seconds,
            initial_duration_seconds: self.state.initial_duration_seconds,
            last_confirmed_duration_seconds: self.state.last_confirmed_duration_seconds,
            sound_enabled: self.state.sound_enabled,
            fields: self.fields.clone(),
            title: self.title.clone(),
            progress: self.progress,
            controls: self.controls.clone(),
            sound_icon: self.sound_icon,
            alarm_playing: self.alarm.is_playing(),
        }
    }

    /// Keystroke edit of a field
    pub fn edit(&mut self, field: Field, text: &str) {
        let clamped = clamp_raw_input(field, text);
        debug!("Edit {}: {:?} -> {:?}", field.as_str(), text, clamped);
        self.fields.set(field, clamped);
        self.on_user_edit();
    }

    /// Focus left a field
    pub fn blur(&mut self, field: Field) {
        self.fields.format_field(field);
    }

    /// Wheel over a field. Returns whether the event was consumed, in which
    /// case the page should not scroll.
    pub fn scroll(&mut self, field: Field, delta_y: f64) -> bool {
        if self.state.is_running() {
            return false;
        }

        let (min, max) = field.bounds();
        let mut value = i64::from(self.fields.value(field));
        if delta_y < 0.0 {
            value += 1;
        } else if delta_y > 0.0 {
            value -= 1;
        }
        let value = value.clamp(i64::from(min), i64::from(max)) as u32;

        debug!("Scroll {} to {}", field.as_str(), value);
        self.fields.set(field, pad(value));
        self.on_user_edit();
        true
    }

    /// Any user edit outside a running countdown discards the cycle snapshot,
    /// paused countdowns included.
    fn on_user_edit(&mut self) {
        if !self.state.is_running() {
            self.state.clear_cycle();
        }
    }

    pub fn read_total_seconds(&mut self) -> u32 {
        self.fields.format_all();
        self.fields.total_seconds()
    }

    pub fn render_time(&mut self, total_seconds: u32) {
        self.fields.write_total(total_seconds);
        self.title = self.fields.title();
    }

    fn update_progress(&mut self) {
        if let Some(ratio) = self.state.remaining_ratio() {
            self.progress.set_ratio(ratio);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.controls = ControlSet::for_phase(phase);
    }

    /// Start or resume. Returns `true` when the timer is now running because
    /// of this call.
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }

        if !self.state.has_cycle() {
            let total = self.read_total_seconds();
            if total == 0 {
                debug!("Start ignored, duration is zero");
                return false;
            }
            self.state.confirm(total);
            info!("Timer started for {}s", total);
        } else {
            info!("Timer resumed with {}s remaining", self.state.remaining_seconds);
        }

        self.set_phase(Phase::Running);
        true
    }

    /// One second elapsed. Returns the phase afterwards.
    pub fn tick(&mut self) -> Phase {
        if !self.state.is_running() {
            return self.state.phase;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.render_time(self.state.remaining_seconds);
        self.update_progress();
        debug!("Tick, {}s remaining", self.state.remaining_seconds);

        if self.state.remaining_seconds == 0 {
            self.state.clear_cycle();
            self.render_time(0);
            self.progress.empty();

            if self.state.sound_enabled {
                self.alarm.rewind();
                self.alarm.play();
            }

            info!("Timer expired");
            self.set_phase(Phase::Expired);
        }

        self.state.phase
    }

    /// Pause a running countdown. Returns `true` if it was running.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        info!("Timer paused with {}s remaining", self.state.remaining_seconds);
        self.set_phase(Phase::Paused);
        true
    }

    /// Silence the alarm and go back to the last confirmed duration
    pub fn reset(&mut self) {
        self.alarm.pause();
        self.alarm.rewind();

        let confirmed = self.state.last_confirmed_duration_seconds;
        if confirmed > 0 {
            self.state.initial_duration_seconds = confirmed;
            self.state.remaining_seconds = confirmed;
            self.render_time(confirmed);
            self.progress.fill();
        }

        info!("Timer reset to {}s", confirmed);
        self.set_phase(Phase::Idle);
    }

    /// Flip the sound flag. Returns the new value.
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.state.sound_enabled;
        self.state.sound_enabled = enabled;
        self.sound_icon = SoundIcon::for_enabled(enabled);

        if !enabled {
            self.alarm.pause();
            self.alarm.rewind();
        }

        info!("Sound {}", if enabled { "enabled" } else { "disabled" });
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SilentAlarm;
    use crate::state::Action;

    fn controller() -> TimerController<SilentAlarm> {
        TimerController::new(100.0, true, SilentAlarm::default())
    }

    fn enter(c: &mut TimerController<SilentAlarm>, h: &str, m: &str, s: &str) {
        c.edit(Field::Hours, h);
        c.edit(Field::Minutes, m);
        c.edit(Field::Seconds, s);
    }

    #[test]
    fn starts_idle_at_zero() {
        let c = controller();

        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.title(), "00:00:00");
        assert_eq!(c.progress().offset, 0.0);
        assert_eq!(c.view().controls.actions(), vec![Action::Start]);
    }

    #[test]
    fn zero_duration_start_is_ignored() {
        let mut c = controller();
        enter(&mut c, "", "0", "00");

        assert!(!c.start());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.state().last_confirmed_duration_seconds, 0);
    }

    #[test]
    fn read_total_formats_fields() {
        let mut c = controller();
        enter(&mut c, "1", "2", "3");

        assert_eq!(c.read_total_seconds(), 3723);
        assert_eq!(c.fields().title(), "01:02:03");
    }

    #[test]
    fn five_second_countdown_expires_and_rings() {
        let mut c = controller();
        enter(&mut c, "00", "00", "05");
        assert!(c.start());

        for expected in (1..5).rev() {
            assert_eq!(c.tick(), Phase::Running);
            assert_eq!(c.state().remaining_seconds, expected);
        }
        assert_eq!(c.tick(), Phase::Expired);

        assert_eq!(c.title(), "00:00:00");
        assert_eq!(c.state().initial_duration_seconds, 0);
        assert_eq!(c.progress().offset, c.progress().circumference);
        assert_eq!(c.alarm().plays, 1);
        assert!(c.alarm().is_playing());
        assert_eq!(c.view().controls.actions(), vec![Action::Reset]);
    }

    #[test]
    fn expiry_is_silent_when_sound_off() {
        let mut c = controller();
        c.toggle_sound();
        enter(&mut c, "00", "00", "01");
        c.start();

        assert_eq!(c.tick(), Phase::Expired);
        assert_eq!(c.alarm().plays, 0);
    }

    #[test]
    fn progress_tracks_remaining_ratio() {
        let mut c = controller();
        enter(&mut c, "00", "00", "04");
        c.start();
        c.tick();

        let ring = c.progress();
        assert!((ring.offset - 0.25 * ring.circumference).abs() < 1e-9);
    }

    #[test]
    fn pause_keeps_remaining_and_resume_continues() {
        let mut c = controller();
        enter(&mut c, "00", "01", "00");
        c.start();
        for _ in 0..10 {
            c.tick();
        }

        assert!(c.stop());
        assert_eq!(c.phase(), Phase::Paused);
        assert_eq!(c.state().remaining_seconds, 50);
        assert_eq!(c.tick(), Phase::Paused);
        assert_eq!(c.state().remaining_seconds, 50);

        assert!(c.start());
        c.tick();
        assert_eq!(c.state().remaining_seconds, 49);
        assert_eq!(c.state().initial_duration_seconds, 60);
    }

    #[test]
    fn reset_restores_confirmed_duration() {
        let mut c = controller();
        enter(&mut c, "00", "00", "10");
        c.start();
        c.tick();
        c.tick();
        c.stop();
        c.reset();

        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.title(), "00:00:10");
        assert_eq!(c.state().remaining_seconds, 10);
        assert_eq!(c.progress().offset, 0.0);
        assert_eq!(c.view().controls.actions(), vec![Action::Start]);

        // restored cycle starts without re-reading the fields
        assert!(c.start());
        assert_eq!(c.state().remaining_seconds, 10);
    }

    #[test]
    fn reset_after_expiry_silences_alarm() {
        let mut c = controller();
        enter(&mut c, "00", "00", "01");
        c.start();
        c.tick();
        c.reset();

        assert!(!c.alarm().is_playing());
        assert!(c.alarm().rewinds >= 2);
        assert_eq!(c.title(), "00:00:01");
    }

    #[test]
    fn reset_without_history_only_renders_start() {
        let mut c = controller();
        c.reset();

        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.title(), "00:00:00");
        assert_eq!(c.state().initial_duration_seconds, 0);
    }

    #[test]
    fn editing_while_paused_discards_countdown() {
        let mut c = controller();
        enter(&mut c, "00", "00", "30");
        c.start();
        c.tick();
        c.stop();
        c.edit(Field::Seconds, "20");

        assert_eq!(c.phase(), Phase::Paused);
        assert_eq!(c.state().initial_duration_seconds, 0);
        assert_eq!(c.state().remaining_seconds, 0);

        c.start();
        assert_eq!(c.state().remaining_seconds, 20);
        assert_eq!(c.state().last_confirmed_duration_seconds, 20);
    }

    #[test]
    fn scrolling_while_paused_discards_countdown() {
        let mut c = controller();
        enter(&mut c, "00", "00", "30");
        c.start();
        for _ in 0..5 {
            c.tick();
        }
        c.stop();

        assert!(c.scroll(Field::Seconds, -1.0));
        assert_eq!(c.fields().seconds, "26");
        assert_eq!(c.state().initial_duration_seconds, 0);
        assert_eq!(c.state().remaining_seconds, 0);

        assert!(c.start());
        assert_eq!(c.state().initial_duration_seconds, 26);
        assert_eq!(c.state().last_confirmed_duration_seconds, 26);
    }

    #[test]
    fn editing_while_running_keeps_countdown() {
        let mut c = controller();
        enter(&mut c, "00", "00", "30");
        c.start();
        c.edit(Field::Minutes, "5");

        assert_eq!(c.state().initial_duration_seconds, 30);
        assert_eq!(c.state().remaining_seconds, 30);
    }

    #[test]
    fn scroll_adjusts_within_bounds() {
        let mut c = controller();

        assert!(c.scroll(Field::Minutes, -120.0));
        assert_eq!(c.fields().minutes, "01");
        assert!(c.scroll(Field::Seconds, 53.0));
        assert_eq!(c.fields().seconds, "00");

        c.edit(Field::Hours, "99");
        c.scroll(Field::Hours, -1.0);
        assert_eq!(c.fields().hours, "99");
        c.edit(Field::Minutes, "59");
        c.scroll(Field::Minutes, -1.0);
        assert_eq!(c.fields().minutes, "59");
    }

    #[test]
    fn scroll_is_rejected_while_running() {
        let mut c = controller();
        enter(&mut c, "00", "00", "30");
        c.start();

        assert!(!c.scroll(Field::Seconds, -1.0));
        assert_eq!(c.fields().seconds, "30");
        assert_eq!(c.state().remaining_seconds, 30);
    }

    #[test]
    fn toggling_sound_off_stops_alarm() {
        let mut c = controller();
        enter(&mut c, "00", "00", "01");
        c.start();
        c.tick();
        assert!(c.alarm().is_playing());

        assert!(!c.toggle_sound());
        assert!(!c.alarm().is_playing());
        assert_eq!(c.view().sound_icon, SoundIcon::VolumeXmark);
        assert_eq!(c.phase(), Phase::Expired);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut c = controller();
        enter(&mut c, "00", "00", "03");
        c.start();
        c.tick();

        assert!(!c.start());
        assert_eq!(c.state().remaining_seconds, 2);
    }
}
