use tracing::{debug, info};

use crate::alert::{AlertPlayer, Sound};
use crate::cycle::{Durations, SessionCycle, Transition};
use crate::mode::Mode;
use crate::runtime::TickSource;

/// Drives a `SessionCycle` from a tick source and sounds the alert on expiry.
///
/// The tick source is armed exactly while the cycle is running.
pub struct Controller<T: TickSource, A: AlertPlayer> {
    cycle: SessionCycle,
    ticks: T,
    alert: A,
    sound: Sound,
}

impl<T: TickSource, A: AlertPlayer> Controller<T, A> {
    pub fn new(durations: Durations, ticks: T, alert: A, sound: Sound) -> Self {
        Self {
            cycle: SessionCycle::new(durations),
            ticks,
            alert,
            sound,
        }
    }

    pub fn cycle(&self) -> &SessionCycle {
        &self.cycle
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }

    pub fn sound(&self) -> &Sound {
        &self.sound
    }

    pub fn set_sound(&mut self, sound: Sound) {
        debug!(sound = %sound.name(), "alert sound selected");
        self.sound = sound;
    }

    pub fn start_pause(&mut self) {
        self.cycle.start_pause();
        self.sync_ticks();
    }

    pub fn reset(&mut self) {
        self.cycle.reset();
        self.sync_ticks();
    }

    pub fn switch_mode(&mut self, target: Mode) {
        self.cycle.switch_mode(target);
        self.sync_ticks();
        debug!(mode = %target, "mode switched manually");
    }

    pub fn apply_durations(&mut self, durations: Durations) {
        self.cycle.apply_durations(durations);
        debug!(
            work = durations.get(Mode::Work),
            short_break = durations.get(Mode::ShortBreak),
            long_break = durations.get(Mode::LongBreak),
            deferred = self.cycle.is_running(),
            "durations applied"
        );
    }

    /// Consume elapsed seconds from the tick source. Returns the transition
    /// when the countdown ran out; seconds past expiry are dropped.
    pub fn on_ui_tick(&mut self) -> Option<Transition> {
        if !self.ticks.is_armed() {
            return None;
        }
        for _ in 0..self.ticks.poll() {
            self.cycle.tick();
            if self.cycle.has_expired() {
                return Some(self.on_expire());
            }
        }
        None
    }

    fn on_expire(&mut self) -> Transition {
        self.alert.play(&self.sound);
        let transition = self.cycle.on_expire();
        self.sync_ticks();
        if transition.from == Mode::Work {
            info!(
                completed = transition.completed_sessions,
                next = %transition.to,
                "work session completed"
            );
        } else {
            info!(next = %transition.to, "break finished");
        }
        transition
    }

    fn sync_ticks(&mut self) {
        if self.cycle.is_running() {
            // re-arming always starts from a clean pulse
            self.ticks.disarm();
            self.ticks.arm();
        } else {
            self.ticks.disarm();
        }
    }
}
