use crate::mode::{Mode, SESSIONS_PER_ROUND};
use tracing::debug;

pub const DEFAULT_WORK_SECS: u64 = 25 * 60;
pub const DEFAULT_SHORT_BREAK_SECS: u64 = 5 * 60;
pub const DEFAULT_LONG_BREAK_SECS: u64 = 15 * 60;

/// Largest minute count whose seconds still fit in a `u64`
pub const MAX_MINUTES: u64 = u64::MAX / 60;

/// Seconds configured for each mode. Every value is at least one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    work: u64,
    short_break: u64,
    long_break: u64,
}

impl Durations {
    pub fn new(work: u64, short_break: u64, long_break: u64) -> Self {
        Self {
            work: work.max(1),
            short_break: short_break.max(1),
            long_break: long_break.max(1),
        }
    }

    /// Build from whole minutes, raising anything below one minute to one
    /// minute and saturating at `MAX_MINUTES`
    pub fn from_minutes(work: u64, short_break: u64, long_break: u64) -> Self {
        let secs = |minutes: u64| minutes.clamp(1, MAX_MINUTES) * 60;
        Self::new(secs(work), secs(short_break), secs(long_break))
    }

    pub fn get(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    pub fn minutes(&self, mode: Mode) -> u64 {
        self.get(mode) / 60
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORK_SECS,
            DEFAULT_SHORT_BREAK_SECS,
            DEFAULT_LONG_BREAK_SECS,
        )
    }
}

/// Outcome of a natural expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub completed_sessions: u64,
}

/// Mode, countdown and session counting for one pomodoro run
#[derive(Debug, Clone)]
pub struct SessionCycle {
    mode: Mode,
    remaining_secs: u64,
    is_running: bool,
    completed_sessions: u64,
    durations: Durations,
}

impl SessionCycle {
    pub fn new(durations: Durations) -> Self {
        Self {
            mode: Mode::Work,
            remaining_secs: durations.get(Mode::Work),
            is_running: false,
            completed_sessions: 0,
            durations,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn total_secs(&self) -> u64 {
        self.durations.get(self.mode)
    }

    pub fn has_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// One elapsed second
    pub fn tick(&mut self) {
        if self.is_running && self.remaining_secs > 0 {
            self.remaining_secs -= 1;
        }
    }

    /// Advance to the next mode after the countdown reached zero.
    /// A completed work period counts as a session; every fourth one earns a long break.
    pub fn on_expire(&mut self) -> Transition {
        let from = self.mode;
        let next = match self.mode {
            Mode::Work => {
                self.completed_sessions += 1;
                if self.completed_sessions % SESSIONS_PER_ROUND == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                }
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Work,
        };
        self.enter(next);
        debug!(%from, to = %next, completed = self.completed_sessions, "mode expired");

        Transition {
            from,
            to: next,
            completed_sessions: self.completed_sessions,
        }
    }

    pub fn start_pause(&mut self) {
        if self.remaining_secs == 0 {
            return;
        }
        self.is_running = !self.is_running;
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining_secs = self.durations.get(self.mode);
    }

    /// Manual override; never counts as a completion
    pub fn switch_mode(&mut self, target: Mode) {
        self.enter(target);
    }

    /// Replace the durations. A running countdown keeps its remaining time
    /// until the next mode change or reset.
    pub fn apply_durations(&mut self, durations: Durations) {
        self.durations = Durations::new(
            durations.get(Mode::Work),
            durations.get(Mode::ShortBreak),
            durations.get(Mode::LongBreak),
        );
        if self.is_running {
            self.remaining_secs = self.remaining_secs.min(self.total_secs());
        } else {
            self.remaining_secs = self.total_secs();
        }
    }

    pub fn round_number(&self) -> i64 {
        let completed = self.completed_sessions as i64;
        let per_round = SESSIONS_PER_ROUND as i64;
        match self.mode {
            Mode::Work => completed.div_euclid(per_round) + 1,
            Mode::ShortBreak | Mode::LongBreak => (completed - 1).div_euclid(per_round) + 1,
        }
    }

    pub fn session_in_round(&self) -> u64 {
        match self.completed_sessions % SESSIONS_PER_ROUND {
            0 => SESSIONS_PER_ROUND,
            n => n,
        }
    }

    /// Share of the current mode still left, in [0, 1]
    pub fn progress_fraction(&self) -> f64 {
        self.remaining_secs as f64 / self.total_secs() as f64
    }

    fn enter(&mut self, mode: Mode) {
        self.mode = mode;
        self.remaining_secs = self.durations.get(mode);
        self.is_running = false;
    }
}

impl Default for SessionCycle {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
