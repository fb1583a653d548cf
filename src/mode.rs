use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Work sessions per long-break cycle
pub const SESSIONS_PER_ROUND: u64 = 4;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Label shown on the mode tabs
    pub fn tab_label(&self) -> &'static str {
        match self {
            Mode::Work => "Pomodoro",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Headline shown above the countdown
    pub fn headline(&self) -> &'static str {
        match self {
            Mode::Work => "Time to Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Mode::Work => 0,
            Mode::ShortBreak => 1,
            Mode::LongBreak => 2,
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Work)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Work.tab_label(), "Pomodoro");
        assert_eq!(Mode::ShortBreak.headline(), "Short Break");
        assert_eq!(Mode::Work.headline(), "Time to Focus");
    }

    #[test]
    fn test_mode_index_matches_all_order() {
        for (i, mode) in Mode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&Mode::LongBreak).unwrap();
        assert_eq!(json, "\"long_break\"");
        let back: Mode = serde_json::from_str("\"short_break\"").unwrap();
        assert_eq!(back, Mode::ShortBreak);
    }

    #[test]
    fn test_is_break() {
        assert!(!Mode::Work.is_break());
        assert!(Mode::ShortBreak.is_break());
        assert!(Mode::LongBreak.is_break());
    }
}
