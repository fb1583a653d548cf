use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::background::{BackgroundSlot, PRESETS};
use crate::cycle::{Durations, MAX_MINUTES};
use crate::error::{BackgroundError, PlaylistError};
use crate::mode::Mode;
use crate::playlist::Playlist;

/// Single line text input
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn insert(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Terminal columns taken by the value, used to place the cursor
    pub fn width(&self) -> usize {
        self.value.width()
    }
}

/// Three minute fields for the mode durations
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub fields: [TextField; 3],
    pub focus: usize,
}

impl SettingsForm {
    pub fn new(current: Durations) -> Self {
        Self {
            fields: Mode::ALL.map(|m| TextField::with_value(current.minutes(m).to_string())),
            focus: 0,
        }
    }

    pub fn focused_mode(&self) -> Mode {
        Mode::ALL[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Digits only
    pub fn insert(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.fields[self.focus].insert(c);
        }
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].backspace();
    }

    /// Parse the fields as whole minutes. Blank or out-of-range input falls
    /// back to the one minute minimum.
    pub fn durations(&self) -> Durations {
        let [work, short_break, long_break] =
            self.fields.each_ref().map(|f| parse_minutes(f.value()));
        Durations::from_minutes(work, short_break, long_break)
    }
}

/// Whole minutes; digit strings too long for a `u64` saturate, anything else
/// is the one minute minimum
fn parse_minutes(input: &str) -> u64 {
    let input = input.trim();
    match input.parse::<u64>() {
        Ok(minutes) => minutes.clamp(1, MAX_MINUTES),
        Err(_) if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) => MAX_MINUTES,
        Err(_) => 1,
    }
}

/// Background picker: preset list plus a free-form URL/path input
#[derive(Debug, Default, Clone)]
pub struct BackgroundForm {
    pub selected: usize,
    pub input: TextField,
    pub error: Option<String>,
}

impl BackgroundForm {
    pub fn new(slot: &BackgroundSlot) -> Self {
        let selected = PRESETS
            .iter()
            .position(|p| p.id == slot.current().label())
            .unwrap_or(0);
        Self {
            selected,
            ..Self::default()
        }
    }

    pub fn next_preset(&mut self) {
        self.selected = (self.selected + 1) % PRESETS.len();
    }

    pub fn prev_preset(&mut self) {
        self.selected = (self.selected + PRESETS.len() - 1) % PRESETS.len();
    }

    /// Apply the typed input if any, otherwise the highlighted preset
    pub fn submit(&mut self, slot: &mut BackgroundSlot) -> Result<(), BackgroundError> {
        let result = if self.input.value().trim().is_empty() {
            slot.select_preset(&PRESETS[self.selected]);
            Ok(())
        } else {
            slot.choose(self.input.value())
        };
        match &result {
            Ok(()) => {
                self.input.clear();
                self.error = None;
            }
            Err(err) => {
                debug!(%err, "background input rejected");
                self.error = Some(err.to_string());
            }
        }
        result
    }
}

#[derive(Debug, Default, Clone)]
pub struct PlaylistForm {
    pub input: TextField,
    pub error: Option<String>,
}

impl PlaylistForm {
    /// Validate the input into `playlist`; on failure the old value stays
    pub fn submit(&mut self, playlist: &mut Playlist) -> Result<String, PlaylistError> {
        match playlist.update(self.input.value()) {
            Ok(url) => {
                let url = url.to_string();
                self.input.clear();
                self.error = None;
                Ok(url)
            }
            Err(err) => {
                debug!(%err, input = self.input.value(), "playlist input rejected");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::Background;
    use crate::playlist::DEFAULT_PLAYLIST_URL;

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::default();
        for c in "héllo".chars() {
            field.insert(c);
        }
        field.insert('\n');
        assert_eq!(field.value(), "héllo");
        assert_eq!(field.width(), 5);
        field.backspace();
        assert_eq!(field.value(), "héll");
    }

    #[test]
    fn test_settings_form_prefills_minutes() {
        let form = SettingsForm::new(Durations::default());
        let values: Vec<_> = form.fields.iter().map(|f| f.value().to_string()).collect();
        assert_eq!(values, vec!["25", "5", "15"]);
    }

    #[test]
    fn test_settings_form_clamps_to_one_minute() {
        let mut form = SettingsForm::new(Durations::default());
        form.fields[0] = TextField::with_value("0");
        form.fields[1] = TextField::default();
        form.fields[2] = TextField::with_value("45");
        let d = form.durations();
        assert_eq!(d.get(Mode::Work), 60);
        assert_eq!(d.get(Mode::ShortBreak), 60);
        assert_eq!(d.get(Mode::LongBreak), 2700);
    }

    #[test]
    fn test_settings_form_accepts_digits_only() {
        let mut form = SettingsForm::new(Durations::default());
        form.next_field();
        form.backspace();
        form.insert('x');
        form.insert('7');
        assert_eq!(form.focused_mode(), Mode::ShortBreak);
        assert_eq!(form.durations().get(Mode::ShortBreak), 420);
    }

    #[test]
    fn test_settings_focus_wraps() {
        let mut form = SettingsForm::new(Durations::default());
        form.prev_field();
        assert_eq!(form.focused_mode(), Mode::LongBreak);
        form.next_field();
        assert_eq!(form.focused_mode(), Mode::Work);
    }

    #[test]
    fn test_huge_minutes_do_not_overflow() {
        let mut form = SettingsForm::new(Durations::default());
        form.fields[0] = TextField::with_value("99999999999999999999");
        assert_eq!(form.durations().get(Mode::Work), MAX_MINUTES * 60);
        form.fields[0] = TextField::with_value(u64::MAX.to_string());
        assert_eq!(form.durations().get(Mode::Work), MAX_MINUTES * 60);
        form.fields[0] = TextField::with_value("12");
        assert_eq!(form.durations().get(Mode::Work), 720);
    }

    #[test]
    fn test_background_form_selects_preset() {
        let mut slot = BackgroundSlot::new();
        let mut form = BackgroundForm::new(&slot);
        assert_eq!(form.selected, 0);
        form.next_preset();
        form.next_preset();
        form.submit(&mut slot).unwrap();
        assert_eq!(slot.current(), &Background::Preset(&PRESETS[2]));

        let form = BackgroundForm::new(&slot);
        assert_eq!(form.selected, 2);
    }

    #[test]
    fn test_background_form_reports_errors() {
        let mut slot = BackgroundSlot::new();
        let mut form = BackgroundForm::new(&slot);
        form.input = TextField::with_value("/no/such/file.txt");
        assert!(form.submit(&mut slot).is_err());
        assert!(form.error.as_deref().unwrap().contains("must be an image"));
        assert_eq!(form.input.value(), "/no/such/file.txt");

        form.input = TextField::with_value("https://example.com/x.png");
        form.submit(&mut slot).unwrap();
        assert!(form.error.is_none());
        assert!(form.input.value().is_empty());
    }

    #[test]
    fn test_playlist_form_keeps_previous_on_error() {
        let mut playlist = Playlist::default();
        let mut form = PlaylistForm {
            input: TextField::with_value("not-a-url"),
            error: None,
        };
        assert!(form.submit(&mut playlist).is_err());
        assert!(form.error.is_some());
        assert_eq!(playlist.url(), DEFAULT_PLAYLIST_URL);

        form.input = TextField::with_value("spotify:playlist:abc123");
        let url = form.submit(&mut playlist).unwrap();
        assert!(url.ends_with("/abc123?utm_source=generator"));
        assert!(form.error.is_none());
    }
}
