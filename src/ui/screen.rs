use ratatui::Frame;

use crate::{
    ui::forms::{render_background, render_playlist, render_settings},
    App, AppState,
};

/// A UI Screen boundary: draws one application state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Timer face
pub struct TimerScreen;

impl Screen for TimerScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Duration form drawn over the timer face
pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        TimerScreen.render(app, f);
        render_settings(app, f);
    }
}

pub struct BackgroundScreen;

impl Screen for BackgroundScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        TimerScreen.render(app, f);
        render_background(app, f);
    }
}

pub struct PlaylistScreen;

impl Screen for PlaylistScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        TimerScreen.render(app, f);
        render_playlist(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Timer => Box::new(TimerScreen),
        AppState::Settings => Box::new(SettingsScreen),
        AppState::Background => Box::new(BackgroundScreen),
        AppState::Playlist => Box::new(PlaylistScreen),
    }
}
