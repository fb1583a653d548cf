mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pomo::{
    alert::{self, Alert, BuiltinSound},
    app_dirs::AppDirs,
    background::BackgroundSlot,
    config::{Config, ConfigStore, FileConfigStore},
    controller::Controller,
    cycle::Transition,
    forms::{BackgroundForm, PlaylistForm, SettingsForm},
    logging,
    mode::Mode,
    playlist::{self, Playlist, PLAYLIST_KEY},
    runtime::{CrosstermEventSource, FixedTicker, PomoEvent, Runner, SecondTicker},
    store::{KeyValueStore, MemoryStore, SqliteStore},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::{info, warn};
use webbrowser::Browser;

/// focused pomodoro timer for the terminal
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "A pomodoro timer for the terminal: work, short break and long break modes, four sessions per round, an alert sound when a period ends, a selectable background and a remembered playlist."
)]
pub struct Cli {
    /// work period in minutes
    #[clap(short = 'w', long)]
    work: Option<u64>,

    /// short break in minutes
    #[clap(short = 's', long)]
    short_break: Option<u64>,

    /// long break in minutes
    #[clap(short = 'l', long)]
    long_break: Option<u64>,

    /// alert sound played when a period ends
    #[clap(long, value_enum)]
    sound: Option<BuiltinSound>,

    /// custom alert sound (file path or URL), replaces --sound
    #[clap(long)]
    sound_file: Option<String>,

    /// audio command used to play alerts, e.g. "mpv --no-video"
    #[clap(long)]
    player: Option<String>,

    /// never play alert sounds
    #[clap(long)]
    no_sound: bool,

    /// background preset id, image URL or local image path
    #[clap(short = 'b', long)]
    background: Option<String>,

    /// disable the log file
    #[clap(long)]
    no_log: bool,

    /// save the effective configuration and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    /// Layer command line flags over the stored configuration
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(work) = self.work {
            config.work_minutes = work;
        }
        if let Some(short_break) = self.short_break {
            config.short_break_minutes = short_break;
        }
        if let Some(long_break) = self.long_break {
            config.long_break_minutes = long_break;
        }
        if let Some(sound) = self.sound {
            config.sound = sound;
        }
        if self.sound_file.is_some() {
            config.custom_sound = self.sound_file.clone();
        }
        if self.player.is_some() {
            config.player = self.player.clone();
        }
        if self.no_sound {
            config.sound_enabled = false;
        }
        if self.background.is_some() {
            config.background = self.background.clone();
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Timer,
    Settings,
    Background,
    Playlist,
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub controller: Controller<SecondTicker, Alert>,
    pub state: AppState,
    pub background: BackgroundSlot,
    pub playlist: Playlist,
    pub store: Box<dyn KeyValueStore>,
    pub settings_form: SettingsForm,
    pub background_form: BackgroundForm,
    pub playlist_form: PlaylistForm,
    pub notice: Option<String>,
}

impl App {
    pub fn new(config: &Config, alert: Alert, store: Box<dyn KeyValueStore>) -> Self {
        let controller = Controller::new(
            config.durations(),
            SecondTicker::new(),
            alert,
            config.sound(),
        );

        let mut background = BackgroundSlot::new();
        let mut notice = None;
        if let Some(choice) = config.background.as_deref() {
            if let Err(err) = background.choose(choice) {
                warn!(%err, choice, "configured background rejected");
                notice = Some(format!("Background: {err}"));
            }
        }

        let playlist = store
            .get(PLAYLIST_KEY)
            .and_then(|saved| playlist::normalize(&saved).ok())
            .map(Playlist::new)
            .unwrap_or_default();

        Self {
            settings_form: SettingsForm::new(config.durations()),
            background_form: BackgroundForm::new(&background),
            playlist_form: PlaylistForm::default(),
            controller,
            state: AppState::Timer,
            background,
            playlist,
            store,
            notice,
        }
    }

    fn on_transition(&mut self, transition: Transition) {
        let next = transition.to.headline();
        self.notice = Some(match transition.from {
            Mode::Work => format!(
                "Session {} complete. {next} next.",
                transition.completed_sessions
            ),
            Mode::ShortBreak | Mode::LongBreak => format!("Break over. {next}."),
        });
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::Timer => return self.on_timer_key(key),
            AppState::Settings => self.on_settings_key(key),
            AppState::Background => self.on_background_key(key),
            AppState::Playlist => self.on_playlist_key(key),
        }
        Flow::Continue
    }

    fn on_timer_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char(' ') => self.controller.start_pause(),
            KeyCode::Char('r') => self.controller.reset(),
            KeyCode::Char('1') => self.controller.switch_mode(Mode::Work),
            KeyCode::Char('2') => self.controller.switch_mode(Mode::ShortBreak),
            KeyCode::Char('3') => self.controller.switch_mode(Mode::LongBreak),
            KeyCode::Char('a') => {
                let next = self.controller.sound().next();
                self.controller.set_sound(next);
            }
            KeyCode::Char('s') => {
                self.settings_form = SettingsForm::new(self.controller.cycle().durations());
                self.state = AppState::Settings;
            }
            KeyCode::Char('b') => {
                self.background_form = BackgroundForm::new(&self.background);
                self.state = AppState::Background;
            }
            KeyCode::Char('p') => {
                self.playlist_form = PlaylistForm::default();
                self.state = AppState::Playlist;
            }
            KeyCode::Char('o') => self.open_in_browser(self.playlist.url().to_string()),
            KeyCode::Char('O') => self.open_in_browser(self.background.current().reference()),
            _ => {}
        }
        Flow::Continue
    }

    fn on_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Timer,
            KeyCode::Tab | KeyCode::Down => self.settings_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.settings_form.prev_field(),
            KeyCode::Backspace => self.settings_form.backspace(),
            KeyCode::Char(c) => self.settings_form.insert(c),
            KeyCode::Enter => {
                self.controller
                    .apply_durations(self.settings_form.durations());
                self.state = AppState::Timer;
            }
            _ => {}
        }
    }

    fn on_background_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Timer,
            KeyCode::Down => self.background_form.next_preset(),
            KeyCode::Up => self.background_form.prev_preset(),
            KeyCode::Backspace => self.background_form.input.backspace(),
            KeyCode::Char(c) => self.background_form.input.insert(c),
            KeyCode::Enter => {
                if self.background_form.submit(&mut self.background).is_ok() {
                    info!(background = %self.background.current().label(), "background changed");
                    self.state = AppState::Timer;
                }
            }
            _ => {}
        }
    }

    fn on_playlist_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Timer,
            KeyCode::Backspace => self.playlist_form.input.backspace(),
            KeyCode::Char(c) => self.playlist_form.input.insert(c),
            KeyCode::Enter => {
                if let Ok(url) = self.playlist_form.submit(&mut self.playlist) {
                    if let Err(err) = self.store.set(PLAYLIST_KEY, &url) {
                        warn!(%err, "could not remember playlist");
                    }
                    self.state = AppState::Timer;
                }
            }
            _ => {}
        }
    }

    fn open_in_browser(&mut self, target: String) {
        if !Browser::is_available() {
            self.notice = Some(format!("No browser available. Open {target}"));
            return;
        }
        if let Err(err) = webbrowser::open(&target) {
            warn!(%err, %target, "browser launch failed");
            self.notice = Some(format!("Could not open browser: {err}"));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config_store = FileConfigStore::new();
    let config = cli.apply_to(config_store.load());

    if cli.write_config {
        config_store.save(&config)?;
        println!("wrote {}", config_store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if !cli.no_log {
        logging::init(&AppDirs::log_path());
    }

    let store: Box<dyn KeyValueStore> = match SqliteStore::new() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(%err, "state store unavailable, playlist will not be remembered");
            Box::new(MemoryStore::default())
        }
    };
    let player = config.player.clone().or_else(alert::detect_player);
    let alert = Alert::from_settings(config.sound_enabled, player.as_deref());
    info!(?alert, "starting");

    let mut app = App::new(&config, alert, store);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            PomoEvent::Tick => {
                let was_running = app.controller.cycle().is_running();
                if let Some(transition) = app.controller.on_ui_tick() {
                    app.on_transition(transition);
                }
                // redraw while counting down and once more when a period ends
                if was_running {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            PomoEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            PomoEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    let screen = ui::screen::current_screen(&app.state);
    screen.render(app, f);
}
