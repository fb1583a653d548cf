use std::io::{self, Write};
use std::process::{Command, Stdio};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinSound {
    Bell,
    Chime,
    Beep,
    Ding,
}

impl BuiltinSound {
    pub const ALL: [BuiltinSound; 4] = [
        BuiltinSound::Bell,
        BuiltinSound::Chime,
        BuiltinSound::Beep,
        BuiltinSound::Ding,
    ];

    pub fn url(&self) -> &'static str {
        match self {
            BuiltinSound::Bell => "https://www.soundjay.com/buttons/sounds/button-16.mp3",
            BuiltinSound::Chime => "https://www.soundjay.com/buttons/sounds/button-7.mp3",
            BuiltinSound::Beep => "https://www.soundjay.com/buttons/sounds/beep-07a.mp3",
            BuiltinSound::Ding => "https://www.soundjay.com/buttons/sounds/button-4.mp3",
        }
    }
}

/// The sound played when a mode runs out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sound {
    Builtin(BuiltinSound),
    /// A user supplied file path or URL
    Custom(String),
}

impl Sound {
    /// Identifier handed to the player command
    pub fn resource(&self) -> &str {
        match self {
            Sound::Builtin(b) => b.url(),
            Sound::Custom(r) => r,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Sound::Builtin(b) => b.to_string(),
            Sound::Custom(r) => format!("Custom ({r})"),
        }
    }

    /// Next entry in the selector; a custom sound comes back around to the first builtin
    pub fn next(&self) -> Sound {
        match self {
            Sound::Builtin(b) => {
                let idx = BuiltinSound::ALL.iter().position(|s| s == b).unwrap_or(0);
                Sound::Builtin(BuiltinSound::ALL[(idx + 1) % BuiltinSound::ALL.len()])
            }
            Sound::Custom(_) => Sound::Builtin(BuiltinSound::ALL[0]),
        }
    }
}

impl Default for Sound {
    fn default() -> Self {
        Sound::Builtin(BuiltinSound::Bell)
    }
}

/// Plays an alert once. Must not block and must not fail the caller.
pub trait AlertPlayer {
    fn play(&mut self, sound: &Sound);
}

/// Spawns an external audio command with the sound resource as its last argument
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    /// Build from a shell-like command line, e.g. `mpv --no-video --really-quiet`
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, sound: &Sound) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(sound.resource())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl AlertPlayer for CommandPlayer {
    fn play(&mut self, sound: &Sound) {
        match self.command(sound).spawn() {
            Ok(mut child) => {
                debug!(program = %self.program, pid = child.id(), sound = %sound.name(), "alert spawned");
                // reaped off the UI thread so finished players leave no zombie
                std::thread::spawn(move || child.wait());
            }
            Err(err) => warn!(program = %self.program, %err, "alert player failed to start"),
        }
    }
}

/// Rings the terminal bell
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AlertPlayer for TerminalBell {
    fn play(&mut self, _sound: &Sound) {
        let mut out = io::stdout();
        if let Err(err) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            warn!(%err, "terminal bell failed");
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl AlertPlayer for SilentPlayer {
    fn play(&mut self, _sound: &Sound) {}
}

/// Records every request; used by tests and headless runs
#[derive(Debug, Default, Clone)]
pub struct RecordingPlayer {
    pub played: Vec<Sound>,
}

impl AlertPlayer for RecordingPlayer {
    fn play(&mut self, sound: &Sound) {
        self.played.push(sound.clone());
    }
}

/// Players able to fetch the builtin sounds over https, in order of preference
const PLAYER_CANDIDATES: [&str; 2] = [
    "mpv --no-video --really-quiet",
    "ffplay -nodisp -autoexit -loglevel quiet",
];

/// First known audio command found on `PATH`
pub fn detect_player() -> Option<String> {
    let path = std::env::var_os("PATH")?;
    PLAYER_CANDIDATES
        .iter()
        .find(|line| {
            let program = line.split_whitespace().next().unwrap_or_default();
            std::env::split_paths(&path).any(|dir| dir.join(program).is_file())
        })
        .map(|line| line.to_string())
}

/// Player selected at startup
#[derive(Debug)]
pub enum Alert {
    Command(CommandPlayer),
    Bell(TerminalBell),
    Silent(SilentPlayer),
}

impl Alert {
    pub fn from_settings(enabled: bool, player: Option<&str>) -> Self {
        if !enabled {
            return Alert::Silent(SilentPlayer);
        }
        match player.and_then(CommandPlayer::from_command_line) {
            Some(cmd) => Alert::Command(cmd),
            None => Alert::Bell(TerminalBell),
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Alert::Silent(_))
    }
}

impl AlertPlayer for Alert {
    fn play(&mut self, sound: &Sound) {
        match self {
            Alert::Command(p) => p.play(sound),
            Alert::Bell(p) => p.play(sound),
            Alert::Silent(p) => p.play(sound),
        }
    }
}
