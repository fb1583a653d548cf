use std::fs::File;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use pomo::alert::{RecordingPlayer, Sound};
use pomo::background::{Background, BackgroundSlot, MAX_UPLOAD_BYTES};
use pomo::controller::Controller;
use pomo::cycle::{Durations, Transition};
use pomo::error::BackgroundError;
use pomo::mode::Mode;
use pomo::playlist::{self, Playlist, PLAYLIST_KEY};
use pomo::runtime::{FixedTicker, ManualTicker, PomoEvent, Runner, TestEventSource, TickSource};
use pomo::store::{KeyValueStore, SqliteStore};

type TestController = Controller<ManualTicker, RecordingPlayer>;

fn controller(work: u64, short_break: u64, long_break: u64) -> TestController {
    Controller::new(
        Durations::new(work, short_break, long_break),
        ManualTicker::new(),
        RecordingPlayer::default(),
        Sound::default(),
    )
}

fn space() -> PomoEvent {
    PomoEvent::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE))
}

/// Run a started period to its end, one second at a time
fn finish_period(c: &mut TestController) -> Transition {
    if !c.cycle().is_running() {
        c.start_pause();
    }
    loop {
        c.ticks_mut().advance(1);
        if let Some(t) = c.on_ui_tick() {
            return t;
        }
    }
}

// Headless integration using the internal runtime without a TTY.
// Space presses and one-second ticks drive a full round through the controller.
#[test]
fn headless_full_round_reaches_long_break() {
    let mut c = controller(3, 2, 4);

    let (tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(1));
    let runner = Runner::new(es, ticker);

    tx.send(space()).unwrap();

    let mut transitions = Vec::new();
    for _ in 0..1000u32 {
        match runner.step() {
            PomoEvent::Tick => {
                c.ticks_mut().advance(1);
                if let Some(t) = c.on_ui_tick() {
                    transitions.push(t);
                    if t.to == Mode::LongBreak {
                        break;
                    }
                    // every period needs an explicit start
                    assert!(!c.cycle().is_running());
                    tx.send(space()).unwrap();
                }
            }
            PomoEvent::Resize => {}
            PomoEvent::Key(key) => {
                if key.code == KeyCode::Char(' ') {
                    c.start_pause();
                }
            }
        }
    }

    let modes: Vec<(Mode, Mode)> = transitions.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(
        modes,
        vec![
            (Mode::Work, Mode::ShortBreak),
            (Mode::ShortBreak, Mode::Work),
            (Mode::Work, Mode::ShortBreak),
            (Mode::ShortBreak, Mode::Work),
            (Mode::Work, Mode::ShortBreak),
            (Mode::ShortBreak, Mode::Work),
            (Mode::Work, Mode::LongBreak),
        ]
    );
    assert_eq!(c.cycle().completed_sessions(), 4);
    assert_eq!(c.cycle().mode(), Mode::LongBreak);
    assert_eq!(c.cycle().remaining_secs(), 4);
    assert!(!c.ticks().is_armed());
    assert_eq!(c.alert().played.len(), 7);
}

#[test]
fn long_break_returns_to_work_and_next_round() {
    let mut c = controller(1, 1, 1);
    for _ in 0..4 {
        finish_period(&mut c);
        if c.cycle().mode() != Mode::LongBreak {
            finish_period(&mut c);
        }
    }
    assert_eq!(c.cycle().mode(), Mode::LongBreak);
    assert_eq!(c.cycle().round_number(), 1);
    assert_eq!(c.cycle().session_in_round(), 4);

    let t = finish_period(&mut c);
    assert_eq!((t.from, t.to), (Mode::LongBreak, Mode::Work));
    assert_eq!(c.cycle().completed_sessions(), 4);
    assert_eq!(c.cycle().round_number(), 2);
    assert_eq!(c.cycle().session_in_round(), 4);

    finish_period(&mut c);
    assert_eq!(c.cycle().mode(), Mode::ShortBreak);
    assert_eq!(c.cycle().completed_sessions(), 5);
    assert_eq!(c.cycle().round_number(), 2);
    assert_eq!(c.cycle().session_in_round(), 1);
}

#[test]
fn manual_switches_never_count_as_sessions() {
    let mut c = controller(60, 30, 90);
    c.start_pause();
    c.ticks_mut().advance(59);
    assert_eq!(c.on_ui_tick(), None);

    for mode in [Mode::ShortBreak, Mode::LongBreak, Mode::Work, Mode::LongBreak] {
        c.switch_mode(mode);
        assert_eq!(c.cycle().mode(), mode);
        assert!(!c.cycle().is_running());
        assert!(!c.ticks().is_armed());
    }
    assert_eq!(c.cycle().completed_sessions(), 0);
    assert_eq!(c.cycle().remaining_secs(), 90);
    assert!(c.alert().played.is_empty());
}

#[test]
fn paused_time_does_not_elapse() {
    let mut c = controller(10, 5, 5);
    c.start_pause();
    c.ticks_mut().advance(4);
    c.on_ui_tick();
    c.start_pause();
    c.ticks_mut().advance(100);
    assert_eq!(c.on_ui_tick(), None);
    assert_eq!(c.cycle().remaining_secs(), 6);

    c.reset();
    assert_eq!(c.cycle().remaining_secs(), 10);
    assert_eq!(c.cycle().mode(), Mode::Work);
}

#[test]
fn new_durations_apply_to_idle_timer() {
    let mut c = controller(1500, 300, 900);
    c.switch_mode(Mode::ShortBreak);
    c.apply_durations(Durations::from_minutes(50, 10, 20));
    assert_eq!(c.cycle().remaining_secs(), 600);
    assert_eq!(c.cycle().progress_fraction(), 1.0);

    let t = finish_period(&mut c);
    assert_eq!(t.to, Mode::Work);
    assert_eq!(c.cycle().remaining_secs(), 3000);
}

#[test]
fn playlist_links_normalize_to_embed_urls() {
    let expected = playlist::embed_url("37i9dQZF1DX4sWSpwq3LiO");
    for input in [
        "https://open.spotify.com/playlist/37i9dQZF1DX4sWSpwq3LiO",
        "https://open.spotify.com/playlist/37i9dQZF1DX4sWSpwq3LiO?si=abc",
        "  spotify:playlist:37i9dQZF1DX4sWSpwq3LiO  ",
    ] {
        assert_eq!(playlist::normalize(input).as_deref(), Ok(expected.as_str()));
    }

    let mut current = Playlist::default();
    let before = current.clone();
    assert!(current.update("https://example.com/album/123").is_err());
    assert_eq!(current, before);
}

#[test]
fn accepted_playlist_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");

    let mut current = Playlist::default();
    let url = current.update("spotify:playlist:abc123").unwrap().to_string();
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.set(PLAYLIST_KEY, &url).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    let restored = Playlist::new(store.get(PLAYLIST_KEY).unwrap());
    assert_eq!(restored, current);
}

fn image_of_size(dir: &tempfile::TempDir, name: &str, size: u64) -> std::path::PathBuf {
    let path = dir.path().join(name);
    File::create(&path).unwrap().set_len(size).unwrap();
    path
}

#[test]
fn background_upload_size_limit() {
    let dir = tempfile::tempdir().unwrap();
    let mut slot = BackgroundSlot::new();

    let big = image_of_size(&dir, "big.png", 16 * 1024 * 1024);
    match slot.select_file(&big) {
        Err(BackgroundError::TooLarge { size }) => assert_eq!(size, 16 * 1024 * 1024),
        other => panic!("expected TooLarge, got {other:?}"),
    }
    assert_eq!(slot.current(), &Background::default());

    let ok = image_of_size(&dir, "ok.jpg", 10 * 1024 * 1024);
    slot.select_file(&ok).unwrap();
    assert!(matches!(slot.current(), Background::Upload { .. }));

    let edge = image_of_size(&dir, "edge.gif", MAX_UPLOAD_BYTES);
    slot.select_file(&edge).unwrap();
    assert_eq!(slot.current().label(), "edge.gif");
}

#[test]
fn background_rejects_non_images() {
    let dir = tempfile::tempdir().unwrap();
    let mut slot = BackgroundSlot::new();
    let notes = image_of_size(&dir, "notes.txt", 10);
    let err = slot.select_file(&notes).unwrap_err();
    assert_eq!(err.to_string(), "File must be an image (JPG, PNG, GIF, etc.).");
}
