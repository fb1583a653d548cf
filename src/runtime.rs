use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::{debug, warn};

/// Interval at which the UI loop wakes up when no input arrives
pub const UI_TICK_MS: u64 = 100;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum PomoEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait PomoEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<PomoEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(PomoEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(PomoEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PomoEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(UI_TICK_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<PomoEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PomoEvent>) -> Self {
        Self { rx }
    }
}

impl PomoEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PomoEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: PomoEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: PomoEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> PomoEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => PomoEvent::Tick,
        }
    }
}

/// A once-per-second pulse that can be armed and disarmed.
///
/// The owner polls it from the UI loop; `poll` reports how many whole
/// seconds elapsed since the last poll while armed.
pub trait TickSource {
    fn arm(&mut self);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
    fn poll(&mut self) -> u32;
}

/// Wall-clock tick source anchored on `Instant`
#[derive(Debug)]
pub struct SecondTicker {
    period: Duration,
    anchor: Option<Instant>,
}

impl SecondTicker {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            anchor: None,
        }
    }
}

impl Default for SecondTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SecondTicker {
    fn arm(&mut self) {
        // never two pulses at once
        if self.anchor.is_some() {
            self.disarm();
        }
        self.anchor = Some(Instant::now());
        debug!("tick source armed");
    }

    fn disarm(&mut self) {
        if self.anchor.take().is_some() {
            debug!("tick source disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.anchor.is_some()
    }

    fn poll(&mut self) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        let elapsed = anchor.elapsed();
        let whole = (elapsed.as_nanos() / self.period.as_nanos()) as u32;
        if whole > 0 {
            self.anchor = Some(anchor + self.period * whole);
        }
        whole
    }
}

/// Deterministic tick source: seconds are injected with `advance`
#[derive(Debug, Default)]
pub struct ManualTicker {
    armed: bool,
    pending: u32,
    pub arm_count: usize,
    pub disarm_count: usize,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `secs` elapsed seconds; ignored while disarmed
    pub fn advance(&mut self, secs: u32) {
        if self.armed {
            self.pending += secs;
        }
    }
}

impl TickSource for ManualTicker {
    fn arm(&mut self) {
        if self.armed {
            self.disarm();
        }
        self.armed = true;
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        if self.armed {
            self.armed = false;
            self.pending = 0;
            self.disarm_count += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn poll(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}
