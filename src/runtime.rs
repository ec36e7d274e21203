use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TrialEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source is gone; no further input can arrive
    Closed,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait TrialEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TrialEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TrialEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        // dropping `tx` when this thread ends is what makes the runner report Closed
        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(ev) => match translate(ev) {
                    Some(evt) => evt,
                    None => continue,
                },
                Err(e) => {
                    log::error!("terminal event reader stopped: {e}");
                    break;
                }
            };

            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

/// Maps a terminal event to the events the trial reacts to.
///
/// Key releases (reported by terminals with the kitty protocol) are dropped so a
/// keystroke edits the field once; mouse, focus and paste events are ignored.
pub fn translate(ev: CtEvent) -> Option<TrialEvent> {
    match ev {
        CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(TrialEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(TrialEvent::Resize),
        _ => None,
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrialEvent, RecvTimeoutError> {
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

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TrialEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TrialEvent>) -> Self {
        Self { rx }
    }
}

impl TrialEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TrialEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: TrialEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TrialEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, Tick on timeout,
    /// or Closed once the source has hung up.
    pub fn step(&self) -> TrialEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TrialEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => {
                log::warn!("event source disconnected");
                TrialEvent::Closed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::mpsc;

    #[test]
    fn translate_keeps_presses_and_repeats() {
        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(matches!(
            translate(CtEvent::Key(press)),
            Some(TrialEvent::Key(k)) if k.code == KeyCode::Char('a')
        ));

        let repeat =
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Repeat);
        assert!(matches!(
            translate(CtEvent::Key(repeat)),
            Some(TrialEvent::Key(_))
        ));
    }

    #[test]
    fn translate_drops_releases_and_other_events() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert!(translate(CtEvent::Key(release)).is_none());
        assert!(translate(CtEvent::FocusGained).is_none());
        assert!(translate(CtEvent::FocusLost).is_none());
        assert!(matches!(
            translate(CtEvent::Resize(80, 24)),
            Some(TrialEvent::Resize)
        ));
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            TrialEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_returns_closed_when_disconnected() {
        let (tx, rx) = mpsc::channel::<TrialEvent>();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(100)),
        );

        // a hung-up source must never be reported as a tick
        for _ in 0..3 {
            assert!(matches!(runner.step(), TrialEvent::Closed));
        }
    }

    #[test]
    fn step_drains_queued_events_before_closed() {
        let (tx, rx) = mpsc::channel();
        tx.send(TrialEvent::Resize).unwrap();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(100)),
        );

        assert!(matches!(runner.step(), TrialEvent::Resize));
        assert!(matches!(runner.step(), TrialEvent::Closed));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TrialEvent::Resize).unwrap();
        tx.send(TrialEvent::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            TrialEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
        match runner.step() {
            TrialEvent::Key(key) => assert_eq!(key.code, KeyCode::Char('x')),
            _ => panic!("expected Key event"),
        }
    }
}
