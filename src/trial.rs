use rand::Rng;

use crate::catalog::SentenceCatalog;
use crate::metrics::{self, CharStatus};
use crate::session::{Phase, SessionState};

/// What a call to [`TypingTrial::on_text_changed`] did to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Text recorded, phase unchanged
    None,
    /// First character typed; the timer is running
    Started,
    /// Typed text matches the reference
    Completed { wpm: u32, new_best: bool },
    /// Session already completed; input ignored
    Rejected,
}

/// One reference sentence and the user's attempt at it.
///
/// The best WPM survives across sessions for as long as the trial lives.
#[derive(Debug)]
pub struct TypingTrial {
    catalog: SentenceCatalog,
    reference: String,
    word_count: usize,
    pub session_state: SessionState,
    best_wpm: u32,
}

impl TypingTrial {
    /// Creates the trial and draws its first sentence
    pub fn new<R: Rng + ?Sized>(catalog: SentenceCatalog, rng: &mut R) -> Self {
        let mut trial = Self {
            catalog,
            reference: String::new(),
            word_count: 0,
            session_state: SessionState::default(),
            best_wpm: 0,
        };
        trial.start_new_session(rng);
        trial
    }

    /// Draws a new sentence and discards all progress of the current one
    pub fn start_new_session<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reference = self.catalog.pick(rng).to_string();
        self.reset_session();
    }

    /// Starts over on the same sentence
    pub fn restart_session(&mut self) {
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.word_count = metrics::word_count(&self.reference);
        self.session_state = SessionState::default();
        log::info!(
            "new session: {} words, \"{}\"",
            self.word_count,
            self.reference
        );
    }

    /// Records the full content of the input field
    pub fn on_text_changed(&mut self, input: &str, now_ms: u64) -> Transition {
        if self.session_state.phase == Phase::Completed {
            log::debug!("input rejected, session already completed");
            return Transition::Rejected;
        }

        self.session_state.typed_text = input.to_string();

        let mut transition = Transition::None;

        if self.session_state.phase == Phase::NotStarted && input.chars().count() == 1 {
            self.session_state.phase = Phase::InProgress;
            self.session_state.started_at_ms = Some(now_ms);
            transition = Transition::Started;
        }

        if input == self.reference {
            transition = self.complete(now_ms);
        }

        transition
    }

    fn complete(&mut self, now_ms: u64) -> Transition {
        let elapsed_ms = self.session_state.elapsed_ms(now_ms).unwrap_or(0);
        let wpm = metrics::wpm(self.word_count, elapsed_ms);

        self.session_state.phase = Phase::Completed;
        self.session_state.wpm = wpm;

        let new_best = wpm > self.best_wpm;
        if new_best {
            self.best_wpm = wpm;
        }

        log::info!(
            "session completed: {} wpm in {} ms, {}% acc{}",
            wpm,
            elapsed_ms,
            self.accuracy(),
            if new_best { " (new best)" } else { "" }
        );

        Transition::Completed { wpm, new_best }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn typed_text(&self) -> &str {
        &self.session_state.typed_text
    }

    pub fn phase(&self) -> Phase {
        self.session_state.phase
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.session_state.started_at_ms
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// WPM of the current session; 0 until it completes
    pub fn wpm(&self) -> u32 {
        self.session_state.wpm
    }

    pub fn best_wpm(&self) -> u32 {
        self.best_wpm
    }

    pub fn accuracy(&self) -> u32 {
        metrics::accuracy(&self.session_state.typed_text, &self.reference)
    }

    pub fn char_statuses(&self) -> Vec<CharStatus> {
        metrics::char_statuses(&self.session_state.typed_text, &self.reference)
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.session_state.elapsed_ms(now_ms)
    }

    pub fn has_started(&self) -> bool {
        self.session_state.phase != Phase::NotStarted
    }

    pub fn has_finished(&self) -> bool {
        self.session_state.phase == Phase::Completed
    }

    pub fn catalog(&self) -> &SentenceCatalog {
        &self.catalog
    }
}
