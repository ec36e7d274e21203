use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::SentenceCatalog;
use crate::clock::Clock;
use crate::session::Phase;
use crate::text_field::TextField;
use crate::trial::{Transition, TypingTrial};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// The typing widget: a trial, the field feeding it, and the sources of time and randomness
pub struct App<C: Clock> {
    pub trial: TypingTrial,
    pub field: TextField,
    rng: StdRng,
    clock: C,
}

impl<C: Clock> App<C> {
    /// `seed` fixes the sentence order; `None` seeds from entropy
    pub fn new(catalog: SentenceCatalog, seed: Option<u64>, clock: C) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let trial = TypingTrial::new(catalog, &mut rng);

        Self {
            trial,
            field: TextField::new(),
            rng,
            clock,
        }
    }

    pub fn new_sentence(&mut self) {
        self.trial.start_new_session(&mut self.rng);
        self.field.reset();
    }

    pub fn restart(&mut self) {
        self.trial.restart_session();
        self.field.reset();
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Redraws are needed on ticks only while the elapsed timer is visible
    pub fn is_timing(&self) -> bool {
        self.trial.phase() == Phase::InProgress
    }

    pub fn on_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if ctrl => return AppAction::Quit,
            KeyCode::Tab => self.new_sentence(),
            KeyCode::Char('n') if ctrl => self.new_sentence(),
            KeyCode::Char('r') if ctrl => self.restart(),
            _ if self.trial.has_finished() => match key.code {
                KeyCode::Char('n') | KeyCode::Enter => self.new_sentence(),
                KeyCode::Char('r') => self.restart(),
                _ => {}
            },
            _ => {
                if self.edit_field(key) {
                    self.forward_text();
                }
            }
        }

        AppAction::Continue
    }

    fn edit_field(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('w') if ctrl => self.field.delete_word(),
            // terminals configured with erase = ^H send Backspace as 0x08, read as ctrl+h
            KeyCode::Char('h') if ctrl => self.field.backspace(),
            KeyCode::Backspace if ctrl || alt => self.field.delete_word(),
            KeyCode::Char('u') if ctrl => self.field.clear(),
            KeyCode::Backspace => self.field.backspace(),
            KeyCode::Char(c) if !ctrl && !alt => self.field.insert(c),
            _ => false,
        }
    }

    fn forward_text(&mut self) {
        let now = self.clock.now_ms();
        if let Transition::Completed { .. } = self.trial.on_text_changed(self.field.text(), now) {
            self.field.set_enabled(false);
        }
    }
}
