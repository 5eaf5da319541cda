//! One-shot typing intro shown on the first visit of a browser session.
//!
//! The trigger is clock-driven: the host passes elapsed milliseconds to
//! [`TypingTrigger::advance`] from its frame loop. There are no timers to
//! cancel; dropping the trigger ends the sequence and nothing fires after.

use crate::constants::{
    OPENED_SESSION_KEY, TYPING_END_MS, TYPING_SPEED_MS, TYPING_START_MS, TYPING_TEXT,
};
use crate::signal::OpeningSignal;
use smallvec::SmallVec;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage unavailable")]
    Unavailable,
    #[error("session storage rejected write: {0}")]
    Rejected(String),
}

/// String key-value store scoped to a browser session.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store, used by tests and hosts without session storage.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    items: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    NotStarted,
    Typing,
    Settling,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingEvent {
    Started,
    /// Total number of characters now visible.
    Revealed(usize),
    Settled,
    Opened,
}

pub type TypingEvents = SmallVec<[TypingEvent; 4]>;

#[derive(Clone, Debug)]
pub struct TypingTiming {
    pub start_delay_ms: f64,
    pub char_interval_ms: f64,
    pub settle_delay_ms: f64,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            start_delay_ms: TYPING_START_MS,
            char_interval_ms: TYPING_SPEED_MS,
            settle_delay_ms: TYPING_END_MS,
        }
    }
}

pub struct TypingTrigger<S: SessionStore> {
    text: String,
    char_count: usize,
    timing: TypingTiming,
    phase: TypingPhase,
    phase_elapsed_ms: f64,
    revealed: usize,
    reveal_transitions: usize,
    store: S,
    signal: OpeningSignal,
}

impl<S: SessionStore> TypingTrigger<S> {
    pub fn new(store: S, signal: OpeningSignal) -> Self {
        Self::with_text(store, signal, TYPING_TEXT, TypingTiming::default())
    }

    /// Checks the session flag at mount: a revisit skips straight to `Done`
    /// and raises the signal without revealing anything.
    pub fn with_text(store: S, signal: OpeningSignal, text: &str, timing: TypingTiming) -> Self {
        let already_opened = store.get_item(OPENED_SESSION_KEY).is_some();
        let phase = if already_opened {
            log::info!("[typing] already opened this session; skipping intro");
            signal.open();
            TypingPhase::Done
        } else {
            TypingPhase::NotStarted
        };
        Self {
            text: text.to_owned(),
            char_count: text.chars().count(),
            timing,
            phase,
            phase_elapsed_ms: 0.0,
            revealed: 0,
            reveal_transitions: 0,
            store,
            signal,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == TypingPhase::Done
    }

    pub fn revealed_chars(&self) -> usize {
        self.revealed
    }

    /// How many single-character reveal steps have fired so far.
    pub fn reveal_transitions(&self) -> usize {
        self.reveal_transitions
    }

    /// Currently visible prefix of the intro text.
    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    /// Advance the sequence by `dt_ms` and report every transition that fired.
    pub fn advance(&mut self, dt_ms: f64) -> TypingEvents {
        let mut events = TypingEvents::new();
        if self.phase == TypingPhase::Done {
            return events;
        }
        self.phase_elapsed_ms += dt_ms.max(0.0);

        loop {
            match self.phase {
                TypingPhase::NotStarted => {
                    if self.phase_elapsed_ms < self.timing.start_delay_ms {
                        break;
                    }
                    self.phase_elapsed_ms -= self.timing.start_delay_ms;
                    self.phase = TypingPhase::Typing;
                    events.push(TypingEvent::Started);
                }
                TypingPhase::Typing => {
                    if self.revealed >= self.char_count {
                        self.phase = TypingPhase::Settling;
                        events.push(TypingEvent::Settled);
                        continue;
                    }
                    if self.phase_elapsed_ms < self.timing.char_interval_ms {
                        break;
                    }
                    self.phase_elapsed_ms -= self.timing.char_interval_ms;
                    self.revealed += 1;
                    self.reveal_transitions += 1;
                    events.push(TypingEvent::Revealed(self.revealed));
                }
                TypingPhase::Settling => {
                    if self.phase_elapsed_ms < self.timing.settle_delay_ms {
                        break;
                    }
                    self.finish();
                    events.push(TypingEvent::Opened);
                }
                TypingPhase::Done => break,
            }
        }
        events
    }

    /// The backing session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn finish(&mut self) {
        self.phase = TypingPhase::Done;
        self.phase_elapsed_ms = 0.0;
        if let Err(e) = self.store.set_item(OPENED_SESSION_KEY, "1") {
            log::warn!("[typing] could not persist opened flag: {}", e);
        }
        self.signal.open();
        log::info!("[typing] intro finished");
    }
}
