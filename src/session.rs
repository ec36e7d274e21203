#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Phase {
    #[default]
    #[strum(serialize = "not started")]
    NotStarted,
    #[strum(serialize = "in progress")]
    InProgress,
    #[strum(serialize = "completed")]
    Completed,
}

/// Progress of the attempt at the current reference sentence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub started_at_ms: Option<u64>,
    pub typed_text: String,
    // Results
    pub wpm: u32,
}

impl SessionState {
    pub fn elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.started_at_ms.map(|start| now_ms.saturating_sub(start))
    }
}
