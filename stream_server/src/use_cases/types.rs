// Use-case level inputs/outputs for the session lifecycle.

// Server-held parameters applied to every session start.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSettings {
    pub stream_group_id: String,
    pub default_user_id: String,
    pub connection_timeout_seconds: u32,
    pub session_length_seconds: u32,
    pub application_identifier: Option<String>,
    pub locations: Option<Vec<String>>,
}

impl StreamSettings {
    pub fn connection_timeout_ms(&self) -> u64 {
        u64::from(self.connection_timeout_seconds) * 1000
    }
}

// Outcome of a signal poll that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalState {
    // Session still activating; the caller should poll again.
    Pending,
    Ready(String),
}

impl SignalState {
    pub fn into_signal_response(self) -> String {
        match self {
            SignalState::Pending => String::new(),
            SignalState::Ready(answer) => answer,
        }
    }
}
