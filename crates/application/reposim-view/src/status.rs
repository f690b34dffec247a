//! Top-level UI status

/// Which fragment the UI shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl AppStatus {
    /// The URL form accepts input in every state but Loading
    pub fn form_enabled(&self) -> bool {
        !matches!(self, Self::Loading)
    }

    pub fn display(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Loading => "ANALYZING",
            Self::Success => "DONE",
            Self::Error => "ERROR",
        }
    }
}
