/// Scan session lifecycle.
///
/// ```text
/// idle → requesting → running → stopped
///            ↓                     ↑
///            └─────── (denied / capture failure)
/// ```
///
/// `Stopped` is terminal. A stopped session cannot be restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Idle,
    Requesting,
    Running,
    Stopped,
}

impl SessionStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}
