use serde::{Deserialize, Serialize};
use std::fmt;

/// Match lifecycle as seen by the bot.
///
/// `Paused` is part of the host vocabulary, but the bot tracks pause as a
/// separate flag: the host can pause and unpause while the match stays
/// logically running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_stopped() {
        assert_eq!(SessionState::default(), SessionState::Stopped);
    }

    #[test]
    fn display_matches_serde() {
        for state in [SessionState::Stopped, SessionState::Running, SessionState::Paused] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json.trim_matches('"'), state.to_string());
        }
    }
}
