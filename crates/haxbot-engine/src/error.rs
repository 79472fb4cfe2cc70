use haxbot_core::HostError;
use haxbot_parser::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{player} is not an admin")]
    Unauthorized { player: String },

    #[error("host error: {0}")]
    Host(#[from] HostError),
}

impl EngineError {
    /// Short classification for logs.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Host(e) => e.error_kind(),
        }
    }

    /// Chat text shown to players, if the failure is theirs to see.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Parse(_) => Some("Wtf?".to_string()),
            Self::Unauthorized { player } => Some(format!("{player}, you're not admin.")),
            Self::Host(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haxbot_core::PlayerId;

    #[test]
    fn parse_errors_fall_back_to_wtf() {
        let err: EngineError = haxbot_parser::parse("!gobble").unwrap_err().into();
        assert_eq!(err.error_kind(), "parse");
        assert_eq!(err.user_message().as_deref(), Some("Wtf?"));
    }

    #[test]
    fn unauthorized_names_the_player() {
        let err = EngineError::Unauthorized {
            player: "Mallory".into(),
        };
        assert_eq!(err.user_message().as_deref(), Some("Mallory, you're not admin."));
        assert_eq!(err.to_string(), "Mallory is not an admin");
    }

    #[test]
    fn host_errors_stay_internal() {
        let err: EngineError = HostError::UnknownPlayer(PlayerId::new(4)).into();
        assert_eq!(err.error_kind(), "unknown_player");
        assert_eq!(err.user_message(), None);
    }
}
