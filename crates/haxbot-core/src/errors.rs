use crate::ids::PlayerId;

/// Failure reported by the room host for a call issued by the bot.
/// The bot logs these and moves on; it never retries.
#[derive(Clone, Debug, thiserror::Error)]
pub enum HostError {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("{call} rejected: {reason}")]
    Rejected { call: &'static str, reason: String },
    #[error("room host unavailable: {0}")]
    Unavailable(String),
}

impl HostError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::UnknownPlayer(_) => "unknown_player",
            Self::Rejected { .. } => "rejected",
            Self::Unavailable(_) => "unavailable",
        }
    }
}
