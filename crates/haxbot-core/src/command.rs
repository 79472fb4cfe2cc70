use serde::{Deserialize, Serialize};

use crate::room::Team;

/// A chat command issued by an admin, as produced by the command parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Help,
    /// Start a match. `None` keeps the current default stadium.
    Start { stadium: Option<String> },
    /// Stop the running match, then start again.
    Restart { stadium: Option<String> },
    Stop,
    /// Toggle pause on the running match.
    Pause,
    /// Move the issuing player to a team.
    Go { team: Team },
    Autostart { enabled: bool },
}

impl Command {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Start { .. } => "start",
            Self::Restart { .. } => "restart",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Go { .. } => "go",
            Self::Autostart { .. } => "autostart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names() {
        assert_eq!(Command::Help.name(), "help");
        assert_eq!(Command::Restart { stadium: None }.name(), "restart");
        assert_eq!(Command::Go { team: Team::Red }.name(), "go");
        assert_eq!(Command::Autostart { enabled: true }.name(), "autostart");
    }

    #[test]
    fn command_serde_tagged() {
        let cmd = Command::Start {
            stadium: Some("Big".into()),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "start");
        assert_eq!(json["stadium"], "Big");

        let parsed: Command = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, cmd);
    }
}
