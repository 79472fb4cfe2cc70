use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::PlayerId;

/// Team a player belongs to. Only equality and counting are meaningful.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Spectator,
    Red,
    Blue,
}

impl Team {
    /// The opposing playing team. Spectators have none.
    pub fn opponent(self) -> Option<Self> {
        match self {
            Self::Red => Some(Self::Blue),
            Self::Blue => Some(Self::Red),
            Self::Spectator => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spectator => "spec",
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a player as reported by the room host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_admin: bool,
    pub team: Team,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_admin: false,
            team: Team::Spectator,
        }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = team;
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

/// Per-team head count over a roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeamCounts {
    pub spectators: usize,
    pub red: usize,
    pub blue: usize,
}

impl TeamCounts {
    pub fn of(roster: &[Player]) -> Self {
        roster.iter().fold(Self::default(), |mut counts, p| {
            match p.team {
                Team::Spectator => counts.spectators += 1,
                Team::Red => counts.red += 1,
                Team::Blue => counts.blue += 1,
            }
            counts
        })
    }

    pub fn get(&self, team: Team) -> usize {
        match team {
            Team::Spectator => self.spectators,
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponents() {
        assert_eq!(Team::Red.opponent(), Some(Team::Blue));
        assert_eq!(Team::Blue.opponent(), Some(Team::Red));
        assert_eq!(Team::Spectator.opponent(), None);
    }

    #[test]
    fn counts_by_team() {
        let roster = vec![
            Player::new(1, "a").with_team(Team::Red),
            Player::new(2, "b").with_team(Team::Blue),
            Player::new(3, "c").with_team(Team::Red),
            Player::new(4, "d"),
        ];
        let counts = TeamCounts::of(&roster);
        assert_eq!(counts.red, 2);
        assert_eq!(counts.blue, 1);
        assert_eq!(counts.spectators, 1);
        assert_eq!(counts.get(Team::Red), 2);
    }

    #[test]
    fn team_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Team::Spectator).unwrap(), "\"spectator\"");
        let t: Team = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(t, Team::Blue);
    }
}
