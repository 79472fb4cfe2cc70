//! Settings type definitions.
//!
//! Field names are camelCase on disk. Every struct is `#[serde(default)]`,
//! so a partial file only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Largest room the host accepts.
pub const MAX_ROOM_SIZE: u32 = 30;

/// Root settings type.
///
/// ```json
/// {
///   "room": { "name": "Friday Futsal", "admins": ["Tracy", "John"] },
///   "autostart": { "enabled": true }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HaxbotSettings {
    pub bot: BotSettings,
    pub room: RoomSettings,
    pub game: GameSettings,
    pub autostart: AutostartSettings,
}

impl HaxbotSettings {
    /// Reject values the room host would refuse or that make the bot misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.room.max_players == 0 || self.room.max_players > MAX_ROOM_SIZE {
            return Err(SettingsError::InvalidValue(format!(
                "room.maxPlayers must be 1..={MAX_ROOM_SIZE}, got {}",
                self.room.max_players
            )));
        }
        if self.autostart.delay_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "autostart.delaySecs must be at least 1".into(),
            ));
        }
        for (key, value) in [
            ("game.defaultStadium", &self.game.default_stadium),
            ("autostart.smallStadium", &self.autostart.small_stadium),
            ("autostart.largeStadium", &self.autostart.large_stadium),
        ] {
            if value.trim().is_empty() {
                return Err(SettingsError::InvalidValue(format!("{key} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Identity shown in the help message.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BotSettings {
    pub name: String,
    pub version: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            name: "haxbot".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Room creation parameters and access control.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomSettings {
    pub name: String,
    pub max_players: u32,
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Player names granted admin rights when they join.
    pub admins: Vec<String>,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            name: "My Great Room".to_string(),
            max_players: 6,
            public: true,
            password: None,
            admins: Vec::new(),
        }
    }
}

impl RoomSettings {
    pub fn is_admin_name(&self, name: &str) -> bool {
        self.admins.iter().any(|a| a == name)
    }
}

/// Match rules applied when the room opens.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub score_limit: u32,
    /// Minutes, 0 is no limit.
    pub time_limit: u32,
    /// Stadium names are capitalized, e.g. "Big".
    pub default_stadium: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            score_limit: 5,
            time_limit: 0,
            default_stadium: "Big".to_string(),
        }
    }
}

/// Automatic restart after a victory.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutostartSettings {
    /// Initial value of the autostart flag; `!as on|off` changes it at runtime.
    pub enabled: bool,
    /// Countdown length in one-second ticks.
    pub delay_secs: u32,
    /// Stadium for rooms with at most `small_roster_max` players.
    pub small_stadium: String,
    pub large_stadium: String,
    pub small_roster_max: usize,
}

impl Default for AutostartSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_secs: 10,
            small_stadium: "Classic".to_string(),
            large_stadium: "Big".to_string(),
            small_roster_max: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = HaxbotSettings::default();
        assert_eq!(s.bot.name, "haxbot");
        assert_eq!(s.room.max_players, 6);
        assert!(s.room.public);
        assert!(s.room.admins.is_empty());
        assert_eq!(s.game.score_limit, 5);
        assert_eq!(s.game.time_limit, 0);
        assert_eq!(s.game.default_stadium, "Big");
        assert!(!s.autostart.enabled);
        assert_eq!(s.autostart.delay_secs, 10);
        assert_eq!(s.autostart.small_stadium, "Classic");
        assert_eq!(s.autostart.small_roster_max, 4);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn camel_case_on_disk() {
        let json = serde_json::to_value(HaxbotSettings::default()).unwrap();
        assert_eq!(json["room"]["maxPlayers"], 6);
        assert_eq!(json["autostart"]["smallRosterMax"], 4);
        assert!(json["room"].get("password").is_none());
    }

    #[test]
    fn admin_lookup_is_exact() {
        let room = RoomSettings {
            admins: vec!["Tracy".into(), "John".into()],
            ..RoomSettings::default()
        };
        assert!(room.is_admin_name("Tracy"));
        assert!(!room.is_admin_name("tracy"));
        assert!(!room.is_admin_name("Mallory"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut s = HaxbotSettings::default();
        s.room.max_players = 0;
        assert!(s.validate().is_err());

        let mut s = HaxbotSettings::default();
        s.autostart.delay_secs = 0;
        assert!(s.validate().is_err());

        let mut s = HaxbotSettings::default();
        s.autostart.large_stadium = "  ".into();
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("autostart.largeStadium"));
    }
}
