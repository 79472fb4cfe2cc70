//! JSON-lines input for driving a [`LocalRoom`] by hand.
//!
//! ```text
//! {"type":"join","name":"Tracy"}
//! {"type":"join","name":"John","password":"hunter2"}
//! {"type":"chat","name":"Tracy","text":"!start classic"}
//! {"type":"victory"}
//! ```

use serde::{Deserialize, Serialize};

use haxbot_core::{HostError, Player, RoomEvent, Team};

use crate::local::LocalRoom;

/// Something that happens in the room outside the bot's control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleInput {
    Join {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
    Leave { name: String },
    Chat { name: String, text: String },
    Victory,
    HostPause,
    HostUnpause,
    HostStop,
}

impl ConsoleInput {
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

impl LocalRoom {
    /// Apply a console input to the room and emit the resulting events.
    ///
    /// Names refer to the first player in the roster with that name. A win
    /// ends the match, so `Victory` is followed by `GameStopped`.
    pub fn apply(&self, input: ConsoleInput) -> Result<(), HostError> {
        if self.is_closed() {
            return Err(HostError::Unavailable("room closed".into()));
        }
        match input {
            ConsoleInput::Join { name, password } => {
                self.admit(password.as_deref())?;
                let player = self.add_player(&name, Team::Spectator);
                self.emit(RoomEvent::PlayerJoined { player });
            }
            ConsoleInput::Leave { name } => {
                let id = self.require(&name, "leave")?.id;
                if let Some(player) = self.remove_player(id) {
                    self.emit(RoomEvent::PlayerLeft { player });
                }
            }
            ConsoleInput::Chat { name, text } => {
                let player = self.require(&name, "chat")?;
                self.emit(RoomEvent::ChatMessage { player, text });
            }
            ConsoleInput::Victory => {
                self.emit(RoomEvent::TeamVictory);
                if self.set_running(false) {
                    self.emit(RoomEvent::GameStopped);
                }
            }
            ConsoleInput::HostPause => {
                if self.set_paused(true) {
                    self.emit(RoomEvent::GamePaused);
                }
            }
            ConsoleInput::HostUnpause => {
                if self.set_paused(false) {
                    self.emit(RoomEvent::GameUnpaused);
                }
            }
            ConsoleInput::HostStop => {
                if self.set_running(false) {
                    self.emit(RoomEvent::GameStopped);
                }
            }
        }
        Ok(())
    }

    fn require(&self, name: &str, call: &'static str) -> Result<Player, HostError> {
        self.find_by_name(name).ok_or_else(|| HostError::Rejected {
            call,
            reason: format!("no player named {name:?}"),
        })
    }
}
