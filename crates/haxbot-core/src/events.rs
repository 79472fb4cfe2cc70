use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::room::Player;

/// Notifications delivered by the room host, one at a time and in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    /// The player is already on the roster (as a spectator) when this fires.
    PlayerJoined { player: Player },
    /// The player is already off the roster when this fires.
    PlayerLeft { player: Player },
    ChatMessage { player: Player, text: String },
    TeamVictory,
    GameStarted,
    GameStopped,
    GamePaused,
    GameUnpaused,
}

impl RoomEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::PlayerJoined { .. } => "player_joined",
            Self::PlayerLeft { .. } => "player_left",
            Self::ChatMessage { .. } => "chat_message",
            Self::TeamVictory => "team_victory",
            Self::GameStarted => "game_started",
            Self::GameStopped => "game_stopped",
            Self::GamePaused => "game_paused",
            Self::GameUnpaused => "game_unpaused",
        }
    }

    /// Route this event to the matching handler method.
    pub async fn dispatch<H>(self, handler: &mut H)
    where
        H: RoomEventHandler + ?Sized,
    {
        match self {
            Self::PlayerJoined { player } => handler.on_player_join(player).await,
            Self::PlayerLeft { player } => handler.on_player_leave(player).await,
            Self::ChatMessage { player, text } => handler.on_player_chat(player, text).await,
            Self::TeamVictory => handler.on_team_victory().await,
            Self::GameStarted => handler.on_game_start().await,
            Self::GameStopped => handler.on_game_stop().await,
            Self::GamePaused => handler.on_game_pause().await,
            Self::GameUnpaused => handler.on_game_unpause().await,
        }
    }
}

/// One method per room event. The session controller is the implementor.
#[async_trait]
pub trait RoomEventHandler: Send {
    async fn on_player_join(&mut self, player: Player);
    async fn on_player_leave(&mut self, player: Player);
    async fn on_player_chat(&mut self, player: Player, text: String);
    async fn on_team_victory(&mut self);
    async fn on_game_start(&mut self);
    async fn on_game_stop(&mut self);
    async fn on_game_pause(&mut self);
    async fn on_game_unpause(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    #[async_trait]
    impl RoomEventHandler for Recorder {
        async fn on_player_join(&mut self, player: Player) {
            self.seen.push(format!("join:{}", player.name));
        }
        async fn on_player_leave(&mut self, player: Player) {
            self.seen.push(format!("leave:{}", player.name));
        }
        async fn on_player_chat(&mut self, player: Player, text: String) {
            self.seen.push(format!("chat:{}:{text}", player.name));
        }
        async fn on_team_victory(&mut self) {
            self.seen.push("victory".into());
        }
        async fn on_game_start(&mut self) {
            self.seen.push("start".into());
        }
        async fn on_game_stop(&mut self) {
            self.seen.push("stop".into());
        }
        async fn on_game_pause(&mut self) {
            self.seen.push("pause".into());
        }
        async fn on_game_unpause(&mut self) {
            self.seen.push("unpause".into());
        }
    }

    #[tokio::test]
    async fn dispatch_routes_each_variant() {
        let p = Player::new(1, "Tracy");
        let events = vec![
            RoomEvent::PlayerJoined { player: p.clone() },
            RoomEvent::ChatMessage {
                player: p.clone(),
                text: "!help".into(),
            },
            RoomEvent::GameStarted,
            RoomEvent::GamePaused,
            RoomEvent::GameUnpaused,
            RoomEvent::TeamVictory,
            RoomEvent::GameStopped,
            RoomEvent::PlayerLeft { player: p },
        ];

        let mut rec = Recorder::default();
        for evt in events {
            evt.dispatch(&mut rec).await;
        }

        assert_eq!(
            rec.seen,
            vec![
                "join:Tracy",
                "chat:Tracy:!help",
                "start",
                "pause",
                "unpause",
                "victory",
                "stop",
                "leave:Tracy",
            ]
        );
    }

    #[test]
    fn event_type_str() {
        assert_eq!(RoomEvent::TeamVictory.event_type(), "team_victory");
        let evt = RoomEvent::PlayerLeft {
            player: Player::new(2, "John"),
        };
        assert_eq!(evt.event_type(), "player_left");
    }

    #[test]
    fn event_serde_tagged() {
        let json = r#"{"type":"chat_message","player":{"id":3,"name":"John","is_admin":true,"team":"red"},"text":"!stop"}"#;
        let evt: RoomEvent = serde_json::from_str(json).unwrap();
        match evt {
            RoomEvent::ChatMessage { player, text } => {
                assert!(player.is_admin);
                assert_eq!(text, "!stop");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
