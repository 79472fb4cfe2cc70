use async_trait::async_trait;

use crate::errors::HostError;
use crate::ids::PlayerId;
use crate::room::{Player, Team};

/// Calls the bot issues to the room it runs in.
///
/// Implementations own the roster and the match. Errors are the host's own
/// concern: callers log them and carry on.
#[async_trait]
pub trait RoomHost: Send + Sync {
    /// Post a message to the room chat.
    async fn announce(&self, text: &str) -> Result<(), HostError>;

    async fn set_player_team(&self, player: PlayerId, team: Team) -> Result<(), HostError>;

    /// Stadium used by the next `start_match`.
    async fn set_default_stadium(&self, name: &str) -> Result<(), HostError>;

    async fn set_score_limit(&self, limit: u32) -> Result<(), HostError>;

    /// Time limit in minutes, 0 for none.
    async fn set_time_limit(&self, minutes: u32) -> Result<(), HostError>;

    async fn set_player_admin(&self, player: PlayerId, admin: bool) -> Result<(), HostError>;

    async fn start_match(&self) -> Result<(), HostError>;

    /// Stop the current match. Stopping a stopped room is a no-op.
    async fn stop_match(&self) -> Result<(), HostError>;

    async fn pause_match(&self, paused: bool) -> Result<(), HostError>;

    /// Current players, in host order.
    async fn roster(&self) -> Result<Vec<Player>, HostError>;
}
