pub mod command;
pub mod errors;
pub mod events;
pub mod host;
pub mod ids;
pub mod room;
pub mod session;

pub use command::Command;
pub use errors::HostError;
pub use events::{RoomEvent, RoomEventHandler};
pub use host::RoomHost;
pub use ids::PlayerId;
pub use room::{Player, Team, TeamCounts};
pub use session::SessionState;
