//! Session logic for the room bot.
//!
//! [`SessionController`] consumes [`RoomEvent`]s one at a time, keeps the
//! [`SessionContext`] consistent and calls back into the [`RoomHost`]. Team
//! balancing and the autostart countdown are plain functions and values the
//! controller drives.
//!
//! [`RoomEvent`]: haxbot_core::RoomEvent
//! [`RoomHost`]: haxbot_core::RoomHost

pub mod balancer;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod session;

pub use balancer::{assign_on_join, rebalance_on_leave, Transfer};
pub use controller::{SessionController, DEFAULT_TICK_INTERVAL};
pub use countdown::{stadium_for, AutostartCountdown, Tick};
pub use error::EngineError;
pub use session::{SessionContext, Transition, Trigger};
