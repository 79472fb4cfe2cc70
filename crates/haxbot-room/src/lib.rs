//! In-memory room host.
//!
//! [`LocalRoom`] keeps the roster and match flags, records every call it
//! receives and echoes lifecycle changes back as [`RoomEvent`]s the way a
//! real host does. The binary drives it from [`ConsoleInput`] lines; tests
//! use it as the host double.
//!
//! [`RoomEvent`]: haxbot_core::RoomEvent

pub mod console;
pub mod local;

pub use console::ConsoleInput;
pub use local::{HostCall, LocalRoom};
