//! # haxbot-settings
//!
//! Room configuration loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`HaxbotSettings::default()`]
//! 2. **User file**: `~/.haxbot/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `HAXBOT_*` overrides (highest priority)
//!
//! ```no_run
//! use haxbot_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("room: {}", settings.room.name);
//! ```
//!
//! No player is an admin by default. Name admins in the file
//! (`{"room": {"admins": ["Tracy", "John"]}}`) or with
//! `HAXBOT_ADMINS=Tracy,John`, otherwise every `!` command is refused.
//!
//! ```
//! use haxbot_settings::HaxbotSettings;
//!
//! let mut settings = HaxbotSettings::default();
//! assert!(!settings.room.is_admin_name("Tracy"));
//! settings.room.admins = vec!["Tracy".into(), "John".into()];
//! assert!(settings.room.is_admin_name("Tracy"));
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_env_overrides, deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
