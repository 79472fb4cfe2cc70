//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`HaxbotSettings::default()`]
//! 2. If the settings file exists, deep-merge its values over the defaults
//! 3. Apply `HAXBOT_*` environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::{HaxbotSettings, MAX_ROOM_SIZE};

/// Resolve the default settings path (`~/.haxbot/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".haxbot").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<HaxbotSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON or out-of-range values are errors.
pub fn load_settings_from_path(path: &Path) -> Result<HaxbotSettings> {
    let mut settings = read_settings_file(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<HaxbotSettings> {
    let defaults = serde_json::to_value(HaxbotSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `HAXBOT_*` environment variables to loaded settings.
///
/// Invalid values are logged and ignored.
pub fn apply_env_overrides(settings: &mut HaxbotSettings) {
    apply_overrides(settings, &|name| std::env::var(name).ok());
}

/// Same as [`apply_env_overrides`] with an arbitrary variable source.
pub fn apply_overrides(settings: &mut HaxbotSettings, lookup: &dyn Fn(&str) -> Option<String>) {
    let env = EnvReader { lookup };

    // ── Room ────────────────────────────────────────────────────────
    if let Some(v) = env.string("HAXBOT_ROOM_NAME") {
        settings.room.name = v;
    }
    if let Some(v) = env.u32("HAXBOT_MAX_PLAYERS", 1, MAX_ROOM_SIZE) {
        settings.room.max_players = v;
    }
    if let Some(v) = env.bool("HAXBOT_ROOM_PUBLIC") {
        settings.room.public = v;
    }
    if let Some(v) = env.string("HAXBOT_ROOM_PASSWORD") {
        settings.room.password = Some(v);
    }
    if let Some(v) = env.string("HAXBOT_ADMINS") {
        settings.room.admins = parse_list(&v);
    }

    // ── Game ────────────────────────────────────────────────────────
    if let Some(v) = env.u32("HAXBOT_SCORE_LIMIT", 0, 99) {
        settings.game.score_limit = v;
    }
    if let Some(v) = env.u32("HAXBOT_TIME_LIMIT", 0, 99) {
        settings.game.time_limit = v;
    }
    if let Some(v) = env.string("HAXBOT_DEFAULT_STADIUM") {
        settings.game.default_stadium = v;
    }

    // ── Autostart ───────────────────────────────────────────────────
    if let Some(v) = env.bool("HAXBOT_AUTOSTART") {
        settings.autostart.enabled = v;
    }
    if let Some(v) = env.u32("HAXBOT_AUTOSTART_DELAY", 1, 300) {
        settings.autostart.delay_secs = v;
    }
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u32` within an inclusive range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ── Variable readers ────────────────────────────────────────────────────────

struct EnvReader<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvReader<'_> {
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.is_empty())
    }

    fn bool(&self, name: &str) -> Option<bool> {
        let val = (self.lookup)(name)?;
        let result = parse_bool(&val);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, "invalid boolean env var, ignoring");
        }
        result
    }

    fn u32(&self, name: &str, min: u32, max: u32) -> Option<u32> {
        let val = (self.lookup)(name)?;
        let result = parse_u32_range(&val, min, max);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, min, max, "invalid u32 env var, ignoring");
        }
        result
    }
}
