//! Grammar, one function per nonterminal:
//!
//! ```text
//! Line     := "!" WS Command WS
//! Command  := "help" | StartCmd | "stop" | "pause" | GoCmd | AutoCmd
//! StartCmd := ("start" | "restart") WS Id?
//! GoCmd    := "go" WS Team
//! Team     := "red" | "blue" | "spec"
//! AutoCmd  := "as" WS ("on" | "off")
//! Id       := Letter (Letter | Digit)*
//! ```
//!
//! `WS` matches zero or more whitespace characters. Choices are ordered and
//! the first alternative that matches wins.

use haxbot_core::{Command, Team};

use crate::error::ParseError;
use crate::lexer::Scanner;

/// Chat lines starting with this character are treated as commands.
pub const COMMAND_PREFIX: char = '!';

/// Parse a full chat line. Trailing unmatched input is an error.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut s = Scanner::new(line);
    if let Some(cmd) = command_line(&mut s) {
        if s.end() {
            return Ok(cmd);
        }
    }
    Err(s.into_error())
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn command_line(s: &mut Scanner<'_>) -> Option<Command> {
    s.attempt(|s| {
        s.literal("!")?;
        s.whitespace();
        let cmd = command(s)?;
        s.whitespace();
        Some(cmd)
    })
}

fn command(s: &mut Scanner<'_>) -> Option<Command> {
    if s.literal("help").is_some() {
        return Some(Command::Help);
    }
    if let Some(cmd) = start_cmd(s) {
        return Some(cmd);
    }
    if s.literal("stop").is_some() {
        return Some(Command::Stop);
    }
    if s.literal("pause").is_some() {
        return Some(Command::Pause);
    }
    if let Some(cmd) = go_cmd(s) {
        return Some(cmd);
    }
    auto_cmd(s)
}

fn start_cmd(s: &mut Scanner<'_>) -> Option<Command> {
    s.attempt(|s| {
        let restart = if s.literal("start").is_some() {
            false
        } else {
            s.literal("restart")?;
            true
        };
        s.whitespace();
        let stadium = s.identifier().map(capitalize);
        Some(if restart {
            Command::Restart { stadium }
        } else {
            Command::Start { stadium }
        })
    })
}

fn go_cmd(s: &mut Scanner<'_>) -> Option<Command> {
    s.attempt(|s| {
        s.literal("go")?;
        s.whitespace();
        let team = team(s)?;
        Some(Command::Go { team })
    })
}

fn team(s: &mut Scanner<'_>) -> Option<Team> {
    if s.literal("red").is_some() {
        Some(Team::Red)
    } else if s.literal("blue").is_some() {
        Some(Team::Blue)
    } else if s.literal("spec").is_some() {
        Some(Team::Spectator)
    } else {
        None
    }
}

fn auto_cmd(s: &mut Scanner<'_>) -> Option<Command> {
    s.attempt(|s| {
        s.literal("as")?;
        s.whitespace();
        let enabled = if s.literal("on").is_some() {
            true
        } else {
            s.literal("off")?;
            false
        };
        Some(Command::Autostart { enabled })
    })
}
