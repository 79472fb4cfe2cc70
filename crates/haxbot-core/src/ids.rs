use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player identifier assigned by the room host. Unique for the lifetime of the room.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u32> for PlayerId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_from_str_roundtrip() {
        let id = PlayerId::new(42);
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&PlayerId::new(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: PlayerId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, PlayerId::new(7));
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("abc".parse::<PlayerId>().is_err());
    }
}
