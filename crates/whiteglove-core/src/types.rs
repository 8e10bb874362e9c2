use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    As2,
    Sftp,
    Https,
}

impl Connection {
    pub fn all() -> &'static [Connection] {
        &[Connection::As2, Connection::Sftp, Connection::Https]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Connection::As2 => "as2",
            Connection::Sftp => "sftp",
            Connection::Https => "https",
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Connection {
    type Err = crate::error::WhiteGloveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "as2" => Ok(Connection::As2),
            "sftp" => Ok(Connection::Sftp),
            "https" => Ok(Connection::Https),
            _ => Err(crate::error::WhiteGloveError::UnknownConnection(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        &[Direction::Inbound, Direction::Outbound]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::error::WhiteGloveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(Direction::Inbound),
            "outbound" => Ok(Direction::Outbound),
            _ => Err(crate::error::WhiteGloveError::UnknownDirection(
                s.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    OnPrem,
    Cloud,
}

impl Origin {
    pub fn all() -> &'static [Origin] {
        &[Origin::OnPrem, Origin::Cloud]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Origin::OnPrem => "on_prem",
            Origin::Cloud => "cloud",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Origin {
    type Err = crate::error::WhiteGloveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_prem" | "on-prem" => Ok(Origin::OnPrem),
            "cloud" => Ok(Origin::Cloud),
            _ => Err(crate::error::WhiteGloveError::UnknownOrigin(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
