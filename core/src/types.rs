//! Shared primitive types used across the feed simulator.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A simulation tick. One tick = one generated record cluster.
pub type Tick = u64;

/// One flat, stringified row as mirrored to the remote sink.
pub type SheetRow = Vec<String>;

/// Business domain whose records are being synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Retail,
    Manufacturing,
    Education,
}

impl Domain {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Retail        => "retail",
            Self::Manufacturing => "manufacturing",
            Self::Education     => "education",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Domain {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retail"        => Ok(Self::Retail),
            "manufacturing" => Ok(Self::Manufacturing),
            "education"     => Ok(Self::Education),
            other           => Err(SimError::UnknownDomain(other.to_string())),
        }
    }
}
