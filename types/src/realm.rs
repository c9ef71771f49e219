//! Named targets inside a [`State`](crate::State).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Any of the three fields a router message or transform can address.
///
/// Also used as the category tag of a recorded [`Entry`](crate::Entry).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Physical,
    Intellectual,
    Bridge,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown realm: {0:?} (expected physical, intellectual or bridge)")]
pub struct RealmParseError(pub String);

impl Realm {
    pub const ALL: [Realm; 3] = [Realm::Physical, Realm::Intellectual, Realm::Bridge];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Realm::Physical => "physical",
            Realm::Intellectual => "intellectual",
            Realm::Bridge => "bridge",
        }
    }

    /// The reservoir behind this realm, or `None` for the bridge.
    #[must_use]
    pub const fn reservoir(self) -> Option<Reservoir> {
        match self {
            Realm::Physical => Some(Reservoir::Physical),
            Realm::Intellectual => Some(Reservoir::Intellectual),
            Realm::Bridge => None,
        }
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Realm {
    type Err = RealmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" | "body" | "a" => Ok(Realm::Physical),
            "intellectual" | "mind" | "b" => Ok(Realm::Intellectual),
            "bridge" => Ok(Realm::Bridge),
            _ => Err(RealmParseError(s.to_string())),
        }
    }
}

/// One of the two primary stores. The bridge is deliberately absent, so
/// transfers built from reservoirs can never target it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reservoir {
    Physical,
    Intellectual,
}

impl Reservoir {
    #[must_use]
    pub const fn realm(self) -> Realm {
        match self {
            Reservoir::Physical => Realm::Physical,
            Reservoir::Intellectual => Realm::Intellectual,
        }
    }

    #[must_use]
    pub const fn other(self) -> Reservoir {
        match self {
            Reservoir::Physical => Reservoir::Intellectual,
            Reservoir::Intellectual => Reservoir::Physical,
        }
    }
}

impl From<Reservoir> for Realm {
    fn from(value: Reservoir) -> Self {
        value.realm()
    }
}

impl fmt::Display for Reservoir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.realm().as_str())
    }
}

impl FromStr for Reservoir {
    type Err = RealmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Realm>()?
            .reservoir()
            .ok_or_else(|| RealmParseError(s.to_string()))
    }
}
