//! Transforms named as data.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    DEFAULT_BOOST, DEFAULT_DECAY, Transform, boost, decay, identity, offset, scale,
    transfer_pull, transfer_push,
};

/// A transform named as data, so it can come from configuration or a command line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSpec {
    Identity,
    Scale {
        factor: f64,
    },
    Offset {
        delta: f64,
    },
    Boost {
        #[serde(default = "default_boost")]
        amount: f64,
    },
    Decay {
        #[serde(default = "default_decay")]
        rate: f64,
    },
    PushTransfer,
    PullTransfer,
}

const fn default_boost() -> f64 {
    DEFAULT_BOOST
}

const fn default_decay() -> f64 {
    DEFAULT_DECAY
}

impl TransformSpec {
    #[must_use]
    pub fn build(self) -> Transform {
        match self {
            TransformSpec::Identity => Box::new(identity),
            TransformSpec::Scale { factor } => Box::new(scale(factor)),
            TransformSpec::Offset { delta } => Box::new(offset(delta)),
            TransformSpec::Boost { amount } => Box::new(boost(amount)),
            TransformSpec::Decay { rate } => Box::new(decay(rate)),
            TransformSpec::PushTransfer => Box::new(transfer_push()),
            TransformSpec::PullTransfer => Box::new(transfer_pull()),
        }
    }

    /// Parse `kind` or `kind=value`, e.g. `scale=0.5`, `boost`, `push_transfer`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (kind, value) = match raw.split_once('=') {
            Some((kind, value)) => (kind.trim(), Some(value.trim().parse::<f64>().ok()?)),
            None => (raw.trim(), None),
        };
        let spec = match (kind.to_ascii_lowercase().as_str(), value) {
            ("identity", None) => TransformSpec::Identity,
            ("scale", Some(factor)) => TransformSpec::Scale { factor },
            ("offset", Some(delta)) => TransformSpec::Offset { delta },
            ("boost", amount) => TransformSpec::Boost {
                amount: amount.unwrap_or(DEFAULT_BOOST),
            },
            ("decay", rate) => TransformSpec::Decay {
                rate: rate.unwrap_or(DEFAULT_DECAY),
            },
            ("push_transfer" | "push", None) => TransformSpec::PushTransfer,
            ("pull_transfer" | "pull", None) => TransformSpec::PullTransfer,
            _ => return None,
        };
        Some(spec)
    }
}

impl fmt::Display for TransformSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformSpec::Identity => f.write_str("identity"),
            TransformSpec::Scale { factor } => write!(f, "scale={factor}"),
            TransformSpec::Offset { delta } => write!(f, "offset={delta}"),
            TransformSpec::Boost { amount } => write!(f, "boost={amount}"),
            TransformSpec::Decay { rate } => write!(f, "decay={rate}"),
            TransformSpec::PushTransfer => f.write_str("push_transfer"),
            TransformSpec::PullTransfer => f.write_str("pull_transfer"),
        }
    }
}
