//! Configuration loading and validation for Tandem.
//!
//! The file lives at `~/.tandem/config.toml` unless `TANDEM_CONFIG` points
//! elsewhere. Every key is optional; anything missing falls back to the
//! canonical constants.
//!
//! ```toml
//! [router]
//! push_efficiency = 0.8
//! pull_efficiency = 0.9
//! balancing_rate = 0.05
//! equilibrium_threshold = 0.01
//!
//! [boost]
//! amount = 0.15
//! decay_rate = 0.005
//! reservoir_entry = 0.05
//! bridge_entry = 0.1
//!
//! [initial]
//! physical = 0.5
//! intellectual = 0.5
//! bridge = 0.5
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tandem_core::RouterSettings;
use tandem_core::transform::{DEFAULT_BOOST, DEFAULT_DECAY, PUSH_EFFICIENCY};
use tandem_types::{Quantity, State};
use thiserror::Error;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "TANDEM_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TandemConfig {
    pub router: Option<RouterConfig>,
    pub boost: Option<BoostConfig>,
    pub initial: Option<InitialConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    pub push_efficiency: Option<f64>,
    pub pull_efficiency: Option<f64>,
    pub balancing_rate: Option<f64>,
    pub equilibrium_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoostConfig {
    /// Step applied by the explicit boost operations. Default: 0.15.
    pub amount: Option<f64>,
    /// Step applied to each reservoir by one decay tick. Default: 0.005.
    pub decay_rate: Option<f64>,
    /// Boost for recording a physical or intellectual entry. Default: 0.05.
    pub reservoir_entry: Option<f64>,
    /// Boost for recording a bridge entry. Default: 0.1.
    pub bridge_entry: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitialConfig {
    pub physical: Option<f64>,
    pub intellectual: Option<f64>,
    pub bridge: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {field} = {value}: must be {expected}")]
    Invalid {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("inconsistent config: {reason}")]
    Inconsistent { reason: &'static str },
}

/// Validated settings the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub router: RouterSettings,
    pub boost_amount: f64,
    pub decay_rate: f64,
    pub reservoir_entry_boost: f64,
    pub bridge_entry_boost: f64,
    pub initial_physical: Quantity,
    pub initial_intellectual: Quantity,
    pub initial_bridge: Quantity,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            router: RouterSettings::default(),
            boost_amount: DEFAULT_BOOST,
            decay_rate: DEFAULT_DECAY,
            reservoir_entry_boost: 0.05,
            bridge_entry_boost: 0.1,
            initial_physical: Quantity::HALF,
            initial_intellectual: Quantity::HALF,
            initial_bridge: Quantity::HALF,
        }
    }
}

impl EngineSettings {
    /// The state an engine built from these settings starts in.
    #[must_use]
    pub fn initial_state(&self) -> State {
        State::new(
            self.initial_physical.get(),
            self.initial_intellectual.get(),
            self.initial_bridge.get(),
        )
    }
}

#[derive(Clone, Copy)]
enum Bound {
    /// `(0, 1]`
    Positive,
    /// `[0, 1]`
    Unit,
    /// `[0, 1)`
    BelowOne,
}

impl Bound {
    fn accepts(self, value: f64) -> bool {
        match self {
            Bound::Positive => value > 0.0 && value <= 1.0,
            Bound::Unit => (0.0..=1.0).contains(&value),
            Bound::BelowOne => (0.0..1.0).contains(&value),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Bound::Positive => "in (0, 1]",
            Bound::Unit => "in [0, 1]",
            Bound::BelowOne => "in [0, 1)",
        }
    }
}

fn pick(
    field: &'static str,
    value: Option<f64>,
    default: f64,
    bound: Bound,
) -> Result<f64, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    if bound.accepts(value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            field,
            value,
            expected: bound.describe(),
        })
    }
}

impl TandemConfig {
    /// Load the config from [`config_path`]. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Validate every present key and fill the rest with defaults.
    pub fn settings(&self) -> Result<EngineSettings, ConfigError> {
        let defaults = EngineSettings::default();
        let router = self.router.as_ref();
        let boost = self.boost.as_ref();
        let initial = self.initial.as_ref();

        let router = RouterSettings {
            push_efficiency: pick(
                "router.push_efficiency",
                router.and_then(|r| r.push_efficiency),
                defaults.router.push_efficiency,
                Bound::Positive,
            )?,
            pull_efficiency: pick(
                "router.pull_efficiency",
                router.and_then(|r| r.pull_efficiency),
                defaults.router.pull_efficiency,
                Bound::Positive,
            )?,
            balancing_rate: pick(
                "router.balancing_rate",
                router.and_then(|r| r.balancing_rate),
                defaults.router.balancing_rate,
                Bound::Positive,
            )?,
            equilibrium_threshold: pick(
                "router.equilibrium_threshold",
                router.and_then(|r| r.equilibrium_threshold),
                defaults.router.equilibrium_threshold,
                Bound::BelowOne,
            )?,
        };

        let level = |field: &'static str, value: Option<f64>, default: Quantity| {
            pick(field, value, default.get(), Bound::Unit).map(Quantity::new)
        };

        let settings = EngineSettings {
            router,
            boost_amount: pick(
                "boost.amount",
                boost.and_then(|b| b.amount),
                defaults.boost_amount,
                Bound::Positive,
            )?,
            decay_rate: pick(
                "boost.decay_rate",
                boost.and_then(|b| b.decay_rate),
                defaults.decay_rate,
                Bound::Unit,
            )?,
            reservoir_entry_boost: pick(
                "boost.reservoir_entry",
                boost.and_then(|b| b.reservoir_entry),
                defaults.reservoir_entry_boost,
                Bound::Unit,
            )?,
            bridge_entry_boost: pick(
                "boost.bridge_entry",
                boost.and_then(|b| b.bridge_entry),
                defaults.bridge_entry_boost,
                Bound::Unit,
            )?,
            initial_physical: level(
                "initial.physical",
                initial.and_then(|i| i.physical),
                defaults.initial_physical,
            )?,
            initial_intellectual: level(
                "initial.intellectual",
                initial.and_then(|i| i.intellectual),
                defaults.initial_intellectual,
            )?,
            initial_bridge: level(
                "initial.bridge",
                initial.and_then(|i| i.bridge),
                defaults.initial_bridge,
            )?,
        };
        check_consistency(&settings)?;
        Ok(settings)
    }
}

/// Push loses at most a fifth, pull always beats push, and bridge entries
/// outweigh reservoir entries.
fn check_consistency(settings: &EngineSettings) -> Result<(), ConfigError> {
    let router = &settings.router;
    let reason = if router.push_efficiency < PUSH_EFFICIENCY {
        "router.push_efficiency must be at least 0.8"
    } else if router.pull_efficiency <= router.push_efficiency {
        "router.pull_efficiency must exceed router.push_efficiency"
    } else if settings.bridge_entry_boost <= settings.reservoir_entry_boost {
        "boost.bridge_entry must exceed boost.reservoir_entry"
    } else {
        return Ok(());
    };
    Err(ConfigError::Inconsistent { reason })
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".tandem").join("config.toml"))
}
