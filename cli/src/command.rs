//! Scripted engine operations parsed from the command line.

use std::str::FromStr;

use tandem_engine::{Engine, LiftTarget, Realm, Reservoir, RoutingResult, TransformSpec};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Boost(Realm),
    Blow {
        from: Reservoir,
        to: Reservoir,
        amount: f64,
    },
    Suck {
        from: Reservoir,
        to: Reservoir,
        amount: f64,
    },
    Balance,
    Decay,
    Record {
        category: Realm,
        content: String,
    },
    Transform {
        target: LiftTarget,
        spec: TransformSpec,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),
    #[error("{op}: expected {expected}")]
    Arity {
        op: &'static str,
        expected: &'static str,
    },
    #[error("{op}: {detail}")]
    Argument { op: &'static str, detail: String },
}

fn argument(op: &'static str, detail: impl ToString) -> CommandParseError {
    CommandParseError::Argument {
        op,
        detail: detail.to_string(),
    }
}

fn transfer_args(
    op: &'static str,
    rest: &[&str],
) -> Result<(Reservoir, Reservoir, f64), CommandParseError> {
    let [from, to, amount] = rest else {
        return Err(CommandParseError::Arity {
            op,
            expected: "<from>:<to>:<amount>",
        });
    };
    let from = from.parse::<Reservoir>().map_err(|e| argument(op, e))?;
    let to = to.parse::<Reservoir>().map_err(|e| argument(op, e))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|e| argument(op, format!("amount {amount:?}: {e}")))?;
    Ok((from, to, amount))
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (op, tail) = raw.split_once(':').unwrap_or((raw, ""));
        match op.trim().to_ascii_lowercase().as_str() {
            "boost" => tail
                .parse::<Realm>()
                .map(Command::Boost)
                .map_err(|e| argument("boost", e)),
            "blow" => {
                let rest: Vec<&str> = tail.split(':').collect();
                let (from, to, amount) = transfer_args("blow", &rest)?;
                Ok(Command::Blow { from, to, amount })
            }
            "suck" => {
                let rest: Vec<&str> = tail.split(':').collect();
                let (from, to, amount) = transfer_args("suck", &rest)?;
                Ok(Command::Suck { from, to, amount })
            }
            "balance" => Ok(Command::Balance),
            "decay" => Ok(Command::Decay),
            "record" => {
                let Some((category, content)) = tail.split_once(':') else {
                    return Err(CommandParseError::Arity {
                        op: "record",
                        expected: "<category>:<text>",
                    });
                };
                let category = category.parse::<Realm>().map_err(|e| argument("record", e))?;
                Ok(Command::Record {
                    category,
                    content: content.to_string(),
                })
            }
            "transform" => {
                let Some((target, spec)) = tail.split_once(':') else {
                    return Err(CommandParseError::Arity {
                        op: "transform",
                        expected: "<target>:<kind>[=<value>]",
                    });
                };
                let target = LiftTarget::parse(target)
                    .ok_or_else(|| argument("transform", format!("unknown target {target:?}")))?;
                let spec = TransformSpec::parse(spec)
                    .ok_or_else(|| argument("transform", format!("unknown transform {spec:?}")))?;
                Ok(Command::Transform { target, spec })
            }
            _ => Err(CommandParseError::UnknownOperation(raw.to_string())),
        }
    }
}

impl Command {
    /// Run against `engine`. Routing commands return their result.
    pub fn run(&self, engine: &Engine) -> Option<RoutingResult> {
        match self {
            Command::Boost(Realm::Physical) => engine.boost_physical(),
            Command::Boost(Realm::Intellectual) => engine.boost_intellectual(),
            Command::Boost(Realm::Bridge) => engine.boost_bridge(),
            Command::Blow { from, to, amount } => return Some(engine.blow(*from, *to, *amount)),
            Command::Suck { from, to, amount } => return Some(engine.suck(*from, *to, *amount)),
            Command::Balance => return Some(engine.auto_balance()),
            Command::Decay => engine.decay_reservoirs(),
            Command::Record { category, content } => {
                let entry = engine.record_entry(content.clone(), *category);
                tracing::debug!(entry = %entry.id(), "Recorded entry");
            }
            Command::Transform { target, spec } => engine.transform(*target, *spec),
        }
        None
    }
}
