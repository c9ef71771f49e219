//! Contract-checked transforms.
//!
//! The wrapped transform itself still clamps; the wrapper only decides whether
//! the input or the clamped output is acceptable.

use thiserror::Error;

use super::apply_transform;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ContractViolation {
    pub reason: String,
}

impl ContractViolation {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type TransformResult<T> = Result<T, ContractViolation>;

/// Reject inputs failing `pre` before `f` ever runs.
pub fn with_precondition<P, F>(
    pre: P,
    f: F,
    reason: impl Into<String>,
) -> impl Fn(f64) -> TransformResult<f64>
where
    P: Fn(f64) -> bool,
    F: Fn(f64) -> f64,
{
    let reason = reason.into();
    move |x| {
        if !pre(x) {
            return Err(ContractViolation::new(reason.clone()));
        }
        Ok(apply_transform(&f, x))
    }
}

/// Run `f`, then reject outputs failing `post`.
pub fn with_postcondition<F, Q>(
    f: F,
    post: Q,
    reason: impl Into<String>,
) -> impl Fn(f64) -> TransformResult<f64>
where
    F: Fn(f64) -> f64,
    Q: Fn(f64) -> bool,
{
    let reason = reason.into();
    move |x| {
        let out = apply_transform(&f, x);
        if post(out) {
            Ok(out)
        } else {
            Err(ContractViolation::new(reason.clone()))
        }
    }
}

/// Both checks with fixed reasons: `"precondition failed"` and `"postcondition failed"`.
pub fn with_contract<P, F, Q>(pre: P, f: F, post: Q) -> impl Fn(f64) -> TransformResult<f64>
where
    P: Fn(f64) -> bool,
    F: Fn(f64) -> f64,
    Q: Fn(f64) -> bool,
{
    let checked = with_postcondition(f, post, "postcondition failed");
    move |x| {
        if !pre(x) {
            return Err(ContractViolation::new("precondition failed"));
        }
        checked(x)
    }
}
