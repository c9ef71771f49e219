//! Bounded arithmetic transforms.
//!
//! Every transform here maps `f64 -> f64` and every result is clamped into
//! `[0, 1]`. Nothing in this module fails: out-of-range inputs and outputs are
//! pinned to the nearest bound. Only the wrappers in [`contract`] report
//! failure, and only for the conditions they were given.
//!
//! The combinators follow functor/monad shaped laws:
//!
//! - `apply_transform(identity, x) == x` for `x` in bounds
//! - `apply_transform(compose(f, g), x) == apply_transform(f, apply_transform(g, x))`
//! - `bind(pure(a), f) == apply_transform(f, a)` and `bind(x, pure) == clamp(x)`

pub mod contract;
pub mod lift;
pub mod predicate;
mod spec;

use std::iter;
use std::rc::Rc;

use tandem_types::clamp_unit;

pub use spec::TransformSpec;

/// A type-erased transform, for storing transforms chosen at runtime.
pub type Transform = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Default step for [`boost`].
pub const DEFAULT_BOOST: f64 = 0.15;
/// Default step for [`decay`].
pub const DEFAULT_DECAY: f64 = 0.005;
/// Efficiency of a push ("blow") transfer.
pub const PUSH_EFFICIENCY: f64 = 0.8;
/// Efficiency of a pull ("suck") transfer.
pub const PULL_EFFICIENCY: f64 = 0.9;

// ============================================================================
// Core operations
// ============================================================================

/// Nearest value in `[0, 1]`. Idempotent.
#[inline]
#[must_use]
pub fn clamp(x: f64) -> f64 {
    clamp_unit(x)
}

#[inline]
#[must_use]
pub fn identity(x: f64) -> f64 {
    x
}

/// Apply `f` and clamp the result ("fmap").
#[inline]
pub fn apply_transform<F>(f: F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    clamp(f(x))
}

/// Lift a raw value into bounds.
#[inline]
#[must_use]
pub fn pure(x: f64) -> f64 {
    clamp(x)
}

#[inline]
pub fn bind<F>(x: f64, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    apply_transform(f, x)
}

/// Right-to-left composition: `g` runs first. Clamps after each stage.
pub fn compose<F, G>(f: F, g: G) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    move |x| clamp(f(clamp(g(x))))
}

/// Left-to-right composition: `f` runs first. `pipe(f, g) == compose(g, f)`.
pub fn pipe<F, G>(f: F, g: G) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    move |x| clamp(g(clamp(f(x))))
}

// ============================================================================
// Parameterized transforms
// ============================================================================

/// Multiply by `|factor|`. A negative factor is treated as its magnitude.
#[must_use]
pub fn scale(factor: f64) -> impl Fn(f64) -> f64 + Copy + Send + Sync {
    let factor = factor.abs();
    move |x| clamp(x * factor)
}

#[must_use]
pub fn offset(delta: f64) -> impl Fn(f64) -> f64 + Copy + Send + Sync {
    move |x| clamp(x + delta)
}

/// Add `|amount|`. Never lowers its input and is monotone in it.
#[must_use]
pub fn boost(amount: f64) -> impl Fn(f64) -> f64 + Copy + Send + Sync {
    offset(amount.abs())
}

/// Subtract `|rate|`. Never raises its input.
#[must_use]
pub fn decay(rate: f64) -> impl Fn(f64) -> f64 + Copy + Send + Sync {
    offset(-rate.abs())
}

/// 80% efficient scaling used by push transfers.
#[must_use]
pub fn transfer_push() -> impl Fn(f64) -> f64 + Copy + Send + Sync {
    scale(PUSH_EFFICIENCY)
}

/// 90% efficient scaling used by pull transfers.
#[must_use]
pub fn transfer_pull() -> impl Fn(f64) -> f64 + Copy + Send + Sync {
    scale(PULL_EFFICIENCY)
}

// ============================================================================
// Binary operations
// ============================================================================

#[must_use]
pub fn add(a: f64, b: f64) -> f64 {
    clamp(a + b)
}

#[must_use]
pub fn subtract(a: f64, b: f64) -> f64 {
    clamp(a - b)
}

#[must_use]
pub fn multiply(a: f64, b: f64) -> f64 {
    clamp(a * b)
}

#[must_use]
pub fn average(a: f64, b: f64) -> f64 {
    clamp((a + b) / 2.0)
}

// ============================================================================
// Utilities
// ============================================================================

/// Apply `transforms` left to right starting from `clamp(initial)`.
pub fn fold<I>(transforms: I, initial: f64) -> f64
where
    I: IntoIterator,
    I::Item: Fn(f64) -> f64,
{
    transforms
        .into_iter()
        .fold(clamp(initial), |acc, f| apply_transform(f, acc))
}

/// `count + 1` values: `clamp(seed)` followed by `count` successive applications of `f`.
///
/// A pure function of its arguments; each call builds a fresh sequence.
pub fn unfold<F>(seed: f64, f: F, count: usize) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    iter::successors(Some(clamp(seed)), |&x| Some(apply_transform(&f, x)))
        .take(count.saturating_add(1))
        .collect()
}

pub fn curry<F>(f: F) -> impl Fn(f64) -> Box<dyn Fn(f64) -> f64>
where
    F: Fn(f64, f64) -> f64 + 'static,
{
    let f = Rc::new(f);
    move |a| {
        let f = Rc::clone(&f);
        Box::new(move |b| f(a, b))
    }
}

pub fn uncurry<C, G>(curried: C) -> impl Fn(f64, f64) -> f64
where
    C: Fn(f64) -> G,
    G: Fn(f64) -> f64,
{
    move |a, b| curried(a)(b)
}

pub fn flip<F>(f: F) -> impl Fn(f64, f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    move |a, b| f(b, a)
}
