//! Predicates over quantities and their boolean combinators.

#[must_use]
pub fn is_in_bounds(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

/// `|a - b| <= threshold`. Symmetric in `a` and `b`.
#[must_use]
pub fn is_balanced(threshold: f64) -> impl Fn(f64, f64) -> bool + Copy + Send + Sync {
    move |a, b| (a - b).abs() <= threshold
}

#[must_use]
pub fn is_above_threshold(threshold: f64) -> impl Fn(f64) -> bool + Copy + Send + Sync {
    move |x| x > threshold
}

#[must_use]
pub fn is_below_threshold(threshold: f64) -> impl Fn(f64) -> bool + Copy + Send + Sync {
    move |x| x < threshold
}

pub fn and<P, Q>(p: P, q: Q) -> impl Fn(f64) -> bool
where
    P: Fn(f64) -> bool,
    Q: Fn(f64) -> bool,
{
    move |x| p(x) && q(x)
}

pub fn or<P, Q>(p: P, q: Q) -> impl Fn(f64) -> bool
where
    P: Fn(f64) -> bool,
    Q: Fn(f64) -> bool,
{
    move |x| p(x) || q(x)
}

pub fn not<P>(p: P) -> impl Fn(f64) -> bool
where
    P: Fn(f64) -> bool,
{
    move |x| !p(x)
}
