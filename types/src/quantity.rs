//! Normalized quantity proof type.
//!
//! A [`Quantity`] is always inside `[0.0, 1.0]`. The only way to build one is
//! through [`Quantity::new`], which clamps, so holding a value is proof that it
//! is in bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clamp any `f64` into `[0.0, 1.0]`.
///
/// NaN has no nearest point in the interval and maps to `0.0`.
#[inline]
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// A scalar clamped into the closed unit interval.
///
/// # Serde
///
/// Serializes as a plain JSON number. Deserialization clamps, so an
/// out-of-range stored value is pulled back into bounds rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);
    pub const HALF: Quantity = Quantity(0.5);
    pub const ONE: Quantity = Quantity(1.0);

    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(clamp_unit(value))
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn is_saturated(self) -> bool {
        self.0 >= 1.0
    }

    /// Absolute distance between two quantities, itself in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Quantity) -> f64 {
        (self.0 - other.0).abs()
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}
