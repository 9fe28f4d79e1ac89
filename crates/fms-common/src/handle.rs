//! Opaque handles to heap-owned add-in objects.
//!
//! A spreadsheet cell can only hold a number, so a handle travels through
//! the sheet as an `f64` (the `HANDLEX` convention). Keys are small positive
//! integers, which survive the round trip through `f64` exactly.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest integer that an `f64` represents exactly.
const MAX_EXACT: u64 = 1 << f64::MANTISSA_DIGITS;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// The handle that never refers to anything.
    pub const INVALID: Self = Self(0);

    pub fn new(key: u64) -> Self {
        Self(key)
    }

    pub fn key(self) -> u64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 != 0 && self.0 <= MAX_EXACT
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64
    }

    /// Decode a cell value. Anything that is not a positive integer is not a handle.
    pub fn from_f64(x: f64) -> Option<Self> {
        if x.is_finite() && x >= 1.0 && x.fract() == 0.0 && x <= MAX_EXACT as f64 {
            Some(Self(x as u64))
        } else {
            None
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
