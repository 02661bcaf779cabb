//! # Unit Types
//!
//! Lightweight newtype wrappers for the quantities a blend works with.
//! They serialize as bare numbers so JSON stays clean.
//!
//! The form collects ethanol content as a percentage; the solver works with
//! ratios in `[0, 1]`. The conversions below are the only place the factor of
//! 100 lives.
//!
//! ## Example
//!
//! ```rust
//! use blend_core::units::{Fraction, Percent};
//!
//! let target = Fraction::from(Percent(40.0));
//! assert_eq!(target.0, 0.4);
//!
//! let shown: Percent = Fraction(0.96).into();
//! assert_eq!(shown.0, 96.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

// ============================================================================
// Volume
// ============================================================================

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl Add for Liters {
    type Output = Liters;
    fn add(self, rhs: Liters) -> Liters {
        Liters(self.0 + rhs.0)
    }
}

/// Volume times a fraction is the part of that volume the fraction describes.
impl Mul<Fraction> for Liters {
    type Output = Liters;
    fn mul(self, rhs: Fraction) -> Liters {
        Liters(self.0 * rhs.0)
    }
}

// ============================================================================
// Concentration
// ============================================================================

/// Volume fraction as a ratio (0.4 = 40%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(pub f64);

/// Volume fraction as a percentage (40.0 = 40%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Fraction {
    /// The complementary fraction, `1 - self`
    pub fn complement(self) -> Fraction {
        Fraction(1.0 - self.0)
    }
}

impl From<Percent> for Fraction {
    fn from(pct: Percent) -> Self {
        Fraction(pct.0 / 100.0)
    }
}

impl From<Fraction> for Percent {
    fn from(frac: Fraction) -> Self {
        Percent(frac.0 * 100.0)
    }
}
