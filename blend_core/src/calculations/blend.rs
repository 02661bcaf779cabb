//! # Ethanol Blend Calculation
//!
//! Finds how many liters of an ethanol additive bring a starting fuel volume
//! to a target ethanol fraction.
//!
//! ## Model
//!
//! Ethanol volumes add linearly (ideal mixing, no temperature or density
//! correction):
//!
//! ```text
//! (Vg·Eg + Ve·Ea) / (Vg + Ve) = Et   =>   Ve = Vg·(Et − Eg) / (Ea − Et)
//! ```
//!
//! where `Vg` is the starting volume, `Eg` its ethanol fraction, `Ea` the
//! additive's ethanol fraction, `Et` the target and `Ve` the additive volume.
//!
//! ## Example
//!
//! ```rust
//! use blend_core::calculations::blend::{solve, BlendNote, BlendResult};
//!
//! // 13 L of E6, 96% additive, aiming for E40
//! match solve(13.0, 0.06, 0.96, 0.40) {
//!     BlendResult::Solved(s) => {
//!         assert!((s.additive_volume_l - 7.8929).abs() < 1e-3);
//!         assert_eq!(s.note, BlendNote::Centered);
//!     }
//!     BlendResult::Invalid { errors } => panic!("unexpected: {errors:?}"),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{BlendError, BlendField};
use crate::units::{Fraction, Liters};

/// Differences below this are treated as exact equality of two fractions.
pub const EQUALITY_TOLERANCE: f64 = 1e-12;

/// Additive volumes below `-NEGATIVE_VOLUME_TOLERANCE` liters are meaningfully
/// negative; anything above is floating-point noise and gets clamped to zero.
pub const NEGATIVE_VOLUME_TOLERANCE: f64 = 1e-9;

/// A final fraction within this distance of the target counts as centered.
pub const CENTERED_TOLERANCE: f64 = 5e-4;

/// Input parameters for a blend.
///
/// Fractions are ratios in `[0, 1]`, not percentages.
///
/// ## JSON Example
///
/// ```json
/// {
///   "starting_volume_l": 13.0,
///   "starting_fraction": 0.06,
///   "additive_fraction": 0.96,
///   "target_fraction": 0.40
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendInput {
    /// Starting fuel volume in liters (`Vg`), must be > 0
    pub starting_volume_l: f64,

    /// Ethanol fraction of the starting fuel (`Eg`), in `[0, 1]`
    pub starting_fraction: f64,

    /// Ethanol fraction of the additive (`Ea`), in `(0, 1]`
    pub additive_fraction: f64,

    /// Desired ethanol fraction of the final mixture (`Et`), in `[0, 1]`
    pub target_fraction: f64,
}

impl BlendInput {
    /// Create a new blend input from a volume and three ratios.
    pub fn new(
        starting_volume_l: f64,
        starting_fraction: f64,
        additive_fraction: f64,
        target_fraction: f64,
    ) -> Self {
        BlendInput {
            starting_volume_l,
            starting_fraction,
            additive_fraction,
            target_fraction,
        }
    }

    fn value(&self, field: BlendField) -> f64 {
        match field {
            BlendField::StartingVolume => self.starting_volume_l,
            BlendField::StartingFraction => self.starting_fraction,
            BlendField::AdditiveFraction => self.additive_fraction,
            BlendField::TargetFraction => self.target_fraction,
        }
    }

    /// Validate every field and return all violations in field order.
    ///
    /// An empty vector means the input can be solved. Non-finite values
    /// (`NaN`, infinities) always fail.
    pub fn validate(&self) -> Vec<BlendError> {
        BlendField::ALL
            .iter()
            .filter_map(|&field| {
                let v = self.value(field);
                let ok = v.is_finite()
                    && match field {
                        BlendField::StartingVolume => v > 0.0,
                        BlendField::StartingFraction | BlendField::TargetFraction => {
                            (0.0..=1.0).contains(&v)
                        }
                        BlendField::AdditiveFraction => v > 0.0 && v <= 1.0,
                    };
                (!ok).then(|| BlendError::out_of_range(field, v))
            })
            .collect()
    }

    /// Solve this blend. Same as [`calculate`].
    pub fn solve(&self) -> BlendResult {
        calculate(self)
    }
}

/// Advisory note attached to a solved blend. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendNote {
    /// The starting fuel already sits at the target; nothing to add
    AlreadyAtTarget,
    /// The final fraction lands on the target
    Centered,
    /// The final fraction is off the target by more than [`CENTERED_TOLERANCE`]
    RoundingDeviation,
}

impl BlendNote {
    /// Note for a solved blend whose final fraction is `final_fraction`.
    pub fn for_deviation(final_fraction: f64, target_fraction: f64) -> Self {
        if (final_fraction - target_fraction).abs() < CENTERED_TOLERANCE {
            BlendNote::Centered
        } else {
            BlendNote::RoundingDeviation
        }
    }
}

impl fmt::Display for BlendNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlendNote::AlreadyAtTarget => "already at target",
            BlendNote::Centered => "centered",
            BlendNote::RoundingDeviation => "rounding may introduce small deviation",
        })
    }
}

/// A feasible blend.
///
/// ## JSON Example
///
/// ```json
/// {
///   "additive_volume_l": 7.892857142857143,
///   "total_volume_l": 20.892857142857142,
///   "final_fraction": 0.4,
///   "water_volume_l": 0.3157142857142858,
///   "note": "centered"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendSolution {
    /// Liters of additive to add (`Ve`), never negative
    pub additive_volume_l: f64,

    /// Resulting volume `Vg + Ve` (`Vt`)
    pub total_volume_l: f64,

    /// Ethanol fraction of the resulting mixture (`Efinal`)
    pub final_fraction: f64,

    /// Non-ethanol volume brought in by the additive, `Ve·(1 − Ea)`
    pub water_volume_l: f64,

    /// Whether the solve landed on the target
    pub note: BlendNote,
}

/// Outcome of a blend calculation: either a solution or the list of reasons
/// there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlendResult {
    /// One or more validation or feasibility errors, in check order
    Invalid { errors: Vec<BlendError> },
    /// A feasible blend
    Solved(BlendSolution),
}

impl BlendResult {
    fn invalid(errors: Vec<BlendError>) -> Self {
        BlendResult::Invalid { errors }
    }

    /// Check if the blend was solved
    pub fn is_solved(&self) -> bool {
        matches!(self, BlendResult::Solved(_))
    }

    /// The solution, if any
    pub fn solution(&self) -> Option<&BlendSolution> {
        match self {
            BlendResult::Solved(s) => Some(s),
            BlendResult::Invalid { .. } => None,
        }
    }

    /// The errors, empty when solved
    pub fn errors(&self) -> &[BlendError] {
        match self {
            BlendResult::Invalid { errors } => errors,
            BlendResult::Solved(_) => &[],
        }
    }

    /// User-facing error messages, in check order
    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }

    /// Convert into a standard `Result` for use with `?`
    pub fn into_result(self) -> Result<BlendSolution, Vec<BlendError>> {
        match self {
            BlendResult::Solved(s) => Ok(s),
            BlendResult::Invalid { errors } => Err(errors),
        }
    }
}

/// Solve a blend from raw values.
///
/// # Arguments
///
/// * `starting_volume_l` - Starting fuel volume in liters (`Vg`)
/// * `starting_fraction` - Ethanol ratio of the starting fuel (`Eg`)
/// * `additive_fraction` - Ethanol ratio of the additive (`Ea`)
/// * `target_fraction` - Desired ethanol ratio (`Et`)
pub fn solve(
    starting_volume_l: f64,
    starting_fraction: f64,
    additive_fraction: f64,
    target_fraction: f64,
) -> BlendResult {
    calculate(&BlendInput::new(
        starting_volume_l,
        starting_fraction,
        additive_fraction,
        target_fraction,
    ))
}

/// Calculate the additive volume for a blend.
///
/// Pure and total: every input, including `NaN`, yields a [`BlendResult`].
///
/// # Returns
///
/// * `BlendResult::Solved` - Additive volume, totals and an advisory note
/// * `BlendResult::Invalid` - All range violations, or the infeasibility reasons
pub fn calculate(input: &BlendInput) -> BlendResult {
    let errors = input.validate();
    if !errors.is_empty() {
        debug!(count = errors.len(), "blend input rejected");
        return BlendResult::invalid(errors);
    }

    let vg = input.starting_volume_l;
    let eg = input.starting_fraction;
    let ea = input.additive_fraction;
    let et = input.target_fraction;

    // Ea == Et: the equation divides by zero
    if (ea - et).abs() < EQUALITY_TOLERANCE {
        if (eg - et).abs() < EQUALITY_TOLERANCE {
            return BlendResult::Solved(BlendSolution {
                additive_volume_l: 0.0,
                total_volume_l: vg,
                final_fraction: et,
                water_volume_l: 0.0,
                note: BlendNote::AlreadyAtTarget,
            });
        }
        debug!(ea, et, "additive strength equals target");
        return BlendResult::invalid(vec![BlendError::AdditiveEqualsTarget]);
    }

    let ve_raw = vg * (et - eg) / (ea - et);

    // Negative check first, then the ceiling check. Unlike a fail-fast chain,
    // the ceiling check runs even when the negative one fired, so a target
    // above the additive's strength always names the ceiling. When both fire
    // the negative message stays first.
    let mut errors = Vec::new();
    if ve_raw < -NEGATIVE_VOLUME_TOLERANCE {
        // Saturate so the payload stays finite in JSON
        errors.push(BlendError::negative_volume(ve_raw.max(f64::MIN)));
    }
    if et > ea + EQUALITY_TOLERANCE && eg < et - EQUALITY_TOLERANCE {
        errors.push(BlendError::TargetExceedsAdditive);
    }
    if !errors.is_empty() {
        debug!(ve_raw, ?errors, "blend infeasible");
        return BlendResult::invalid(errors);
    }

    let ve = ve_raw.max(0.0);
    let total = Liters(vg) + Liters(ve);
    let final_fraction = (vg * eg + ve * ea) / total.0;
    let water = Liters(ve) * Fraction(ea).complement();

    if ![ve, total.0, final_fraction, water.0].iter().all(|v| v.is_finite()) {
        debug!(ve_raw, total = total.0, "blend volume overflows f64");
        return BlendResult::invalid(vec![BlendError::VolumeOverflow]);
    }

    let note = BlendNote::for_deviation(final_fraction, et);

    debug!(ve, final_fraction, %note, "blend solved");

    BlendResult::Solved(BlendSolution {
        additive_volume_l: ve,
        total_volume_l: total.0,
        final_fraction,
        water_volume_l: water.0,
        note,
    })
}
