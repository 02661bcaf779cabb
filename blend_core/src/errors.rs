//! # Error Types
//!
//! Structured error types for blend_core. Every error is user-facing and is
//! fixed by changing the inputs: the solver never aborts, it returns the full
//! list of problems it found so the caller can display all of them at once.
//!
//! The `Display` text of each error is the human-readable message shown in
//! the form. The variant and its details carry the same information for
//! programmatic consumers.
//!
//! ## Example
//!
//! ```rust
//! use blend_core::errors::{BlendError, BlendField, ErrorKind};
//!
//! let error = BlendError::out_of_range(BlendField::StartingVolume, -5.0);
//! assert_eq!(error.to_string(), "starting volume must be greater than 0");
//! assert_eq!(error.kind(), ErrorKind::RangeViolation);
//! assert_eq!(error.error_code(), "OUT_OF_RANGE");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four numeric fields of a blend request, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendField {
    /// Starting fuel volume (liters)
    StartingVolume,
    /// Ethanol fraction of the starting fuel
    StartingFraction,
    /// Ethanol fraction of the additive
    AdditiveFraction,
    /// Desired ethanol fraction of the final mixture
    TargetFraction,
}

impl BlendField {
    /// All fields in the order they are validated.
    pub const ALL: [BlendField; 4] = [
        BlendField::StartingVolume,
        BlendField::StartingFraction,
        BlendField::AdditiveFraction,
        BlendField::TargetFraction,
    ];

    /// JSON key of the field in [`BlendInput`](crate::calculations::BlendInput).
    pub fn key(&self) -> &'static str {
        match self {
            BlendField::StartingVolume => "starting_volume_l",
            BlendField::StartingFraction => "starting_fraction",
            BlendField::AdditiveFraction => "additive_fraction",
            BlendField::TargetFraction => "target_fraction",
        }
    }

    /// Message reported when the field is outside its valid domain.
    pub fn range_message(&self) -> &'static str {
        match self {
            BlendField::StartingVolume => "starting volume must be greater than 0",
            BlendField::StartingFraction => {
                "starting ethanol fraction must be between 0% and 100%"
            }
            BlendField::AdditiveFraction => {
                "additive ethanol fraction must be between 0% (exclusive) and 100%"
            }
            BlendField::TargetFraction => "target fraction must be between 0% and 100%",
        }
    }
}

impl fmt::Display for BlendField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Broad classification of blend errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An input is missing, non-numeric, or outside its valid domain
    RangeViolation,
    /// Additive fraction equals target fraction and the base is not at target
    DegenerateEqual,
    /// Reaching the target would need a negative additive volume
    AlreadyAboveTarget,
    /// Target exceeds the additive's own strength while the base is below target
    UnreachableCeiling,
    /// The blend volumes exceed what an `f64` can hold
    Unrepresentable,
}

/// Structured error type for blend requests.
///
/// The `Display` implementation yields the exact message shown to the user.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BlendError {
    /// A field is non-finite or outside its valid range
    #[error("{}", .field.range_message())]
    OutOfRange {
        field: BlendField,
        /// Offending value as text (keeps `NaN` and infinities representable in JSON)
        value: String,
    },

    /// The additive has the same strength as the target, so it cannot move the mix
    #[error("cannot reach target: additive fraction equals target fraction")]
    AdditiveEqualsTarget,

    /// The closed-form additive volume came out meaningfully negative
    #[error(
        "negative result: the starting mixture is already above target, \
         or cannot reach target by adding this additive"
    )]
    NegativeVolume {
        /// Raw solution of the mixing equation, in liters
        additive_volume_l: f64,
    },

    /// The target is stronger than the additive while the base is below target
    #[error("target exceeds additive strength: unreachable with this additive")]
    TargetExceedsAdditive,

    /// The additive or total volume is too large to compute
    #[error("result too large: the required additive volume cannot be represented")]
    VolumeOverflow,
}

impl BlendError {
    /// Create an OutOfRange error for `field`
    pub fn out_of_range(field: BlendField, value: f64) -> Self {
        BlendError::OutOfRange {
            field,
            value: value.to_string(),
        }
    }

    /// Create a NegativeVolume error
    pub fn negative_volume(additive_volume_l: f64) -> Self {
        BlendError::NegativeVolume { additive_volume_l }
    }

    /// The field this error refers to, if it is a range violation
    pub fn field(&self) -> Option<BlendField> {
        match self {
            BlendError::OutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlendError::OutOfRange { .. } => ErrorKind::RangeViolation,
            BlendError::AdditiveEqualsTarget => ErrorKind::DegenerateEqual,
            BlendError::NegativeVolume { .. } => ErrorKind::AlreadyAboveTarget,
            BlendError::TargetExceedsAdditive => ErrorKind::UnreachableCeiling,
            BlendError::VolumeOverflow => ErrorKind::Unrepresentable,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BlendError::OutOfRange { .. } => "OUT_OF_RANGE",
            BlendError::AdditiveEqualsTarget => "ADDITIVE_EQUALS_TARGET",
            BlendError::NegativeVolume { .. } => "NEGATIVE_VOLUME",
            BlendError::TargetExceedsAdditive => "TARGET_EXCEEDS_ADDITIVE",
            BlendError::VolumeOverflow => "VOLUME_OVERFLOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_messages_follow_field() {
        let messages: Vec<String> = BlendField::ALL
            .iter()
            .map(|f| BlendError::out_of_range(*f, f64::NAN).to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "starting volume must be greater than 0",
                "starting ethanol fraction must be between 0% and 100%",
                "additive ethanol fraction must be between 0% (exclusive) and 100%",
                "target fraction must be between 0% and 100%",
            ]
        );
    }

    #[test]
    fn test_nan_value_kept_as_text() {
        let error = BlendError::out_of_range(BlendField::TargetFraction, f64::NAN);
        assert_eq!(
            error,
            BlendError::OutOfRange {
                field: BlendField::TargetFraction,
                value: "NaN".to_string(),
            }
        );
        assert_eq!(error.field(), Some(BlendField::TargetFraction));
    }

    #[test]
    fn test_error_serialization() {
        let error = BlendError::out_of_range(BlendField::StartingVolume, -5.0);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"OutOfRange\""));
        assert!(json.contains("\"field\":\"starting_volume\""));
        let roundtrip: BlendError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes_and_kinds() {
        assert_eq!(BlendError::AdditiveEqualsTarget.error_code(), "ADDITIVE_EQUALS_TARGET");
        assert_eq!(BlendError::AdditiveEqualsTarget.kind(), ErrorKind::DegenerateEqual);
        assert_eq!(BlendError::negative_volume(-1.0).kind(), ErrorKind::AlreadyAboveTarget);
        assert_eq!(
            BlendError::TargetExceedsAdditive.kind(),
            ErrorKind::UnreachableCeiling
        );
        assert!(BlendError::TargetExceedsAdditive.field().is_none());
        assert_eq!(BlendError::VolumeOverflow.error_code(), "VOLUME_OVERFLOW");
        assert_eq!(BlendError::VolumeOverflow.kind(), ErrorKind::Unrepresentable);
    }
}
