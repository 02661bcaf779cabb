//! # Blend Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation outcome (JSON-serializable)
//! - `calculate(input)` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`blend`] - Additive volume needed to reach a target ethanol fraction

pub mod blend;

// Re-export commonly used types
pub use blend::{
    calculate, solve, BlendInput, BlendNote, BlendResult, BlendSolution, CENTERED_TOLERANCE,
    EQUALITY_TOLERANCE, NEGATIVE_VOLUME_TOLERANCE,
};
