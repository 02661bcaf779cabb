//! # blend_core - Ethanol Blend Calculation Engine
//!
//! `blend_core` is the computational heart of Ethablend. It answers one
//! question: how many liters of a high-concentration ethanol additive must be
//! poured into a starting fuel volume to reach a target ethanol fraction.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: One pure function, safe to call on every keystroke
//! - **Total**: Every input yields a result, never a panic
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types whose text is the user message
//!
//! ## Quick Start
//!
//! ```rust
//! use blend_core::form::BlendForm;
//!
//! // The form holds text exactly as typed, percentages included
//! let form = BlendForm::new("13", "6", "96", "40");
//! let result = form.solve();
//!
//! let solution = result.solution().unwrap();
//! assert!((solution.additive_volume_l - 7.89).abs() < 0.01);
//!
//! // Serialize to JSON for display or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The blend solver and its input/result types
//! - [`form`] - Text-field parsing and presets shared by front ends
//! - [`units`] - Volume and concentration newtypes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod form;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, solve, BlendInput, BlendNote, BlendResult, BlendSolution};
pub use errors::{BlendError, BlendField, ErrorKind};
pub use form::{BlendForm, Preset};
