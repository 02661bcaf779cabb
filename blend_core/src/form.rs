//! # Blend Form
//!
//! The text side of a blend request: four fields as the user typed them,
//! percentages included. Every front end feeds its fields through here so
//! that parsing and the percent-to-ratio step happen in one place.
//!
//! Unparseable text becomes `NaN`, which the solver reports as a range error
//! for that field. Parsing itself never fails.
//!
//! ## Example
//!
//! ```rust
//! use blend_core::form::{BlendForm, Preset};
//!
//! let mut form = BlendForm::default();
//! Preset::E10.apply(&mut form);
//! assert_eq!(form.starting_percent, "10");
//!
//! // Comma decimal separators are accepted
//! form.starting_volume = "12,5".to_string();
//! assert_eq!(form.to_input().starting_volume_l, 12.5);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::{calculate, BlendInput, BlendResult};
use crate::units::{Fraction, Percent};

/// Parse a user-typed number.
///
/// Surrounding whitespace is ignored and the first `,` is read as a decimal
/// point. Empty, malformed and non-finite text all yield `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let normalized = text.trim().replacen(',', ".", 1);
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

fn parse_percent(text: &str) -> f64 {
    Fraction::from(Percent(parse_number(text))).0
}

/// Raw text of the four blend fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendForm {
    /// Starting fuel volume in liters
    pub starting_volume: String,

    /// Ethanol content of the starting fuel, percent (E6 = "6")
    pub starting_percent: String,

    /// Ethanol content of the additive, percent
    pub additive_percent: String,

    /// Desired ethanol content of the mix, percent (E40 = "40")
    pub target_percent: String,
}

impl BlendForm {
    /// Create a form from four text fields.
    pub fn new(
        starting_volume: impl Into<String>,
        starting_percent: impl Into<String>,
        additive_percent: impl Into<String>,
        target_percent: impl Into<String>,
    ) -> Self {
        BlendForm {
            starting_volume: starting_volume.into(),
            starting_percent: starting_percent.into(),
            additive_percent: additive_percent.into(),
            target_percent: target_percent.into(),
        }
    }

    /// Parse the fields into solver input, converting percentages to ratios.
    pub fn to_input(&self) -> BlendInput {
        BlendInput::new(
            parse_number(&self.starting_volume),
            parse_percent(&self.starting_percent),
            parse_percent(&self.additive_percent),
            parse_percent(&self.target_percent),
        )
    }

    /// Parse and solve in one step.
    pub fn solve(&self) -> BlendResult {
        calculate(&self.to_input())
    }
}

impl Default for BlendForm {
    /// The reference case: 13 L of E6, 96% additive, E40 target.
    fn default() -> Self {
        let mut form = BlendForm::new("", "", "", "");
        Preset::ReferenceCase.apply(&mut form);
        form
    }
}

/// Error returned when a preset name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown preset '{0}' (expected one of: reference, e10, e0)")]
pub struct UnknownPreset(pub String);

/// Form shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// 13 L of E6 to E40 with a 96% additive (sets every field)
    ReferenceCase,
    /// Starting fuel is E10 (sets the starting percent only)
    E10,
    /// Starting fuel is ethanol-free (sets the starting percent only)
    E0,
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 3] = [Preset::ReferenceCase, Preset::E10, Preset::E0];

    /// Short name accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Preset::ReferenceCase => "reference",
            Preset::E10 => "e10",
            Preset::E0 => "e0",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Preset::ReferenceCase => "13 L E6 -> E40 with 96% additive",
            Preset::E10 => "starting fuel E10",
            Preset::E0 => "starting fuel E0",
        }
    }

    /// Overwrite the fields this preset controls.
    pub fn apply(&self, form: &mut BlendForm) {
        match self {
            Preset::ReferenceCase => {
                form.starting_volume = "13".to_string();
                form.starting_percent = "6".to_string();
                form.additive_percent = "96".to_string();
                form.target_percent = "40".to_string();
            }
            Preset::E10 => form.starting_percent = "10".to_string(),
            Preset::E0 => form.starting_percent = "0".to_string(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BlendField;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("13"), 13.0);
        assert_eq!(parse_number(" 13.5 "), 13.5);
        assert_eq!(parse_number("13,5"), 13.5);
        assert_eq!(parse_number("-2"), -2.0);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        for text in ["", "   ", "abc", "1,2,3", "inf", "NaN", "1e400"] {
            assert!(parse_number(text).is_nan(), "{text:?} should not parse");
        }
    }

    #[test]
    fn test_default_is_reference_case() {
        let form = BlendForm::default();
        assert_eq!(form, BlendForm::new("13", "6", "96", "40"));

        let input = form.to_input();
        assert_eq!(input.starting_volume_l, 13.0);
        assert!((input.starting_fraction - 0.06).abs() < 1e-15);
        assert!((input.additive_fraction - 0.96).abs() < 1e-15);
        assert!((input.target_fraction - 0.40).abs() < 1e-15);
    }

    #[test]
    fn test_form_solves_reference_case() {
        let result = BlendForm::default().solve();
        let s = result.solution().unwrap();
        assert!((s.additive_volume_l - 7.8929).abs() < 1e-4);
    }

    #[test]
    fn test_unparseable_field_reports_its_range_error() {
        let form = BlendForm::new("13", "six", "96", "40");
        let result = form.solve();
        let fields: Vec<_> = result.errors().iter().filter_map(|e| e.field()).collect();
        assert_eq!(fields, vec![BlendField::StartingFraction]);
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let result = BlendForm::new("", "", "", "").solve();
        assert_eq!(result.errors().len(), 4);
    }

    #[test]
    fn test_presets_touch_only_their_fields() {
        let mut form = BlendForm::new("20", "3", "99", "85");

        Preset::E10.apply(&mut form);
        assert_eq!(form, BlendForm::new("20", "10", "99", "85"));

        Preset::E0.apply(&mut form);
        assert_eq!(form, BlendForm::new("20", "0", "99", "85"));

        Preset::ReferenceCase.apply(&mut form);
        assert_eq!(form, BlendForm::default());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("reference".parse::<Preset>(), Ok(Preset::ReferenceCase));
        assert_eq!(" E10 ".parse::<Preset>(), Ok(Preset::E10));
        assert_eq!(
            "e85".parse::<Preset>(),
            Err(UnknownPreset("e85".to_string()))
        );
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
        }
    }
}
