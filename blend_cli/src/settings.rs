//! Display settings and CLI errors.
//!
//! Settings come from an optional JSON file; command line flags override
//! whatever the file says. Missing keys fall back to the defaults.
//!
//! ```json
//! {
//!   "decimals": 2,
//!   "decimal_separator": ",",
//!   "thousands_separator": ".",
//!   "json": false
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Largest number of fraction digits the renderer will print.
pub const MAX_DECIMALS: usize = 12;

/// Errors raised by the CLI shell. Blend errors are not among them; those are
/// rendered as part of the result.
#[derive(Error, Debug)]
pub enum CliError {
    /// Settings file could not be read
    #[error("could not read settings file '{path}': {reason}")]
    ReadSettings { path: String, reason: String },

    /// Settings file is not valid settings JSON
    #[error("invalid settings file '{path}': {reason}")]
    ParseSettings { path: String, reason: String },

    /// Reading a prompt answer or writing output failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Result could not be encoded as JSON
    #[error("could not encode result as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How results are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Fixed number of fraction digits
    pub decimals: usize,

    /// Character between integer and fraction digits
    pub decimal_separator: char,

    /// Character between groups of three integer digits, none by default
    pub thousands_separator: Option<char>,

    /// Print the raw result as JSON instead of text
    pub json: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            decimals: 2,
            decimal_separator: '.',
            thousands_separator: None,
            json: false,
        }
    }
}

impl DisplaySettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|e| CliError::ReadSettings {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let settings: DisplaySettings =
            serde_json::from_str(&text).map_err(|e| CliError::ParseSettings {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), ?settings, "loaded display settings");
        Ok(settings.sanitized())
    }

    /// Apply command line overrides.
    pub fn with_overrides(mut self, decimals: Option<usize>, json: bool) -> Self {
        if let Some(d) = decimals {
            self.decimals = d;
        }
        self.json |= json;
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        if self.decimals > MAX_DECIMALS {
            warn!(requested = self.decimals, max = MAX_DECIMALS, "too many decimals, clamping");
            self.decimals = MAX_DECIMALS;
        }
        if self.thousands_separator == Some(self.decimal_separator) {
            warn!(
                separator = %self.decimal_separator,
                "thousands separator equals decimal separator, dropping it"
            );
            self.thousands_separator = None;
        }
        self
    }
}
