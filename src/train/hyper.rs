//! Hyperparameter form and validation
//!
//! Inputs arrive as strings, exactly as the interactive form delivers them;
//! parsing and range checks happen here so the shell only ever sees either a
//! validated `HyperParams` or the single user-facing error.

use crate::model::{GanConfig, GeneratorConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The one message shown to the user for any invalid input
pub const INPUT_ERROR_MESSAGE: &str = "Something goes wrong with your input.";

/// Hyperparameter parse or validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HyperParamError {
    /// A field did not parse as a number of the expected kind
    #[error("failed to parse {field}: {value:?}")]
    Parse {
        /// Offending form field
        field: &'static str,
        /// Raw input text
        value: String,
    },

    /// A field parsed but lies outside its valid range
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Offending form field
        field: &'static str,
        /// Parsed value, rendered for the log
        value: String,
    },
}

/// Raw form state: the three original inputs plus the latent width
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HyperForm {
    /// Discriminator learning rate
    pub lr_d: String,
    /// Generator learning rate
    pub lr_g: String,
    /// Number of training epochs
    pub num_epochs: String,
    /// Latent space width
    pub latent_dim: String,
}

impl Default for HyperForm {
    fn default() -> Self {
        Self {
            lr_d: "0.05".to_string(),
            lr_g: "0.005".to_string(),
            num_epochs: "30".to_string(),
            latent_dim: "2".to_string(),
        }
    }
}

/// Validated hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperParams {
    /// Discriminator learning rate
    pub lr_d: f32,
    /// Generator learning rate
    pub lr_g: f32,
    /// Number of training epochs
    pub num_epochs: usize,
    /// Latent space width
    pub latent_dim: usize,
}

impl HyperParams {
    /// Parse and validate a form.
    ///
    /// Learning rates are floats and must be positive and finite. The epoch
    /// count and latent width are integers and must be at least 1; a float
    /// like "1.5" in an integer field is rejected.
    pub fn parse(form: &HyperForm) -> Result<Self, HyperParamError> {
        let lr_d = parse_lr("lr_d", &form.lr_d)?;
        let lr_g = parse_lr("lr_g", &form.lr_g)?;
        let num_epochs = parse_count("num_epochs", &form.num_epochs)?;
        let latent_dim = parse_count("latent_dim", &form.latent_dim)?;

        Ok(Self { lr_d, lr_g, num_epochs, latent_dim })
    }

    /// Network and optimizer configuration for one run
    pub fn gan_config(&self) -> GanConfig {
        GanConfig {
            generator: GeneratorConfig { latent_dim: self.latent_dim, ..GeneratorConfig::default() },
            lr_d: self.lr_d,
            lr_g: self.lr_g,
            ..GanConfig::default()
        }
    }
}

fn parse_lr(field: &'static str, raw: &str) -> Result<f32, HyperParamError> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|_| HyperParamError::Parse { field, value: raw.to_string() })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(HyperParamError::OutOfRange { field, value: value.to_string() });
    }
    Ok(value)
}

fn parse_count(field: &'static str, raw: &str) -> Result<usize, HyperParamError> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| HyperParamError::Parse { field, value: raw.to_string() })?;

    if value == 0 {
        return Err(HyperParamError::OutOfRange { field, value: value.to_string() });
    }
    Ok(value)
}
