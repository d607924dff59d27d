//! Configuration types for the adversarial pair

use serde::{Deserialize, Serialize};

/// Configuration for the Generator network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Dimension of the latent space
    pub latent_dim: usize,
    /// Dimension of the data space
    pub data_dim: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { latent_dim: 2, data_dim: 2 }
    }
}

/// Configuration for the Discriminator network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscriminatorConfig {
    /// Dimension of the data space
    pub data_dim: usize,
    /// Sizes of the two hidden layers
    pub hidden_dims: [usize; 2],
}

impl Default for DiscriminatorConfig {
    fn default() -> Self {
        Self { data_dim: 2, hidden_dims: [5, 3] }
    }
}

/// Configuration for the complete adversarial pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanConfig {
    /// Generator configuration
    pub generator: GeneratorConfig,
    /// Discriminator configuration
    pub discriminator: DiscriminatorConfig,
    /// Learning rate for the discriminator
    pub lr_d: f32,
    /// Learning rate for the generator
    pub lr_g: f32,
    /// Mini-batch row count
    pub batch_size: usize,
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            discriminator: DiscriminatorConfig::default(),
            lr_d: 0.05,
            lr_g: 0.005,
            batch_size: crate::data::BATCH_SIZE,
        }
    }
}
