//! Generator network

use super::{GeneratorConfig, Linear, Trace};
use crate::autograd::Tensor;
use crate::data::latent_batch;
use rand::Rng;

/// Generator: a single affine map from latent space to data space.
///
/// The target distribution is itself an affine image of a Gaussian, so one
/// `Linear(latent_dim -> data_dim)` is exactly expressive enough.
#[derive(Debug)]
pub struct Generator {
    /// Configuration
    pub config: GeneratorConfig,
    layer: Linear,
}

impl Generator {
    /// Create a zero-initialized generator
    pub fn new(config: GeneratorConfig) -> Self {
        let layer = Linear::new(config.latent_dim, config.data_dim);
        Self { config, layer }
    }

    /// Map `rows` latent points to data space.
    ///
    /// `Trace::Detached` cuts the tape at the output: the discriminator can
    /// score the samples without gradients reaching this network.
    pub fn forward(&self, z: &Tensor, rows: usize, trace: Trace) -> Tensor {
        let out = self.layer.forward(z, rows);
        match trace {
            Trace::Recorded => out,
            Trace::Detached => out.detach(),
        }
    }

    /// Draw `rows` fresh latent points and return their images as 2-D points,
    /// for plotting
    pub fn sample_points<R: Rng + ?Sized>(&self, rng: &mut R, rows: usize) -> Vec<[f32; 2]> {
        let z = Tensor::from_vec(latent_batch(rng, rows, self.config.latent_dim), false);
        let out = self.forward(&z, rows, Trace::Detached);
        let data = out.data();
        (0..rows).map(|r| [data[r * 2], data[r * 2 + 1]]).collect()
    }

    /// Learnable tensors
    pub fn params_mut(&mut self) -> Vec<&mut Tensor> {
        self.layer.params_mut().into_iter().collect()
    }

    /// The affine layer, for inspection in tests
    pub fn layer(&self) -> &Linear {
        &self.layer
    }

    /// Mutable access for the parameter initializer
    pub fn layer_mut(&mut self) -> &mut Linear {
        &mut self.layer
    }

    /// Number of learnable scalars
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.layer.num_parameters()
    }
}
