//! Discriminator network

use super::{DiscriminatorConfig, Linear};
use crate::autograd::{tanh, Tensor};

/// Discriminator: a small tanh MLP producing one real/fake logit per row.
///
/// `Linear(2, 5) -> tanh -> Linear(5, 3) -> tanh -> Linear(3, 1)`
#[derive(Debug)]
pub struct Discriminator {
    /// Configuration
    pub config: DiscriminatorConfig,
    l1: Linear,
    l2: Linear,
    l3: Linear,
}

impl Discriminator {
    /// Create a zero-initialized discriminator
    pub fn new(config: DiscriminatorConfig) -> Self {
        let [h1, h2] = config.hidden_dims;
        let l1 = Linear::new(config.data_dim, h1);
        let l2 = Linear::new(h1, h2);
        let l3 = Linear::new(h2, 1);
        Self { config, l1, l2, l3 }
    }

    /// Score `rows` stacked data points, returning one logit per row
    pub fn forward(&self, x: &Tensor, rows: usize) -> Tensor {
        let h = tanh(&self.l1.forward(x, rows));
        let h = tanh(&self.l2.forward(&h, rows));
        self.l3.forward(&h, rows)
    }

    /// Learnable tensors, layer by layer
    pub fn params_mut(&mut self) -> Vec<&mut Tensor> {
        let mut params = Vec::with_capacity(6);
        params.extend(self.l1.params_mut());
        params.extend(self.l2.params_mut());
        params.extend(self.l3.params_mut());
        params
    }

    /// Mutable layer access for the parameter initializer
    pub fn layers_mut(&mut self) -> [&mut Linear; 3] {
        [&mut self.l1, &mut self.l2, &mut self.l3]
    }

    /// Number of learnable scalars
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.l1.num_parameters() + self.l2.num_parameters() + self.l3.num_parameters()
    }
}
