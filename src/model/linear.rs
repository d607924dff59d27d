//! Fully connected layer

use crate::autograd::{add_bias, matmul, Tensor};
use crate::data::standard_normal;
use rand::Rng;

/// A dense affine layer: `y = x @ W + b`
///
/// The weight is stored row-major as `(in_dim x out_dim)` so a batched
/// forward is a single matmul with explicit shape arguments.
#[derive(Debug)]
pub struct Linear {
    weight: Tensor,
    bias: Tensor,
    in_dim: usize,
    out_dim: usize,
}

impl Linear {
    /// Create a zero-initialized layer; call [`Linear::init_normal`] before
    /// training
    pub fn new(in_dim: usize, out_dim: usize) -> Self {
        Self {
            weight: Tensor::zeros(in_dim * out_dim, true),
            bias: Tensor::zeros(out_dim, true),
            in_dim,
            out_dim,
        }
    }

    /// Overwrite weight and bias with Normal(0, std) draws
    pub fn init_normal<R: Rng + ?Sized>(&mut self, rng: &mut R, std: f32) {
        for w in self.weight.data_mut().iter_mut() {
            *w = standard_normal(rng) * std;
        }
        for b in self.bias.data_mut().iter_mut() {
            *b = standard_normal(rng) * std;
        }
    }

    /// Forward `rows` stacked input rows through the layer
    pub fn forward(&self, input: &Tensor, rows: usize) -> Tensor {
        let z = matmul(input, &self.weight, rows, self.in_dim, self.out_dim);
        add_bias(&z, &self.bias, rows, self.out_dim)
    }

    /// Input width
    pub fn in_dim(&self) -> usize {
        self.in_dim
    }

    /// Output width
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    /// Learnable tensors, weight first
    pub fn params_mut(&mut self) -> [&mut Tensor; 2] {
        [&mut self.weight, &mut self.bias]
    }

    /// Read-only view of the weight tensor
    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    /// Read-only view of the bias tensor
    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    /// Number of learnable scalars
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.weight.len() + self.bias.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_linear_shapes() {
        let layer = Linear::new(2, 5);
        assert_eq!(layer.num_parameters(), 15);
        assert_eq!(layer.in_dim(), 2);
        assert_eq!(layer.out_dim(), 5);
    }

    #[test]
    fn test_linear_forward_known_values() {
        let mut layer = Linear::new(2, 2);
        // W = [[1, 2], [3, 4]], b = [10, 20]
        layer.weight.data_mut().assign(&ndarray::arr1(&[1.0, 2.0, 3.0, 4.0]));
        layer.bias.data_mut().assign(&ndarray::arr1(&[10.0, 20.0]));

        let x = Tensor::from_vec(vec![1.0, 1.0], false);
        let y = layer.forward(&x, 1);

        // [1, 1] @ W + b = [4 + 10, 6 + 20]
        assert_relative_eq!(y.data()[0], 14.0, epsilon = 1e-6);
        assert_relative_eq!(y.data()[1], 26.0, epsilon = 1e-6);
    }

    #[test]
    fn test_linear_batched_forward() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layer = Linear::new(2, 3);
        layer.init_normal(&mut rng, 0.02);

        let x = Tensor::from_vec(vec![0.5; 8], false);
        let y = layer.forward(&x, 4);
        assert_eq!(y.len(), 12);
    }

    #[test]
    fn test_init_normal_scale() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut layer = Linear::new(20, 20);
        layer.init_normal(&mut rng, 0.02);

        let max = layer.weight().data().iter().fold(0.0f32, |m, w| m.max(w.abs()));
        assert!(max > 0.0, "weights untouched");
        // 5 sigma bound, generous for 400 draws
        assert!(max < 0.1, "weight magnitude {max} too large for std 0.02");
    }

    #[test]
    fn test_params_mut_order() {
        let mut layer = Linear::new(2, 3);
        let [w, b] = layer.params_mut();
        assert_eq!(w.len(), 6);
        assert_eq!(b.len(), 3);
    }
}
