//! Synthetic point-cloud dataset
//!
//! The real distribution is a standard 2-D Gaussian pushed through a fixed
//! affine map: `y = x @ A + b`. The generator's job is to recover that map
//! from samples alone.

use rand::seq::SliceRandom;
use rand::Rng;

/// Number of points synthesized per dataset
pub const DATASET_SIZE: usize = 1000;

/// Mini-batch row count used by the training loop
pub const BATCH_SIZE: usize = 8;

/// Points drawn for each scatterplot series
pub const PLOT_SAMPLES: usize = 100;

/// Width of both the data space and the latent space
pub const POINT_DIM: usize = 2;

/// Row-major affine transform matrix A
pub const TRANSFORM: [[f32; 2]; 2] = [[1.0, 2.0], [-0.1, 0.5]];

/// Affine offset b
pub const OFFSET: [f32; 2] = [1.0, 2.0];

/// Draw one standard-normal sample via the Box-Muller transform
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // Guard against ln(0) when the uniform draw lands on exactly zero
    let u1 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2 = rng.random::<f32>();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}

/// Fill a flat row-major buffer with standard-normal noise
///
/// Used for the generator's latent input: `rows` points of `dim`
/// coordinates each.
pub fn latent_batch<R: Rng + ?Sized>(rng: &mut R, rows: usize, dim: usize) -> Vec<f32> {
    (0..rows * dim).map(|_| standard_normal(rng)).collect()
}

/// A contiguous slice of dataset rows, flattened row-major
#[derive(Debug, Clone)]
pub struct MiniBatch {
    data: Vec<f32>,
    rows: usize,
}

impl MiniBatch {
    /// Number of points in the batch
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flat row-major view of the batch
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consume the batch, yielding the flat buffer
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// The full synthetic dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    points: Vec<[f32; 2]>,
}

impl Dataset {
    /// Sample [`DATASET_SIZE`] Gaussian points and push them through the
    /// affine map
    pub fn synthesize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::synthesize_n(rng, DATASET_SIZE)
    }

    /// Sample `n` points; the training loop always uses [`DATASET_SIZE`]
    pub fn synthesize_n<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Self {
        let points = (0..n)
            .map(|_| {
                let x = [standard_normal(rng), standard_normal(rng)];
                affine(x)
            })
            .collect();
        Self { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the dataset holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in synthesis order
    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }

    /// The first `n` points, for plotting against generated samples
    pub fn head(&self, n: usize) -> &[[f32; 2]] {
        &self.points[..n.min(self.points.len())]
    }

    /// Split the dataset into shuffled mini-batches of [`BATCH_SIZE`] rows.
    ///
    /// A fresh shuffle per call gives each epoch its own batch order. The
    /// final batch keeps whatever rows remain, so every point is visited
    /// exactly once.
    pub fn shuffled_batches<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<MiniBatch> {
        let mut indices: Vec<usize> = (0..self.points.len()).collect();
        indices.shuffle(rng);

        indices
            .chunks(BATCH_SIZE)
            .map(|chunk| {
                let mut data = Vec::with_capacity(chunk.len() * POINT_DIM);
                for &i in chunk {
                    data.extend_from_slice(&self.points[i]);
                }
                MiniBatch { data, rows: chunk.len() }
            })
            .collect()
    }
}

/// Apply `y = x @ A + b` to a single point
fn affine(x: [f32; 2]) -> [f32; 2] {
    [
        x[0] * TRANSFORM[0][0] + x[1] * TRANSFORM[1][0] + OFFSET[0],
        x[0] * TRANSFORM[0][1] + x[1] * TRANSFORM[1][1] + OFFSET[1],
    ]
}
