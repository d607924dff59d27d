//! Epoch driver

use super::{update_d, update_g, LossFn};
use crate::autograd::Tensor;
use crate::data::{latent_batch, Dataset};
use crate::model::{Discriminator, Generator};
use crate::optim::Optimizer;
use rand::Rng;

/// Running loss totals for one epoch.
///
/// The losses are sum-reduced per batch, so adding them up yields
/// batch-size-weighted totals and `mean_*` is a true per-example mean even
/// when the final batch is short.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpochTotals {
    /// Summed discriminator loss
    pub loss_d: f32,
    /// Summed generator loss
    pub loss_g: f32,
    /// Examples seen so far
    pub examples: usize,
}

impl EpochTotals {
    /// Fresh zeroed totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one batch's summed losses
    pub fn accumulate(&mut self, loss_d: f32, loss_g: f32, rows: usize) {
        self.loss_d += loss_d;
        self.loss_g += loss_g;
        self.examples += rows;
    }

    /// Per-example discriminator loss
    pub fn mean_d(&self) -> f32 {
        self.loss_d / self.examples as f32
    }

    /// Per-example generator loss
    pub fn mean_g(&self) -> f32 {
        self.loss_g / self.examples as f32
    }
}

/// One full pass over the dataset: per shuffled batch, one latent draw shared
/// by the discriminator step and the generator step that follows it.
#[allow(clippy::too_many_arguments)]
pub fn run_epoch<R: Rng + ?Sized>(
    dataset: &Dataset,
    disc: &mut Discriminator,
    gen: &mut Generator,
    loss: &dyn LossFn,
    opt_d: &mut dyn Optimizer,
    opt_g: &mut dyn Optimizer,
    latent_dim: usize,
    rng: &mut R,
) -> EpochTotals {
    let mut totals = EpochTotals::new();

    for batch in dataset.shuffled_batches(rng) {
        let rows = batch.rows();
        let x = Tensor::from_vec(batch.into_vec(), false);

        let z = Tensor::from_vec(latent_batch(rng, rows, latent_dim), false);
        let loss_d = update_d(&x, &z, rows, disc, gen, loss, opt_d);
        let loss_g = update_g(&z, rows, disc, gen, loss, opt_g);

        totals.accumulate(loss_d, loss_g, rows);
    }

    totals
}
