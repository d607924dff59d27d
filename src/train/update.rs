//! Adversarial update steps
//!
//! Both updates take every piece of state they touch as an explicit
//! parameter; nothing is captured from an enclosing environment. Each returns
//! the batch's sum-reduced loss value.

use super::LossFn;
use crate::autograd::{add, backward, scale, Tensor};
use crate::model::{Discriminator, Generator, Trace};
use crate::optim::Optimizer;

/// One discriminator step on a real batch plus a freshly generated one.
///
/// The generator output is detached, so this step can never move generator
/// parameters. Loss is `(sum-BCE(real, 1) + sum-BCE(fake, 0)) / 2`.
pub fn update_d(
    real: &Tensor,
    z: &Tensor,
    rows: usize,
    disc: &mut Discriminator,
    gen: &Generator,
    loss: &dyn LossFn,
    opt_d: &mut dyn Optimizer,
) -> f32 {
    opt_d.zero_grad_refs(&mut disc.params_mut());

    let ones = Tensor::from_vec(vec![1.0; rows], false);
    let zeros = Tensor::from_vec(vec![0.0; rows], false);

    let real_logits = disc.forward(real, rows);
    let loss_real = loss.forward(&real_logits, &ones);

    let fake = gen.forward(z, rows, Trace::Detached);
    let fake_logits = disc.forward(&fake, rows);
    let loss_fake = loss.forward(&fake_logits, &zeros);

    let total = scale(&add(&loss_real, &loss_fake), 0.5);
    backward(&total);

    opt_d.step_refs(&mut disc.params_mut());
    total.data()[0]
}

/// One generator step against the current discriminator.
///
/// Gradients flow through the discriminator's graph, but only generator
/// parameters are stepped; the discriminator's stale gradients are cleared
/// by the next [`update_d`] call.
pub fn update_g(
    z: &Tensor,
    rows: usize,
    disc: &Discriminator,
    gen: &mut Generator,
    loss: &dyn LossFn,
    opt_g: &mut dyn Optimizer,
) -> f32 {
    opt_g.zero_grad_refs(&mut gen.params_mut());

    let fake = gen.forward(z, rows, Trace::Recorded);
    let logits = disc.forward(&fake, rows);

    let ones = Tensor::from_vec(vec![1.0; rows], false);
    let total = loss.forward(&logits, &ones);
    backward(&total);

    opt_g.step_refs(&mut gen.params_mut());
    total.data()[0]
}
