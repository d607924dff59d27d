//! Parameter initializer

use super::{BceWithLogitsLoss, HyperParamError};
use crate::model::{Discriminator, Generator};
use crate::optim::Adam;
use rand::Rng;

/// Standard deviation for the Normal(0, σ) weight init
pub const INIT_STD: f32 = 0.02;

/// Initialize both networks and build their training collaborators.
///
/// Every learnable tensor is overwritten with Normal(0, 0.02) draws, and each
/// network gets its own independent Adam instance so moment buffers never
/// leak across the adversarial boundary.
pub fn init_params<R: Rng + ?Sized>(
    disc: &mut Discriminator,
    gen: &mut Generator,
    lr_d: f32,
    lr_g: f32,
    rng: &mut R,
) -> Result<(BceWithLogitsLoss, Adam, Adam), HyperParamError> {
    validate_lr("lr_d", lr_d)?;
    validate_lr("lr_g", lr_g)?;

    for layer in disc.layers_mut() {
        layer.init_normal(rng, INIT_STD);
    }
    gen.layer_mut().init_normal(rng, INIT_STD);

    Ok((BceWithLogitsLoss::new(), Adam::default_params(lr_d), Adam::default_params(lr_g)))
}

fn validate_lr(field: &'static str, lr: f32) -> Result<(), HyperParamError> {
    if !lr.is_finite() || lr <= 0.0 {
        return Err(HyperParamError::OutOfRange { field, value: lr.to_string() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DiscriminatorConfig, GeneratorConfig};
    use crate::optim::Optimizer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fresh_pair() -> (Discriminator, Generator) {
        (
            Discriminator::new(DiscriminatorConfig::default()),
            Generator::new(GeneratorConfig::default()),
        )
    }

    #[test]
    fn test_init_overwrites_all_params() {
        let (mut disc, mut gen) = fresh_pair();
        let mut rng = StdRng::seed_from_u64(6);

        init_params(&mut disc, &mut gen, 0.05, 0.005, &mut rng).expect("valid lrs");

        for param in disc.params_mut() {
            assert!(param.data().iter().any(|&v| v != 0.0), "discriminator tensor untouched");
        }
        for param in gen.params_mut() {
            assert!(param.data().iter().any(|&v| v != 0.0), "generator tensor untouched");
        }
    }

    #[test]
    fn test_init_returns_independent_optimizers() {
        let (mut disc, mut gen) = fresh_pair();
        let mut rng = StdRng::seed_from_u64(6);

        let (_, opt_d, opt_g) =
            init_params(&mut disc, &mut gen, 0.05, 0.005, &mut rng).expect("valid lrs");
        assert_eq!(opt_d.lr(), 0.05);
        assert_eq!(opt_g.lr(), 0.005);
    }

    #[test]
    fn test_init_rejects_bad_lr() {
        let (mut disc, mut gen) = fresh_pair();
        let mut rng = StdRng::seed_from_u64(6);

        assert!(init_params(&mut disc, &mut gen, 0.0, 0.005, &mut rng).is_err());
        assert!(init_params(&mut disc, &mut gen, 0.05, -1.0, &mut rng).is_err());
        assert!(init_params(&mut disc, &mut gen, f32::NAN, 0.005, &mut rng).is_err());
    }

    #[test]
    fn test_init_is_seeded_reproducible() {
        let (mut d1, mut g1) = fresh_pair();
        let (mut d2, mut g2) = fresh_pair();

        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        init_params(&mut d1, &mut g1, 0.05, 0.005, &mut rng1).expect("valid");
        init_params(&mut d2, &mut g2, 0.05, 0.005, &mut rng2).expect("valid");

        assert_eq!(g1.layer().weight().data(), g2.layer().weight().data());
        for (p1, p2) in d1.params_mut().into_iter().zip(d2.params_mut()) {
            assert_eq!(p1.data(), p2.data());
        }
    }
}
