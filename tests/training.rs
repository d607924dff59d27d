//! End-to-end training scenarios exercised through the public API

use adversario::data::{latent_batch, Dataset, DATASET_SIZE};
use adversario::model::{Discriminator, DiscriminatorConfig, Generator, GeneratorConfig};
use adversario::shell::{run, AppState, LogLevel};
use adversario::train::{
    init_params, run_epoch, train_blocking, update_d, update_g, EpochTotals, HyperForm,
    HyperParams, INPUT_ERROR_MESSAGE,
};
use adversario::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_state(form: HyperForm) -> AppState {
    let mut state = AppState::new(form);
    state.log_level = LogLevel::Quiet;
    state.epoch_delay = None;
    state.seed = Some(42);
    state
}

#[test]
fn valid_run_completes_with_full_histories() {
    let hp = HyperParams { lr_d: 0.05, lr_g: 0.005, num_epochs: 4, latent_dim: 2 };
    let (summary, hist_d, hist_g) = train_blocking(hp, Some(1));

    assert_eq!(summary.epochs_run, 4);
    assert_eq!(hist_d.len(), 4);
    assert_eq!(hist_g.len(), 4);
    assert!(hist_d.iter().all(|l| l.is_finite()));
    assert!(hist_g.iter().all(|l| l.is_finite()));
}

#[test]
fn every_epoch_visits_exactly_the_dataset() {
    let mut rng = StdRng::seed_from_u64(2);
    let dataset = Dataset::synthesize(&mut rng);

    let mut disc = Discriminator::new(DiscriminatorConfig::default());
    let mut gen = Generator::new(GeneratorConfig::default());
    let (loss, mut opt_d, mut opt_g) =
        init_params(&mut disc, &mut gen, 0.05, 0.005, &mut rng).expect("valid lrs");

    for _ in 0..3 {
        let totals = run_epoch(
            &dataset, &mut disc, &mut gen, &loss, &mut opt_d, &mut opt_g, 2, &mut rng,
        );
        assert_eq!(totals.examples, DATASET_SIZE);
    }
}

#[test]
fn discriminator_update_never_moves_the_generator() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut disc = Discriminator::new(DiscriminatorConfig::default());
    let mut gen = Generator::new(GeneratorConfig::default());
    let (loss, mut opt_d, _) =
        init_params(&mut disc, &mut gen, 0.05, 0.005, &mut rng).expect("valid lrs");

    let weight_before = gen.layer().weight().data().clone();
    let bias_before = gen.layer().bias().data().clone();

    let ds = Dataset::synthesize_n(&mut rng, 8);
    let mut flat = Vec::new();
    for p in ds.points() {
        flat.extend_from_slice(p);
    }
    let x = Tensor::from_vec(flat, false);
    let z = Tensor::from_vec(latent_batch(&mut rng, 8, 2), false);

    update_d(&x, &z, 8, &mut disc, &gen, &loss, &mut opt_d);

    assert_eq!(gen.layer().weight().data(), &weight_before);
    assert_eq!(gen.layer().bias().data(), &bias_before);
}

#[test]
fn generator_update_moves_at_least_one_parameter() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut disc = Discriminator::new(DiscriminatorConfig::default());
    let mut gen = Generator::new(GeneratorConfig::default());
    let (loss, _, mut opt_g) =
        init_params(&mut disc, &mut gen, 0.05, 0.005, &mut rng).expect("valid lrs");

    let weight_before = gen.layer().weight().data().clone();
    let z = Tensor::from_vec(latent_batch(&mut rng, 8, 2), false);
    update_g(&z, 8, &disc, &mut gen, &loss, &mut opt_g);

    assert_ne!(gen.layer().weight().data(), &weight_before);
}

#[test]
fn loss_means_are_weighted_by_batch_size() {
    let (l1, l2) = (1.25f32, 0.5f32);
    let mut totals = EpochTotals::new();
    totals.accumulate(8.0 * l1, 8.0 * l1, 8);
    totals.accumulate(3.0 * l2, 3.0 * l2, 3);

    let expected = (8.0 * l1 + 3.0 * l2) / 11.0;
    assert!((totals.mean_d() - expected).abs() < 1e-6);
    assert!((totals.mean_g() - expected).abs() < 1e-6);
}

#[test]
fn invalid_epoch_count_is_the_single_error_and_trains_nothing() {
    let form = HyperForm { num_epochs: "abc".to_string(), ..HyperForm::default() };
    let mut state = quiet_state(form);

    let result = run(&mut state);
    assert!(result.is_err());
    assert_eq!(state.status, INPUT_ERROR_MESSAGE);
    // Zero training steps: no loss point, no scatter redraw
    assert_eq!(state.figure.losses().epochs(), 0);
    assert_eq!(state.figure.scatter().redraws(), 0);
}

#[test]
fn single_epoch_end_to_end_updates_each_subplot_once() {
    let form = HyperForm {
        lr_d: "0.05".to_string(),
        lr_g: "0.005".to_string(),
        num_epochs: "1".to_string(),
        latent_dim: "2".to_string(),
    };
    let mut state = quiet_state(form);

    let summary = run(&mut state).expect("valid form");
    assert_eq!(summary.epochs_run, 1);
    assert_eq!(state.figure.losses().disc_history().len(), 1);
    assert_eq!(state.figure.losses().gen_history().len(), 1);
    assert_eq!(state.figure.scatter().redraws(), 1);
}

#[test]
fn thirty_epochs_drive_both_losses_finite_and_positive() {
    // Shortened variant of the original default run
    let hp = HyperParams { lr_d: 0.05, lr_g: 0.005, num_epochs: 8, latent_dim: 2 };
    let (summary, hist_d, hist_g) = train_blocking(hp, Some(9));

    assert!(summary.final_loss_d > 0.0);
    assert!(summary.final_loss_g > 0.0);
    assert!(hist_d.iter().chain(&hist_g).all(|l| l.is_finite() && *l > 0.0));
    assert!(summary.examples_per_sec > 0.0);
}
