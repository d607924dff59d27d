//! Adversario CLI
//!
//! # Usage
//!
//! ```bash
//! # Train with the original defaults (lr_D 0.05, lr_G 0.005, 30 epochs)
//! adversario
//!
//! # Custom hyperparameters, reproducible run
//! adversario --lr-d 0.1 --lr-g 0.01 --epochs 5 --seed 42
//!
//! # Headless run for benchmarks
//! adversario --quiet --no-delay
//! ```

use adversario::shell::{run, AppState, LogLevel};
use adversario::train::HyperForm;
use clap::Parser;
use std::process::ExitCode;

/// Train a tiny GAN on a 2-D affine Gaussian cloud with live terminal plots
#[derive(Parser)]
#[command(name = "adversario", version, about)]
struct Cli {
    /// Discriminator learning rate
    #[arg(long, default_value = "0.05")]
    lr_d: String,

    /// Generator learning rate
    #[arg(long, default_value = "0.005")]
    lr_g: String,

    /// Number of training epochs
    #[arg(long, default_value = "30")]
    epochs: String,

    /// Latent space width
    #[arg(long, default_value = "2")]
    latent_dim: String,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Suppress all output
    #[arg(long)]
    quiet: bool,

    /// Skip the cosmetic per-epoch pause
    #[arg(long)]
    no_delay: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let form = HyperForm {
        lr_d: cli.lr_d,
        lr_g: cli.lr_g,
        num_epochs: cli.epochs,
        latent_dim: cli.latent_dim,
    };

    let mut state = AppState::new(form);
    if cli.quiet {
        state.log_level = LogLevel::Quiet;
    }
    if cli.no_delay {
        state.epoch_delay = None;
    }
    state.seed = cli.seed;

    match run(&mut state) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
