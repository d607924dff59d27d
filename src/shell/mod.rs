//! Application shell
//!
//! All UI state lives in an explicit [`AppState`] passed to [`run`]; the
//! shell parses the form, spawns the background session and redraws the
//! figure as epoch events arrive.

use crate::train::{
    HyperForm, HyperParamError, HyperParams, TrainEvent, TrainSession, TrainSummary,
    INPUT_ERROR_MESSAGE,
};
use crate::viz::{sparkline, Figure};
use std::time::Duration;

/// Log level for shell output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Everything the render loop reads and writes
pub struct AppState {
    /// The hyperparameter form, as raw strings
    pub form: HyperForm,
    /// The two-subplot figure, redrawn per epoch
    pub figure: Figure,
    /// One-line status readout
    pub status: String,
    /// Output verbosity
    pub log_level: LogLevel,
    /// Cosmetic pause after each redraw; `None` skips it
    pub epoch_delay: Option<Duration>,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl AppState {
    /// Fresh state around a form
    pub fn new(form: HyperForm) -> Self {
        Self {
            form,
            figure: Figure::new(),
            status: String::new(),
            log_level: LogLevel::Normal,
            epoch_delay: Some(Duration::from_millis(100)),
            seed: None,
        }
    }
}

const TITLE: &str = "GAN training visualizer";

const ARCHITECTURE: &str = "\
Model:
  Gen  = Linear(latent_dim -> 2)
  Disc = Linear(2, 5) -> Tanh -> Linear(5, 3) -> Tanh -> Linear(3, 1)";

/// Parse the form, train, and redraw the figure once per epoch.
///
/// Any invalid input surfaces as the single user-facing message and no
/// training step runs.
pub fn run(state: &mut AppState) -> Result<TrainSummary, HyperParamError> {
    log(state.log_level, LogLevel::Normal, TITLE);
    log(state.log_level, LogLevel::Normal, ARCHITECTURE);

    let hp = match HyperParams::parse(&state.form) {
        Ok(hp) => hp,
        Err(e) => {
            state.status = INPUT_ERROR_MESSAGE.to_string();
            log(state.log_level, LogLevel::Normal, INPUT_ERROR_MESSAGE);
            return Err(e);
        }
    };

    let handle = TrainSession::spawn(hp, state.seed);
    let mut outcome = None;

    while let Ok(event) = handle.events().recv() {
        match event {
            TrainEvent::Started { real } => {
                state.figure.scatter_mut().set_real(real);
            }
            TrainEvent::EpochCompleted { epoch, mean_loss_d, mean_loss_g, generated } => {
                state.figure.losses_mut().push(mean_loss_d, mean_loss_g);
                state.figure.scatter_mut().set_generated(generated);
                state.status = format!(
                    "epoch {}/{}  loss_D {mean_loss_d:.4}  loss_G {mean_loss_g:.4}  D {}",
                    epoch + 1,
                    hp.num_epochs,
                    sparkline(state.figure.losses().disc_history(), 20),
                );

                if state.log_level != LogLevel::Quiet {
                    println!("{}", state.figure.render());
                    println!("{}", state.status);
                }
                if let Some(delay) = state.epoch_delay {
                    std::thread::sleep(delay);
                }
            }
            TrainEvent::Finished(summary) => {
                outcome = Some(summary);
                break;
            }
            TrainEvent::Cancelled { epochs_run } => {
                state.status = format!("cancelled after {epochs_run} epochs");
                log(state.log_level, LogLevel::Normal, &state.status);
                break;
            }
        }
    }
    handle.join();

    let summary = outcome.unwrap_or(TrainSummary {
        final_loss_d: 0.0,
        final_loss_g: 0.0,
        examples_per_sec: 0.0,
        elapsed_secs: 0.0,
        epochs_run: state.figure.losses().epochs(),
    });

    if summary.epochs_run == hp.num_epochs {
        log(state.log_level, LogLevel::Normal, "Training complete.");
        log(
            state.log_level,
            LogLevel::Normal,
            &format!(
                "loss_D {:.6}, loss_G {:.6}, {:.1} examples/sec",
                summary.final_loss_d, summary.final_loss_g, summary.examples_per_sec
            ),
        );
    }

    Ok(summary)
}
