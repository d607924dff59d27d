//! Background training session
//!
//! Training runs on its own worker thread and reports progress over an mpsc
//! channel, so the shell stays a plain synchronous consumer. Cancellation is
//! an atomic flag polled at epoch boundaries.

use super::{init_params, run_epoch, HyperParams};
use crate::data::{Dataset, PLOT_SAMPLES};
use crate::model::{Discriminator, Generator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Progress report from the training worker
#[derive(Debug, Clone)]
pub enum TrainEvent {
    /// Training started; carries the fixed real subset used in every redraw
    Started {
        /// First [`PLOT_SAMPLES`] dataset points
        real: Vec<[f32; 2]>,
    },
    /// One epoch finished
    EpochCompleted {
        /// Zero-based epoch index
        epoch: usize,
        /// Per-example discriminator loss for the epoch
        mean_loss_d: f32,
        /// Per-example generator loss for the epoch
        mean_loss_g: f32,
        /// Fresh generator samples for the scatterplot
        generated: Vec<[f32; 2]>,
    },
    /// The full run completed
    Finished(TrainSummary),
    /// The run was cancelled before completing
    Cancelled {
        /// Epochs fully run before the flag was observed
        epochs_run: usize,
    },
}

/// Final statistics for a completed run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainSummary {
    /// Last epoch's per-example discriminator loss
    pub final_loss_d: f32,
    /// Last epoch's per-example generator loss
    pub final_loss_g: f32,
    /// Training throughput: examples × epochs / elapsed
    pub examples_per_sec: f64,
    /// Wall-clock duration of the run
    pub elapsed_secs: f64,
    /// Epochs completed
    pub epochs_run: usize,
}

/// Handle to a running training session
pub struct SessionHandle {
    events: Receiver<TrainEvent>,
    cancel: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Channel of progress events, in order
    pub fn events(&self) -> &Receiver<TrainEvent> {
        &self.events
    }

    /// Request cancellation; honored at the next epoch boundary
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Wait for the worker thread to exit
    pub fn join(mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        // A dropped handle closes the channel; the worker notices the failed
        // send and stops
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Spawns and owns one training run
pub struct TrainSession;

impl TrainSession {
    /// Start a worker thread training with the given hyperparameters.
    ///
    /// `seed` fixes every random draw for reproducible runs; `None` seeds
    /// from the OS.
    pub fn spawn(hp: HyperParams, seed: Option<u64>) -> SessionHandle {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        let thread = std::thread::spawn(move || {
            run_worker(hp, seed, &tx, &worker_cancel);
        });

        SessionHandle { events: rx, cancel, thread: Some(thread) }
    }
}

fn run_worker(hp: HyperParams, seed: Option<u64>, tx: &Sender<TrainEvent>, cancel: &AtomicBool) {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let dataset = Dataset::synthesize(&mut rng);

    let config = hp.gan_config();
    let mut disc = Discriminator::new(config.discriminator);
    let mut gen = Generator::new(config.generator);

    // Learning rates were validated at parse time; a failure here means the
    // handle was constructed around unvalidated values
    let (loss, mut opt_d, mut opt_g) =
        match init_params(&mut disc, &mut gen, config.lr_d, config.lr_g, &mut rng) {
            Ok(collaborators) => collaborators,
            Err(_) => {
                let _ = tx.send(TrainEvent::Cancelled { epochs_run: 0 });
                return;
            }
        };

    if tx.send(TrainEvent::Started { real: dataset.head(PLOT_SAMPLES).to_vec() }).is_err() {
        return;
    }

    let started = Instant::now();
    let mut last_d = 0.0f32;
    let mut last_g = 0.0f32;

    for epoch in 0..hp.num_epochs {
        if cancel.load(Ordering::Relaxed) {
            let _ = tx.send(TrainEvent::Cancelled { epochs_run: epoch });
            return;
        }

        let totals = run_epoch(
            &dataset,
            &mut disc,
            &mut gen,
            &loss,
            &mut opt_d,
            &mut opt_g,
            hp.latent_dim,
            &mut rng,
        );
        last_d = totals.mean_d();
        last_g = totals.mean_g();

        let generated = gen.sample_points(&mut rng, PLOT_SAMPLES);
        let event = TrainEvent::EpochCompleted {
            epoch,
            mean_loss_d: last_d,
            mean_loss_g: last_g,
            generated,
        };
        if tx.send(event).is_err() {
            return;
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    let summary = TrainSummary {
        final_loss_d: last_d,
        final_loss_g: last_g,
        examples_per_sec: (dataset.len() * hp.num_epochs) as f64 / elapsed.max(f64::EPSILON),
        elapsed_secs: elapsed,
        epochs_run: hp.num_epochs,
    };
    let _ = tx.send(TrainEvent::Finished(summary));
}

/// Run a full session synchronously.
///
/// Returns the summary plus the two per-epoch loss histories.
pub fn train_blocking(hp: HyperParams, seed: Option<u64>) -> (TrainSummary, Vec<f32>, Vec<f32>) {
    let handle = TrainSession::spawn(hp, seed);
    let mut history_d = Vec::with_capacity(hp.num_epochs);
    let mut history_g = Vec::with_capacity(hp.num_epochs);

    let summary = loop {
        match handle.events().recv() {
            Ok(TrainEvent::Started { .. }) => {}
            Ok(TrainEvent::EpochCompleted { mean_loss_d, mean_loss_g, .. }) => {
                history_d.push(mean_loss_d);
                history_g.push(mean_loss_g);
            }
            Ok(TrainEvent::Finished(summary)) => break summary,
            Ok(TrainEvent::Cancelled { epochs_run }) => {
                break TrainSummary {
                    final_loss_d: history_d.last().copied().unwrap_or(0.0),
                    final_loss_g: history_g.last().copied().unwrap_or(0.0),
                    examples_per_sec: 0.0,
                    elapsed_secs: 0.0,
                    epochs_run,
                }
            }
            // Worker gone without a terminal event
            Err(_) => {
                break TrainSummary {
                    final_loss_d: history_d.last().copied().unwrap_or(0.0),
                    final_loss_g: history_g.last().copied().unwrap_or(0.0),
                    examples_per_sec: 0.0,
                    elapsed_secs: 0.0,
                    epochs_run: history_d.len(),
                }
            }
        }
    };

    handle.join();
    (summary, history_d, history_g)
}
