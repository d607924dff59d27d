//! Adversario: an interactive GAN training demo.
//!
//! Trains a tiny adversarial pair to approximate a fixed 2-D affine
//! transform of a Gaussian point cloud, redrawing terminal loss curves and
//! generated-sample scatterplots after every epoch.
//!
//! The crate is organized as a small training library:
//!
//! - [`autograd`]: tape-based reverse-mode autodiff over flat `f32` tensors
//! - [`optim`]: the `Optimizer` trait and `Adam`
//! - [`data`]: the synthetic dataset and mini-batching
//! - [`model`]: the `Generator` and `Discriminator` networks
//! - [`train`]: loss, hyperparameters, adversarial updates, and the
//!   cancellable background training session
//! - [`viz`]: terminal charts
//! - [`shell`]: the interactive front end driven by `src/main.rs`

pub mod autograd;
pub mod data;
pub mod model;
pub mod optim;
pub mod shell;
pub mod train;
pub mod viz;

pub use autograd::Tensor;
pub use model::{Discriminator, Generator, Trace};
pub use train::{HyperForm, HyperParamError, HyperParams};
