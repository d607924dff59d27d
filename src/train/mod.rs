//! Training: loss, hyperparameters, adversarial updates, epoch driver and
//! the background session

mod epoch;
mod hyper;
mod init;
mod loss;
mod session;
mod update;

pub use epoch::{run_epoch, EpochTotals};
pub use hyper::{HyperForm, HyperParamError, HyperParams, INPUT_ERROR_MESSAGE};
pub use init::{init_params, INIT_STD};
pub use loss::{BceWithLogitsLoss, LossFn};
pub use session::{train_blocking, SessionHandle, TrainEvent, TrainSession, TrainSummary};
pub use update::{update_d, update_g};
