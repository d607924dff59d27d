//! Differentiable operations
//!
//! Each op computes its forward result eagerly and, when any input requires
//! gradients, attaches a backward struct that captures clones of the inputs
//! and the result's gradient cell.

mod activations;
mod basic;
mod matmul;

pub use activations::tanh;
pub use basic::{add, add_bias, scale};
pub use matmul::{matmul, matmul_compute, transpose};
