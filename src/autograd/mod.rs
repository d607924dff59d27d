//! Tape-based autograd engine
//!
//! Reverse-mode automatic differentiation over flat `f32` tensors, sized for
//! the two tiny networks this crate trains. Each operation records a
//! [`BackwardOp`] on its output; calling [`backward`] on a scalar loss walks
//! the tape and accumulates gradients into every reachable parameter.

mod ops;
mod tensor;


pub use ops::{add, add_bias, matmul, matmul_compute, scale, tanh, transpose};
pub use tensor::{BackwardOp, Tensor};

/// Run the backward pass from a scalar loss tensor.
///
/// Seeds the loss gradient with ones (the conventional `dL/dL = 1`) and
/// invokes the recorded operation chain.
pub fn backward(loss: &Tensor) {
    let ones = ndarray::Array1::ones(loss.len());
    loss.set_grad(ones);

    if let Some(op) = loss.backward_op() {
        op.backward();
    }
}
