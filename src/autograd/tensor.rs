//! Gradient-tracking tensor

use ndarray::Array1;
use std::cell::RefCell;
use std::rc::Rc;

/// Trait implemented by every recorded operation on the tape.
///
/// `backward` reads the operation's output gradient and pushes it into the
/// inputs, then recurses into the inputs' own operations.
pub trait BackwardOp {
    /// Propagate gradients from the output of this op to its inputs
    fn backward(&self);
}

/// A 1-D tensor of `f32` values with optional gradient tracking.
///
/// Storage is a flat `Array1<f32>`; matrix-shaped operands carry their
/// (rows, cols) shape explicitly at the op call site. Cloning a `Tensor`
/// snapshots the data but shares the gradient cell, so backward ops that
/// captured a clone during the forward pass accumulate into the same
/// gradient the optimizer later reads.
#[derive(Clone)]
pub struct Tensor {
    data: Array1<f32>,
    grad: Rc<RefCell<Option<Array1<f32>>>>,
    requires_grad: bool,
    backward_op: Option<Rc<dyn BackwardOp>>,
}

impl Tensor {
    /// Create a tensor from an ndarray
    pub fn new(data: Array1<f32>, requires_grad: bool) -> Self {
        Self { data, grad: Rc::new(RefCell::new(None)), requires_grad, backward_op: None }
    }

    /// Create a tensor from a plain vector
    pub fn from_vec(data: Vec<f32>, requires_grad: bool) -> Self {
        Self::new(Array1::from(data), requires_grad)
    }

    /// Create a zero-filled tensor
    pub fn zeros(len: usize, requires_grad: bool) -> Self {
        Self::new(Array1::zeros(len), requires_grad)
    }

    /// Borrow the underlying data
    pub fn data(&self) -> &Array1<f32> {
        &self.data
    }

    /// Mutably borrow the underlying data
    ///
    /// Only the optimizer and the parameter initializer write through this.
    pub fn data_mut(&mut self) -> &mut Array1<f32> {
        &mut self.data
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the tensor holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether gradients are recorded for this tensor
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Current gradient, if any has been accumulated
    pub fn grad(&self) -> Option<Array1<f32>> {
        self.grad.borrow().clone()
    }

    /// Overwrite the gradient
    pub fn set_grad(&self, grad: Array1<f32>) {
        *self.grad.borrow_mut() = Some(grad);
    }

    /// Add `grad` into the gradient cell, initializing it if empty
    pub fn accumulate_grad(&self, grad: Array1<f32>) {
        let mut cell = self.grad.borrow_mut();
        match cell.as_mut() {
            Some(existing) => *existing = &*existing + &grad,
            None => *cell = Some(grad),
        }
    }

    /// Clear the gradient
    pub fn zero_grad(&self) {
        *self.grad.borrow_mut() = None;
    }

    /// Shared handle to the gradient cell, captured by backward ops
    pub fn grad_cell(&self) -> Rc<RefCell<Option<Array1<f32>>>> {
        Rc::clone(&self.grad)
    }

    /// The operation that produced this tensor, if it was recorded
    pub fn backward_op(&self) -> Option<Rc<dyn BackwardOp>> {
        self.backward_op.clone()
    }

    /// Attach the producing operation
    pub fn set_backward_op(&mut self, op: Rc<dyn BackwardOp>) {
        self.backward_op = Some(op);
    }

    /// Gradient-isolated copy: same values, no tape, no gradient flow.
    ///
    /// The returned tensor has a fresh gradient cell, so nothing that
    /// consumes it can push gradients back into this tensor's producers.
    pub fn detach(&self) -> Tensor {
        Tensor::new(self.data.clone(), false)
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("data", &self.data)
            .field("requires_grad", &self.requires_grad)
            .field("has_grad", &self.grad.borrow().is_some())
            .field("has_backward_op", &self.backward_op.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_tensor_creation() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        assert_eq!(t.len(), 3);
        assert!(t.requires_grad());
        assert!(t.grad().is_none());
        assert!(t.backward_op().is_none());
    }

    #[test]
    fn test_zeros() {
        let t = Tensor::zeros(4, false);
        assert_eq!(t.len(), 4);
        assert!(t.data().iter().all(|&v| v == 0.0));
        assert!(!t.requires_grad());
    }

    #[test]
    fn test_accumulate_grad() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        t.accumulate_grad(arr1(&[0.5, 0.5]));
        t.accumulate_grad(arr1(&[1.0, 2.0]));
        let grad = t.grad().expect("grad accumulated");
        assert_eq!(grad[0], 1.5);
        assert_eq!(grad[1], 2.5);
    }

    #[test]
    fn test_zero_grad() {
        let t = Tensor::from_vec(vec![1.0], true);
        t.set_grad(arr1(&[3.0]));
        assert!(t.grad().is_some());
        t.zero_grad();
        assert!(t.grad().is_none());
    }

    #[test]
    fn test_clone_shares_grad_cell() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        let snapshot = t.clone();
        snapshot.accumulate_grad(arr1(&[1.0, 1.0]));
        // Gradient written through the clone is visible on the original
        assert_eq!(t.grad().expect("shared grad")[0], 1.0);
    }

    #[test]
    fn test_clone_snapshots_data() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0], true);
        let snapshot = t.clone();
        t.data_mut()[0] = 9.0;
        // The clone keeps the forward-time values
        assert_eq!(snapshot.data()[0], 1.0);
        assert_eq!(t.data()[0], 9.0);
    }

    #[test]
    fn test_detach_blocks_gradient_flow() {
        let t = Tensor::from_vec(vec![1.0, 2.0], true);
        let d = t.detach();
        assert!(!d.requires_grad());
        assert!(d.backward_op().is_none());
        d.accumulate_grad(arr1(&[1.0, 1.0]));
        // The original's gradient cell is untouched
        assert!(t.grad().is_none());
    }
}
