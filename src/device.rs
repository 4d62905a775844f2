use crate::math::{matmul_cpu, Matrix};

/// Abstraction over the compute location predictor inputs are placed on.
///
/// The reward composer threads a device through to the predictor so the
/// tensors it builds end up where the predictor's parameters live. Only
/// the CPU implementation ships here; accelerator backends implement the
/// same trait on the predictor side.
pub trait Device {
    /// Multiply two matrices on this device.
    fn matmul(&self, a: &Matrix, b: &Matrix) -> Matrix;
}

/// Default CPU implementation of [`Device`].
#[derive(Default, Clone, Copy)]
pub struct Cpu;

impl Device for Cpu {
    fn matmul(&self, a: &Matrix, b: &Matrix) -> Matrix {
        matmul_cpu(a, b)
    }
}
