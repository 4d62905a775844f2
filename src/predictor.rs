use std::error::Error;

use crate::data::{EncodedBatch, GraphBatch};
use crate::device::Device;
use crate::math::Matrix;

/// What a reward predictor was trained to do. Consumed as a capability
/// check: classification outputs are reduced to a class index before the
/// reward transform sees them, regression outputs are used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Classification,
    Regression,
}

/// Pretrained sequence-to-property model used as the reward source.
///
/// `predict` receives the encoded batch together with the device its
/// tensors were placed on, and must not accumulate gradients when `eval`
/// is true. The returned matrix has one row per batch item: class scores
/// for classification, the predicted value in column 0 for regression.
pub trait SequencePredictor {
    fn task(&self) -> Task;

    fn predict(
        &self,
        batch: &EncodedBatch,
        device: &dyn Device,
        eval: bool,
    ) -> Result<Matrix, Box<dyn Error>>;
}

/// Graph-structured sibling of [`SequencePredictor`], fed adjacency and
/// node feature matrices instead of token sequences.
pub trait GraphPredictor {
    fn task(&self) -> Task;

    fn predict(
        &self,
        batch: &GraphBatch,
        device: &dyn Device,
        eval: bool,
    ) -> Result<Matrix, Box<dyn Error>>;
}

/// External scoring oracle that rates molecule strings directly, with no
/// encode/predict step in between. Scores arrive in the oracle's native
/// double precision; the reward composer narrows them.
pub trait Critic {
    fn score(&self, smiles: &[String]) -> Result<Vec<f64>, Box<dyn Error>>;
}

/// Collapse a raw prediction to the per-item vector the reward transform
/// consumes: arg-max class index for classification, column 0 for
/// regression.
pub fn reduce_prediction(task: Task, prediction: &Matrix) -> Result<Vec<f32>, Box<dyn Error>> {
    if prediction.cols == 0 {
        return Err("predictor returned an empty prediction".into());
    }
    let out = match task {
        Task::Classification => (0..prediction.rows)
            .map(|r| prediction.argmax_row(r) as f32)
            .collect(),
        Task::Regression => (0..prediction.rows).map(|r| prediction.get(r, 0)).collect(),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_reduces_to_class_index() {
        let pred = Matrix::from_vec(2, 2, vec![0.9, 0.1, 0.2, 0.8]);
        let out = reduce_prediction(Task::Classification, &pred).unwrap();
        assert_eq!(out, vec![0.0, 1.0]);
    }

    #[test]
    fn regression_reads_column_zero() {
        let pred = Matrix::from_vec(3, 1, vec![1.5, -0.5, 2.0]);
        let out = reduce_prediction(Task::Regression, &pred).unwrap();
        assert_eq!(out, vec![1.5, -0.5, 2.0]);
    }
}
