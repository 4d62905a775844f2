use std::cell::Cell;
use std::error::Error;

use molrl::data::{EncodedBatch, MoleculeGraph, MoleculeParser, SmilesVocab};
use molrl::device::{Cpu, Device};
use molrl::math::Matrix;
use molrl::predictor::{Critic, SequencePredictor, Task};
use molrl::reward::transforms;
use molrl::reward::{critic_reward, sequence_reward};

/// Parser stub that lowercase-canonicalizes and counts invocations, so
/// tests can observe whether the composer sanitized the batch.
#[derive(Default)]
struct RecordingParser {
    canonicalize_calls: Cell<usize>,
}

impl MoleculeParser for RecordingParser {
    fn parse(&self, _smiles: &str) -> Result<MoleculeGraph, Box<dyn Error>> {
        Ok(MoleculeGraph::default())
    }

    fn canonicalize(&self, smiles: &str) -> Result<String, Box<dyn Error>> {
        self.canonicalize_calls.set(self.canonicalize_calls.get() + 1);
        Ok(smiles.to_string())
    }
}

/// Regression stub: predicts half the true sequence length, routed
/// through the device so the whole encode-and-place path is exercised.
struct LengthRegressor;

impl SequencePredictor for LengthRegressor {
    fn task(&self) -> Task {
        Task::Regression
    }

    fn predict(
        &self,
        batch: &EncodedBatch,
        device: &dyn Device,
        _eval: bool,
    ) -> Result<Matrix, Box<dyn Error>> {
        let lengths: Vec<f32> = batch.lengths.iter().map(|&l| l as f32).collect();
        let lengths = Matrix::from_vec(batch.batch_size(), 1, lengths);
        let weight = Matrix::from_vec(1, 1, vec![0.5]);
        Ok(device.matmul(&lengths, &weight))
    }
}

/// Classification stub returning a fixed 2-class distribution where
/// class 1 wins for every item.
struct TwoClassStub;

impl SequencePredictor for TwoClassStub {
    fn task(&self) -> Task {
        Task::Classification
    }

    fn predict(
        &self,
        batch: &EncodedBatch,
        _device: &dyn Device,
        _eval: bool,
    ) -> Result<Matrix, Box<dyn Error>> {
        let mut out = Matrix::zeros(batch.batch_size(), 2);
        for r in 0..out.rows {
            out.set(r, 0, 0.1);
            out.set(r, 1, 0.9);
        }
        Ok(out)
    }
}

struct FixedCritic(Vec<f64>);

impl Critic for FixedCritic {
    fn score(&self, _smiles: &[String]) -> Result<Vec<f64>, Box<dyn Error>> {
        Ok(self.0.clone())
    }
}

fn vocab() -> SmilesVocab {
    SmilesVocab::from_symbols(&[" ", "C", "O", "N", "c", "1", "(", ")", "="]).unwrap()
}

#[test]
fn regression_reward_applies_transform_to_prediction() {
    let smiles = vec!["CCO".to_string(), "CC".to_string()];
    let parser = RecordingParser::default();
    let rewards = sequence_reward(
        &smiles,
        &LengthRegressor,
        Some(&vocab()),
        &parser,
        &Cpu,
        transforms::qed_max,
        true,
    )
    .unwrap();
    // Lengths 3 and 2, halved by the stub, scaled by 10.
    assert_eq!(rewards, vec![15.0, 10.0]);
}

#[test]
fn classification_reward_comes_from_argmax_not_raw_probabilities() {
    let smiles = vec!["CCO".to_string()];
    let parser = RecordingParser::default();
    let rewards = sequence_reward(
        &smiles,
        &TwoClassStub,
        Some(&vocab()),
        &parser,
        &Cpu,
        transforms::qed_max,
        true,
    )
    .unwrap();
    // The winning class index is 1; a reward of 9.0 would mean the raw
    // probability 0.9 leaked through.
    assert_eq!(rewards, vec![10.0]);
}

#[test]
fn trained_vocab_in_eval_mode_skips_sanitization() {
    let smiles = vec!["CCO".to_string()];
    let parser = RecordingParser::default();
    sequence_reward(
        &smiles,
        &LengthRegressor,
        Some(&vocab()),
        &parser,
        &Cpu,
        transforms::qed_max,
        true,
    )
    .unwrap();
    assert_eq!(parser.canonicalize_calls.get(), 0);

    sequence_reward(
        &smiles,
        &LengthRegressor,
        Some(&vocab()),
        &parser,
        &Cpu,
        transforms::qed_max,
        false,
    )
    .unwrap();
    assert_eq!(parser.canonicalize_calls.get(), 1);
}

#[test]
fn missing_vocab_sanitizes_and_infers_a_table() {
    let smiles = vec!["CCO".to_string(), "OCC".to_string()];
    let parser = RecordingParser::default();
    let rewards = sequence_reward(
        &smiles,
        &LengthRegressor,
        None,
        &parser,
        &Cpu,
        transforms::qed_max,
        true,
    )
    .unwrap();
    assert_eq!(parser.canonicalize_calls.get(), 2);
    assert_eq!(rewards.len(), 2);
}

#[test]
fn malformed_input_propagates_the_parser_error() {
    struct FailingParser;
    impl MoleculeParser for FailingParser {
        fn parse(&self, _smiles: &str) -> Result<MoleculeGraph, Box<dyn Error>> {
            Err("unparsable molecule".into())
        }
        fn canonicalize(&self, _smiles: &str) -> Result<String, Box<dyn Error>> {
            Err("unparsable molecule".into())
        }
    }
    let smiles = vec!["not-a-molecule".to_string()];
    let err = sequence_reward(
        &smiles,
        &LengthRegressor,
        Some(&vocab()),
        &FailingParser,
        &Cpu,
        transforms::qed_max,
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unparsable"));
}

#[test]
fn critic_scores_are_narrowed_then_transformed() {
    let smiles = vec!["CCO".to_string(), "CC".to_string()];
    let rewards = critic_reward(&smiles, &FixedCritic(vec![4.5, 6.0]), transforms::logp_range).unwrap();
    assert_eq!(rewards, vec![1.0, -1.0]);
}
