use std::error::Error;

use molrl::data::{AtomInfo, Bond, GraphBatch, MoleculeGraph, MoleculeParser};
use molrl::device::{Cpu, Device};
use molrl::math::Matrix;
use molrl::predictor::{GraphPredictor, Task};
use molrl::reward::{graph_reward, transforms};

/// Parser stub producing a fixed two-carbon molecule for any input.
struct EthaneParser;

fn carbon() -> AtomInfo {
    AtomInfo {
        atomic_num: 6,
        valence: 4,
        formal_charge: 0,
        hybridization: 4,
        aromatic: false,
    }
}

impl MoleculeParser for EthaneParser {
    fn parse(&self, _smiles: &str) -> Result<MoleculeGraph, Box<dyn Error>> {
        Ok(MoleculeGraph {
            atoms: vec![carbon(), carbon()],
            bonds: vec![Bond { a: 0, b: 1, order: 1 }],
        })
    }

    fn canonicalize(&self, smiles: &str) -> Result<String, Box<dyn Error>> {
        Ok(smiles.to_string())
    }
}

/// Regression stub predicting the bond count read off the adjacency
/// matrix, proving the featurized graph actually reaches the predictor.
struct BondCounter;

impl GraphPredictor for BondCounter {
    fn task(&self) -> Task {
        Task::Regression
    }

    fn predict(
        &self,
        batch: &GraphBatch,
        _device: &dyn Device,
        _eval: bool,
    ) -> Result<Matrix, Box<dyn Error>> {
        let counts: Vec<f32> = batch
            .adjacency
            .iter()
            .map(|adj| adj.data.iter().sum::<f32>() / 2.0)
            .collect();
        Ok(Matrix::from_vec(batch.batch_size(), 1, counts))
    }
}

#[test]
fn graph_path_featurizes_then_transforms() {
    let smiles = vec!["CC".to_string(), "CC".to_string()];
    let rewards = graph_reward(&smiles, &BondCounter, &EthaneParser, &Cpu, transforms::logp_pen)
        .unwrap();
    // One bond per molecule, scaled by 5.
    assert_eq!(rewards, vec![5.0, 5.0]);
}

#[test]
fn classification_graph_predictor_is_reduced_before_the_transform() {
    struct TwoClassGraphStub;
    impl GraphPredictor for TwoClassGraphStub {
        fn task(&self) -> Task {
            Task::Classification
        }
        fn predict(
            &self,
            batch: &GraphBatch,
            _device: &dyn Device,
            _eval: bool,
        ) -> Result<Matrix, Box<dyn Error>> {
            let mut out = Matrix::zeros(batch.batch_size(), 2);
            for r in 0..out.rows {
                out.set(r, 0, 0.8);
                out.set(r, 1, 0.2);
            }
            Ok(out)
        }
    }
    let smiles = vec!["CC".to_string()];
    let rewards = graph_reward(
        &smiles,
        &TwoClassGraphStub,
        &EthaneParser,
        &Cpu,
        transforms::qed_max,
    )
    .unwrap();
    // Class 0 wins, so the transform sees 0.0, not 0.8.
    assert_eq!(rewards, vec![0.0]);
}
