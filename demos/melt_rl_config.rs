//! Assemble the melting-point maximization experiment: load the config,
//! derive the generator's dimensions from the fixed chemical tables, and
//! run one reward evaluation against a stand-in predictor.

use std::error::Error;

use molrl::chem::label_to_atom;
use molrl::config::{derive_rnn_dims, num_edge_classes, num_node_classes, RlConfig};
use molrl::data::{EncodedBatch, MoleculeGraph, MoleculeParser, SmilesVocab};
use molrl::device::{Cpu, Device};
use molrl::loss::{melt_t_celsius, PolicyGradientConfig};
use molrl::math::Matrix;
use molrl::predictor::{SequencePredictor, Task};
use molrl::reward::sequence_reward;

/// Stand-in for the pretrained melting-point regressor. A real run
/// restores one from a checkpoint with `load_predictor_checkpoint`.
struct StubMeltPredictor;

impl SequencePredictor for StubMeltPredictor {
    fn task(&self) -> Task {
        Task::Regression
    }

    fn predict(
        &self,
        batch: &EncodedBatch,
        _device: &dyn Device,
        _eval: bool,
    ) -> Result<Matrix, Box<dyn Error>> {
        let preds: Vec<f32> = batch.lengths.iter().map(|&l| l as f32 * 0.1).collect();
        Ok(Matrix::from_vec(batch.batch_size(), 1, preds))
    }
}

/// Identity parser: the stub predictor has no chemistry to disagree with.
struct PassthroughParser;

impl MoleculeParser for PassthroughParser {
    fn parse(&self, _smiles: &str) -> Result<MoleculeGraph, Box<dyn Error>> {
        Ok(MoleculeGraph::default())
    }

    fn canonicalize(&self, smiles: &str) -> Result<String, Box<dyn Error>> {
        Ok(smiles.to_string())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cfg = RlConfig::from_path("molrl.toml").unwrap_or_default();
    let dims = derive_rnn_dims(&cfg.generator, num_node_classes(), num_edge_classes());
    println!(
        "generator: {} node classes, {} edge classes, node-RNN input {}",
        num_node_classes(),
        num_edge_classes(),
        dims.node_rnn_input_size
    );
    println!("emittable atoms: {:?}", label_to_atom());

    let loss = PolicyGradientConfig::melt_t();
    println!(
        "policy gradient: gamma {}, supervised term {}",
        loss.gamma, loss.enable_supervised_loss
    );

    let vocab = SmilesVocab::from_symbols(&[" ", "C", "O", "N", "c", "1", "(", ")", "="])?;
    let generated = vec!["c1ccccc1".to_string(), "CC(=O)N".to_string()];
    let rewards = sequence_reward(
        &generated,
        &StubMeltPredictor,
        Some(&vocab),
        &PassthroughParser,
        &Cpu,
        loss.transform,
        true,
    )?;
    println!("rewards: {rewards:?}");
    println!("mean melting point: {:.1} C", melt_t_celsius(&rewards));
    Ok(())
}
