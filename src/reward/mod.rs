//! Reward composition for policy-gradient training.
//!
//! Each composer takes a batch of generated molecule strings, obtains a
//! raw prediction from an externally owned model, reduces classification
//! outputs to a class index, and applies a caller-chosen transform to
//! produce the scalar rewards the policy-gradient criterion consumes.
//! Every call is stateless: strings are re-encoded and the predictor is
//! re-run each time, which is simply the cost of evaluating the
//! objective at every environment step.

pub mod transforms;

use std::error::Error;

use crate::data::{featurize_batch, node_attributes, MoleculeParser, SmilesVocab};
use crate::device::Device;
use crate::predictor::{reduce_prediction, Critic, GraphPredictor, SequencePredictor};
pub use transforms::Transform;

/// Compute rewards through a sequence predictor.
///
/// `vocab` is the symbol table saved when the predictor was trained.
/// Passing the wrong table is not detectable here: encoding still
/// succeeds and predictions come back shaped correctly, they just mean
/// nothing. When `vocab` is `None` a character-level table is inferred
/// from the batch itself (raw, not-yet-trained usage).
///
/// Strings are canonicalized through `parser` before encoding unless a
/// trained vocabulary is supplied and `eval` is set, in which case the
/// generator's output is assumed to already be canonical.
pub fn sequence_reward(
    smiles: &[String],
    predictor: &dyn SequencePredictor,
    vocab: Option<&SmilesVocab>,
    parser: &dyn MoleculeParser,
    device: &dyn Device,
    transform: Transform,
    eval: bool,
) -> Result<Vec<f32>, Box<dyn Error>> {
    let sanitize = vocab.is_none() || !eval;
    let clean: Vec<String> = if sanitize {
        let mut out = Vec::with_capacity(smiles.len());
        for s in smiles {
            out.push(parser.canonicalize(s)?);
        }
        out
    } else {
        smiles.to_vec()
    };

    let inferred;
    let vocab = match vocab {
        Some(v) => v,
        None => {
            inferred = SmilesVocab::from_corpus(&clean);
            &inferred
        }
    };

    let batch = vocab.encode_batch(&clean)?;
    let prediction = predictor.predict(&batch, device, true)?;
    let reduced = reduce_prediction(predictor.task(), &prediction)?;
    Ok(transform(&reduced))
}

/// Compute rewards through a graph predictor. Follows the same contract
/// as [`sequence_reward`] with the encode step replaced by adjacency and
/// node-feature construction over the fixed attribute set.
pub fn graph_reward(
    smiles: &[String],
    predictor: &dyn GraphPredictor,
    parser: &dyn MoleculeParser,
    device: &dyn Device,
    transform: Transform,
) -> Result<Vec<f32>, Box<dyn Error>> {
    let mut mols = Vec::with_capacity(smiles.len());
    for s in smiles {
        mols.push(parser.parse(s)?);
    }
    let batch = featurize_batch(&mols, &node_attributes())?;
    let prediction = predictor.predict(&batch, device, true)?;
    let reduced = reduce_prediction(predictor.task(), &prediction)?;
    Ok(transform(&reduced))
}

/// Compute rewards from a pre-scored critic. No encoding, no predictor:
/// the composer only narrows the oracle's scores to `f32` before the
/// transform.
pub fn critic_reward(
    smiles: &[String],
    critic: &dyn Critic,
    transform: Transform,
) -> Result<Vec<f32>, Box<dyn Error>> {
    let scores = critic.score(smiles)?;
    let scores: Vec<f32> = scores.into_iter().map(|s| s as f32).collect();
    Ok(transform(&scores))
}
