use serde::Deserialize;
use std::fs;

use crate::chem::{EDGE_RELABEL, NODE_RELABEL};

/// Training-loop configuration loaded from a TOML or JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub batch_size: usize,
    pub num_epochs: usize,
    pub random_seed: u64,
    pub logdir: String,
    pub print_every: usize,
    pub save_every: usize,
    pub lr: f64,
    /// Epochs at which the scheduler multiplies the rate by `lr_gamma`.
    pub lr_milestones: Vec<usize>,
    pub lr_gamma: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            batch_size: 512,
            num_epochs: 100,
            random_seed: 2,
            logdir: "./logs/molecular_rnn_rl_log".to_string(),
            print_every: 1,
            save_every: 1,
            lr: 0.00001,
            lr_milestones: vec![100, 300, 400, 1000, 2000],
            lr_gamma: 1.0,
        }
    }
}

/// Hyperparameters of the graph-generating recurrent model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// How many previously generated nodes each new node may bond to.
    pub max_prev_nodes: usize,
    /// Atomic number of the seed node (carbon).
    pub start_node_label: u8,
    pub restrict_min_atoms: usize,
    pub restrict_max_atoms: usize,
    pub edge_embedding_dim: usize,
    pub node_embedding_dim: usize,
    pub node_rnn_hidden_size: usize,
    pub node_rnn_num_layers: usize,
    pub edge_rnn_embedding_size: usize,
    pub edge_rnn_hidden_size: usize,
    pub edge_rnn_num_layers: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_prev_nodes: 12,
            start_node_label: 6,
            restrict_min_atoms: 10,
            restrict_max_atoms: 50,
            edge_embedding_dim: 16,
            node_embedding_dim: 128,
            node_rnn_hidden_size: 256,
            node_rnn_num_layers: 4,
            edge_rnn_embedding_size: 64,
            edge_rnn_hidden_size: 128,
            edge_rnn_num_layers: 4,
        }
    }
}

/// Full RL experiment configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RlConfig {
    pub experiment: ExperimentConfig,
    pub generator: GeneratorConfig,
}

impl RlConfig {
    /// Load configuration from the given path. Supports TOML or JSON
    /// based on the file extension. Returns `None` if parsing fails.
    pub fn from_path(path: &str) -> Option<Self> {
        let Ok(content) = fs::read_to_string(path) else {
            return None;
        };
        if path.ends_with(".json") {
            serde_json::from_str(&content).ok()
        } else {
            toml::from_str(&content).ok()
        }
    }
}

/// Number of node classes the generator's output layer emits, straight
/// from the relabel table.
pub fn num_node_classes() -> usize {
    NODE_RELABEL.len()
}

/// Number of edge classes, "no bond" included.
pub fn num_edge_classes() -> usize {
    EDGE_RELABEL.len()
}

/// Input/output sizes that depend on the class counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnnDims {
    pub node_rnn_input_size: usize,
    pub node_embedding_dim: usize,
    pub edge_rnn_input_size: usize,
    pub edge_rnn_output_size: usize,
}

/// Derive the recurrent model's input/output sizes from the class
/// counts. With more than two edge classes the edge history enters as
/// embeddings, otherwise as the raw binary adjacency slice; multi-class
/// nodes additionally append their own embedding to the node-RNN input.
pub fn derive_rnn_dims(
    cfg: &GeneratorConfig,
    num_node_classes: usize,
    num_edge_classes: usize,
) -> RnnDims {
    let (mut node_rnn_input_size, node_embedding_dim) = if num_edge_classes > 2 {
        (cfg.edge_embedding_dim * cfg.max_prev_nodes, cfg.node_embedding_dim)
    } else {
        (cfg.max_prev_nodes, cfg.max_prev_nodes)
    };
    if num_node_classes > 2 {
        node_rnn_input_size += node_embedding_dim;
    }
    let (edge_rnn_input_size, edge_rnn_output_size) = if num_edge_classes > 2 {
        (cfg.edge_embedding_dim, num_edge_classes)
    } else {
        (1, 1)
    };
    RnnDims {
        node_rnn_input_size,
        node_embedding_dim,
        edge_rnn_input_size,
        edge_rnn_output_size,
    }
}
