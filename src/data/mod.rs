pub mod dataloader;
pub mod graph;
pub mod smiles;

pub use dataloader::{read_smi_file, DataLoader};
pub use graph::{
    featurize_batch, node_attributes, AtomInfo, Attribute, Bond, GraphBatch, MoleculeGraph,
    MoleculeParser,
};
pub use smiles::{EncodedBatch, SmilesVocab, PAD};
