use std::error::Error;

use crate::chem::element_class;
use crate::math::Matrix;

/// Per-atom facts reported by the cheminformatics toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomInfo {
    pub atomic_num: u8,
    /// Total valence (explicit plus implicit).
    pub valence: u8,
    pub formal_charge: i8,
    /// Hybridization state as the toolkit's integer code.
    pub hybridization: u8,
    pub aromatic: bool,
}

/// Undirected bond between two atom indices with an integral order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: u8,
}

/// Molecule as parsed by the external toolkit: atoms plus connectivity.
#[derive(Debug, Clone, Default)]
pub struct MoleculeGraph {
    pub atoms: Vec<AtomInfo>,
    pub bonds: Vec<Bond>,
}

impl MoleculeGraph {
    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }
}

/// Seam to the external cheminformatics toolkit. Parsing and
/// canonicalization are never reimplemented here; malformed input fails
/// with whatever error the toolkit reports.
pub trait MoleculeParser {
    fn parse(&self, smiles: &str) -> Result<MoleculeGraph, Box<dyn Error>>;

    /// Return the canonical/sanitized form of a SMILES string.
    fn canonicalize(&self, smiles: &str) -> Result<String, Box<dyn Error>>;
}

/// Declaration of a one-hot categorical node attribute: which fact it
/// reads off an atom and the closed value range it may take.
pub struct Attribute {
    pub name: &'static str,
    pub values: Vec<i32>,
    pub extract: fn(&AtomInfo) -> i32,
}

impl Attribute {
    pub fn new(name: &'static str, values: Vec<i32>, extract: fn(&AtomInfo) -> i32) -> Self {
        Attribute {
            name,
            values,
            extract,
        }
    }

    /// Width of this attribute's one-hot block.
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// One-hot position of `value`, or an error when the atom falls
    /// outside the declared range.
    pub fn one_hot_index(&self, value: i32) -> Result<usize, Box<dyn Error>> {
        self.values
            .iter()
            .position(|&v| v == value)
            .ok_or_else(|| format!("value {value} outside declared range for {:?}", self.name).into())
    }
}

/// The fixed attribute set the graph reward predictor was trained on.
/// Order matters: the feature layout is the concatenation of these
/// blocks.
pub fn node_attributes() -> Vec<Attribute> {
    vec![
        Attribute::new("valence", (1..=7).collect(), |a| i32::from(a.valence)),
        Attribute::new("charge", (-1..=4).collect(), |a| i32::from(a.formal_charge)),
        Attribute::new("hybridization", (0..=7).collect(), |a| {
            i32::from(a.hybridization)
        }),
        Attribute::new("aromatic", vec![0, 1], |a| i32::from(a.aromatic)),
        Attribute::new("atom_element", (0..=10).collect(), |a| {
            element_class(a.atomic_num) as i32
        }),
    ]
}

/// A batch of featurized molecules, padded to the largest member. Rows
/// past `num_atoms[i]` are all-zero in both matrices.
#[derive(Debug, Clone)]
pub struct GraphBatch {
    pub adjacency: Vec<Matrix>,
    pub node_features: Vec<Matrix>,
    pub num_atoms: Vec<usize>,
}

impl GraphBatch {
    pub fn batch_size(&self) -> usize {
        self.adjacency.len()
    }
}

/// Build adjacency and node feature matrices for a batch of molecules.
pub fn featurize_batch(
    mols: &[MoleculeGraph],
    attributes: &[Attribute],
) -> Result<GraphBatch, Box<dyn Error>> {
    let max_atoms = mols.iter().map(MoleculeGraph::num_atoms).max().unwrap_or(0);
    let feat_width: usize = attributes.iter().map(Attribute::width).sum();

    let mut adjacency = Vec::with_capacity(mols.len());
    let mut node_features = Vec::with_capacity(mols.len());
    let mut num_atoms = Vec::with_capacity(mols.len());

    for mol in mols {
        let n = mol.num_atoms();
        let mut adj = Matrix::zeros(max_atoms, max_atoms);
        for bond in &mol.bonds {
            if bond.a >= n || bond.b >= n {
                return Err(format!(
                    "bond ({}, {}) references an atom outside the molecule",
                    bond.a, bond.b
                )
                .into());
            }
            adj.set(bond.a, bond.b, 1.0);
            adj.set(bond.b, bond.a, 1.0);
        }

        let mut feats = Matrix::zeros(max_atoms, feat_width);
        for (row, atom) in mol.atoms.iter().enumerate() {
            let mut offset = 0;
            for attr in attributes {
                let value = (attr.extract)(atom);
                let pos = attr.one_hot_index(value)?;
                feats.set(row, offset + pos, 1.0);
                offset += attr.width();
            }
        }

        adjacency.push(adj);
        node_features.push(feats);
        num_atoms.push(n);
    }

    Ok(GraphBatch {
        adjacency,
        node_features,
        num_atoms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbon() -> AtomInfo {
        AtomInfo {
            atomic_num: 6,
            valence: 4,
            formal_charge: 0,
            hybridization: 4,
            aromatic: false,
        }
    }

    #[test]
    fn attribute_rejects_out_of_range_values() {
        let attr = Attribute::new("valence", (1..=7).collect(), |a| i32::from(a.valence));
        assert!(attr.one_hot_index(8).is_err());
        assert_eq!(attr.one_hot_index(1).unwrap(), 0);
    }

    #[test]
    fn feature_width_is_the_sum_of_blocks() {
        let attrs = node_attributes();
        let width: usize = attrs.iter().map(Attribute::width).sum();
        // 7 valences + 6 charges + 8 hybridizations + 2 aromatic + 11 elements
        assert_eq!(width, 34);
    }

    #[test]
    fn featurize_pads_to_largest_molecule() {
        let ethane = MoleculeGraph {
            atoms: vec![carbon(), carbon()],
            bonds: vec![Bond { a: 0, b: 1, order: 1 }],
        };
        let methane = MoleculeGraph {
            atoms: vec![carbon()],
            bonds: vec![],
        };
        let batch = featurize_batch(&[ethane, methane], &node_attributes()).unwrap();
        assert_eq!(batch.adjacency[0].rows, 2);
        assert_eq!(batch.adjacency[1].rows, 2);
        assert_eq!(batch.num_atoms, vec![2, 1]);
        assert_eq!(batch.adjacency[0].get(0, 1), 1.0);
        assert_eq!(batch.adjacency[0].get(1, 0), 1.0);
        // Padded atom row of the smaller molecule carries no features.
        assert!(batch.node_features[1].row(1).iter().all(|&v| v == 0.0));
    }
}
