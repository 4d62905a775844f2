use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Element symbols paired with their periodic-table atomic numbers. This
/// is the set of elements the generative model is allowed to emit.
pub const ATOM_NUMBERS: &[(&str, u8)] = &[
    ("H", 1),
    ("Be", 4),
    ("B", 5),
    ("C", 6),
    ("N", 7),
    ("O", 8),
    ("F", 9),
    ("Si", 14),
    ("P", 15),
    ("S", 16),
    ("Cl", 17),
    ("As", 33),
    ("Se", 34),
    ("Br", 35),
    ("I", 53),
];

/// Atomic numbers the generator's output layer can produce, paired with
/// the compact zero-based class index used by that layer. The order is
/// C, N, O, F, P, S, Cl, Br, I.
pub const NODE_RELABEL: &[(u8, usize)] = &[
    (6, 0),
    (7, 1),
    (8, 2),
    (9, 3),
    (15, 4),
    (16, 5),
    (17, 6),
    (35, 7),
    (53, 8),
];

/// Bond order to edge class. Class 0 is "no bond".
pub const EDGE_RELABEL: &[(u8, usize)] = &[(0, 0), (1, 1), (2, 2), (3, 3)];

/// Maximum bond count per node class, indexed like [`NODE_RELABEL`]
/// (C, N, O, F, P, S, Cl, Br, I).
pub const MAX_ATOM_BONDS: [f32; 9] = [4.0, 3.0, 2.0, 1.0, 5.0, 6.0, 1.0, 1.0, 1.0];

/// Fallback element class for atoms outside [`ELEMENT_CLASSES`].
pub const UNKNOWN_ELEMENT_CLASS: usize = 10;

/// Atomic number to one-hot class used by the graph featurizer. Distinct
/// from [`NODE_RELABEL`]: this table covers the reward predictor's input
/// space (boron included) rather than the generator's output space.
pub const ELEMENT_CLASSES: &[(u8, usize)] = &[
    (5, 0),
    (7, 1),
    (6, 2),
    (8, 3),
    (9, 4),
    (15, 5),
    (16, 6),
    (17, 7),
    (35, 8),
    (53, 9),
];

static ATOM2NUMBER: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| ATOM_NUMBERS.iter().copied().collect());

static NUMBER2ATOM: Lazy<HashMap<u8, &'static str>> =
    Lazy::new(|| ATOM_NUMBERS.iter().map(|&(s, n)| (n, s)).collect());

static NODE_RELABEL_MAP: Lazy<HashMap<u8, usize>> =
    Lazy::new(|| NODE_RELABEL.iter().copied().collect());

static INVERSE_NODE_RELABEL_MAP: Lazy<HashMap<usize, u8>> =
    Lazy::new(|| NODE_RELABEL.iter().map(|&(n, c)| (c, n)).collect());

static ELEMENT_CLASS_MAP: Lazy<HashMap<u8, usize>> =
    Lazy::new(|| ELEMENT_CLASSES.iter().copied().collect());

/// Atomic number for an element symbol.
pub fn atom_to_number(symbol: &str) -> Option<u8> {
    ATOM2NUMBER.get(symbol).copied()
}

/// Element symbol for an atomic number.
pub fn number_to_atom(number: u8) -> Option<&'static str> {
    NUMBER2ATOM.get(&number).copied()
}

/// Generator output class for an atomic number.
pub fn node_class(atomic_num: u8) -> Option<usize> {
    NODE_RELABEL_MAP.get(&atomic_num).copied()
}

/// Atomic number for a generator output class.
pub fn node_class_atomic_num(class: usize) -> Option<u8> {
    INVERSE_NODE_RELABEL_MAP.get(&class).copied()
}

/// Edge class for an integral bond order.
pub fn edge_class(order: u8) -> Option<usize> {
    EDGE_RELABEL
        .iter()
        .find(|&&(o, _)| o == order)
        .map(|&(_, c)| c)
}

/// Bond order for an edge class.
pub fn edge_class_order(class: usize) -> Option<u8> {
    EDGE_RELABEL
        .iter()
        .find(|&&(_, c)| c == class)
        .map(|&(o, _)| o)
}

/// Graph-featurizer element class for an atomic number. Unlisted
/// elements collapse into [`UNKNOWN_ELEMENT_CLASS`].
pub fn element_class(atomic_num: u8) -> usize {
    ELEMENT_CLASS_MAP
        .get(&atomic_num)
        .copied()
        .unwrap_or(UNKNOWN_ELEMENT_CLASS)
}

/// Element symbols ordered by generator output class, so the sampler can
/// turn an emitted class index straight into an atom symbol.
pub fn label_to_atom() -> Vec<&'static str> {
    let mut classes: Vec<usize> = NODE_RELABEL.iter().map(|&(_, c)| c).collect();
    classes.sort_unstable();
    classes
        .into_iter()
        .map(|c| {
            let num = node_class_atomic_num(c).expect("class came from the table");
            number_to_atom(num).expect("relabel table only lists known elements")
        })
        .collect()
}
