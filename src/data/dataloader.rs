use std::fs;
use std::io;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::thread_rng;

/// Read SMILES strings from a delimited `.smi` file, taking the string
/// from `smiles_col`. Blank lines are skipped; a line with too few
/// columns is an error rather than a silent drop.
pub fn read_smi_file(path: &Path, delimiter: char, smiles_col: usize) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let mut smiles = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let field = line.split(delimiter).nth(smiles_col).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {} has no column {}", lineno + 1, smiles_col),
            )
        })?;
        smiles.push(field.trim().to_string());
    }
    Ok(smiles)
}

/// Batching iterator over an in-memory dataset with optional shuffling.
///
/// `batch_size` controls how many samples are returned per iteration.
/// When `shuffle` is true the data is randomly permuted once up front,
/// matching epoch-level shuffling in the training loop.
pub struct DataLoader<T> {
    data: Vec<T>,
    batch_size: usize,
    index: usize,
}

impl<T: Clone> DataLoader<T> {
    pub fn new(mut data: Vec<T>, batch_size: usize, shuffle: bool) -> Self {
        assert!(batch_size > 0, "batch_size must be positive");
        if shuffle {
            data.shuffle(&mut thread_rng());
        }
        Self {
            data,
            batch_size,
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Clone> Iterator for DataLoader<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.data.len() {
            return None;
        }
        let end = (self.index + self.batch_size).min(self.data.len());
        let batch = self.data[self.index..end].to_vec();
        self.index = end;
        Some(batch)
    }
}
