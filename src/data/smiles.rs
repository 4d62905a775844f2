use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Padding symbol conventionally carried by SMILES vocabularies.
pub const PAD: &str = " ";

/// Ordered symbol table fixed when the reward predictor was trained.
///
/// Indices are assigned by position in the symbol list, so re-encoding a
/// string with the same table always reproduces the same ids. The table
/// must be the exact one the predictor was trained with; nothing here can
/// verify that, it is the caller's contract. A mismatched table produces
/// well-formed but meaningless predictions.
#[derive(Debug, Clone)]
pub struct SmilesVocab {
    stoi: HashMap<String, u32>,
    itos: Vec<String>,
    /// Longest symbol length in characters, bounding the greedy matcher.
    max_symbol_len: usize,
}

impl SmilesVocab {
    /// Build a vocabulary from an ordered symbol list. Duplicate symbols
    /// are rejected since they would make the index assignment ambiguous.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Self, Box<dyn Error>> {
        let mut stoi = HashMap::with_capacity(symbols.len());
        let mut itos = Vec::with_capacity(symbols.len());
        let mut max_symbol_len = 0;
        for (i, sym) in symbols.iter().enumerate() {
            let sym = sym.as_ref();
            if sym.is_empty() {
                return Err("vocabulary symbols must be non-empty".into());
            }
            if stoi.insert(sym.to_string(), i as u32).is_some() {
                return Err(format!("duplicate vocabulary symbol {sym:?}").into());
            }
            itos.push(sym.to_string());
            max_symbol_len = max_symbol_len.max(sym.chars().count());
        }
        Ok(SmilesVocab {
            stoi,
            itos,
            max_symbol_len,
        })
    }

    /// Infer a character-level vocabulary from raw strings. Used on the
    /// untrained path where no saved table exists yet: the padding symbol
    /// goes first, the remaining characters follow in sorted order.
    pub fn from_corpus<S: AsRef<str>>(smiles: &[S]) -> Self {
        let mut chars: Vec<String> = smiles
            .iter()
            .flat_map(|s| s.as_ref().chars())
            .map(|c| c.to_string())
            .collect();
        chars.sort();
        chars.dedup();
        chars.retain(|c| c.as_str() != PAD);
        let mut symbols = vec![PAD.to_string()];
        symbols.extend(chars);
        Self::from_symbols(&symbols).expect("deduplicated symbols cannot collide")
    }

    /// Load a vocabulary persisted by the training pipeline as a JSON
    /// array of symbols.
    pub fn from_json(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = fs::read_to_string(path)?;
        let symbols: Vec<String> = serde_json::from_str(&data)?;
        Self::from_symbols(&symbols)
    }

    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    pub fn id(&self, symbol: &str) -> Option<u32> {
        self.stoi.get(symbol).copied()
    }

    pub fn symbol(&self, id: u32) -> Option<&str> {
        self.itos.get(id as usize).map(String::as_str)
    }

    /// Index sequences are padded with the `" "` symbol when present,
    /// index 0 otherwise.
    pub fn pad_id(&self) -> u32 {
        self.id(PAD).unwrap_or(0)
    }

    /// Split a SMILES string into vocabulary symbols by greedy longest
    /// match, so two-character element symbols like `Cl` and `Br` win
    /// over their one-character prefixes. A character run matching no
    /// symbol is an error; the string then simply does not belong to the
    /// predictor's input space.
    pub fn tokenize(&self, smiles: &str) -> Result<Vec<u32>, Box<dyn Error>> {
        let chars: Vec<char> = smiles.chars().collect();
        let mut ids = Vec::with_capacity(chars.len());
        let mut start = 0;
        while start < chars.len() {
            let mut matched = None;
            let end_max = (start + self.max_symbol_len).min(chars.len());
            for end in (start + 1..=end_max).rev() {
                let candidate: String = chars[start..end].iter().collect();
                if let Some(id) = self.id(&candidate) {
                    matched = Some((id, end));
                    break;
                }
            }
            match matched {
                Some((id, end)) => {
                    ids.push(id);
                    start = end;
                }
                None => {
                    return Err(format!(
                        "character {:?} at position {start} is not in the vocabulary",
                        chars[start]
                    )
                    .into())
                }
            }
        }
        Ok(ids)
    }

    /// Tokenize a batch and pad every sequence to the batch maximum,
    /// recording each sequence's true length.
    pub fn encode_batch<S: AsRef<str>>(&self, smiles: &[S]) -> Result<EncodedBatch, Box<dyn Error>> {
        let mut ids = Vec::with_capacity(smiles.len());
        let mut lengths = Vec::with_capacity(smiles.len());
        for s in smiles {
            let seq = self.tokenize(s.as_ref())?;
            lengths.push(seq.len());
            ids.push(seq);
        }
        let max_len = lengths.iter().copied().max().unwrap_or(0);
        let pad = self.pad_id();
        for seq in &mut ids {
            seq.resize(max_len, pad);
        }
        Ok(EncodedBatch { ids, lengths })
    }
}

/// A batch of encoded SMILES: padded index sequences plus the true
/// (unpadded) length of each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBatch {
    pub ids: Vec<Vec<u32>>,
    pub lengths: Vec<usize>,
}

impl EncodedBatch {
    pub fn batch_size(&self) -> usize {
        self.ids.len()
    }

    pub fn seq_len(&self) -> usize {
        self.ids.first().map_or(0, Vec::len)
    }
}
