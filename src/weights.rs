use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One named parameter from a checkpoint: shape plus flattened values in
/// row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamTensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Parameter name to tensor, as serialized by the training pipeline.
pub type ParamMap = HashMap<String, ParamTensor>;

/// Length of the key prefix the distributed training wrapper prepends to
/// every parameter name (`module.`) when saving.
pub const WRAPPER_PREFIX_LEN: usize = 7;

/// Predictors that can restore their parameters from a loaded map.
pub trait LoadState {
    fn load_state(&mut self, params: &ParamMap) -> Result<(), Box<dyn Error>>;
}

/// Drop the first [`WRAPPER_PREFIX_LEN`] characters from every key. The
/// checkpoints were saved under the distributed wrapper's naming
/// convention, so each key arrives as `module.<name>`; this shim is the
/// only thing standing between that format and a bare predictor.
pub fn strip_wrapper_prefix(params: ParamMap) -> ParamMap {
    params
        .into_iter()
        .map(|(key, tensor)| (key.chars().skip(WRAPPER_PREFIX_LEN).collect(), tensor))
        .collect()
}

/// Load a predictor checkpoint from `path`, stripping the wrapper
/// prefix from every key so the result lines up with a freshly
/// constructed model.
pub fn load_predictor_checkpoint(path: &str) -> Result<ParamMap, Box<dyn Error>> {
    let params: ParamMap = load_checkpoint(path)?;
    Ok(strip_wrapper_prefix(params))
}

/// Save an arbitrary checkpoint structure to `path` using JSON
/// serialisation.
pub fn save_checkpoint<T: Serialize>(path: &str, state: &T) -> Result<(), io::Error> {
    let txt = serde_json::to_string(state).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, txt)?;
    Ok(())
}

/// Load a checkpoint from `path` that was saved with [`save_checkpoint`].
pub fn load_checkpoint<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T, io::Error> {
    let txt = fs::read_to_string(path)?;
    let state = serde_json::from_str(&txt).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tensor() -> ParamTensor {
        ParamTensor {
            shape: vec![2, 2],
            data: vec![1.0, 2.0, 3.0, 4.0],
        }
    }

    #[test]
    fn prefix_stripping_restores_original_keys() {
        let mut params = ParamMap::new();
        params.insert("module.embedding.weight".to_string(), tensor());
        params.insert("module.rnn.bias".to_string(), tensor());
        let stripped = strip_wrapper_prefix(params);
        let mut keys: Vec<&str> = stripped.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["embedding.weight", "rnn.bias"]);
    }
}
