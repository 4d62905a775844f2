use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use csv::Writer;
use serde::Serialize;

/// Writes per-step reward statistics to `metrics.jsonl` and
/// `metrics.csv` under the experiment's log directory.
pub struct Logger {
    json: File,
    csv: Writer<File>,
}

/// Reward statistics for one training step.
#[derive(Serialize)]
pub struct RewardRecord {
    pub epoch: usize,
    pub step: usize,
    /// Mean reward over the generated batch.
    pub mean_reward: f32,
    pub max_reward: f32,
    /// Fraction of generated strings the parser accepted.
    pub valid_frac: f32,
    pub lr: f64,
    pub kind: &'static str,
}

impl Logger {
    pub fn new(log_dir: Option<String>, experiment: Option<String>) -> std::io::Result<Self> {
        let base = log_dir.unwrap_or_else(|| "runs".to_string());
        let exp = experiment.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_else(|_| Duration::from_secs(0))
                .as_secs()
                .to_string()
        });
        let dir = PathBuf::from(base).join(exp);
        std::fs::create_dir_all(&dir)?;
        let json = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("metrics.jsonl"))?;
        let csv_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("metrics.csv"))?;
        let csv = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(csv_file);
        Ok(Logger { json, csv })
    }

    pub fn log<T: Serialize>(&mut self, metrics: &T) {
        if let Ok(line) = serde_json::to_string(metrics) {
            let _ = writeln!(self.json, "{}", line);
        }
        let _ = self.csv.serialize(metrics);
    }
}

/// Signals returned by callbacks to control the fine-tuning loop.
pub enum CallbackSignal {
    /// Continue training as normal.
    Continue,
    /// Stop training early.
    Stop,
}

/// Trait for hooking into stages of the RL fine-tuning loop.
pub trait Callback {
    /// Called once before fine-tuning starts.
    fn on_train_begin(&mut self) {}

    /// Called at the beginning of each epoch.
    fn on_epoch_begin(&mut self, _epoch: usize) {}

    /// Called after each batch. Returning `Stop` will end training.
    fn on_batch_end(&mut self, _metrics: &RewardRecord) -> CallbackSignal {
        CallbackSignal::Continue
    }

    /// Called after each epoch. Returning `Stop` will end training.
    fn on_epoch_end(&mut self, _metrics: &RewardRecord) -> CallbackSignal {
        CallbackSignal::Continue
    }

    /// Called once after fine-tuning ends.
    fn on_train_end(&mut self) {}
}

/// Stop fine-tuning when the mean reward fails to improve.
pub struct EarlyStopping {
    patience: usize,
    best: Option<f32>,
    wait: usize,
}

impl EarlyStopping {
    pub fn new(patience: usize) -> Self {
        Self {
            patience,
            best: None,
            wait: 0,
        }
    }
}

impl Callback for EarlyStopping {
    fn on_epoch_end(&mut self, metrics: &RewardRecord) -> CallbackSignal {
        let current = metrics.mean_reward;
        if self.best.map_or(true, |b| current > b) {
            self.best = Some(current);
            self.wait = 0;
        } else {
            self.wait += 1;
            if self.wait >= self.patience {
                return CallbackSignal::Stop;
            }
        }
        CallbackSignal::Continue
    }
}

/// Run a caller-supplied save hook whenever the mean reward improves.
pub struct RewardSnapshot {
    save_fn: Box<dyn FnMut(&RewardRecord)>,
    best: Option<f32>,
}

impl RewardSnapshot {
    pub fn new<F>(save: F) -> Self
    where
        F: FnMut(&RewardRecord) + 'static,
    {
        Self {
            save_fn: Box::new(save),
            best: None,
        }
    }
}

impl Callback for RewardSnapshot {
    fn on_epoch_end(&mut self, metrics: &RewardRecord) -> CallbackSignal {
        let current = metrics.mean_reward;
        if self.best.map_or(true, |b| current > b) {
            self.best = Some(current);
            (self.save_fn)(metrics);
        }
        CallbackSignal::Continue
    }
}
