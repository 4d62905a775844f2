use crate::info;

/// Format a message reporting batch reward statistics.
pub fn format_batch_reward(step: usize, mean: f32, valid_frac: f32) -> String {
    format!(
        "Step {}: mean reward {:.4}, {:.1}% valid",
        step,
        mean,
        valid_frac * 100.0
    )
}

/// Log batch reward statistics at info level.
pub fn log_batch_reward(step: usize, mean: f32, valid_frac: f32) {
    info!("{}", format_batch_reward(step, mean, valid_frac));
}

/// Format a checkpoint saved message.
pub fn format_checkpoint_saved(epoch: usize, mean_reward: f32) -> String {
    format!(
        "Checkpoint saved at epoch {}: mean reward improved to {:.4}",
        epoch, mean_reward
    )
}

/// Log that a checkpoint was saved at info level.
pub fn log_checkpoint_saved(epoch: usize, mean_reward: f32) {
    info!("{}", format_checkpoint_saved(epoch, mean_reward));
}
