/// Scalar reward transform applied elementwise to a batch of reduced
/// predictions. Callers pick one of the functions below (or supply their
/// own) by reference; nothing is looked up by name.
pub type Transform = fn(&[f32]) -> Vec<f32>;

/// Exponential growth reward for melting-point maximization:
/// `exp(x + 1)`. Monotonic increasing, so higher predicted melting
/// points always earn strictly higher rewards.
pub fn melt_t_max(prediction: &[f32]) -> Vec<f32> {
    prediction.iter().map(|&x| (x + 1.0).exp()).collect()
}

/// Linear scaling for QED maximization: `x * 10`.
pub fn qed_max(prediction: &[f32]) -> Vec<f32> {
    prediction.iter().map(|&x| x * 10.0).collect()
}

/// Affine scaling for penalized logP: `x * 5`.
pub fn logp_pen(prediction: &[f32]) -> Vec<f32> {
    prediction.iter().map(|&x| x * 5.0).collect()
}

/// Range indicator for drug-like logP: `+1` inside `[0, 5]` inclusive,
/// `-1` outside.
pub fn logp_range(prediction: &[f32]) -> Vec<f32> {
    prediction
        .iter()
        .map(|&x| if (0.0..=5.0).contains(&x) { 1.0 } else { -1.0 })
        .collect()
}
