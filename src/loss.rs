use crate::chem::MAX_ATOM_BONDS;
use crate::reward::transforms::{melt_t_max, Transform};

/// Slope and intercept of the melting-point label normalization, used to
/// map a reward back into degrees Celsius for evaluation.
pub const MELT_T_SLOPE: f32 = 79.08;
pub const MELT_T_INTERCEPT: f32 = 128.21;

/// Wiring for the external policy-gradient criterion: everything the
/// training loop hands over besides the reward path itself.
#[derive(Clone)]
pub struct PolicyGradientConfig {
    /// Discount factor for reward accumulation along the episode.
    pub gamma: f32,
    /// Mix a supervised term into the policy-gradient objective.
    pub enable_supervised_loss: bool,
    /// Valence budget per generator node class, consulted when masking
    /// chemically impossible bond emissions.
    pub max_atom_bonds: Vec<f32>,
    /// Transform applied to raw predictions, chosen by reference.
    pub transform: Transform,
}

impl PolicyGradientConfig {
    pub fn new(gamma: f32, transform: Transform) -> Self {
        Self {
            gamma,
            enable_supervised_loss: false,
            max_atom_bonds: MAX_ATOM_BONDS.to_vec(),
            transform,
        }
    }

    /// The melting-point maximization setup from the original
    /// experiment: discount 0.99, supervised term on.
    pub fn melt_t() -> Self {
        Self {
            gamma: 0.99,
            enable_supervised_loss: true,
            max_atom_bonds: MAX_ATOM_BONDS.to_vec(),
            transform: melt_t_max,
        }
    }
}

/// Discounted returns `G_t = r_t + gamma * G_{t+1}`, computed backwards
/// over a single episode's per-step rewards.
pub fn discounted_returns(rewards: &[f32], gamma: f32) -> Vec<f32> {
    let mut returns = vec![0.0; rewards.len()];
    let mut acc = 0.0;
    for (i, &r) in rewards.iter().enumerate().rev() {
        acc = r + gamma * acc;
        returns[i] = acc;
    }
    returns
}

/// Evaluation metric for the melting-point experiment: invert the
/// exponential transform and denormalize back to degrees Celsius,
/// averaged over the batch. Rewards must be positive, which
/// [`melt_t_max`] guarantees.
pub fn melt_t_celsius(rewards: &[f32]) -> f32 {
    if rewards.is_empty() {
        return 0.0;
    }
    let sum: f32 = rewards
        .iter()
        .map(|&r| (r.ln() - 1.0) * MELT_T_SLOPE + MELT_T_INTERCEPT)
        .sum();
    sum / rewards.len() as f32
}
