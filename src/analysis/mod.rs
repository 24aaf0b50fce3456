//! Options controlling damage evaluation

use serde::{Deserialize, Serialize};

/// Treatment of the Weibull failure probability before it scales the damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProbabilityBound {
    /// Pass the computed value through unchanged (reference behavior)
    #[default]
    Unbounded,
    /// Clamp to [0, 1]
    Clamped,
}

impl ProbabilityBound {
    pub fn apply(self, probability: f64) -> f64 {
        match self {
            Self::Unbounded => probability,
            Self::Clamped => probability.clamp(0.0, 1.0),
        }
    }

    pub fn is_clamping(self) -> bool {
        matches!(self, Self::Clamped)
    }
}

/// What to do when a time step has no thermal swing (`delta_temp == 0`),
/// which makes the plastic strain zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroStrainPolicy {
    /// Raise a domain error for the step
    #[default]
    Error,
    /// No thermal cycle, no fatigue: every entity in the step gets damage 0
    NoDamage,
}

/// Options for a damage evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageOptions {
    pub probability_bound: ProbabilityBound,
    pub zero_strain: ZeroStrainPolicy,
    /// Evaluate entities on the rayon worker pool (requires the `parallel` feature)
    pub parallel: bool,
    /// Emit per-step progress at info level
    pub log: bool,
}

impl Default for DamageOptions {
    fn default() -> Self {
        Self {
            probability_bound: ProbabilityBound::Unbounded,
            zero_strain: ZeroStrainPolicy::Error,
            parallel: true,
            log: false,
        }
    }
}

impl DamageOptions {
    /// Clamp failure probability to [0, 1]
    pub fn with_clamped_probability(mut self) -> Self {
        self.probability_bound = ProbabilityBound::Clamped;
        self
    }

    pub fn with_zero_strain(mut self, policy: ZeroStrainPolicy) -> Self {
        self.zero_strain = policy;
        self
    }

    /// Evaluate entities on the calling thread only
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }
}
