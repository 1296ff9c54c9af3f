//! configuration knobs recognized by the core, and nothing else.
//!
//! captured by value into a `Controller` at construction time rather than
//! read live from a process-wide singleton, so a config change mid-session
//! can never silently break an invariant.

use crate::error::{DoseError, DoseResult};

/// per-trait stopping SE under the algorithmic contract.
pub const SE_THRESHOLD_ALGORITHMIC: f64 = 0.3;
/// per-trait stopping SE under the deployed override (see Open Questions).
pub const SE_THRESHOLD_DEPLOYMENT: f64 = 0.65;

pub const MAX_ITEMS_PER_TRAIT_DEFAULT: usize = 4;

pub const THETA_MIN_DEFAULT: f64 = -4.0;
pub const THETA_MAX_DEFAULT: f64 = 4.0;
pub const THETA_POINTS_DEFAULT: usize = 161;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub se_threshold: f64,
    pub max_items_per_trait: usize,
    pub theta_min: f64,
    pub theta_max: f64,
    pub theta_points: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::algorithmic_default()
    }
}

impl Config {
    /// the reference configuration the engine's stated numerical
    /// properties (stopping behavior, scenario thetas) hold against.
    pub fn algorithmic_default() -> Self {
        Self {
            se_threshold: SE_THRESHOLD_ALGORITHMIC,
            max_items_per_trait: MAX_ITEMS_PER_TRAIT_DEFAULT,
            theta_min: THETA_MIN_DEFAULT,
            theta_max: THETA_MAX_DEFAULT,
            theta_points: THETA_POINTS_DEFAULT,
        }
    }

    /// the looser stopping rule actually used in the deployed system.
    /// both thresholds are first-class named configurations, not a guess.
    pub fn deployment_default() -> Self {
        Self {
            se_threshold: SE_THRESHOLD_DEPLOYMENT,
            ..Self::algorithmic_default()
        }
    }

    /// step size Δθ implied by the grid bounds and point count.
    pub fn step(&self) -> f64 {
        (self.theta_max - self.theta_min) / (self.theta_points - 1) as f64
    }

    /// validates the grid and stopping knobs.
    ///
    /// `items_per_trait` is the bank's items-per-trait count (4 in the
    /// reference bank) so `max_items_per_trait` can be checked against it.
    pub fn validate(&self, items_per_trait: usize) -> DoseResult<()> {
        if self.theta_points < 21 {
            return Err(DoseError::InvalidItem {
                item: 0,
                reason: format!(
                    "THETA_POINTS must be >= 21, got {}",
                    self.theta_points
                ),
            });
        }
        if self.theta_min >= self.theta_max {
            return Err(DoseError::InvalidItem {
                item: 0,
                reason: "THETA_MIN must be < THETA_MAX".to_string(),
            });
        }
        if self.step() > 0.1 {
            return Err(DoseError::InvalidItem {
                item: 0,
                reason: format!(
                    "grid step {:.4} exceeds the 0.1 trustworthiness bound",
                    self.step()
                ),
            });
        }
        if self.max_items_per_trait > items_per_trait {
            return Err(DoseError::InvalidItem {
                item: 0,
                reason: format!(
                    "MAX_ITEMS_PER_TRAIT {} exceeds bank's {} items per trait",
                    self.max_items_per_trait, items_per_trait
                ),
            });
        }
        if self.se_threshold <= 0.0 {
            return Err(DoseError::InvalidItem {
                item: 0,
                reason: "SE_THRESHOLD must be positive".to_string(),
            });
        }
        Ok(())
    }
}
