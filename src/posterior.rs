//! the grid-discretized posterior over a single trait's latent theta.
//!
//! purely computational: no I/O, no suspension points. every mutation
//! (`update`) runs to completion within a single call.

use crate::bank::Item;
use crate::error::{DoseError, DoseResult};
use crate::grid::Grid;
use std::f64::consts::PI;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Posterior {
    grid: Arc<Grid>,
    /// normalized density values at each grid node; integrates to 1 under
    /// the grid's rectangle-rule quadrature.
    weights: Vec<f64>,
    theta: f64,
    se: f64,
}

fn standard_normal_pdf(theta: f64) -> f64 {
    (-0.5 * theta * theta).exp() / (2.0 * PI).sqrt()
}

impl Posterior {
    /// sets the posterior to the discretized N(0,1) density, renormalized
    /// on the grid.
    pub fn init(grid: Arc<Grid>) -> Self {
        let raw: Vec<f64> = grid.nodes.iter().map(|&t| standard_normal_pdf(t)).collect();
        let mass = grid.quadrature(&raw);
        let weights: Vec<f64> = raw.iter().map(|&w| w / mass).collect();
        let mut posterior = Self {
            grid,
            weights,
            theta: 0.0,
            se: 1.0,
        };
        posterior.recompute();
        posterior
    }

    /// updates the posterior with a single response, already reverse-mapped
    /// to its GRM category by the caller. the kernel and this engine stay
    /// unaware of reversal; only the adapter at the trait-estimator
    /// boundary applies `item.canonical_category`.
    pub fn update(&mut self, item: &Item, category: u8) -> DoseResult<()> {
        debug_assert!((1..=7).contains(&category));
        let mut log_post = Vec::with_capacity(self.grid.len());
        for (i, &theta) in self.grid.nodes.iter().enumerate() {
            let probs = crate::grm::category_probs(item, theta)?;
            let like = probs[(category - 1) as usize];
            log_post.push(self.weights[i].ln() + like.ln());
        }
        let max_log = log_post
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let exp_vals: Vec<f64> = log_post.iter().map(|&l| (l - max_log).exp()).collect();
        let mass = self.grid.quadrature(&exp_vals);
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(DoseError::DegeneratePosterior {
                trait_tag: item.trait_tag,
            });
        }
        self.weights = exp_vals.iter().map(|&v| v / mass).collect();
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.theta = self.eap();
        self.se = self.sd();
    }

    /// EAP = sum_i theta_i * posterior_i * step
    pub fn eap(&self) -> f64 {
        let weighted: Vec<f64> = self
            .grid
            .nodes
            .iter()
            .zip(self.weights.iter())
            .map(|(&t, &w)| t * w)
            .collect();
        self.grid.quadrature(&weighted)
    }

    /// posterior standard deviation = sqrt(sum_i (theta_i - eap)^2 * post_i * step)
    pub fn sd(&self) -> f64 {
        let mean = self.theta;
        let weighted: Vec<f64> = self
            .grid
            .nodes
            .iter()
            .zip(self.weights.iter())
            .map(|(&t, &w)| (t - mean).powi(2) * w)
            .collect();
        self.grid.quadrature(&weighted).max(0.0).sqrt()
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn se(&self) -> f64 {
        self.se
    }

    pub fn mass(&self) -> f64 {
        self.grid.quadrature(&self.weights)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
