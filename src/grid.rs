//! the discretized theta grid quadrature lives on.
//!
//! a grid posterior is preferred over an analytical MAP because the GRM
//! likelihood is multimodal in principle, SE is cheap to read off the grid,
//! and replay is reproducible across implementations when the grid is fixed.
//! do not swap in adaptive quadrature — replay depends on every `Posterior`
//! sharing identical nodes.

use crate::config::Config;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub nodes: Vec<f64>,
    pub step: f64,
}

impl Grid {
    pub fn new(config: &Config) -> Self {
        let n = config.theta_points;
        let step = config.step();
        let nodes = (0..n)
            .map(|i| config.theta_min + i as f64 * step)
            .collect();
        Self { nodes, step }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// rectangle-rule quadrature of `values` against the grid weight.
    pub fn quadrature(&self, values: &[f64]) -> f64 {
        values.iter().sum::<f64>() * self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_161_nodes_spanning_plus_minus_4() {
        let grid = Grid::new(&Config::algorithmic_default());
        assert_eq!(grid.len(), 161);
        assert!((grid.nodes[0] - (-4.0)).abs() < 1e-9);
        assert!((grid.nodes[160] - 4.0).abs() < 1e-9);
        assert!((grid.step - 0.05).abs() < 1e-9);
    }

    #[test]
    fn quadrature_of_uniform_density_integrates_to_one() {
        let grid = Grid::new(&Config::algorithmic_default());
        let density = vec![1.0 / (8.0); grid.len()];
        // not a true density on this grid (rectangle rule boundary effects),
        // but confirms the weight multiplication is wired correctly.
        let total = grid.quadrature(&density);
        assert!((total - grid.len() as f64 / 8.0 * grid.step).abs() < 1e-12);
    }
}
