//! one `TraitEstimator` per trait: a `Posterior` plus bookkeeping over
//! which of the trait's four bank items have been administered.

use crate::bank::{Bank, Item, Trait};
use crate::config::Config;
use crate::error::{DoseError, DoseResult};
use crate::grid::Grid;
use crate::posterior::Posterior;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StoppingReason {
    SeThreshold,
    MaxItems,
}

impl StoppingReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoppingReason::SeThreshold => "se_threshold",
            StoppingReason::MaxItems => "max_items",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TraitEstimator {
    trait_tag: Trait,
    posterior: Posterior,
    items_used: BTreeSet<u8>,
    se_threshold: f64,
    max_items: usize,
    done: bool,
    stopping_reason: Option<StoppingReason>,
}

impl TraitEstimator {
    pub fn new(trait_tag: Trait, grid: Arc<Grid>, config: &Config) -> Self {
        let mut estimator = Self {
            trait_tag,
            posterior: Posterior::init(grid),
            items_used: BTreeSet::new(),
            se_threshold: config.se_threshold,
            max_items: config.max_items_per_trait,
            done: false,
            stopping_reason: None,
        };
        estimator.recompute_done();
        estimator
    }

    pub fn trait_tag(&self) -> Trait {
        self.trait_tag
    }

    pub fn theta(&self) -> f64 {
        self.posterior.theta()
    }

    pub fn se(&self) -> f64 {
        self.posterior.se()
    }

    pub fn items_used(&self) -> &BTreeSet<u8> {
        &self.items_used
    }

    pub fn items_count(&self) -> usize {
        self.items_used.len()
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn stopping_reason(&self) -> Option<StoppingReason> {
        self.stopping_reason
    }

    /// the trait's bank items that have not yet been administered.
    pub fn available_items<'a>(&self, bank: &'a Bank) -> Vec<u8> {
        bank.items_for(self.trait_tag)
            .iter()
            .copied()
            .filter(|n| !self.items_used.contains(n))
            .collect()
    }

    /// applies reverse-scoring, updates the posterior, and recomputes
    /// `done`. once `done` flips true it never flips back.
    pub fn record(&mut self, item: &Item, raw_response: u8) -> DoseResult<()> {
        if item.trait_tag != self.trait_tag {
            return Err(DoseError::InvalidItem {
                item: item.number,
                reason: format!(
                    "item belongs to trait {:?}, not {:?}",
                    item.trait_tag, self.trait_tag
                ),
            });
        }
        let category = item.canonical_category(raw_response);
        self.posterior.update(item, category)?;
        self.items_used.insert(item.number);
        self.recompute_done();
        Ok(())
    }

    fn recompute_done(&mut self) {
        if self.done {
            return; // monotone: once done, stays done
        }
        if self.posterior.se() < self.se_threshold {
            self.done = true;
            self.stopping_reason = Some(StoppingReason::SeThreshold);
        } else if self.items_count() >= self.max_items {
            self.done = true;
            self.stopping_reason = Some(StoppingReason::MaxItems);
        }
    }
}
