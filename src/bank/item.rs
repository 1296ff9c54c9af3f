use super::trait_tag::Trait;
use crate::error::{DoseError, DoseResult};

/// a single bank entry: immutable once loaded, never mutated or destroyed
/// during a process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Item {
    pub number: u8,
    pub trait_tag: Trait,
    pub reverse: bool,
    pub alpha: f64,
    pub beta: [f64; 6],
}

impl Item {
    /// validates the row: alpha > 0, all betas finite, trait one of the
    /// canonical six (guaranteed by the `Trait` type itself).
    pub fn validate(&self) -> DoseResult<()> {
        if !(self.alpha > 0.0) {
            return Err(DoseError::InvalidItem {
                item: self.number,
                reason: format!("alpha must be positive, got {}", self.alpha),
            });
        }
        for (k, b) in self.beta.iter().enumerate() {
            if !b.is_finite() {
                return Err(DoseError::InvalidItem {
                    item: self.number,
                    reason: format!("beta[{k}] is not finite: {b}"),
                });
            }
        }
        Ok(())
    }

    /// the observed 1..=7 response reversed to its GRM category, per the
    /// reverse-scoring convention applied exactly once at this boundary.
    /// Non-reverse items pass through unchanged.
    pub fn canonical_category(&self, raw_response: u8) -> u8 {
        if self.reverse {
            8 - raw_response
        } else {
            raw_response
        }
    }
}
