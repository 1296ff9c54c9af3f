//! the classical, non-adaptive scoring path: every item in the bank is
//! administered once and a trait's score is the reverse-aware mean of its
//! four raw responses. exists so `scoring` has something to compare the
//! adaptive engine's output against.

use crate::bank::{Bank, Item, Trait};
use crate::error::{DoseError, DoseResult};
use std::collections::BTreeMap;

/// a completed fixed-form administration: one raw 1..=7 response per item
/// in the bank, keyed by item number.
#[derive(Debug, Clone, Default)]
pub struct FixedFormResponses {
    by_item: BTreeMap<u8, u8>,
}

impl FixedFormResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item_number: u8, raw_response: u8) -> DoseResult<()> {
        if !(1..=7).contains(&raw_response) {
            return Err(DoseError::InvalidResponse { value: raw_response });
        }
        self.by_item.insert(item_number, raw_response);
        Ok(())
    }

    /// the reverse-aware mean response for `trait_tag`, or `None` if any of
    /// the trait's bank items has not been recorded.
    pub fn trait_mean(&self, bank: &Bank, trait_tag: Trait) -> Option<f64> {
        let items = bank.items_for(trait_tag);
        let mut total = 0.0;
        for &number in items {
            let item: &Item = bank.item(number)?;
            let raw = *self.by_item.get(&number)?;
            total += item.canonical_category(raw) as f64;
        }
        Some(total / items.len() as f64)
    }

    /// means for every trait with a complete set of responses.
    pub fn means(&self, bank: &Bank) -> BTreeMap<Trait, f64> {
        Trait::ALL
            .iter()
            .filter_map(|&t| self.trait_mean(bank, t).map(|m| (t, m)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::default_bank;

    #[test]
    fn all_midpoint_responses_give_mean_four() {
        let bank = default_bank();
        let mut responses = FixedFormResponses::new();
        for item in bank.items_for(Trait::Extraversion) {
            responses.record(*item, 4).unwrap();
        }
        let mean = responses.trait_mean(bank, Trait::Extraversion).unwrap();
        assert!((mean - 4.0).abs() < 1e-9);
    }

    #[test]
    fn reverse_items_are_flipped_before_averaging() {
        let bank = default_bank();
        let mut responses = FixedFormResponses::new();
        for &number in bank.items_for(Trait::Extraversion) {
            let item = bank.item(number).unwrap();
            let raw = if item.reverse { 7 } else { 1 };
            responses.record(number, raw).unwrap();
        }
        let mean = responses.trait_mean(bank, Trait::Extraversion).unwrap();
        assert!((mean - 1.0).abs() < 1e-9);
    }

    #[test]
    fn incomplete_trait_returns_none() {
        let bank = default_bank();
        let mut responses = FixedFormResponses::new();
        let items = bank.items_for(Trait::Agreeableness);
        responses.record(items[0], 4).unwrap();
        assert!(responses.trait_mean(bank, Trait::Agreeableness).is_none());
    }

    #[test]
    fn means_skips_incomplete_traits() {
        let bank = default_bank();
        let mut responses = FixedFormResponses::new();
        for &number in bank.items_for(Trait::Openness) {
            responses.record(number, 5).unwrap();
        }
        let means = responses.means(bank);
        assert_eq!(means.len(), 1);
        assert!(means.contains_key(&Trait::Openness));
    }
}
