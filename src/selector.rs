//! ranks a trait's unused items by Fisher information at the trait's
//! current EAP and returns the maximizer.

use crate::bank::Bank;
use crate::error::{DoseError, DoseResult};
use crate::estimator::TraitEstimator;
use crate::grm;

const TIE_TOLERANCE: f64 = 1e-9;

/// picks the unused item maximizing Fisher information at `estimator`'s
/// current EAP. ties within `TIE_TOLERANCE` break toward the smallest item
/// number, making the very first pick for a fresh trait (EAP = 0)
/// deterministic and reproducible.
pub fn select(estimator: &TraitEstimator, bank: &Bank) -> DoseResult<u8> {
    let candidates = estimator.available_items(bank);
    if candidates.is_empty() {
        return Err(DoseError::NoItemsAvailable {
            trait_tag: estimator.trait_tag(),
        });
    }
    let theta = estimator.theta();
    let mut best: Option<(u8, f64)> = None;
    for number in candidates {
        let item = bank
            .item(number)
            .expect("available_items only returns numbers present in the bank");
        let info = grm::fisher_information(item, theta)?;
        best = Some(match best {
            None => (number, info),
            Some((best_number, best_info)) => {
                if info > best_info + TIE_TOLERANCE {
                    (number, info)
                } else if (info - best_info).abs() <= TIE_TOLERANCE && number < best_number {
                    (number, info)
                } else {
                    (best_number, best_info)
                }
            }
        });
    }
    Ok(best.expect("candidates was non-empty").0)
}
