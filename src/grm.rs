//! the Graded Response Model probability kernel: pure functions from an
//! item and a latent value theta to category probabilities and Fisher
//! information. The kernel itself is unaware of reverse-scoring — that
//! adapter lives at the `posterior` boundary.

use crate::bank::Item;
use crate::error::{DoseError, DoseResult};

const EPSILON: f64 = 1e-12;

/// cumulative boundary function P*(theta, k) for k in 0..=7, with the
/// boundary conventions P*(theta, 0) = 1 and P*(theta, 7) = 0 baked in.
fn cumulative(item: &Item, theta: f64, k: usize) -> f64 {
    match k {
        0 => 1.0,
        7 => 0.0,
        1..=6 => {
            let beta = item.beta[k - 1];
            1.0 / (1.0 + (-item.alpha * (theta - beta)).exp())
        }
        _ => unreachable!("category boundary out of range"),
    }
}

fn check_item(item: &Item) -> DoseResult<()> {
    if !(item.alpha > 0.0) {
        return Err(DoseError::InvalidItem {
            item: item.number,
            reason: format!("alpha must be positive, got {}", item.alpha),
        });
    }
    if item.beta.len() != 6 {
        return Err(DoseError::InvalidItem {
            item: item.number,
            reason: format!("expected 6 thresholds, got {}", item.beta.len()),
        });
    }
    Ok(())
}

/// Pk(theta) for k in 1..=7, returned as a length-7 array indexed 0..6.
///
/// guarantees: every entry in (0, 1); sums to 1 within 1e-9; no entry below
/// `EPSILON` (floored and renormalized, to keep the log-likelihood in
/// `posterior::update` finite).
pub fn category_probs(item: &Item, theta: f64) -> DoseResult<[f64; 7]> {
    check_item(item)?;
    let mut probs = [0.0f64; 7];
    for k in 1..=7 {
        let upper = cumulative(item, theta, k - 1);
        let lower = cumulative(item, theta, k);
        probs[k - 1] = (upper - lower).max(EPSILON);
    }
    let sum: f64 = probs.iter().sum();
    for p in probs.iter_mut() {
        *p /= sum;
    }
    Ok(probs)
}

/// Fisher information at theta:
/// alpha^2 * sum_k ((P*'_{k-1} - P*'_k)^2 / Pk), with boundary derivatives
/// at k=0 and k=7 fixed at zero.
pub fn fisher_information(item: &Item, theta: f64) -> DoseResult<f64> {
    check_item(item)?;
    let probs = category_probs(item, theta)?;
    let derivative = |k: usize| -> f64 {
        if k == 0 || k == 7 {
            0.0
        } else {
            let p = cumulative(item, theta, k);
            p * (1.0 - p)
        }
    };
    let mut info = 0.0;
    for k in 1..=7 {
        let d_upper = derivative(k - 1);
        let d_lower = derivative(k);
        info += (d_upper - d_lower).powi(2) / probs[k - 1];
    }
    Ok(item.alpha.powi(2) * info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Trait;

    fn sample_item() -> Item {
        Item {
            number: 1,
            trait_tag: Trait::Extraversion,
            reverse: false,
            alpha: 1.2,
            beta: [-2.0, -1.2, -0.4, 0.4, 1.2, 2.0],
        }
    }

    #[test]
    fn category_probs_sum_to_one() {
        let item = sample_item();
        for theta in [-4.0, -1.0, 0.0, 1.0, 4.0] {
            let probs = category_probs(&item, theta).unwrap();
            let sum: f64 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum was {sum} at theta {theta}");
            for p in probs {
                assert!(p > 0.0 && p < 1.0);
            }
        }
    }

    #[test]
    fn category_probs_monotone_shift_with_theta() {
        let item = sample_item();
        // at very negative theta, mass should concentrate on low categories
        let low = category_probs(&item, -6.0).unwrap();
        let high = category_probs(&item, 6.0).unwrap();
        assert!(low[0] > 0.9);
        assert!(high[6] > 0.9);
    }

    #[test]
    fn fisher_information_is_nonnegative() {
        let item = sample_item();
        for theta in [-3.0, -1.0, 0.0, 1.0, 3.0] {
            assert!(fisher_information(&item, theta).unwrap() >= 0.0);
        }
    }

    #[test]
    fn fisher_information_peaks_near_item_center() {
        let item = sample_item();
        let center = fisher_information(&item, 0.0).unwrap();
        let tail = fisher_information(&item, 6.0).unwrap();
        assert!(center > tail);
    }

    #[test]
    fn rejects_nonpositive_alpha() {
        let mut item = sample_item();
        item.alpha = -1.0;
        assert!(category_probs(&item, 0.0).is_err());
        assert!(fisher_information(&item, 0.0).is_err());
    }
}
