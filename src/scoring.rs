//! projects the adaptive engine's theta estimates onto the same 1..7 likert
//! scale the fixed-form mean lives on, and compares the two.

use crate::bank::Trait;
use std::collections::BTreeMap;

const LIKERT_CENTER: f64 = 4.0;
const LIKERT_SLOPE: f64 = 0.75;
const LIKERT_MIN: f64 = 1.0;
const LIKERT_MAX: f64 = 7.0;

/// the one place theta is projected onto the 1..7 likert scale.
pub fn to_likert(theta: f64) -> f64 {
    (LIKERT_CENTER + LIKERT_SLOPE * theta).clamp(LIKERT_MIN, LIKERT_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Agreement {
    pub pearson_r: f64,
    pub mean_absolute_difference: f64,
}

/// per-trait signed difference plus the two whole-profile agreement
/// statistics (Pearson correlation, mean absolute difference) between the
/// adaptive engine's likert-projected estimates and the fixed-form means.
pub fn compare(
    adaptive_theta: &BTreeMap<Trait, f64>,
    fixed_form_mean: &BTreeMap<Trait, f64>,
) -> (BTreeMap<Trait, f64>, Agreement) {
    let mut differences = BTreeMap::new();
    let mut adaptive_likert = Vec::new();
    let mut fixed_likert = Vec::new();
    for &trait_tag in Trait::ALL.iter() {
        let (Some(&theta), Some(&mean)) = (
            adaptive_theta.get(&trait_tag),
            fixed_form_mean.get(&trait_tag),
        ) else {
            continue;
        };
        let adaptive = to_likert(theta);
        differences.insert(trait_tag, adaptive - mean);
        adaptive_likert.push(adaptive);
        fixed_likert.push(mean);
    }
    let agreement = Agreement {
        pearson_r: pearson(&adaptive_likert, &fixed_likert),
        mean_absolute_difference: mean_absolute_difference(&adaptive_likert, &fixed_likert),
    };
    (differences, agreement)
}

fn mean_absolute_difference(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
    sum / a.len() as f64
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n < 2 {
        return 0.0;
    }
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..n {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a <= 0.0 || var_b <= 0.0 {
        return 0.0;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}
