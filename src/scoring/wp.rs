use tracing::debug;

use super::saw::{into_ranked, RankResult};
use crate::model::{CriterionSet, Location, LocationSet};

/// `ln S` for one location: `Σ signed_weight · ln(value)` over raw scores.
///
/// A raw value of exactly 0 is skipped rather than zeroing the product
/// (0 raised to a negative exponent is undefined). With every value skipped
/// the empty sum is 0, i.e. S = 1.
fn log_weighted_product(criteria: &CriterionSet, location: &Location) -> f64 {
    criteria
        .iter()
        .filter_map(|c| {
            let value = location.score(&c.id);
            (value != 0.0).then(|| c.signed_weight() * value.ln())
        })
        .sum::<f64>()
}

/// Vector S for one location: `Π value ^ signed_weight` over raw scores.
///
/// May saturate to 0 or infinity for extreme scores; ranking works on `ln S`.
pub fn weighted_product(criteria: &CriterionSet, location: &Location) -> f64 {
    log_weighted_product(criteria, location).exp()
}

/// Weighted Product: preference `V = S / ΣS`, sorted descending.
///
/// Evaluated as `exp(ln S - max ln S) / Σ exp(ln S_j - max ln S)` so that
/// preferences still sum to 1 when S itself overflows or underflows.
pub fn rank_wp(criteria: &CriterionSet, locations: &LocationSet) -> Vec<RankResult> {
    if criteria.is_empty() || locations.is_empty() {
        return Vec::new();
    }

    let log_s: Vec<f64> = locations
        .iter()
        .map(|l| log_weighted_product(criteria, l))
        .collect();
    let peak = log_s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let relative: Vec<f64> = log_s.iter().map(|ln_s| (ln_s - peak).exp()).collect();
    let total: f64 = relative.iter().sum();

    let scored: Vec<_> = locations
        .iter()
        .zip(log_s.iter().zip(relative))
        .map(|(location, (ln_s, rel))| {
            debug!(location = location.id, s = ln_s.exp(), ln_s = *ln_s, "WP vector S");
            let preference = if total > 0.0 { rel / total } else { 0.0 };
            (location.id, location.name.clone(), preference)
        })
        .collect();

    into_ranked(scored)
}
