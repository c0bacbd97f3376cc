use serde::Serialize;
use std::cmp::Ordering;

use super::normalize::NormalizedMatrix;
use crate::model::{CriterionSet, LocationId, LocationSet};

/// One row of a ranked result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    pub location_id: LocationId,
    pub location_name: String,
    pub score: f64,
    /// 1-based position in the list
    pub rank: usize,
}

/// Sort `(id, name, score)` triples by score descending and assign ranks.
///
/// `sort_by` is stable, so equal scores keep their input order.
pub(crate) fn into_ranked(mut scored: Vec<(LocationId, String, f64)>) -> Vec<RankResult> {
    scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
    scored
        .into_iter()
        .enumerate()
        .map(|(index, (location_id, location_name, score))| RankResult {
            location_id,
            location_name,
            score,
            rank: index + 1,
        })
        .collect()
}

/// Simple Additive Weighting: `Σ weight × normalized`.
pub fn rank_saw(
    criteria: &CriterionSet,
    locations: &LocationSet,
    matrix: &NormalizedMatrix,
) -> Vec<RankResult> {
    if criteria.is_empty() || locations.is_empty() {
        return Vec::new();
    }

    let scored: Vec<_> = locations
        .iter()
        .map(|location| {
            let score = criteria
                .iter()
                .map(|c| c.weight * matrix.get(location.id, &c.id))
                .sum::<f64>();
            (location.id, location.name.clone(), score)
        })
        .collect();

    into_ranked(scored)
}
