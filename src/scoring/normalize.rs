use std::collections::HashMap;

use crate::model::{CriterionSet, LocationId, LocationSet, Polarity};

/// Observed raw-value range for one criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionBounds {
    pub criterion_id: String,
    pub min: f64,
    pub max: f64,
}

/// Normalized score per (location, criterion), plus the bounds that produced it.
///
/// Rebuilt from scratch on every ranking pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedMatrix {
    bounds: Vec<CriterionBounds>,
    values: HashMap<LocationId, HashMap<String, f64>>,
}

impl NormalizedMatrix {
    /// Normalized value; 0 for unknown pairs.
    pub fn get(&self, location_id: LocationId, criterion_id: &str) -> f64 {
        self.values
            .get(&location_id)
            .and_then(|row| row.get(criterion_id))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn bounds(&self) -> &[CriterionBounds] {
        &self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normalize every raw score into [0, 1].
///
/// Benefit: `value / max` (0 when max is 0).
/// Cost: `min / value` (0 when min or value is 0).
pub fn normalize(criteria: &CriterionSet, locations: &LocationSet) -> NormalizedMatrix {
    if criteria.is_empty() || locations.is_empty() {
        return NormalizedMatrix::default();
    }

    let mut matrix = NormalizedMatrix::default();

    for criterion in criteria {
        let (min, max) = locations
            .iter()
            .map(|l| l.score(&criterion.id))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        for location in locations {
            let value = location.score(&criterion.id);
            let normalized = match criterion.polarity {
                Polarity::Benefit if max > 0.0 => value / max,
                Polarity::Cost if min > 0.0 && value > 0.0 => min / value,
                _ => 0.0,
            };
            matrix
                .values
                .entry(location.id)
                .or_default()
                .insert(criterion.id.clone(), normalized);
        }

        matrix.bounds.push(CriterionBounds {
            criterion_id: criterion.id.clone(),
            min,
            max,
        });
    }

    matrix
}
