use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::compare::{compare_rankings, ConsistencyRow};
use super::normalize::normalize;
use super::recommend::{build_recommendation, Recommendation};
use super::saw::{rank_saw, RankResult};
use super::wp::rank_wp;
use crate::error::{Error, Result};
use crate::model::{validate_dataset, CriterionSet, LocationSet};

/// Default allowed deviation of the weight total from 1.0 before it is flagged.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    pub weight_tolerance: f64,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
        }
    }
}

/// Everything one ranking pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingReport {
    pub saw: Vec<RankResult>,
    pub wp: Vec<RankResult>,
    pub comparison: Vec<ConsistencyRow>,
    pub recommendation: Option<Recommendation>,
    /// Sum of criterion weights, as given
    pub total_weight: f64,
    /// Data-quality notes that did not stop the ranking
    pub warnings: Vec<String>,
}

impl RankingReport {
    fn empty(total_weight: f64, warnings: Vec<String>) -> Self {
        Self {
            saw: Vec::new(),
            wp: Vec::new(),
            comparison: Vec::new(),
            recommendation: None,
            total_weight,
            warnings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.saw.is_empty() && self.wp.is_empty()
    }
}

/// Rank locations with default options.
pub fn rank(criteria: &CriterionSet, locations: &LocationSet) -> Result<RankingReport> {
    rank_with(criteria, locations, &RankOptions::default())
}

/// Run the full pipeline: normalize, SAW, WP, compare, recommend.
///
/// Fails only on malformed input. Empty sets produce an empty report.
pub fn rank_with(
    criteria: &CriterionSet,
    locations: &LocationSet,
    options: &RankOptions,
) -> Result<RankingReport> {
    validate_dataset(criteria, locations).map_err(Error::InvalidInput)?;

    let total_weight = criteria.total_weight();
    let warnings = data_quality_warnings(criteria, locations, total_weight, options);
    for warning in &warnings {
        warn!("{}", warning);
    }

    if criteria.is_empty() || locations.is_empty() {
        debug!(
            criteria = criteria.len(),
            locations = locations.len(),
            "nothing to rank"
        );
        return Ok(RankingReport::empty(total_weight, warnings));
    }

    let matrix = normalize(criteria, locations);
    let saw = rank_saw(criteria, locations, &matrix);
    let wp = rank_wp(criteria, locations);
    debug!(
        criteria = criteria.len(),
        locations = locations.len(),
        "ranked with SAW and WP"
    );

    let comparison = compare_rankings(locations, &saw, &wp);
    let recommendation =
        build_recommendation(&saw, &wp, criteria, &matrix, options.weight_tolerance);

    Ok(RankingReport {
        saw,
        wp,
        comparison,
        recommendation,
        total_weight,
        warnings,
    })
}

fn data_quality_warnings(
    criteria: &CriterionSet,
    locations: &LocationSet,
    total_weight: f64,
    options: &RankOptions,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if !criteria.is_empty() && (total_weight - 1.0).abs() > options.weight_tolerance {
        warnings.push(format!(
            "criterion weights sum to {:.3} instead of 1.0",
            total_weight
        ));
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for location in locations {
        if !seen.insert(location.name.as_str()) && reported.insert(location.name.as_str()) {
            warnings.push(format!(
                "location name '{}' is used more than once; rows are matched by id",
                location.name
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, Criterion, Dataset, Location, Polarity};
    use crate::scoring::Agreement;

    #[test]
    fn test_sample_dataset_ranking() {
        let dataset = Dataset::sample();
        let report = rank(dataset.criteria(), dataset.locations()).unwrap();

        assert_eq!(report.saw.len(), 3);
        assert_eq!(report.saw[0].location_name, "Jakarta Pusat");
        assert!(report.saw[0].score > report.saw[1].score);
        assert!(report.saw[0].score > report.saw[2].score);
        assert_eq!(report.wp[0].location_name, "Jakarta Pusat");

        let rec = report.recommendation.as_ref().unwrap();
        assert_eq!(rec.location_name, "Jakarta Pusat");
        assert_eq!(rec.agreement, Agreement::HighConsistency);

        let names: Vec<_> = report.comparison.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Jakarta Pusat", "Bandung", "Surabaya"]);
        assert!(report.comparison.iter().all(|r| r.consistent));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_sample_wp_preferences_sum_to_one() {
        let dataset = Dataset::sample();
        let report = rank(dataset.criteria(), dataset.locations()).unwrap();
        let total: f64 = report.wp.iter().map(|r| r.score).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_removing_all_criteria_yields_empty_report() {
        let mut dataset = Dataset::sample();
        let ids: Vec<String> = dataset.criteria().iter().map(|c| c.id.clone()).collect();
        for id in ids {
            dataset.remove_criterion(&id).unwrap();
        }

        let report = rank(dataset.criteria(), dataset.locations()).unwrap();
        assert!(report.saw.is_empty());
        assert!(report.wp.is_empty());
        assert!(report.comparison.is_empty());
        assert!(report.recommendation.is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn test_no_locations() {
        let dataset = Dataset::sample();
        let report = rank(dataset.criteria(), &LocationSet::default()).unwrap();
        assert!(report.is_empty());
        assert!(report.recommendation.is_none());
    }

    #[test]
    fn test_rank_is_deterministic() {
        let dataset = Dataset::sample();
        let first = rank(dataset.criteria(), dataset.locations()).unwrap();
        let second = rank(dataset.criteria(), dataset.locations()).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.saw.iter().zip(&second.saw) {
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let criteria = CriterionSet::new(vec![Criterion::new("a", "A", -1.0, Polarity::Benefit)]);
        let locations = LocationSet::new(vec![
            Location::new(1, "X", Coordinates::default()).with_score("a", f64::INFINITY),
        ]);
        match rank(&criteria, &locations) {
            Err(Error::InvalidInput(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_weight_and_duplicate_name_warnings() {
        let criteria = CriterionSet::new(vec![Criterion::new("a", "A", 0.5, Polarity::Benefit)]);
        let locations = LocationSet::new(vec![
            Location::new(1, "Twin", Coordinates::default()).with_score("a", 1.0),
            Location::new(2, "Twin", Coordinates::default()).with_score("a", 2.0),
            Location::new(3, "Twin", Coordinates::default()).with_score("a", 3.0),
        ]);
        let report = rank(&criteria, &locations).unwrap();

        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("0.500"));
        assert!(report.warnings[1].contains("'Twin'"));
        assert_eq!(report.saw[0].location_id, 3);
        assert_eq!(report.total_weight, 0.5);
    }

    #[test]
    fn test_new_criterion_backfilled_before_ranking() {
        let mut dataset = Dataset::sample();
        dataset
            .add_criterion(Criterion::new("parking", "Parking", 0.1, Polarity::Benefit))
            .unwrap();
        assert!(dataset
            .locations()
            .iter()
            .all(|l| l.scores.get("parking") == Some(&0.0)));

        let report = rank(dataset.criteria(), dataset.locations()).unwrap();
        assert_eq!(report.saw.len(), 3);
        assert!(report.warnings.iter().any(|w| w.contains("1.100")));
    }
}
