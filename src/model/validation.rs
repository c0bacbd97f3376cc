use std::collections::HashSet;

use super::criterion::{Criterion, CriterionSet};
use super::location::{Location, LocationSet};

/// Validate a single criterion. Returns all problems at once (not just the first).
pub fn validate_criterion(criterion: &Criterion) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    check_criterion(criterion, &format!("criteria['{}']", criterion.id), &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a single raw score value.
pub fn validate_score(value: f64) -> Result<(), String> {
    if !value.is_finite() {
        Err(format!("score must be a finite number, got {}", value))
    } else if value < 0.0 {
        Err(format!("score must be non-negative, got {}", value))
    } else {
        Ok(())
    }
}

/// Validate a criterion set and location set before they reach the engine.
/// Returns all validation errors at once.
pub fn validate_dataset(criteria: &CriterionSet, locations: &LocationSet) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut seen_criteria = HashSet::new();
    for (i, criterion) in criteria.iter().enumerate() {
        let path = format!("criteria[{}]", i);
        check_criterion(criterion, &path, &mut errors);
        if !criterion.id.is_empty() && !seen_criteria.insert(criterion.id.as_str()) {
            errors.push(format!("{}.id: duplicate id '{}'", path, criterion.id));
        }
    }

    let mut seen_locations = HashSet::new();
    for (i, location) in locations.iter().enumerate() {
        let path = format!("locations[{}]", i);
        if !seen_locations.insert(location.id) {
            errors.push(format!("{}.id: duplicate id {}", path, location.id));
        }
        check_location(location, &path, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_criterion(criterion: &Criterion, path: &str, errors: &mut Vec<String>) {
    if criterion.id.trim().is_empty() {
        errors.push(format!("{}.id: must not be empty", path));
    }
    let w = criterion.weight;
    if !w.is_finite() || w <= 0.0 || w > 1.0 {
        errors.push(format!("{}.weight: must be in (0, 1], got {}", path, w));
    }
}

fn check_location(location: &Location, path: &str, errors: &mut Vec<String>) {
    for (criterion_id, value) in &location.scores {
        if let Err(e) = validate_score(*value) {
            errors.push(format!("{}.criteria['{}']: {}", path, criterion_id, e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, Polarity};

    fn criteria(items: Vec<Criterion>) -> CriterionSet {
        CriterionSet::new(items)
    }

    #[test]
    fn test_valid_dataset() {
        let c = criteria(vec![Criterion::new("a", "A", 1.0, Polarity::Benefit)]);
        let l = LocationSet::new(vec![
            Location::new(1, "X", Coordinates::default()).with_score("a", 3.0),
        ]);
        assert!(validate_dataset(&c, &l).is_ok());
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        assert!(validate_dataset(&CriterionSet::default(), &LocationSet::default()).is_ok());
    }

    #[test]
    fn test_weight_out_of_range() {
        for bad in [0.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let c = criteria(vec![Criterion::new("a", "A", bad, Polarity::Cost)]);
            let errors = validate_dataset(&c, &LocationSet::default()).unwrap_err();
            assert!(errors[0].contains("criteria[0].weight"), "weight {}", bad);
        }
    }

    #[test]
    fn test_empty_and_duplicate_criterion_ids() {
        let c = criteria(vec![
            Criterion::new("", "Blank", 0.5, Polarity::Benefit),
            Criterion::new("a", "A", 0.2, Polarity::Benefit),
            Criterion::new("a", "A again", 0.3, Polarity::Cost),
        ]);
        let errors = validate_dataset(&c, &LocationSet::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("criteria[0].id: must not be empty"));
        assert!(errors[1].contains("criteria[2].id: duplicate id 'a'"));
    }

    #[test]
    fn test_bad_scores_and_duplicate_location_ids() {
        let c = criteria(vec![Criterion::new("a", "A", 1.0, Polarity::Benefit)]);
        let l = LocationSet::new(vec![
            Location::new(1, "X", Coordinates::default()).with_score("a", -1.0),
            Location::new(1, "Y", Coordinates::default()).with_score("a", f64::NAN),
        ]);
        let errors = validate_dataset(&c, &l).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("non-negative"));
        assert!(errors[1].contains("locations[1].id: duplicate id 1"));
        assert!(errors[2].contains("finite"));
    }

    #[test]
    fn test_validate_single_criterion() {
        assert!(validate_criterion(&Criterion::new("a", "A", 0.4, Polarity::Benefit)).is_ok());
        let errors = validate_criterion(&Criterion::new(" ", "A", 2.0, Polarity::Benefit)).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
