use std::collections::BTreeMap;
use tracing::debug;

use super::criterion::{Criterion, CriterionSet, Polarity};
use super::location::{Coordinates, Location, LocationId, LocationSet};
use super::validation::{validate_criterion, validate_dataset, validate_score};
use crate::error::{Error, Result};

/// Owned criteria + locations pair.
///
/// All mutation goes through this type so that every location always holds a
/// score entry for every criterion id and no entry for ids that are gone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    criteria: CriterionSet,
    locations: LocationSet,
}

/// Fields accepted when registering a new location.
#[derive(Debug, Clone, Default)]
pub struct NewLocation {
    pub name: String,
    pub address: Option<String>,
    pub coordinates: Coordinates,
    pub scores: BTreeMap<String, f64>,
}

/// Partial update of a criterion; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CriterionUpdate {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub polarity: Option<Polarity>,
}

/// Partial update of a location's descriptive fields.
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl Dataset {
    /// Build a dataset from loaded collections.
    ///
    /// Validates both sets, then reconciles score maps: missing entries are
    /// filled with 0 and entries for unknown criteria are dropped.
    pub fn new(criteria: CriterionSet, mut locations: LocationSet) -> Result<Self> {
        validate_dataset(&criteria, &locations).map_err(Error::InvalidInput)?;

        for location in locations.iter_mut() {
            let before = location.scores.len();
            location.scores.retain(|id, _| criteria.contains(id));
            if location.scores.len() != before {
                debug!(
                    location = location.id,
                    dropped = before - location.scores.len(),
                    "dropped scores for unknown criteria"
                );
            }
            for criterion in criteria.iter() {
                location.scores.entry(criterion.id.clone()).or_insert(0.0);
            }
        }

        Ok(Self { criteria, locations })
    }

    /// The default dataset: five site-selection criteria and three cities.
    pub fn sample() -> Self {
        let criteria = CriterionSet::new(vec![
            Criterion::new("populationDensity", "Population Density", 0.25, Polarity::Benefit),
            Criterion::new("accessibility", "Accessibility", 0.2, Polarity::Benefit),
            Criterion::new("competition", "Competition Level", 0.15, Polarity::Cost),
            Criterion::new("rentCost", "Rent Cost", 0.2, Polarity::Cost),
            Criterion::new("marketPotential", "Market Potential", 0.2, Polarity::Benefit),
        ]);

        let city = |id, name: &str, address: &str, lat, lng, scores: [f64; 5]| {
            let [density, access, competition, rent, market] = scores;
            Location::new(id, name, Coordinates::new(lat, lng))
                .with_address(address)
                .with_score("populationDensity", density)
                .with_score("accessibility", access)
                .with_score("competition", competition)
                .with_score("rentCost", rent)
                .with_score("marketPotential", market)
        };

        let locations = LocationSet::new(vec![
            city(
                1,
                "Jakarta Pusat",
                "Jl. MH Thamrin No. 1, Menteng, Jakarta Pusat, DKI Jakarta 10310",
                -6.1944,
                106.8229,
                [85.0, 90.0, 60.0, 40.0, 88.0],
            ),
            city(
                2,
                "Bandung",
                "Jl. Asia Afrika No. 146, Sumur Bandung, Kota Bandung, Jawa Barat 40112",
                -6.9175,
                107.6191,
                [75.0, 80.0, 70.0, 70.0, 82.0],
            ),
            city(
                3,
                "Surabaya",
                "Jl. Pemuda No. 31-37, Embong Kaliasin, Genteng, Surabaya, Jawa Timur 60271",
                -7.2575,
                112.7521,
                [80.0, 85.0, 65.0, 60.0, 85.0],
            ),
        ]);

        Self { criteria, locations }
    }

    pub fn criteria(&self) -> &CriterionSet {
        &self.criteria
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    /// Add a criterion and backfill every location with a 0 score for it.
    pub fn add_criterion(&mut self, criterion: Criterion) -> Result<()> {
        validate_criterion(&criterion).map_err(Error::InvalidInput)?;
        if self.criteria.contains(&criterion.id) {
            return Err(Error::DuplicateCriterion(criterion.id));
        }

        for location in self.locations.iter_mut() {
            location.scores.insert(criterion.id.clone(), 0.0);
        }
        debug!(criterion = %criterion.id, "added criterion");
        self.criteria.push(criterion);
        Ok(())
    }

    pub fn update_criterion(&mut self, id: &str, update: CriterionUpdate) -> Result<()> {
        let current = self
            .criteria
            .get(id)
            .ok_or_else(|| Error::UnknownCriterion(id.to_string()))?;

        let mut next = current.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(weight) = update.weight {
            next.weight = weight;
        }
        if let Some(polarity) = update.polarity {
            next.polarity = polarity;
        }
        validate_criterion(&next).map_err(Error::InvalidInput)?;

        if let Some(slot) = self.criteria.get_mut(id) {
            *slot = next;
        }
        Ok(())
    }

    /// Change a criterion's id and migrate the score key in every location.
    ///
    /// All checks run before anything is touched, so on error the dataset is unchanged.
    pub fn rename_criterion(&mut self, old_id: &str, new_id: &str) -> Result<()> {
        if new_id.trim().is_empty() {
            return Err(Error::invalid("criterion id must not be empty"));
        }
        if !self.criteria.contains(old_id) {
            return Err(Error::UnknownCriterion(old_id.to_string()));
        }
        if old_id == new_id {
            return Ok(());
        }
        if self.criteria.contains(new_id) {
            return Err(Error::DuplicateCriterion(new_id.to_string()));
        }

        if let Some(criterion) = self.criteria.get_mut(old_id) {
            criterion.id = new_id.to_string();
        }
        for location in self.locations.iter_mut() {
            let value = location.scores.remove(old_id).unwrap_or(0.0);
            location.scores.insert(new_id.to_string(), value);
        }
        debug!(from = old_id, to = new_id, "renamed criterion");
        Ok(())
    }

    /// Remove a criterion and delete its key from every location.
    pub fn remove_criterion(&mut self, id: &str) -> Result<Criterion> {
        let removed = self
            .criteria
            .remove(id)
            .ok_or_else(|| Error::UnknownCriterion(id.to_string()))?;
        for location in self.locations.iter_mut() {
            location.scores.remove(id);
        }
        Ok(removed)
    }

    /// Rescale weights so they sum to 1, rounded to three decimals.
    ///
    /// Weights never drop below 0.001 so they stay inside (0, 1].
    pub fn normalize_weights(&mut self) {
        let total = self.criteria.total_weight();
        if total <= 0.0 {
            return;
        }
        for criterion in self.criteria.iter_mut() {
            let scaled = ((criterion.weight / total) * 1000.0).round() / 1000.0;
            criterion.weight = scaled.max(0.001);
        }
    }

    /// Register a location and return its new id.
    ///
    /// Scores for criteria not given are filled with 0.
    pub fn add_location(&mut self, new: NewLocation) -> Result<LocationId> {
        self.check_scores(&new.scores)?;

        let id = self.locations.next_id();
        let mut location = Location::new(id, new.name, new.coordinates);
        location.address = new.address;
        for criterion in self.criteria.iter() {
            let value = new.scores.get(&criterion.id).copied().unwrap_or(0.0);
            location.scores.insert(criterion.id.clone(), value);
        }
        self.locations.push(location);
        debug!(location = id, "added location");
        Ok(id)
    }

    pub fn update_location(&mut self, id: LocationId, update: LocationUpdate) -> Result<()> {
        let location = self.locations.get_mut(id).ok_or(Error::UnknownLocation(id))?;
        if let Some(name) = update.name {
            location.name = name;
        }
        if let Some(address) = update.address {
            location.address = Some(address);
        }
        if let Some(coordinates) = update.coordinates {
            location.coordinates = coordinates;
        }
        Ok(())
    }

    pub fn set_score(&mut self, id: LocationId, criterion_id: &str, value: f64) -> Result<()> {
        if !self.criteria.contains(criterion_id) {
            return Err(Error::UnknownCriterion(criterion_id.to_string()));
        }
        validate_score(value).map_err(|e| Error::invalid(format!("{}: {}", criterion_id, e)))?;
        let location = self.locations.get_mut(id).ok_or(Error::UnknownLocation(id))?;
        location.scores.insert(criterion_id.to_string(), value);
        Ok(())
    }

    pub fn remove_location(&mut self, id: LocationId) -> Result<Location> {
        self.locations.remove(id).ok_or(Error::UnknownLocation(id))
    }

    fn check_scores(&self, scores: &BTreeMap<String, f64>) -> Result<()> {
        let mut errors = Vec::new();
        for (criterion_id, value) in scores {
            if !self.criteria.contains(criterion_id) {
                return Err(Error::UnknownCriterion(criterion_id.clone()));
            }
            if let Err(e) = validate_score(*value) {
                errors.push(format!("{}: {}", criterion_id, e));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidInput(errors))
        }
    }
}
