use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type LocationId = u64;

/// Geographic position. Carried for the caller; the engine never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    /// Raw score per criterion id
    #[serde(rename = "criteria", alias = "scores", default)]
    pub scores: BTreeMap<String, f64>,
}

impl Location {
    pub fn new(id: LocationId, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
            coordinates,
            scores: BTreeMap::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_score(mut self, criterion_id: impl Into<String>, value: f64) -> Self {
        self.scores.insert(criterion_id.into(), value);
        self
    }

    /// Raw score for a criterion; a missing entry reads as 0.
    pub fn score(&self, criterion_id: &str) -> f64 {
        self.scores.get(criterion_id).copied().unwrap_or(0.0)
    }
}

/// Ordered collection of candidate locations. Input order is the tie-break order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocationSet {
    locations: Vec<Location>,
}

impl LocationSet {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Next free id: one past the current maximum.
    pub fn next_id(&self) -> LocationId {
        self.locations.iter().map(|l| l.id).max().map_or(1, |max| max + 1)
    }

    pub(crate) fn get_mut(&mut self, id: LocationId) -> Option<&mut Location> {
        self.locations.iter_mut().find(|l| l.id == id)
    }

    pub(crate) fn push(&mut self, location: Location) {
        self.locations.push(location);
    }

    pub(crate) fn remove(&mut self, id: LocationId) -> Option<Location> {
        let index = self.locations.iter().position(|l| l.id == id)?;
        Some(self.locations.remove(index))
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Location> {
        self.locations.iter_mut()
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_score_reads_as_zero() {
        let loc = Location::new(1, "A", Coordinates::default()).with_score("x", 5.0);
        assert_eq!(loc.score("x"), 5.0);
        assert_eq!(loc.score("y"), 0.0);
    }

    #[test]
    fn test_next_id() {
        let mut set = LocationSet::default();
        assert_eq!(set.next_id(), 1);
        set.push(Location::new(7, "A", Coordinates::default()));
        set.push(Location::new(3, "B", Coordinates::default()));
        assert_eq!(set.next_id(), 8);
    }

    #[test]
    fn test_location_json_shape() {
        let json = r#"{
            "id": 1,
            "name": "Jakarta Pusat",
            "address": "Jl. MH Thamrin No. 1",
            "latitude": -6.1944,
            "longitude": 106.8229,
            "criteria": { "rentCost": 40 }
        }"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.coordinates.lat, -6.1944);
        assert_eq!(loc.score("rentCost"), 40.0);
        assert_eq!(loc.address.as_deref(), Some("Jl. MH Thamrin No. 1"));
    }
}
