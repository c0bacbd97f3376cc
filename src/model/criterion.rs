use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a higher raw value is better (benefit) or worse (cost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Benefit,
    Cost,
}

impl Polarity {
    /// Exponent sign used by the weighted product method.
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Benefit => 1.0,
            Polarity::Cost => -1.0,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Benefit => write!(f, "benefit"),
            Polarity::Cost => write!(f, "cost"),
        }
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefit" => Ok(Polarity::Benefit),
            "cost" => Ok(Polarity::Cost),
            other => Err(format!("unknown polarity '{}' (expected benefit or cost)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Criterion {
    /// Stable key used in every location's score mapping
    pub id: String,
    /// Display name
    pub name: String,
    /// Relative importance, expected in (0, 1]
    pub weight: f64,
    #[serde(rename = "type", alias = "polarity")]
    pub polarity: Polarity,
}

impl Criterion {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64, polarity: Polarity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight,
            polarity,
        }
    }

    /// Weight with the polarity sign applied (negative for cost criteria)
    pub fn signed_weight(&self) -> f64 {
        self.polarity.sign() * self.weight
    }
}

/// Ordered collection of criteria. Order is the display order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CriterionSet {
    criteria: Vec<Criterion>,
}

impl CriterionSet {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sum of all weights. Not renormalized; callers decide what a deviation from 1.0 means.
    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Criterion> {
        self.criteria.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Criterion> {
        let index = self.criteria.iter().position(|c| c.id == id)?;
        Some(self.criteria.remove(index))
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Criterion> {
        self.criteria.iter_mut()
    }
}

impl<'a> IntoIterator for &'a CriterionSet {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.criteria.iter()
    }
}
