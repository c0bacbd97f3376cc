pub mod criterion;
pub mod dataset;
pub mod location;
pub mod validation;

pub use criterion::{Criterion, CriterionSet, Polarity};
pub use dataset::{CriterionUpdate, Dataset, LocationUpdate, NewLocation};
pub use location::{Coordinates, Location, LocationId, LocationSet};
pub use validation::{validate_criterion, validate_dataset, validate_score};
