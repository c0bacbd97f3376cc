//! Multi-criteria ranking of candidate locations.
//!
//! Locations are scored against weighted benefit/cost criteria with Simple
//! Additive Weighting (SAW) and Weighted Product (WP); the two rankings are then
//! cross-checked and summarized into a recommendation.
//!
//! ```
//! use site_rank::model::Dataset;
//! use site_rank::scoring::rank;
//!
//! let dataset = Dataset::sample();
//! let report = rank(dataset.criteria(), dataset.locations()).unwrap();
//! assert_eq!(report.saw[0].location_name, "Jakarta Pusat");
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod scoring;
pub mod storage;

pub use error::{Error, Result};
