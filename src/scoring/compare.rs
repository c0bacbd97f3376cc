use serde::Serialize;

use super::saw::RankResult;
use crate::model::{LocationId, LocationSet};

/// Maximum rank distance at which two methods still agree.
pub const CONSISTENCY_DISTANCE: usize = 1;

/// Side-by-side SAW and WP placement for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyRow {
    pub location_id: LocationId,
    pub name: String,
    /// 0 when the location is missing from the SAW list
    pub saw_rank: usize,
    pub saw_score: f64,
    /// 0 when the location is missing from the WP list
    pub wp_rank: usize,
    pub wp_score: f64,
    pub consistent: bool,
}

/// Position (1-based) and score of a location in a ranked list, joined by id.
fn placement(results: &[RankResult], id: LocationId) -> (usize, f64) {
    results
        .iter()
        .enumerate()
        .find(|(_, r)| r.location_id == id)
        .map_or((0, 0.0), |(index, r)| (index + 1, r.score))
}

/// Whether two ranks agree. An absent rank (0) only agrees with another absent rank.
pub fn ranks_consistent(saw_rank: usize, wp_rank: usize) -> bool {
    if saw_rank == wp_rank {
        return true;
    }
    saw_rank != 0 && wp_rank != 0 && saw_rank.abs_diff(wp_rank) <= CONSISTENCY_DISTANCE
}

/// Cross-reference both rankings, one row per location in `locations` order.
pub fn compare_rankings(
    locations: &LocationSet,
    saw: &[RankResult],
    wp: &[RankResult],
) -> Vec<ConsistencyRow> {
    if saw.is_empty() && wp.is_empty() {
        return Vec::new();
    }

    locations
        .iter()
        .map(|location| {
            let (saw_rank, saw_score) = placement(saw, location.id);
            let (wp_rank, wp_score) = placement(wp, location.id);
            ConsistencyRow {
                location_id: location.id,
                name: location.name.clone(),
                saw_rank,
                saw_score,
                wp_rank,
                wp_score,
                consistent: ranks_consistent(saw_rank, wp_rank),
            }
        })
        .collect()
}
