use serde::Serialize;

use super::normalize::NormalizedMatrix;
use super::saw::RankResult;
use crate::model::{CriterionSet, LocationId};

/// Caveats attached to every recommendation.
const STANDARD_CONSIDERATIONS: [&str; 3] = [
    "Validate with a field survey",
    "Analyze other external factors",
    "Weigh budget and timeline",
];

/// How far the two methods agree on the top pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    /// The SAW winner is also first under WP
    HighConsistency,
    /// The SAW winner sits at a different WP rank
    PartialAgreement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub location_id: LocationId,
    pub location_name: String,
    pub saw_score: f64,
    /// Rank of the same location under WP (0 if absent)
    pub wp_rank: usize,
    pub agreement: Agreement,
    pub strengths: Vec<String>,
    pub considerations: Vec<String>,
}

impl Recommendation {
    pub fn narrative(&self) -> String {
        match self.agreement {
            Agreement::HighConsistency => format!(
                "{} ranks first under both SAW and WP, showing high consistency between the methods.",
                self.location_name
            ),
            Agreement::PartialAgreement if self.wp_rank == 0 => format!(
                "{} ranks first under SAW but does not appear in the WP ranking.",
                self.location_name
            ),
            Agreement::PartialAgreement => format!(
                "{} ranks first under SAW and #{} under WP.",
                self.location_name, self.wp_rank
            ),
        }
    }
}

/// Derive the top pick from both rankings.
///
/// SAW decides the winner; WP only qualifies it. Returns `None` when either
/// ranking is empty.
pub fn build_recommendation(
    saw: &[RankResult],
    wp: &[RankResult],
    criteria: &CriterionSet,
    matrix: &NormalizedMatrix,
    weight_tolerance: f64,
) -> Option<Recommendation> {
    let top = saw.first()?;
    let wp_top = wp.first()?;

    let (agreement, wp_rank) = if wp_top.location_id == top.location_id {
        (Agreement::HighConsistency, 1)
    } else {
        let rank = wp
            .iter()
            .position(|r| r.location_id == top.location_id)
            .map_or(0, |index| index + 1);
        (Agreement::PartialAgreement, rank)
    };

    let mut strengths = vec!["Highest score under SAW".to_string()];
    if agreement == Agreement::HighConsistency {
        strengths.push("Also ranked first under WP".to_string());
    }
    for criterion in criteria {
        if matrix.get(top.location_id, &criterion.id) == 1.0 {
            strengths.push(format!("Best on {}", criterion.name));
        }
    }

    let mut considerations: Vec<String> =
        STANDARD_CONSIDERATIONS.iter().map(|s| s.to_string()).collect();
    let total = criteria.total_weight();
    if (total - 1.0).abs() > weight_tolerance {
        considerations.push(format!(
            "Criterion weights sum to {:.3}, not 1.0; scores are not on a unit scale",
            total
        ));
    }

    Some(Recommendation {
        location_id: top.location_id,
        location_name: top.location_name.clone(),
        saw_score: top.score,
        wp_rank,
        agreement,
        strengths,
        considerations,
    })
}
