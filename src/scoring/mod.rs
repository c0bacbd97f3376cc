pub mod compare;
pub mod engine;
pub mod normalize;
pub mod recommend;
pub mod saw;
pub mod wp;

pub use compare::{compare_rankings, ranks_consistent, ConsistencyRow};
pub use engine::{rank, rank_with, RankOptions, RankingReport, DEFAULT_WEIGHT_TOLERANCE};
pub use normalize::{normalize, CriterionBounds, NormalizedMatrix};
pub use recommend::{build_recommendation, Agreement, Recommendation};
pub use saw::{rank_saw, RankResult};
pub use wp::{rank_wp, weighted_product};
