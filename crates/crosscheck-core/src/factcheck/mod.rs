//! Fact-check aggregation: rating normalization and the per-query summary.

mod claim;
mod rating;
mod summary;

pub use claim::{Claim, ClaimReview};
pub use rating::{map_rating_to_score, RatingBucket, FALLBACK_SCORE, RATING_BUCKETS};
pub use summary::{
    build_summary, ClaimSummaryItem, FactCheckSummary, TruthScore, MAX_CLAIM_COUNT,
    MAX_DISPLAYED_CLAIMS, NO_CLAIMS_MESSAGE, UNKNOWN_SOURCE, UNRATED,
};
