use std::fmt;

use serde::Serialize;

use super::claim::Claim;
use super::rating::map_rating_to_score;
use crate::presentation::html_escape;

/// Maximum number of claims shown (and rated) per query.
pub const MAX_DISPLAYED_CLAIMS: usize = 3;

/// Number of claims that counts as full coverage.
pub const MAX_CLAIM_COUNT: usize = 10;

/// Rating used when a claim has no review.
pub const UNRATED: &str = "Unrated";

/// Publisher used when a review names none.
pub const UNKNOWN_SOURCE: &str = "Unknown source";

/// Message shown when the provider found nothing.
pub const NO_CLAIMS_MESSAGE: &str = "No claims found.";

/// Averaged truth score, or `Unknown` when nothing was rated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TruthScore {
    Percent(u8),
    Unknown,
}

impl fmt::Display for TruthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruthScore::Percent(score) => write!(f, "{}%", score),
            TruthScore::Unknown => f.write_str("--"),
        }
    }
}

/// One displayed claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimSummaryItem {
    pub text: String,
    pub rating: String,
    pub publisher: String,
}

impl fmt::Display for ClaimSummaryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "• {} - {} ({})", self.text, self.rating, self.publisher)
    }
}

/// Presentation-ready digest of the fact-check results for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactCheckSummary {
    pub truth_score: TruthScore,
    /// Coverage as a whole percentage (0-100).
    pub coverage_score: u8,
    /// Up to [`MAX_DISPLAYED_CLAIMS`] claims in provider order.
    pub items: Vec<ClaimSummaryItem>,
    /// Set when there is nothing to list.
    pub message: Option<String>,
}

impl FactCheckSummary {
    /// Summary for a query with no matching claims.
    pub fn empty() -> Self {
        Self {
            truth_score: TruthScore::Unknown,
            coverage_score: 0,
            items: Vec::new(),
            message: Some(NO_CLAIMS_MESSAGE.to_string()),
        }
    }

    /// Coverage rendered as a percentage string, e.g. `"50%"`.
    pub fn coverage_display(&self) -> String {
        format!("{}%", self.coverage_score)
    }

    /// Claim list as HTML fragments, one `<div>` per claim.
    pub fn claims_html(&self) -> String {
        if self.items.is_empty() {
            let message = self.message.as_deref().unwrap_or(NO_CLAIMS_MESSAGE);
            return format!("<span class=\"status\">{}</span>", html_escape(message));
        }

        self.items
            .iter()
            .map(|item| {
                format!(
                    "<div>• {} - <strong>{}</strong> ({})</div>",
                    html_escape(&item.text),
                    html_escape(&item.rating),
                    html_escape(&item.publisher)
                )
            })
            .collect()
    }
}

/// Builds the fact-check summary for a list of claims.
///
/// Only the first [`MAX_DISPLAYED_CLAIMS`] claims are displayed, and the truth
/// score averages those displayed claims alone. Coverage counts every claim,
/// capped at [`MAX_CLAIM_COUNT`].
pub fn build_summary(claims: &[Claim]) -> FactCheckSummary {
    if claims.is_empty() {
        return FactCheckSummary::empty();
    }

    let items: Vec<ClaimSummaryItem> = claims
        .iter()
        .take(MAX_DISPLAYED_CLAIMS)
        .map(summarize_claim)
        .collect();

    let ratings: Vec<&str> = items.iter().map(|item| item.rating.as_str()).collect();

    FactCheckSummary {
        truth_score: compute_truth_score(&ratings),
        coverage_score: compute_coverage(claims.len()),
        items,
        message: None,
    }
}

fn summarize_claim(claim: &Claim) -> ClaimSummaryItem {
    let review = claim.review.as_ref();
    let rating = review
        .map(|r| r.rating.trim())
        .filter(|r| !r.is_empty())
        .unwrap_or(UNRATED);
    let publisher = review
        .map(|r| r.publisher_name.trim())
        .filter(|p| !p.is_empty())
        .unwrap_or(UNKNOWN_SOURCE);

    ClaimSummaryItem {
        text: claim.text.clone(),
        rating: rating.to_string(),
        publisher: publisher.to_string(),
    }
}

/// Rounded mean of the normalized ratings.
fn compute_truth_score(ratings: &[&str]) -> TruthScore {
    if ratings.is_empty() {
        return TruthScore::Unknown;
    }

    let total: u32 = ratings.iter().map(|r| u32::from(map_rating_to_score(r))).sum();
    let mean = f64::from(total) / ratings.len() as f64;
    TruthScore::Percent(mean.round() as u8)
}

fn compute_coverage(claim_count: usize) -> u8 {
    let capped = claim_count.min(MAX_CLAIM_COUNT);
    (capped as f64 / MAX_CLAIM_COUNT as f64 * 100.0).round() as u8
}
