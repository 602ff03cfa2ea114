use serde::{Deserialize, Serialize};

/// A claim returned by the fact-check provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// The claim as stated.
    pub text: String,
    /// First review of the claim, if the provider returned one.
    pub review: Option<ClaimReview>,
}

/// A publisher's verdict on a claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReview {
    /// Free-text rating, e.g. "Mostly False".
    pub rating: String,
    /// Name of the reviewing publisher.
    pub publisher_name: String,
}

impl Claim {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            review: None,
        }
    }

    /// Attaches a review.
    pub fn with_review(mut self, rating: impl Into<String>, publisher_name: impl Into<String>) -> Self {
        self.review = Some(ClaimReview {
            rating: rating.into(),
            publisher_name: publisher_name.into(),
        });
        self
    }
}
