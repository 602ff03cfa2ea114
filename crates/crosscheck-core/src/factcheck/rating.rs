//! Normalizes free-text fact-check ratings ("Mostly True", "Pants on Fire")
//! into a score between 0 and 100.

/// Score used when no bucket matches a rating.
pub const FALLBACK_SCORE: u8 = 50;

/// A set of keyword synonyms sharing one canonical score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingBucket {
    /// Lower-case substrings that select this bucket.
    pub keywords: &'static [&'static str],
    /// Canonical score for the bucket.
    pub score: u8,
}

/// Rating buckets in match order. First match wins.
///
/// Narrow phrases come before the broad ones they contain: "mostly true"
/// must resolve before "true", and "incorrect" before "correct".
pub const RATING_BUCKETS: &[RatingBucket] = &[
    RatingBucket {
        keywords: &["mostly true", "mostly correct", "mostly accurate"],
        score: 85,
    },
    RatingBucket {
        keywords: &["half true", "half-true", "partly true"],
        score: 60,
    },
    RatingBucket {
        keywords: &["mixed", "partly false", "partly incorrect"],
        score: 50,
    },
    RatingBucket {
        keywords: &["misleading", "unsupported", "unproven"],
        score: 35,
    },
    RatingBucket {
        keywords: &["mostly false", "mostly incorrect"],
        score: 20,
    },
    RatingBucket {
        keywords: &["false", "incorrect", "inaccurate", "pants on fire"],
        score: 5,
    },
    // Plain substring match, so negations like "untrue" or "not true" land
    // here and score 100.
    RatingBucket {
        keywords: &["true", "correct", "accurate"],
        score: 100,
    },
];

/// Maps a textual rating to a score in `[0, 100]`.
///
/// Matching is case-insensitive substring search over [`RATING_BUCKETS`] in
/// declaration order; unknown ratings score [`FALLBACK_SCORE`].
pub fn map_rating_to_score(rating: &str) -> u8 {
    let normalized = rating.to_lowercase();

    RATING_BUCKETS
        .iter()
        .find(|bucket| bucket.keywords.iter().any(|kw| normalized.contains(kw)))
        .map(|bucket| bucket.score)
        .unwrap_or(FALLBACK_SCORE)
}
