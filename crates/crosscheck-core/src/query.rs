use std::fmt;
use thiserror::Error;

/// Errors that can occur when building a [`Query`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query is empty")]
    Empty,
}

/// A single user question, trimmed and guaranteed non-empty.
///
/// One `Query` drives exactly one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Creates a query from raw user input.
    pub fn new(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let query = Query::new("  is the earth flat?\n").unwrap();
        assert_eq!(query.as_str(), "is the earth flat?");
    }

    #[test]
    fn test_blank_query_rejected() {
        assert_eq!(Query::new(""), Err(QueryError::Empty));
        assert_eq!(Query::new(" \t\n "), Err(QueryError::Empty));
    }
}
