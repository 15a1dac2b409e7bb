use serde::{Deserialize, Serialize};

/// Free-text search terms supplied by the end user.
///
/// Both fields default to an empty string when absent from the query string.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SearchQuery {
    pub keyword: String,
    pub location_name: String,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, location_name: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            location_name: location_name.into(),
        }
    }

    /// Query parameters to forward upstream, skipping empty terms entirely.
    pub fn upstream_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::with_capacity(2);
        if !self.keyword.is_empty() {
            params.push(("keyword", self.keyword.as_str()));
        }
        if !self.location_name.is_empty() {
            params.push(("location_name", self.location_name.as_str()));
        }
        params
    }
}

/// One job projected from an upstream search result item.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct JobListing {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(SearchQuery::default().upstream_params().is_empty());
    }

    #[test]
    fn test_only_location_is_forwarded() {
        let query = SearchQuery::new("", "Seattle");
        assert_eq!(query.upstream_params(), vec![("location_name", "Seattle")]);
    }

    #[test]
    fn test_both_terms_are_forwarded() {
        let query = SearchQuery::new("nurse", "Seattle");
        assert_eq!(
            query.upstream_params(),
            vec![("keyword", "nurse"), ("location_name", "Seattle")]
        );
    }
}
