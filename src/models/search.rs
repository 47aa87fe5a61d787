use serde::{Deserialize, Serialize};

use super::filter::FieldFilter;
use super::range::NumberRange;
use crate::config::ComposeConfig;

/// Declarative search request against one index
///
/// # Example
///
/// ```json
/// {
///   "filter": [{ "type": "terms", "field": "region", "values": ["eu"] }],
///   "group": ["region", "sku"],
///   "stats": ["amount"],
///   "excludes": ["raw_payload"],
///   "page": { "offset": 0, "limit": 20 }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Clauses that must all match
    pub filter: Vec<FieldFilter>,
    /// Clauses that must not match
    pub must_not: Vec<FieldFilter>,
    /// Group-by fields, outermost first
    pub group: Vec<String>,
    /// Statistic fields
    pub stats: Vec<String>,
    /// Source fields to return (empty returns all)
    pub includes: Vec<String>,
    /// Source fields never returned
    pub excludes: Vec<String>,
    pub page: Page,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: FieldFilter) -> Self {
        self.filter.push(filter);
        self
    }

    pub fn must_not(mut self, filter: FieldFilter) -> Self {
        self.must_not.push(filter);
        self
    }

    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.group.push(field.into());
        self
    }

    pub fn stat(mut self, field: impl Into<String>) -> Self {
        self.stats.push(field.into());
        self
    }

    pub fn include(mut self, field: impl Into<String>) -> Self {
        self.includes.push(field.into());
        self
    }

    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.excludes.push(field.into());
        self
    }

    pub fn with_page(mut self, offset: i64, limit: i64) -> Self {
        self.page = Page { offset, limit };
        self
    }

    /// Every range filter in the request, for validation
    pub fn ranges(&self) -> impl Iterator<Item = (&str, &[NumberRange])> {
        self.filter
            .iter()
            .chain(self.must_not.iter())
            .filter_map(|f| match f {
                FieldFilter::Range { field, ranges } => Some((field.as_str(), ranges.as_slice())),
                _ => None,
            })
    }

    pub fn has_aggregations(&self) -> bool {
        !self.stats.is_empty()
    }
}

/// Requested result window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    /// Clamp to the configured page bounds
    ///
    /// A non-positive limit becomes the default page size; a limit above the
    /// maximum is capped. Negative offsets start from zero.
    pub fn normalized(&self, config: &ComposeConfig) -> Page {
        let limit = if self.limit <= 0 {
            config.default_page_size as i64
        } else {
            self.limit.min(config.max_page_size as i64)
        };
        Page {
            offset: self.offset.max(0),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_normalization() {
        let config = ComposeConfig::default();
        assert_eq!(
            Page { offset: 0, limit: 0 }.normalized(&config),
            Page { offset: 0, limit: 10 }
        );
        assert_eq!(
            Page { offset: 5, limit: -3 }.normalized(&config),
            Page { offset: 5, limit: 10 }
        );
        assert_eq!(
            Page { offset: 20, limit: 500 }.normalized(&config),
            Page { offset: 20, limit: 100 }
        );
        assert_eq!(
            Page { offset: -1, limit: 30 }.normalized(&config),
            Page { offset: 0, limit: 30 }
        );
    }

    #[test]
    fn test_request_builder() {
        let request = SearchRequest::new()
            .filter(FieldFilter::range("amount", vec![NumberRange::at_least(5)]))
            .must_not(FieldFilter::range("qty", vec![NumberRange::new(0, 0)]))
            .filter(FieldFilter::term("status", "paid"))
            .group_by("region")
            .stat("amount")
            .exclude("raw")
            .with_page(10, 20);

        let ranges: Vec<&str> = request.ranges().map(|(f, _)| f).collect();
        assert_eq!(ranges, vec!["amount", "qty"]);
        assert!(request.has_aggregations());
        assert_eq!(request.page, Page { offset: 10, limit: 20 });
    }

    #[test]
    fn test_request_from_json() {
        let request: SearchRequest = serde_json::from_value(json!({
            "group": ["region"],
            "stats": ["amount"],
            "page": { "limit": 5 }
        }))
        .unwrap();

        assert!(request.filter.is_empty());
        assert_eq!(request.group, vec!["region"]);
        assert_eq!(request.page, Page { offset: 0, limit: 5 });
    }
}
