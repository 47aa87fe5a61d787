use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Composition settings shared by every request against an index
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Key under which back-to-root (reverse nested) aggregations are inserted
    pub root_scope_name: String,
    /// `minimum_should_match` used for every OR-of-alternatives clause
    pub min_should_match: String,
    /// Offset applied to date histogram buckets
    pub date_offset: Option<String>,
    /// Use `fixed_interval` instead of `calendar_interval` for date histograms
    pub fixed_date_interval: bool,
    /// Terms aggregation size for fields without their own hint
    pub default_term_size: usize,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            root_scope_name: "item".to_string(),
            min_should_match: "1".to_string(),
            date_offset: Some("-8h".to_string()),
            fixed_date_interval: false,
            default_term_size: 10,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl ComposeConfig {
    /// Load a configuration from a JSON file, filling missing keys with defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn with_root_scope_name(mut self, name: impl Into<String>) -> Self {
        self.root_scope_name = name.into();
        self
    }

    pub fn with_date_offset(mut self, offset: Option<String>) -> Self {
        self.date_offset = offset;
        self
    }

    pub fn with_fixed_date_interval(mut self, fixed: bool) -> Self {
        self.fixed_date_interval = fixed;
        self
    }

    pub fn with_default_term_size(mut self, size: usize) -> Self {
        self.default_term_size = size;
        self
    }

    /// Set the default and maximum page sizes
    pub fn with_page_bounds(mut self, default_size: usize, max_size: usize) -> Self {
        self.default_page_size = default_size;
        self.max_page_size = max_size;
        self
    }
}
