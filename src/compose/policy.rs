//! Per-index aggregation policy
//!
//! The aggregation composer decides *where* fragments go; a policy decides
//! *what* each field contributes. Swapping the policy changes how fields are
//! bucketed or summarized without touching the nesting algorithm.

use crate::config::ComposeConfig;
use crate::dsl::aggs::{
    cardinality_agg, date_histogram_agg, histogram_agg, sum_agg, terms_agg, value_count_agg,
    DateHistogramOptions, TermsOptions,
};
use crate::dsl::Fragment;
use crate::schema::{Field, FieldProvider, StatKind};
use serde_json::Value;

/// Capability object consulted for every statistic and group field
pub trait AggregationPolicy {
    /// Metric aggregation summarizing `field`, or `None` to skip it
    fn statistic(&self, field: &Field) -> Option<Fragment>;

    /// Bucket aggregation grouping by `field`, with `child` as its sub-aggregations
    fn group(&self, field: &Field, child: Fragment) -> Fragment;

    /// Nested scope of a field, `None` when it lives in the root document
    fn nested_scope<'f>(&self, field: &'f Field) -> Option<&'f str> {
        field.nested_scope()
    }

    fn data_interval(&self, field: &Field) -> Option<f64> {
        field.numeric_interval()
    }

    fn date_interval(&self, field: &Field) -> Option<String> {
        field.date_interval().map(str::to_string)
    }

    fn missing(&self, field: &Field) -> Option<Value> {
        field.missing.clone()
    }

    fn min_doc_count(&self, field: &Field) -> u64 {
        field.min_doc_count.unwrap_or(0)
    }
}

/// Policy driven entirely by field metadata
///
/// - statistics follow the field's [`StatKind`]; fields without one are skipped
/// - date fields with an interval group by date histogram
/// - numeric fields with a numeric interval group by histogram
/// - everything else groups by terms
pub struct DefaultPolicy<'a, P: FieldProvider + ?Sized> {
    provider: &'a P,
    config: &'a ComposeConfig,
}

impl<'a, P: FieldProvider + ?Sized> DefaultPolicy<'a, P> {
    pub fn new(provider: &'a P, config: &'a ComposeConfig) -> Self {
        Self { provider, config }
    }

    fn path(&self, field: &Field) -> String {
        self.provider.query_field(&field.name)
    }

    fn term_size(&self, field: &Field) -> usize {
        self.provider
            .term_size(&field.name)
            .unwrap_or(self.config.default_term_size)
    }
}

impl<P: FieldProvider + ?Sized> AggregationPolicy for DefaultPolicy<'_, P> {
    fn statistic(&self, field: &Field) -> Option<Fragment> {
        let path = self.path(field);
        let agg = match field.stat? {
            StatKind::Sum => sum_agg(&path, self.missing(field)),
            StatKind::Distinct => cardinality_agg(&path, self.missing(field)),
            StatKind::Count => value_count_agg(&path),
        };
        Some(agg)
    }

    fn group(&self, field: &Field, child: Fragment) -> Fragment {
        let path = self.path(field);
        if field.kind.is_date() {
            if let Some(interval) = self.date_interval(field) {
                let options = DateHistogramOptions {
                    interval,
                    fixed: self.config.fixed_date_interval,
                    offset: self.config.date_offset.clone(),
                    missing: self.missing(field),
                };
                return date_histogram_agg(&path, options, child);
            }
        }
        if field.kind.is_numeric() {
            if let Some(interval) = self.data_interval(field) {
                return histogram_agg(&path, interval, child);
            }
        }
        let options = TermsOptions {
            size: Some(self.term_size(field)),
            missing: self.missing(field),
            min_doc_count: Some(self.min_doc_count(field)),
        };
        terms_agg(&path, options, child)
    }
}
