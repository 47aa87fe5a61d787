use crate::compose::{
    assemble_query, AggregationComposer, AggregationPolicy, DefaultPolicy, FilterComposer,
};
use crate::config::ComposeConfig;
use crate::dsl::{Fragment, MinimumShouldMatch};
use crate::error::ComposeError;
use crate::models::{validate_ranges, FieldFilter, Page, SearchRequest};
use crate::schema::{Field, FieldProvider, IndexSchema};
use crate::Result;
use serde_json::{json, Map, Value};
use tracing::debug;

/// One composed request, ready for execution
#[derive(Clone, Debug, PartialEq)]
pub struct IndexQuery {
    pub index: String,
    /// `None` when the request carries no filters
    pub query: Option<Fragment>,
    /// `None` when the request carries no statistics
    pub aggs: Option<Fragment>,
    /// Group field driving sort and pagination of aggregated results
    pub primary_field: Option<String>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub page: Page,
}

impl IndexQuery {
    /// Build with the metadata-driven [`DefaultPolicy`]
    pub fn build(
        schema: &IndexSchema,
        config: &ComposeConfig,
        request: &SearchRequest,
    ) -> Result<Self> {
        let policy = DefaultPolicy::new(schema, config);
        Self::build_with_policy(&schema.name, schema, &policy, config, request)
    }

    /// Build against any field provider and aggregation policy
    ///
    /// Fails on invalid ranges, unknown fields, and statistic fields the policy
    /// cannot summarize. Composition itself never fails.
    pub fn build_with_policy<P, A>(
        index: &str,
        provider: &P,
        policy: &A,
        config: &ComposeConfig,
        request: &SearchRequest,
    ) -> Result<Self>
    where
        P: FieldProvider + ?Sized,
        A: AggregationPolicy + ?Sized,
    {
        validate_ranges(request.ranges())?;
        for filter in request.filter.iter().chain(request.must_not.iter()) {
            check_filter_fields(provider, filter)?;
        }

        let group = resolve(provider, &request.group)?;
        let stats = resolve(provider, &request.stats)?;
        if let Some(field) = stats.iter().find(|f| policy.statistic(f).is_none()) {
            return Err(ComposeError::UnsupportedField {
                field: field.name.clone(),
                reason: "no statistic defined for this field".to_string(),
            });
        }

        let filters = FilterComposer::new(provider)
            .with_min_should_match(MinimumShouldMatch::parse(&config.min_should_match));
        let query = assemble_query(
            filters.compose(&request.filter),
            filters.compose(&request.must_not),
        );

        let composed = AggregationComposer::new(policy)
            .with_root_scope_name(config.root_scope_name.clone())
            .compose(&group, &stats);

        debug!(
            index,
            has_query = query.is_some(),
            has_aggs = composed.aggs.is_some(),
            "built index query"
        );

        Ok(Self {
            index: index.to_string(),
            query,
            aggs: composed.aggs,
            primary_field: composed.primary_field,
            includes: request.includes.clone(),
            excludes: request.excludes.clone(),
            page: request.page.normalized(config),
        })
    }

    /// Render the search body
    ///
    /// Aggregating requests ask for no hits (`size: 0`).
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".to_string(), Value::Object(query.clone()));
        }
        if let Some(aggs) = &self.aggs {
            body.insert("aggs".to_string(), Value::Object(aggs.clone()));
        }
        if !self.includes.is_empty() || !self.excludes.is_empty() {
            let mut source = Map::new();
            if !self.includes.is_empty() {
                source.insert("includes".to_string(), json!(self.includes));
            }
            if !self.excludes.is_empty() {
                source.insert("excludes".to_string(), json!(self.excludes));
            }
            body.insert("_source".to_string(), Value::Object(source));
        }
        let size = if self.aggs.is_some() { 0 } else { self.page.limit };
        body.insert("from".to_string(), json!(self.page.offset));
        body.insert("size".to_string(), json!(size));
        Value::Object(body)
    }
}

fn resolve<'p, P: FieldProvider + ?Sized>(provider: &'p P, names: &[String]) -> Result<Vec<&'p Field>> {
    names.iter().map(|name| provider.require(name)).collect()
}

fn check_filter_fields<P: FieldProvider + ?Sized>(provider: &P, filter: &FieldFilter) -> Result<()> {
    for field in filter.fields() {
        provider.require(field)?;
    }
    Ok(())
}
