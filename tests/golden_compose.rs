use nested_dsl::compose::{assemble_query, FilterClauses};
use nested_dsl::{
    AggregationComposer, ComposeConfig, DefaultPolicy, Field, FieldProvider, FilterComposer,
    Fragment, IndexSchema, NumberRange, StatKind,
};
use serde_json::{json, Value};

fn schema() -> IndexSchema {
    IndexSchema::new("sales")
        .with_field(Field::keyword("region"))
        .with_field(Field::keyword("channel"))
        .with_field(Field::long("amount"))
        .with_field(Field::keyword("sku").nested_in("orders"))
        .with_field(Field::keyword("warehouse").nested_in("orders"))
        .with_field(Field::keyword("code").nested_in("orders.lines"))
        .with_field(Field::keyword("buyer").with_stat(StatKind::Distinct))
        .with_field(Field::double("total").nested_in("orders").with_stat(StatKind::Sum))
}

fn values(fragments: &[Fragment]) -> Vec<Value> {
    fragments.iter().cloned().map(Value::Object).collect()
}

fn ranges(schema: &IndexSchema, ranges: &[NumberRange]) -> FilterClauses {
    let mut clauses = FilterClauses::new();
    FilterComposer::new(schema).number_range(&mut clauses, "amount", ranges);
    clauses
}

#[test]
fn golden_range_filters() {
    let schema = schema();

    assert!(ranges(&schema, &[]).is_empty());
    assert_eq!(
        values(&ranges(&schema, &[NumberRange::new(5, 0)]).filter),
        vec![json!({ "range": { "amount": { "gte": 5 } } })]
    );
    assert_eq!(
        values(&ranges(&schema, &[NumberRange::new(0, 10)]).filter),
        vec![json!({ "range": { "amount": { "lte": 10 } } })]
    );
    assert_eq!(
        values(&ranges(&schema, &[NumberRange::new(5, 10)]).filter),
        vec![json!({ "range": { "amount": { "gte": 5, "lte": 10 } } })]
    );
    assert_eq!(
        values(&ranges(&schema, &[NumberRange::new(1, 5), NumberRange::new(10, 20)]).filter),
        vec![json!({
            "bool": {
                "should": [
                    { "range": { "amount": { "gte": 1, "lte": 5 } } },
                    { "range": { "amount": { "gte": 10, "lte": 20 } } }
                ],
                "minimum_should_match": 1
            }
        })]
    );
}

#[test]
fn golden_terms_and_null() {
    let schema = schema();
    let composer = FilterComposer::new(&schema);
    let ab = [json!("A"), json!("B")];

    let mut clauses = FilterClauses::new();
    composer.terms(&mut clauses, "region", &ab, false);
    assert!(clauses.parent.is_empty());
    assert_eq!(
        values(&clauses.filter),
        vec![json!({ "terms": { "region": ["A", "B"] } })]
    );

    let mut clauses = FilterClauses::new();
    composer.terms(&mut clauses, "region", &[], true);
    assert!(clauses.filter.is_empty());
    assert_eq!(
        values(&clauses.parent),
        vec![json!({ "bool": { "must_not": [{ "exists": { "field": "region" } }] } })]
    );

    let mut clauses = FilterClauses::new();
    composer.terms(&mut clauses, "region", &ab, true);
    assert!(clauses.filter.is_empty());
    assert_eq!(
        values(&clauses.parent),
        vec![json!({
            "bool": {
                "should": [
                    { "bool": { "must_not": [{ "exists": { "field": "region" } }] } },
                    { "terms": { "region": ["A", "B"] } }
                ],
                "minimum_should_match": 1
            }
        })]
    );
}

#[test]
fn golden_nested_aggregation() {
    let schema = schema();
    let config = ComposeConfig::default();
    let policy = DefaultPolicy::new(&schema, &config);
    let group = [schema.require("region").unwrap(), schema.require("sku").unwrap()];
    let stats = [schema.require("total").unwrap()];

    let composed = AggregationComposer::new(&policy).compose(&group, &stats);

    assert_eq!(composed.primary_field.as_deref(), Some("region"));
    assert_eq!(
        Value::Object(composed.aggs.unwrap()),
        json!({
            "region": {
                "terms": { "field": "region", "size": 10 },
                "aggs": {
                    "orders": {
                        "nested": { "path": "orders" },
                        "aggs": {
                            "sku": {
                                "terms": { "field": "orders.sku", "size": 10 },
                                "aggs": {
                                    "item": {
                                        "reverse_nested": {},
                                        "aggs": {
                                            "orders": {
                                                "nested": { "path": "orders" },
                                                "aggs": {
                                                    "total": { "sum": { "field": "orders.total" } }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        })
    );
}

#[test]
fn golden_chained_scope_returns_to_root() {
    let schema = schema();
    let config = ComposeConfig::default();
    let policy = DefaultPolicy::new(&schema, &config);
    let group = [schema.require("sku").unwrap(), schema.require("code").unwrap()];
    let stats = [schema.require("buyer").unwrap()];

    let composed = AggregationComposer::new(&policy).compose(&group, &stats);

    assert_eq!(composed.primary_field.as_deref(), Some("sku"));
    assert_eq!(
        Value::Object(composed.aggs.unwrap()),
        json!({
            "orders": {
                "nested": { "path": "orders" },
                "aggs": {
                    "sku": {
                        "terms": { "field": "orders.sku", "size": 10 },
                        "aggs": {
                            "item": {
                                "reverse_nested": {},
                                "aggs": {
                                    "orders.lines": {
                                        "nested": { "path": "orders.lines" },
                                        "aggs": {
                                            "code": {
                                                "terms": { "field": "orders.lines.code", "size": 10 },
                                                "aggs": {
                                                    "item": {
                                                        "reverse_nested": {},
                                                        "aggs": {
                                                            "buyer": { "cardinality": { "field": "buyer" } }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        })
    );
}

#[test]
fn golden_empty_composition_is_absent() {
    let schema = schema();
    let config = ComposeConfig::default();
    let policy = DefaultPolicy::new(&schema, &config);

    let composed = AggregationComposer::new(&policy).compose(&[], &[]);
    assert!(composed.is_none());
    assert!(composed.aggs.is_none());
    assert!(composed.primary_field.is_none());

    // Groups alone have nothing to summarize
    let group = [schema.require("region").unwrap()];
    assert!(AggregationComposer::new(&policy).compose(&group, &[]).is_none());

    // Statistics the policy cannot summarize leave nothing to aggregate
    let unsummarized = [schema.require("region").unwrap()];
    assert!(AggregationComposer::new(&policy).compose(&[], &unsummarized).is_none());
}

#[test]
fn golden_same_scope_swap_keeps_wrapping() {
    let schema = schema();
    let config = ComposeConfig::default();
    let policy = DefaultPolicy::new(&schema, &config);
    let composer = AggregationComposer::new(&policy);
    let stats = [schema.require("total").unwrap()];
    let region = schema.require("region").unwrap();
    let sku = schema.require("sku").unwrap();
    let warehouse = schema.require("warehouse").unwrap();

    let a = Value::Object(composer.compose(&[region, sku, warehouse], &stats).aggs.unwrap());
    let b = Value::Object(composer.compose(&[region, warehouse, sku], &stats).aggs.unwrap());

    let scope_a = &a["region"]["aggs"]["orders"];
    let scope_b = &b["region"]["aggs"]["orders"];
    assert_eq!(scope_a["nested"], json!({ "path": "orders" }));
    assert_eq!(scope_b["nested"], json!({ "path": "orders" }));

    // Only the stacking inside the scope differs
    let inner_a = &scope_a["aggs"]["sku"]["aggs"]["warehouse"]["aggs"]["item"];
    let inner_b = &scope_b["aggs"]["warehouse"]["aggs"]["sku"]["aggs"]["item"];
    assert_eq!(inner_a, inner_b);
    assert_eq!(inner_a["reverse_nested"], json!({}));
}

#[test]
fn golden_empty_query_is_absent() {
    assert!(assemble_query(FilterClauses::new(), FilterClauses::new()).is_none());

    let schema = schema();
    let composer = FilterComposer::new(&schema);
    let mut must_not = FilterClauses::new();
    composer.exists(&mut must_not, &["sku".to_string()]);

    assert_eq!(
        Value::Object(assemble_query(FilterClauses::new(), must_not).unwrap()),
        json!({
            "bool": {
                "must_not": [{
                    "nested": { "path": "orders", "query": { "exists": { "field": "orders.sku" } } }
                }]
            }
        })
    );
}
