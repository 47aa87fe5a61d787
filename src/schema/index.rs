//! Index schema
//!
//! An index schema is the read-only field catalogue for one document index.

use super::field::Field;
use crate::error::ComposeError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup over field metadata
pub trait FieldProvider {
    /// Look up a field by identifier
    fn field(&self, name: &str) -> Option<&Field>;

    /// Engine-qualified path used inside query and aggregation fragments
    fn query_field(&self, name: &str) -> String {
        self.field(name)
            .map(Field::query_field)
            .unwrap_or_else(|| name.to_string())
    }

    /// Nested scope of a field, `None` at root or for unknown fields
    fn nested_scope(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Field::nested_scope)
    }

    /// Terms aggregation size hint for a field, `None` when neither field nor index sets one
    fn term_size(&self, name: &str) -> Option<usize>;

    /// Look up a field or fail with [`ComposeError::UnknownField`]
    fn require(&self, name: &str) -> Result<&Field> {
        self.field(name)
            .ok_or_else(|| ComposeError::UnknownField(name.to_string()))
    }
}

/// Field catalogue of one index
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IndexSchema {
    /// Index name
    pub name: String,

    #[serde(default, with = "field_list")]
    pub fields: HashMap<String, Field>,

    /// Terms size for fields without a hint (falls back to the compose config)
    #[serde(default)]
    pub default_term_size: Option<usize>,
}

impl IndexSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Load a schema from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Add a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_default_term_size(mut self, size: usize) -> Self {
        self.default_term_size = Some(size);
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Distinct nested scopes declared by the schema, sorted
    pub fn nested_scopes(&self) -> Vec<&str> {
        let mut scopes: Vec<&str> = self
            .fields
            .values()
            .filter_map(Field::nested_scope)
            .collect();
        scopes.sort_unstable();
        scopes.dedup();
        scopes
    }
}

impl FieldProvider for IndexSchema {
    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    fn term_size(&self, name: &str) -> Option<usize> {
        self.fields
            .get(name)
            .and_then(|f| f.term_size)
            .or(self.default_term_size)
    }
}

/// Fields are written as a JSON list and keyed by name in memory
mod field_list {
    use super::Field;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S: Serializer>(
        fields: &HashMap<String, Field>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut list: Vec<&Field> = fields.values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<String, Field>, D::Error> {
        let list = Vec::<Field>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|f| (f.name.clone(), f)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;
    use serde_json::json;

    fn orders_schema() -> IndexSchema {
        IndexSchema::new("sales")
            .with_field(Field::keyword("region"))
            .with_field(Field::keyword("sku").nested_in("orders").with_term_size(100))
            .with_field(Field::double("amount").nested_in("orders"))
            .with_field(Field::keyword("carrier").nested_in("shipments"))
    }

    #[test]
    fn test_field_lookup() {
        let schema = orders_schema();
        assert!(schema.has_field("region"));
        assert!(!schema.has_field("unknown"));
        assert_eq!(schema.nested_scope("region"), None);
        assert_eq!(schema.nested_scope("sku"), Some("orders"));
        assert_eq!(schema.nested_scope("unknown"), None);
        assert_eq!(schema.query_field("sku"), "orders.sku");
        assert_eq!(schema.query_field("unknown"), "unknown");
    }

    #[test]
    fn test_require_unknown_field() {
        let schema = orders_schema();
        assert!(schema.require("region").is_ok());
        assert!(matches!(
            schema.require("nope"),
            Err(ComposeError::UnknownField(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_term_size_fallback() {
        let schema = orders_schema();
        assert_eq!(schema.term_size("sku"), Some(100));
        assert_eq!(schema.term_size("region"), None);

        let schema = schema.with_default_term_size(25);
        assert_eq!(schema.term_size("region"), Some(25));
        assert_eq!(schema.term_size("sku"), Some(100));
    }

    #[test]
    fn test_nested_scopes() {
        assert_eq!(orders_schema().nested_scopes(), vec!["orders", "shipments"]);
    }

    #[test]
    fn test_schema_from_json() {
        let schema: IndexSchema = serde_json::from_value(json!({
            "name": "sales",
            "fields": [
                { "name": "region" },
                { "name": "created_at", "kind": "date", "interval": "1d" },
                { "name": "sku", "nested_parent": "orders" }
            ]
        }))
        .unwrap();

        assert_eq!(schema.name, "sales");
        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.field("created_at").unwrap().kind, FieldKind::Date);
        assert_eq!(schema.nested_scope("sku"), Some("orders"));

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["fields"][0]["name"], "created_at");
    }
}
