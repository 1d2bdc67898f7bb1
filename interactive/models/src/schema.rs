use std::fmt;

use itertools::Itertools;

use crate::edge_type::EdgeType;
use crate::error::ModelResult;
use crate::macros::impl_serde_via_mapping;
use crate::mapping::{DecodeContext, Mapping, model_list_field, put_models};
use crate::model::Model;
use crate::vertex_type::VertexType;

/// The schema of a graph: its vertex types and edge types.
///
/// Both lists are optional. An absent list is omitted from the mapping and JSON forms, while an
/// empty list is kept as `[]`, so the two survive a round trip as distinct values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSchema {
    vertex_types: Option<Vec<VertexType>>,
    edge_types: Option<Vec<EdgeType>>,
}

impl ModelSchema {
    #[inline]
    pub fn new(vertex_types: Option<Vec<VertexType>>, edge_types: Option<Vec<EdgeType>>) -> Self {
        Self {
            vertex_types,
            edge_types,
        }
    }

    #[inline]
    pub fn with_vertex_types(mut self, vertex_types: Vec<VertexType>) -> Self {
        self.vertex_types = Some(vertex_types);
        self
    }

    #[inline]
    pub fn with_edge_types(mut self, edge_types: Vec<EdgeType>) -> Self {
        self.edge_types = Some(edge_types);
        self
    }

    #[inline]
    pub fn vertex_types(&self) -> Option<&[VertexType]> {
        self.vertex_types.as_deref()
    }

    #[inline]
    pub fn edge_types(&self) -> Option<&[EdgeType]> {
        self.edge_types.as_deref()
    }

    #[inline]
    pub fn set_vertex_types(&mut self, vertex_types: Option<Vec<VertexType>>) {
        self.vertex_types = vertex_types;
    }

    #[inline]
    pub fn set_edge_types(&mut self, edge_types: Option<Vec<EdgeType>>) {
        self.edge_types = edge_types;
    }

    pub fn vertex_type(&self, name: &str) -> Option<&VertexType> {
        self.vertex_types
            .iter()
            .flatten()
            .find(|vertex| vertex.name() == Some(name))
    }

    pub fn edge_type(&self, name: &str) -> Option<&EdgeType> {
        self.edge_types
            .iter()
            .flatten()
            .find(|edge| edge.name() == Some(name))
    }

    pub fn into_parts(self) -> (Option<Vec<VertexType>>, Option<Vec<EdgeType>>) {
        (self.vertex_types, self.edge_types)
    }
}

impl Model for ModelSchema {
    const NAME: &'static str = "ModelSchema";
    const FIELDS: &'static [&'static str] = &["vertex_types", "edge_types"];

    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        put_models(&mut mapping, "vertex_types", self.vertex_types.as_deref());
        put_models(&mut mapping, "edge_types", self.edge_types.as_deref());
        mapping
    }

    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        Ok(Self {
            vertex_types: model_list_field(mapping, "vertex_types", ctx)?,
            edge_types: model_list_field(mapping, "edge_types", ctx)?,
        })
    }
}

impl fmt::Display for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "schema {{ vertex types: [{}], edge types: [{}] }}",
            self.vertex_types.iter().flatten().join("; "),
            self.edge_types.iter().flatten().join("; ")
        )
    }
}

impl_serde_via_mapping!(ModelSchema);

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use serde_json::{Value, json};

    use super::*;
    use crate::config::ModelConfig;
    use crate::edge_type::{Relation, VertexTypePairRelation};
    use crate::model::ModelInput;
    use crate::property::{ModelProperty, PrimitiveType};

    fn person() -> VertexType {
        VertexType::new(0, "person")
            .with_properties(vec![ModelProperty::new(0, "id", PrimitiveType::SignedInt64)])
            .with_primary_keys(["id"])
    }

    fn knows() -> EdgeType {
        EdgeType::new(0, "knows").with_relations(vec![VertexTypePairRelation::new(
            "person",
            "person",
            Relation::ManyToMany,
        )])
    }

    #[test]
    fn test_default_schema_is_empty_mapping() {
        let schema = ModelSchema::default();
        assert!(schema.to_mapping().is_empty());
        assert_eq!(schema.to_json(), "{}");
    }

    #[test]
    fn test_absent_and_empty_lists() {
        let schema = ModelSchema::new(None, Some(vec![]));
        let mapping = schema.to_mapping();
        assert!(!mapping.contains_key("vertex_types"));
        assert_eq!(mapping.get("edge_types"), Some(&json!([])));

        let decoded = ModelSchema::from_mapping(&mapping).unwrap();
        assert_eq!(decoded, schema);
        assert!(decoded.vertex_types().is_none());
        assert_eq!(decoded.edge_types(), Some(&[][..]));
    }

    #[test]
    fn test_field_order_is_fixed() {
        let text = r#"{"edge_types": [], "vertex_types": []}"#;
        let schema = ModelSchema::from_json(text).unwrap().unwrap();
        assert_snapshot!(schema.to_json(), @r#"{"vertex_types":[],"edge_types":[]}"#);
    }

    #[test]
    fn test_null_payload_is_absent() {
        assert_eq!(ModelSchema::from_value(&Value::Null).unwrap(), None);
        assert_eq!(ModelSchema::from_json("null").unwrap(), None);
        assert_eq!(ModelInput::<ModelSchema>::Raw(Value::Null).resolve().unwrap(), None);
    }

    #[test]
    fn test_null_keys_are_absent() {
        let value = json!({ "vertex_types": null, "edge_types": null });
        let schema = ModelSchema::from_value(&value).unwrap().unwrap();
        assert_eq!(schema, ModelSchema::default());
    }

    #[test]
    fn test_non_object_payload() {
        let err = ModelSchema::from_value(&json!([1, 2])).unwrap_err();
        assert!(err.is_type_conformance());
        assert_eq!(err.path(), Some("$"));
        assert!(err.to_string().contains("expected ModelSchema object, found array"));
    }

    #[test]
    fn test_typed_input_is_accepted() {
        let schema = ModelSchema::default().with_vertex_types(vec![person()]);
        let resolved = ModelInput::Typed(schema.clone()).resolve().unwrap();
        assert_eq!(resolved, Some(schema));

        let raw: ModelInput<ModelSchema> = json!({ "edge_types": [] }).into();
        let resolved = raw.resolve().unwrap().unwrap();
        assert_eq!(resolved.edge_types(), Some(&[][..]));
    }

    #[test]
    fn test_bad_element_fails_whole_call() {
        let value = json!({
            "vertex_types": [
                { "type_id": 0, "type_name": "person" },
                { "type_id": "one", "type_name": "software" },
            ],
            "edge_types": [],
        });
        let err = ModelSchema::from_value(&value).unwrap_err();
        assert_eq!(err.path(), Some("$.vertex_types[1].type_id"));
    }

    #[test]
    fn test_strict_config_rejects_unknown_keys() {
        let value = json!({ "vertex_types": [], "graph_name": "modern" });
        assert!(ModelSchema::from_value(&value).unwrap().is_some());

        let err = ModelSchema::from_value_with(&value, &ModelConfig::strict()).unwrap_err();
        assert_eq!(err.path(), Some("$.graph_name"));

        let nested = json!({ "vertex_types": [{ "type_name": "person", "label": "P" }] });
        let err = ModelSchema::from_value_with(&nested, &ModelConfig::strict()).unwrap_err();
        assert_eq!(err.path(), Some("$.vertex_types[0].label"));
    }

    #[test]
    fn test_assign_vertex_types() {
        let mut schema = ModelSchema::default();
        schema
            .assign("vertex_types", json!([{ "type_id": 0, "type_name": "person" }]))
            .unwrap();
        assert!(schema.vertex_type("person").is_some());

        let before = schema.clone();
        let err = schema.assign("edge_types", json!({ "knows": {} })).unwrap_err();
        assert_eq!(err.path(), Some("$.edge_types"));
        assert_eq!(schema, before);

        let err = schema.assign("labels", json!([])).unwrap_err();
        assert_eq!(err.path(), Some("$.labels"));
        assert_eq!(schema, before);

        schema.assign("vertex_types", Value::Null).unwrap();
        assert_eq!(schema, ModelSchema::default());
    }

    #[test]
    fn test_typed_setters() {
        let mut schema = ModelSchema::default();
        schema.set_edge_types(Some(vec![knows()]));
        schema.set_vertex_types(Some(vec![person()]));
        assert!(schema.edge_type("knows").is_some());
        assert!(schema.edge_type("created").is_none());

        schema.set_edge_types(None);
        let (vertex_types, edge_types) = schema.into_parts();
        assert_eq!(vertex_types.map(|v| v.len()), Some(1));
        assert!(edge_types.is_none());
    }

    #[test]
    fn test_to_mapping_is_idempotent() {
        let schema = ModelSchema::new(Some(vec![person()]), Some(vec![knows()]));
        assert_eq!(schema.to_mapping(), schema.to_mapping());
    }

    #[test]
    fn test_display_string() {
        let schema = ModelSchema::new(None, Some(vec![]));
        assert_snapshot!(schema.to_display_string(), @r#"
        {
          "edge_types": []
        }
        "#);
        let schema = ModelSchema::new(Some(vec![person()]), Some(vec![knows()]));
        assert_eq!(
            schema.to_string(),
            "schema { vertex types: [person { id::DT_SIGNED_INT64 }], \
             edge types: [knows(person -> person) {  }] }"
        );
    }
}
