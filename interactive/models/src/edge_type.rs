use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelResult;
use crate::macros::impl_serde_via_mapping;
use crate::mapping::{
    DecodeContext, Mapping, model_field, model_list_field, put, put_model, put_models,
    scalar_field,
};
use crate::model::Model;
use crate::property::ModelProperty;
use crate::types::{Ident, TypeId};

/// Multiplicity of an edge type between its source and destination vertex types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    ManyToMany,
    OneToMany,
    ManyToOne,
    OneToOne,
}

impl Relation {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::ManyToMany => "MANY_TO_MANY",
            Relation::OneToMany => "ONE_TO_MANY",
            Relation::ManyToOne => "MANY_TO_ONE",
            Relation::OneToOne => "ONE_TO_ONE",
        }
    }
}

/// Which adjacency directions the storage keeps for an edge type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeStorageStrategy {
    OnlyIn,
    OnlyOut,
    BothOutIn,
}

impl EdgeStorageStrategy {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeStorageStrategy::OnlyIn => "ONLY_IN",
            EdgeStorageStrategy::OnlyOut => "ONLY_OUT",
            EdgeStorageStrategy::BothOutIn => "BOTH_OUT_IN",
        }
    }
}

/// CSR storage parameters of a vertex type pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrParams {
    pub edge_storage_strategy: Option<EdgeStorageStrategy>,
}

impl Model for CsrParams {
    const NAME: &'static str = "CsrParams";
    const FIELDS: &'static [&'static str] = &["edge_storage_strategy"];

    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        put(
            &mut mapping,
            "edge_storage_strategy",
            self.edge_storage_strategy
                .map(|strategy| Value::from(strategy.as_str())),
        );
        mapping
    }

    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        Ok(Self {
            edge_storage_strategy: scalar_field(mapping, "edge_storage_strategy", ctx)?,
        })
    }
}

/// A (source, destination) vertex type pair an edge type connects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexTypePairRelation {
    pub source_vertex: Option<Ident>,
    pub destination_vertex: Option<Ident>,
    pub relation: Option<Relation>,
    pub x_csr_params: Option<CsrParams>,
}

impl VertexTypePairRelation {
    pub fn new(
        source_vertex: impl Into<Ident>,
        destination_vertex: impl Into<Ident>,
        relation: Relation,
    ) -> Self {
        Self {
            source_vertex: Some(source_vertex.into()),
            destination_vertex: Some(destination_vertex.into()),
            relation: Some(relation),
            x_csr_params: None,
        }
    }

    pub fn with_storage_strategy(mut self, strategy: EdgeStorageStrategy) -> Self {
        self.x_csr_params = Some(CsrParams {
            edge_storage_strategy: Some(strategy),
        });
        self
    }
}

impl Model for VertexTypePairRelation {
    const NAME: &'static str = "VertexTypePairRelation";
    const FIELDS: &'static [&'static str] = &[
        "source_vertex",
        "destination_vertex",
        "relation",
        "x_csr_params",
    ];

    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        put(
            &mut mapping,
            "source_vertex",
            self.source_vertex.as_deref().map(Value::from),
        );
        put(
            &mut mapping,
            "destination_vertex",
            self.destination_vertex.as_deref().map(Value::from),
        );
        put(
            &mut mapping,
            "relation",
            self.relation.map(|relation| Value::from(relation.as_str())),
        );
        put_model(&mut mapping, "x_csr_params", self.x_csr_params.as_ref());
        mapping
    }

    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        Ok(Self {
            source_vertex: scalar_field(mapping, "source_vertex", ctx)?,
            destination_vertex: scalar_field(mapping, "destination_vertex", ctx)?,
            relation: scalar_field(mapping, "relation", ctx)?,
            x_csr_params: model_field(mapping, "x_csr_params", ctx)?,
        })
    }
}

impl fmt::Display for VertexTypePairRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.source_vertex.as_deref().unwrap_or("?"),
            self.destination_vertex.as_deref().unwrap_or("?")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeType {
    pub type_id: Option<TypeId>,
    pub type_name: Option<Ident>,
    pub vertex_type_pair_relations: Option<Vec<VertexTypePairRelation>>,
    pub properties: Option<Vec<ModelProperty>>,
}

impl EdgeType {
    pub fn new(type_id: TypeId, type_name: impl Into<Ident>) -> Self {
        Self {
            type_id: Some(type_id),
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    pub fn with_relations(mut self, relations: Vec<VertexTypePairRelation>) -> Self {
        self.vertex_type_pair_relations = Some(relations);
        self
    }

    pub fn with_properties(mut self, properties: Vec<ModelProperty>) -> Self {
        self.properties = Some(properties);
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn property(&self, name: &str) -> Option<&ModelProperty> {
        self.properties
            .iter()
            .flatten()
            .find(|property| property.name() == Some(name))
    }

    /// Returns whether the edge type connects `src` to `dst`.
    pub fn connects(&self, src: &str, dst: &str) -> bool {
        self.vertex_type_pair_relations
            .iter()
            .flatten()
            .any(|pair| {
                pair.source_vertex.as_deref() == Some(src)
                    && pair.destination_vertex.as_deref() == Some(dst)
            })
    }
}

impl Model for EdgeType {
    const NAME: &'static str = "EdgeType";
    const FIELDS: &'static [&'static str] = &[
        "type_id",
        "type_name",
        "vertex_type_pair_relations",
        "properties",
    ];

    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        put(&mut mapping, "type_id", self.type_id.map(Value::from));
        put(
            &mut mapping,
            "type_name",
            self.type_name.as_deref().map(Value::from),
        );
        put_models(
            &mut mapping,
            "vertex_type_pair_relations",
            self.vertex_type_pair_relations.as_deref(),
        );
        put_models(&mut mapping, "properties", self.properties.as_deref());
        mapping
    }

    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        Ok(Self {
            type_id: scalar_field(mapping, "type_id", ctx)?,
            type_name: scalar_field(mapping, "type_name", ctx)?,
            vertex_type_pair_relations: model_list_field(
                mapping,
                "vertex_type_pair_relations",
                ctx,
            )?,
            properties: model_list_field(mapping, "properties", ctx)?,
        })
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) {{ {} }}",
            self.name().unwrap_or("?"),
            self.vertex_type_pair_relations.iter().flatten().join(", "),
            self.properties.iter().flatten().join(", ")
        )
    }
}

impl_serde_via_mapping!(CsrParams, VertexTypePairRelation, EdgeType);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::property::PrimitiveType;

    fn knows() -> EdgeType {
        EdgeType::new(0, "knows")
            .with_relations(vec![
                VertexTypePairRelation::new("person", "person", Relation::ManyToMany)
                    .with_storage_strategy(EdgeStorageStrategy::BothOutIn),
            ])
            .with_properties(vec![ModelProperty::new(0, "weight", PrimitiveType::Double)])
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(Relation::OneToMany).unwrap(), json!("ONE_TO_MANY"));
        assert_eq!(
            serde_json::to_value(EdgeStorageStrategy::BothOutIn).unwrap(),
            json!("BOTH_OUT_IN")
        );
        for relation in [
            Relation::ManyToMany,
            Relation::OneToMany,
            Relation::ManyToOne,
            Relation::OneToOne,
        ] {
            assert_eq!(serde_json::to_value(relation).unwrap(), json!(relation.as_str()));
        }
        for strategy in [
            EdgeStorageStrategy::OnlyIn,
            EdgeStorageStrategy::OnlyOut,
            EdgeStorageStrategy::BothOutIn,
        ] {
            assert_eq!(serde_json::to_value(strategy).unwrap(), json!(strategy.as_str()));
        }
    }

    #[test]
    fn test_edge_type_to_mapping() {
        assert_eq!(
            knows().to_value(),
            json!({
                "type_id": 0,
                "type_name": "knows",
                "vertex_type_pair_relations": [{
                    "source_vertex": "person",
                    "destination_vertex": "person",
                    "relation": "MANY_TO_MANY",
                    "x_csr_params": { "edge_storage_strategy": "BOTH_OUT_IN" },
                }],
                "properties": [{
                    "property_id": 0,
                    "property_name": "weight",
                    "property_type": { "primitive_type": "DT_DOUBLE" },
                }],
            })
        );
    }

    #[test]
    fn test_edge_type_lookup_and_display() {
        let knows = knows();
        assert!(knows.connects("person", "person"));
        assert!(!knows.connects("person", "software"));
        assert!(knows.property("weight").is_some());
        assert_eq!(
            knows.to_string(),
            "knows(person -> person) { weight::DT_DOUBLE }"
        );
    }

    #[test]
    fn test_relation_error_path() {
        let value = json!({
            "type_name": "created",
            "vertex_type_pair_relations": [
                { "source_vertex": "person", "destination_vertex": "software", "relation": "MANY_TO_MANY" },
                { "source_vertex": "person", "destination_vertex": "software", "relation": "SOME" },
            ],
        });
        let err = EdgeType::from_value(&value).unwrap_err();
        assert_eq!(
            err.path(),
            Some("$.vertex_type_pair_relations[1].relation")
        );
    }

    #[test]
    fn test_null_relation_element_is_rejected() {
        let value = json!({ "type_name": "created", "vertex_type_pair_relations": [null] });
        let err = EdgeType::from_value(&value).unwrap_err();
        assert_eq!(err.path(), Some("$.vertex_type_pair_relations[0]"));
        assert!(
            err.to_string()
                .contains("expected VertexTypePairRelation object, found null")
        );
    }

    #[test]
    fn test_csr_params_null_is_absent() {
        let value = json!({ "source_vertex": "person", "x_csr_params": null });
        let pair = VertexTypePairRelation::from_value(&value).unwrap().unwrap();
        assert!(pair.x_csr_params.is_none());
        assert_eq!(pair.to_json(), r#"{"source_vertex":"person"}"#);
    }
}
