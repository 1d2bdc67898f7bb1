use std::fmt;

use itertools::Itertools;
use serde_json::Value;
use smol_str::SmolStr;

use crate::error::ModelResult;
use crate::macros::impl_serde_via_mapping;
use crate::mapping::{DecodeContext, Mapping, model_list_field, put, put_models, scalar_field};
use crate::model::Model;
use crate::property::ModelProperty;
use crate::types::{Ident, TypeId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexType {
    pub type_id: Option<TypeId>,
    pub type_name: Option<Ident>,
    pub properties: Option<Vec<ModelProperty>>,
    pub primary_keys: Option<Vec<Ident>>,
}

impl VertexType {
    pub fn new(type_id: TypeId, type_name: impl Into<Ident>) -> Self {
        Self {
            type_id: Some(type_id),
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    pub fn with_properties(mut self, properties: Vec<ModelProperty>) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Ident>,
    {
        self.primary_keys = Some(keys.into_iter().map(Into::into).collect());
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
}

impl Model for VertexType {
    const NAME: &'static str = "VertexType";
    const FIELDS: &'static [&'static str] =
        &["type_id", "type_name", "properties", "primary_keys"];

    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        put(&mut mapping, "type_id", self.type_id.map(Value::from));
        put(
            &mut mapping,
            "type_name",
            self.type_name.as_deref().map(Value::from),
        );
        put_models(&mut mapping, "properties", self.properties.as_deref());
        put(
            &mut mapping,
            "primary_keys",
            self.primary_keys
                .as_ref()
                .map(|keys| keys.iter().map(SmolStr::as_str).collect::<Value>()),
        );
        mapping
    }

    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        Ok(Self {
            type_id: scalar_field(mapping, "type_id", ctx)?,
            type_name: scalar_field(mapping, "type_name", ctx)?,
            properties: model_list_field(mapping, "properties", ctx)?,
            primary_keys: scalar_field(mapping, "primary_keys", ctx)?,
        })
    }
}

impl fmt::Display for VertexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{ {} }}",
            self.name().unwrap_or("?"),
            self.properties.iter().flatten().join(", ")
        )
    }
}

impl_serde_via_mapping!(VertexType);
