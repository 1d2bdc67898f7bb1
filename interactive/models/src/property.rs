use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelResult;
use crate::macros::impl_serde_via_mapping;
use crate::mapping::{DecodeContext, Mapping, model_field, put, put_model, scalar_field};
use crate::model::Model;
use crate::types::{Ident, PropertyId};

/// Primitive data types a property may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    #[serde(rename = "DT_DOUBLE")]
    Double,
    #[serde(rename = "DT_STRING")]
    String,
    #[serde(rename = "DT_SIGNED_INT32")]
    SignedInt32,
    #[serde(rename = "DT_SIGNED_INT64")]
    SignedInt64,
    #[serde(rename = "DT_DATE32")]
    Date32,
}

impl PrimitiveType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Double => "DT_DOUBLE",
            PrimitiveType::String => "DT_STRING",
            PrimitiveType::SignedInt32 => "DT_SIGNED_INT32",
            PrimitiveType::SignedInt64 => "DT_SIGNED_INT64",
            PrimitiveType::Date32 => "DT_DATE32",
        }
    }
}

impl fmt::Display for PrimitiveType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyType {
    pub primitive_type: Option<PrimitiveType>,
}

impl PropertyType {
    #[inline]
    pub fn primitive(primitive_type: PrimitiveType) -> Self {
        Self {
            primitive_type: Some(primitive_type),
        }
    }
}

impl Model for PropertyType {
    const NAME: &'static str = "PropertyType";
    const FIELDS: &'static [&'static str] = &["primitive_type"];

    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        put(
            &mut mapping,
            "primitive_type",
            self.primitive_type.map(|ty| Value::from(ty.as_str())),
        );
        mapping
    }

    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        Ok(Self {
            primitive_type: scalar_field(mapping, "primitive_type", ctx)?,
        })
    }
}

/// A property declared by a vertex type or an edge type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelProperty {
    pub property_id: Option<PropertyId>,
    pub property_name: Option<Ident>,
    pub property_type: Option<PropertyType>,
}

impl ModelProperty {
    pub fn new(property_id: PropertyId, name: impl Into<Ident>, ty: PrimitiveType) -> Self {
        Self {
            property_id: Some(property_id),
            property_name: Some(name.into()),
            property_type: Some(PropertyType::primitive(ty)),
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }

    #[inline]
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        self.property_type.as_ref().and_then(|ty| ty.primitive_type)
    }
}

impl Model for ModelProperty {
    const NAME: &'static str = "ModelProperty";
    const FIELDS: &'static [&'static str] = &["property_id", "property_name", "property_type"];

    fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        put(&mut mapping, "property_id", self.property_id.map(Value::from));
        put(
            &mut mapping,
            "property_name",
            self.property_name.as_deref().map(Value::from),
        );
        put_model(&mut mapping, "property_type", self.property_type.as_ref());
        mapping
    }

    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        Ok(Self {
            property_id: scalar_field(mapping, "property_id", ctx)?,
            property_name: scalar_field(mapping, "property_name", ctx)?,
            property_type: model_field(mapping, "property_type", ctx)?,
        })
    }
}

impl fmt::Display for ModelProperty {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().unwrap_or("?");
        match self.primitive_type() {
            Some(ty) => write!(f, "{name}::{ty}"),
            None => write!(f, "{name}"),
        }
    }
}

impl_serde_via_mapping!(PropertyType, ModelProperty);
