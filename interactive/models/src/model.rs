use std::fmt::Debug;

use serde_json::Value;

use crate::config::ModelConfig;
use crate::error::{ModelError, ModelResult};
use crate::mapping::{DecodeContext, Mapping, check_fields, describe};

/// The wire contract shared by every schema record.
///
/// Implementors provide [`to_mapping`](Model::to_mapping) and
/// [`decode_fields`](Model::decode_fields); the JSON, null-handling and assignment entry points
/// are derived from those two.
pub trait Model: Sized + Clone + Debug + PartialEq {
    /// Record name used in error messages.
    const NAME: &'static str;

    /// Wire keys of the record, in output order.
    const FIELDS: &'static [&'static str];

    /// Converts the record to its untyped form. Absent fields are omitted and nested records are
    /// converted through their own `to_mapping`.
    fn to_mapping(&self) -> Mapping;

    /// Builds the record from `mapping`, whose keys have already been checked against
    /// [`FIELDS`](Model::FIELDS).
    fn decode_fields(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self>;

    /// Decodes a nested value, which must be an object.
    fn decode_value(value: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        match value {
            Value::Object(mapping) => Self::decode_mapping(mapping, ctx),
            other => Err(ctx.mismatch(format!(
                "expected {} object, found {}",
                Self::NAME,
                describe(other)
            ))),
        }
    }

    fn decode_mapping(mapping: &Mapping, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        check_fields(mapping, Self::FIELDS, Self::NAME, ctx)?;
        Self::decode_fields(mapping, ctx)
    }

    #[inline]
    fn from_mapping(mapping: &Mapping) -> ModelResult<Self> {
        Self::from_mapping_with(mapping, &ModelConfig::default())
    }

    fn from_mapping_with(mapping: &Mapping, config: &ModelConfig) -> ModelResult<Self> {
        Self::decode_mapping(mapping, &DecodeContext::root(config))
    }

    /// Decodes an untyped payload. A `null` payload yields `Ok(None)`; any other non-object
    /// payload is a type conformance error.
    #[inline]
    fn from_value(value: &Value) -> ModelResult<Option<Self>> {
        Self::from_value_with(value, &ModelConfig::default())
    }

    fn from_value_with(value: &Value, config: &ModelConfig) -> ModelResult<Option<Self>> {
        if value.is_null() {
            tracing::trace!(model = Self::NAME, "null payload decodes to an absent record");
            return Ok(None);
        }
        Self::decode_value(value, &DecodeContext::root(config)).map(Some)
    }

    /// Parses JSON text and decodes it with [`from_value`](Model::from_value), so the text
    /// `null` yields `Ok(None)`.
    #[inline]
    fn from_json(text: &str) -> ModelResult<Option<Self>> {
        Self::from_json_with(text, &ModelConfig::default())
    }

    fn from_json_with(text: &str, config: &ModelConfig) -> ModelResult<Option<Self>> {
        let value: Value = serde_json::from_str(text).map_err(ModelError::JsonSyntax)?;
        Self::from_value_with(&value, config)
    }

    #[inline]
    fn to_value(&self) -> Value {
        Value::Object(self.to_mapping())
    }

    /// Compact JSON text of [`to_mapping`](Model::to_mapping).
    #[inline]
    fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Pretty-printed JSON for debugging. Not meant for persistence or comparison.
    #[inline]
    fn to_display_string(&self) -> String {
        format!("{:#}", self.to_value())
    }

    /// Replaces `field` with an untyped `value` after checking it against the field's declared
    /// type. `null` clears the field. On error the record is left unchanged.
    fn assign(&mut self, field: &str, value: Value) -> ModelResult<()> {
        if !Self::FIELDS.contains(&field) {
            return Err(ModelError::conformance(
                format!("$.{field}"),
                format!("{} has no field named `{field}`", Self::NAME),
            ));
        }
        let mut mapping = self.to_mapping();
        if value.is_null() {
            mapping.remove(field);
        } else {
            mapping.insert(field.to_owned(), value);
        }
        let config = ModelConfig::default();
        *self = Self::decode_fields(&mapping, &DecodeContext::root(&config))?;
        Ok(())
    }
}

/// A payload at an API boundary: either untyped JSON still to be checked, or a record that is
/// already typed.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput<T> {
    Raw(Value),
    Typed(T),
}

impl<T: Model> ModelInput<T> {
    #[inline]
    pub fn resolve(self) -> ModelResult<Option<T>> {
        self.resolve_with(&ModelConfig::default())
    }

    pub fn resolve_with(self, config: &ModelConfig) -> ModelResult<Option<T>> {
        match self {
            Self::Raw(value) => T::from_value_with(&value, config),
            Self::Typed(model) => Ok(Some(model)),
        }
    }
}

impl<T> From<Value> for ModelInput<T> {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl<T> From<Mapping> for ModelInput<T> {
    #[inline]
    fn from(mapping: Mapping) -> Self {
        Self::Raw(Value::Object(mapping))
    }
}
