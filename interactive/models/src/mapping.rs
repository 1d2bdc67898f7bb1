//! The untyped object form of the models and the helpers records use to move between it and
//! their typed fields.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ModelConfig;
use crate::error::{ModelError, ModelResult};
use crate::model::Model;

/// A JSON object. Keys keep insertion order, so a record's mapping lists its fields in wire order.
pub type Mapping = serde_json::Map<String, Value>;

/// Decoding state carried through nested records: the active configuration and the location of
/// the value being decoded, rendered as `$.vertex_types[0].type_name`.
#[derive(Debug, Clone)]
pub struct DecodeContext<'a> {
    config: &'a ModelConfig,
    path: String,
}

impl<'a> DecodeContext<'a> {
    #[inline]
    pub fn root(config: &'a ModelConfig) -> Self {
        Self {
            config,
            path: "$".to_string(),
        }
    }

    #[inline]
    pub fn config(&self) -> &ModelConfig {
        self.config
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn field(&self, key: &str) -> Self {
        Self {
            config: self.config,
            path: format!("{}.{}", self.path, key),
        }
    }

    pub fn index(&self, index: usize) -> Self {
        Self {
            config: self.config,
            path: format!("{}[{}]", self.path, index),
        }
    }

    pub fn mismatch(&self, reason: impl Into<String>) -> ModelError {
        ModelError::conformance(self.path.clone(), reason)
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks the keys of `mapping` against the fields `model` declares.
pub fn check_fields(
    mapping: &Mapping,
    fields: &[&str],
    model: &str,
    ctx: &DecodeContext<'_>,
) -> ModelResult<()> {
    for key in mapping.keys() {
        if fields.contains(&key.as_str()) {
            continue;
        }
        if ctx.config().denies_unknown_fields() {
            return Err(ctx.field(key).mismatch(format!("unknown field of {model}")));
        }
        tracing::debug!(model, field = %key, path = ctx.path(), "ignoring unknown field");
    }
    Ok(())
}

/// Reads a scalar, string or enum field. Missing keys and `null` are absent.
pub fn scalar_field<T: DeserializeOwned>(
    mapping: &Mapping,
    key: &str,
    ctx: &DecodeContext<'_>,
) -> ModelResult<Option<T>> {
    match mapping.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => <T as Deserialize>::deserialize(value)
            .map(Some)
            .map_err(|e| ctx.field(key).mismatch(e.to_string())),
    }
}

/// Reads a nested record through its own [`Model`] implementation.
pub fn model_field<T: Model>(
    mapping: &Mapping,
    key: &str,
    ctx: &DecodeContext<'_>,
) -> ModelResult<Option<T>> {
    match mapping.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::decode_value(value, &ctx.field(key)).map(Some),
    }
}

/// Reads a sequence of nested records. The first failing element fails the whole field.
pub fn model_list_field<T: Model>(
    mapping: &Mapping,
    key: &str,
    ctx: &DecodeContext<'_>,
) -> ModelResult<Option<Vec<T>>> {
    match mapping.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => {
            let ctx = ctx.field(key);
            items
                .iter()
                .enumerate()
                .map(|(i, item)| T::decode_value(item, &ctx.index(i)))
                .collect::<ModelResult<Vec<_>>>()
                .map(Some)
        }
        Some(other) => Err(ctx.field(key).mismatch(format!(
            "expected array of {}, found {}",
            T::NAME,
            describe(other)
        ))),
    }
}

/// Inserts `value` under `key` unless it is absent.
#[inline]
pub fn put(mapping: &mut Mapping, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        mapping.insert(key.to_owned(), value);
    }
}

#[inline]
pub fn put_model<T: Model>(mapping: &mut Mapping, key: &str, model: Option<&T>) {
    put(mapping, key, model.map(Model::to_value));
}

pub fn put_models<T: Model>(mapping: &mut Mapping, key: &str, models: Option<&[T]>) {
    put(
        mapping,
        key,
        models.map(|models| models.iter().map(Model::to_value).collect::<Value>()),
    );
}
