use serde::{Deserialize, Serialize};

/// How decoding treats keys that the target record does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Drop unknown keys.
    #[default]
    Ignore,
    /// Fail with a type conformance error.
    Deny,
}

/// Decoding configuration shared by every [`Model`](crate::Model).
///
/// The default mirrors the lenient behavior of the generated REST client: unknown keys are
/// dropped. Host applications may embed this struct in their own configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub unknown_fields: UnknownFields,
}

impl ModelConfig {
    #[inline]
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFields::Deny,
        }
    }

    #[inline]
    pub fn with_unknown_fields(mut self, unknown_fields: UnknownFields) -> Self {
        self.unknown_fields = unknown_fields;
        self
    }

    #[inline]
    pub fn denies_unknown_fields(&self) -> bool {
        self.unknown_fields == UnknownFields::Deny
    }
}
