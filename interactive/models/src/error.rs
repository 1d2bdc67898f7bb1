use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("type conformance error at {path}: {reason}")]
    #[diagnostic(help("check the value against the field's declared type"))]
    TypeConformance { path: String, reason: String },

    #[error("malformed JSON text")]
    JsonSyntax(#[source] serde_json::Error),
}

impl ModelError {
    pub(crate) fn conformance(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TypeConformance {
            path: path.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn is_type_conformance(&self) -> bool {
        matches!(self, Self::TypeConformance { .. })
    }

    #[inline]
    pub fn is_json_syntax(&self) -> bool {
        matches!(self, Self::JsonSyntax(_))
    }

    /// Returns the location of the offending value for conformance errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::TypeConformance { path, .. } => Some(path),
            Self::JsonSyntax(_) => None,
        }
    }
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
