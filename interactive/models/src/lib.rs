//! Typed models of the GraphScope Interactive graph schema, with conversions between the typed
//! form, the untyped JSON object form, and JSON text.
//!
//! Every record implements [`Model`], which fixes the wire contract: absent fields are omitted on
//! output, `null` and missing keys decode to absent fields, and nested records are converted
//! element-wise through their own [`Model`] implementation.

pub mod config;
pub mod edge_type;
pub mod error;
mod macros;
pub mod mapping;
pub mod model;
pub mod property;
pub mod schema;
pub mod types;
pub mod vertex_type;

pub use config::{ModelConfig, UnknownFields};
pub use edge_type::{CsrParams, EdgeStorageStrategy, EdgeType, Relation, VertexTypePairRelation};
pub use error::{ModelError, ModelResult};
pub use mapping::Mapping;
pub use model::{Model, ModelInput};
pub use property::{ModelProperty, PrimitiveType, PropertyType};
pub use schema::ModelSchema;
pub use vertex_type::VertexType;
