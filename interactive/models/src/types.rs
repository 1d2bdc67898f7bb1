use smol_str::SmolStr;

/// Identifier the server assigns to a vertex type or an edge type.
pub type TypeId = i32;

/// Identifier of a property within its vertex or edge type.
pub type PropertyId = i32;

/// Names of types, properties and vertex endpoints.
pub type Ident = SmolStr;
