//! Schema and value model for PBS game-data files.
//!
//! This crate holds the types the codec consumes and produces. It does not
//! read or write text itself; see `pbs-codec` for that.

pub mod error;
pub mod kind;
pub mod lookup;
pub mod schema;
pub mod value;

pub use error::SchemaError;
pub use kind::{EnumRef, FieldStructure, PrimitiveKind};
pub use lookup::{
    EntityKey, EntitySet, EnumDefinition, EnumMember, EnumRegistry, EnumTarget, KeyStrategy,
    KeyedLookup,
};
pub use schema::{FieldDescriptor, SECTION_NAME_KEY, Schema, SchemaBuilder, SchemaEntry};
pub use value::{Primitive, Value};
