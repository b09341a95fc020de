//! Schema-first parsing of decoded data.
//!
//! parseprims validates loosely typed input such as decoded JSON against
//! composable schemas, coerces it, and optionally materializes named record
//! types. Every violation is reported with its path, not just the first one.
//!
//! # Crate Structure
//!
//! - [`value`]: Dynamic value graph consumed and produced by schemas
//! - [`schema`]: Schema kinds, modifiers and error reporting (behind `schema` feature)

/// Re-export value types.
pub mod value {
    pub use parseprims_value::*;
}

/// Re-export schema types (requires `schema` feature).
#[cfg(feature = "schema")]
pub mod schema {
    pub use parseprims_schema::*;
}
