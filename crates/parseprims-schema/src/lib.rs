//! Composable schemas that validate and coerce decoded values.
//!
//! A schema is built once with fluent modifiers, then shared and reused
//! across threads. Parsing never stops at the first problem: every violation
//! is collected into a path-structured [`ErrorList`].
//!
//! Construction mistakes such as an invalid pattern or a malformed
//! discriminated union surface as [`SchemaError`] when the schema is built.

pub mod config;
pub mod contract;
pub mod error;
pub mod failure;
pub mod parse_error;
pub mod refine;
pub mod schema;

pub use config::DateTimeConfig;
pub use contract::{Modifiers, Schema, SchemaExt};
pub use error::{Result, SchemaError};
pub use failure::{ParseFailure, SafeParse};
pub use parse_error::{ErrorEntry, ErrorList, FlatError, ParseError, PathSegment};
pub use refine::Refinement;
pub use schema::{
    ArraySchema, BoolSchema, DateTimeSchema, DiscriminatedUnionSchema, FloatSchema, IntSchema,
    Literal, LiteralSchema, ObjectSchema, StringSchema, UnionSchema,
};
