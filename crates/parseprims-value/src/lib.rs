//! In-memory value graph consumed and produced by parseprims schemas.
//!
//! Input arrives already decoded (typically a `serde_json::Value` tree) and is
//! converted into [`Value`]. Schemas read it and return new [`Value`]s, which may
//! carry richer shapes than JSON can: date-times and materialized [`Record`]s.

pub mod error;
pub mod record;
pub mod value;

pub use error::{Result, ValueError};
pub use record::Record;
pub use value::{Map, Value};
