//! Schema kinds.

pub mod array;
pub mod bool;
pub mod date_time;
pub mod discriminated_union;
pub mod float;
pub mod int;
pub mod literal;
pub mod object;
pub mod string;
pub mod union;

pub use array::ArraySchema;
pub use bool::BoolSchema;
pub use date_time::DateTimeSchema;
pub use discriminated_union::DiscriminatedUnionSchema;
pub use float::FloatSchema;
pub use int::IntSchema;
pub use literal::{Literal, LiteralSchema};
pub use object::ObjectSchema;
pub use string::StringSchema;
pub use union::UnionSchema;
