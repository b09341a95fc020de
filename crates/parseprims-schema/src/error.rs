/// Errors raised while building a schema.
///
/// These are configuration mistakes, reported once at construction time. They
/// never flow through a parse call, so a `catch` modifier cannot intercept them.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A string pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A discriminated union member does not declare the discriminator field.
    #[error("member {index} has no discriminator field {field:?}")]
    MissingDiscriminator { index: usize, field: String },

    /// A discriminated union member declares the field with a non-literal schema.
    #[error("discriminator field {field:?} of member {index} is not a literal")]
    DiscriminatorNotLiteral { index: usize, field: String },

    /// Two discriminated union members share the same literal.
    #[error("discriminator value {value} is declared by members {first} and {second}")]
    DuplicateDiscriminator {
        value: String,
        first: usize,
        second: usize,
    },

    /// A union was built without alternatives.
    #[error("union requires at least one member")]
    EmptyUnion,
}

pub type Result<T> = std::result::Result<T, SchemaError>;
