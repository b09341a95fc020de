/// Errors that can occur while building values.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The instance did not serialize to a field map.
    #[error("{type_name} does not serialize to an object")]
    NotAnObject { type_name: &'static str },

    /// The instance could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ValueError>;
