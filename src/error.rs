use thiserror::Error;

/// Errors surfaced by schema construction and the normalization algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// A dependency or queried set references an identifier the governing
    /// schema does not declare.
    #[error("attribute `{attribute}` is not declared in the governing schema")]
    UnknownAttribute { attribute: String },

    /// A relation schema must declare at least one attribute.
    #[error("schema declares no attributes")]
    EmptySchema,

    /// Two attributes with the same identifier in one schema.
    #[error("duplicate attribute `{0}` in schema")]
    DuplicateAttribute(String),
}

pub type Result<T, E = NormalizationError> = std::result::Result<T, E>;
