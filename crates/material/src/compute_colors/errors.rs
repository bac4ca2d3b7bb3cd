use thiserror::Error;

use super::ParameterKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("No parameter named '{0}'")]
    Missing(String),

    #[error("Invalid parameter type for '{name}': expected {expected}, got {actual}")]
    KindMismatch {
        name: String,
        expected: ParameterKind,
        actual: ParameterKind,
    },

    #[error("Failed to parse {kind} from '{input}': {reason}")]
    Parse {
        kind: ParameterKind,
        input: String,
        reason: String,
    },

    #[error("Unknown parameter tag '{0}'")]
    UnknownTag(String),

    #[error("Texture reference URL cannot be empty")]
    EmptyTextureUrl,
}
