#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum UnnestError {
    #[error("invalid schema at `{path}`: {message}")]
    InvalidSchema { path: String, message: String },
}

impl UnnestError {
    pub(crate) fn invalid_schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnnestError>;
