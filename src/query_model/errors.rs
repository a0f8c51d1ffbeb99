use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryModelError {
    #[error("Failed to read query model file `{path}`: {error}")]
    Read { path: String, error: String },

    #[error("Failed to parse {format} query model: {error}")]
    Parse { format: &'static str, error: String },
}
