//! # Resource Mapping Error Types
//!
//! Errors raised while loading ontology prefixes and resource-to-RDF
//! mappings. Translation-time lookups never produce these: an unmapped type
//! or member is reported by the translator itself.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceMappingError {
    #[error("Failed to read mapping file: {error}")]
    ConfigReadError { error: String },

    #[error("Failed to parse mapping configuration: {error}")]
    ConfigParseError { error: String },

    #[error("Invalid prefix name `{prefix}` (expected letters, digits, `_` or `-`, starting with a letter)")]
    InvalidPrefix { prefix: String },

    #[error("Unknown prefix `{prefix}` in `{value}` (declare it under `ontologies`)")]
    UnknownPrefix { prefix: String, value: String },

    #[error("Invalid IRI `{iri}`: {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("Resource type `{resource_type}` is mapped more than once")]
    DuplicateResourceType { resource_type: String },
}
