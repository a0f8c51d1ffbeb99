//! # Translation Error Types
//!
//! Every error is fatal to the compilation pass: a failed pass produces no
//! query text.

use thiserror::Error;

use crate::query_model::SubQueryId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslationError {
    #[error("Unsupported {clause} clause (only where and order by body clauses can be translated)")]
    UnsupportedClause { clause: &'static str },

    #[error("Unsupported result operator `{operator}`")]
    UnsupportedOperator { operator: &'static str },

    #[error("Unsupported expression: {reason}")]
    UnsupportedExpression { reason: String },

    #[error("No RDF class mapped for resource type `{resource_type}`")]
    MissingTypeMapping { resource_type: String },

    #[error("No RDF property mapped for member `{member}` of `{resource_type}`")]
    MissingPropertyMapping {
        resource_type: String,
        member: String,
    },

    #[error("Sub-query {id} has no query generator (it was never translated)")]
    UnknownSubQuery { id: SubQueryId },

    #[error("Query item `{item}` is not bound in this scope or any enclosing one")]
    UnboundItem { item: String },

    #[error("Invalid IRI `{iri}`: {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("Invalid variable name `{name}`: {reason}")]
    InvalidVariableName { name: String, reason: String },

    #[error("Sub-query nesting depth {depth} exceeds the configured maximum of {max}")]
    SubQueryDepthExceeded { depth: usize, max: usize },

    #[error("Scope has no {0} variable to apply this to")]
    EmptyScope(&'static str),
}
