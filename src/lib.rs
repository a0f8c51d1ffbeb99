//! sparql-linq - compile typed object queries into SPARQL 1.1
//!
//! This crate translates a LINQ-style query tree over typed resources into a
//! SPARQL query through:
//! - A serializable query model (source, where, order by, result operators)
//! - Resource-to-RDF mappings (classes, properties, ontology prefixes)
//! - A model walker and expression translator building per-scope pattern builders
//! - SPARQL generation with nested sub-selects for sub-queries

pub mod utils;

pub mod config;
pub mod query_model;
pub mod query_translator;
pub mod resource_mapping;
pub mod sparql_query_generator;

pub use query_translator::{compile_query, CompiledQuery, TranslationError};
