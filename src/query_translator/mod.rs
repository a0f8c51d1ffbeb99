//! Query translation: query model in, SPARQL text out.
//!
//! [`compile_query`] runs one complete pass:
//!
//! ```text
//! QueryModel ──walk──▶ GeneratorTree ──assemble──▶ PREFIX ... SELECT ... WHERE { { sub } ... }
//! ```
//!
//! Every pass owns a fresh variable namer and generator tree, so passes
//! never share state.

pub mod errors;
pub mod expression_translator;
pub mod model_walker;
mod order_by_clause;
mod result_operators;
pub mod translation_ctx;
mod where_clause;

use oxrdf::Variable;

pub use errors::TranslationError;
pub use model_walker::QueryModelWalker;

use crate::config::CompilerConfig;
use crate::query_model::QueryModel;
use crate::resource_mapping::{PrefixMap, TypeMetadata};

/// Result of a successful compilation pass
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// Complete SPARQL 1.1 query text
    pub query: String,
    /// Variable the caller reads results from: the root aggregate alias, or
    /// the root object variable
    pub selection: Variable,
    /// Root subject variable, if the root scope has one
    pub subject: Option<Variable>,
}

pub fn compile_query(
    query: &QueryModel,
    metadata: &dyn TypeMetadata,
    config: &CompilerConfig,
) -> Result<CompiledQuery, TranslationError> {
    let walker = QueryModelWalker::new(metadata, config.max_sub_query_depth);
    let tree = walker.walk(query)?;

    let root = tree.builder(tree.root());
    let selection = root
        .selection_variable()
        .cloned()
        .ok_or(TranslationError::EmptyScope("selection"))?;
    let subject = root.subject().cloned();

    let prefixes = if config.emit_prefixes {
        metadata.prefixes()
    } else {
        PrefixMap::empty()
    };
    let text = tree.assemble(&prefixes);
    log::debug!("Compiled query (selection {}):\n{}", selection, text);

    Ok(CompiledQuery {
        query: text,
        selection,
        subject,
    })
}
