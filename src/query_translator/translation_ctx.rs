//! Translation context.
//!
//! [`TranslationCtx`] is the state of one compilation pass:
//! - the type-metadata collaborator used for class and property lookups
//! - the [`GeneratorTree`] of query scopes built so far
//! - the [`VariableNamer`] shared by every scope of the pass
//!
//! The active scope is never stored here; it is passed explicitly as a
//! [`GeneratorId`] down the call chain.

use oxrdf::Variable;

use super::errors::TranslationError;
use crate::query_model::SubQueryId;
use crate::resource_mapping::TypeMetadata;
use crate::sparql_query_generator::{GeneratorId, GeneratorTree, GraphPatternBuilder};
use crate::utils::variable_naming::VariableNamer;

pub struct TranslationCtx<'a> {
    metadata: &'a dyn TypeMetadata,
    tree: GeneratorTree,
    namer: VariableNamer,
    max_sub_query_depth: usize,
}

impl<'a> TranslationCtx<'a> {
    pub fn new(metadata: &'a dyn TypeMetadata, max_sub_query_depth: usize) -> Self {
        Self {
            metadata,
            tree: GeneratorTree::new(),
            namer: VariableNamer::new(),
            max_sub_query_depth,
        }
    }

    pub fn metadata(&self) -> &'a dyn TypeMetadata {
        self.metadata
    }

    pub fn tree(&self) -> &GeneratorTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut GeneratorTree {
        &mut self.tree
    }

    pub fn builder(&self, scope: GeneratorId) -> &GraphPatternBuilder {
        self.tree.builder(scope)
    }

    pub fn builder_mut(&mut self, scope: GeneratorId) -> &mut GraphPatternBuilder {
        self.tree.builder_mut(scope)
    }

    pub fn max_sub_query_depth(&self) -> usize {
        self.max_sub_query_depth
    }

    pub fn allocate(&mut self, hint: &str) -> Result<Variable, TranslationError> {
        self.namer.allocate(hint)
    }

    /// Builder registered for a sub-query node
    pub fn current_generator_for(&self, id: SubQueryId) -> Result<GeneratorId, TranslationError> {
        self.tree
            .generator_for(id)
            .ok_or(TranslationError::UnknownSubQuery { id })
    }

    /// Resolve an item through the scope chain, marking correlation on the way
    pub fn resolve_item(
        &mut self,
        scope: GeneratorId,
        item_name: &str,
    ) -> Result<Variable, TranslationError> {
        self.tree
            .resolve_item(scope, item_name)
            .ok_or_else(|| TranslationError::UnboundItem {
                item: item_name.to_string(),
            })
    }

    pub fn into_tree(self) -> GeneratorTree {
        self.tree
    }
}
