//! Arena of graph pattern builders for one compilation pass.
//!
//! Builder 0 is the root scope. Every sub-query gets its own builder,
//! linked to the scope it appears in and registered under its
//! [`SubQueryId`]:
//!
//! ```text
//! g0  from x in Person where x.Accounts.Any() ...
//! └─ g1  #0: from a in x.Accounts select a  (Any)
//! ```
//!
//! Assembly is leaves-first: each child block is nested at the start of its
//! parent's WHERE group, and the prefix prologue of the whole tree is
//! emitted once above the root block.

use std::collections::HashMap;
use std::fmt;

use oxrdf::Variable;

use super::graph_pattern_builder::GraphPatternBuilder;
use super::query_block::QueryBlock;
use super::to_sparql::RenderContext;
use crate::query_model::SubQueryId;
use crate::resource_mapping::PrefixMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneratorId(usize);

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorTree {
    builders: Vec<GraphPatternBuilder>,
    parents: Vec<Option<GeneratorId>>,
    children: Vec<Vec<GeneratorId>>,
    sub_queries: HashMap<SubQueryId, GeneratorId>,
}

impl Default for GeneratorTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorTree {
    /// A tree holding only an empty root builder
    pub fn new() -> Self {
        Self {
            builders: vec![GraphPatternBuilder::new()],
            parents: vec![None],
            children: vec![Vec::new()],
            sub_queries: HashMap::new(),
        }
    }

    pub fn root(&self) -> GeneratorId {
        GeneratorId(0)
    }

    /// Allocate a builder that is not yet linked to a parent
    pub fn create_builder(&mut self) -> GeneratorId {
        let id = GeneratorId(self.builders.len());
        self.builders.push(GraphPatternBuilder::new());
        self.parents.push(None);
        self.children.push(Vec::new());
        log::trace!("Created builder {}", id);
        id
    }

    /// Link `child` under `parent`. Children keep their insertion order.
    pub fn add_child(&mut self, parent: GeneratorId, child: GeneratorId) {
        if self.parents[child.0].is_some() {
            return;
        }
        self.parents[child.0] = Some(parent);
        self.children[parent.0].push(child);
    }

    pub fn register_for_node(&mut self, sub_query: SubQueryId, builder: GeneratorId) {
        self.sub_queries.insert(sub_query, builder);
    }

    pub fn generator_for(&self, sub_query: SubQueryId) -> Option<GeneratorId> {
        self.sub_queries.get(&sub_query).copied()
    }

    pub fn builder(&self, id: GeneratorId) -> &GraphPatternBuilder {
        &self.builders[id.0]
    }

    pub fn builder_mut(&mut self, id: GeneratorId) -> &mut GraphPatternBuilder {
        &mut self.builders[id.0]
    }

    pub fn parent(&self, id: GeneratorId) -> Option<GeneratorId> {
        self.parents[id.0]
    }

    pub fn children(&self, id: GeneratorId) -> &[GeneratorId] {
        &self.children[id.0]
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Number of scopes between `id` and the root
    pub fn depth(&self, id: GeneratorId) -> usize {
        let mut depth = 0;
        let mut current = self.parents[id.0];
        while let Some(parent) = current {
            depth += 1;
            current = self.parents[parent.0];
        }
        depth
    }

    /// Whether `ancestor` is `id` or one of its enclosing scopes
    pub fn encloses(&self, ancestor: GeneratorId, id: GeneratorId) -> bool {
        let mut current = Some(id);
        while let Some(scope) = current {
            if scope == ancestor {
                return true;
            }
            current = self.parents[scope.0];
        }
        false
    }

    /// Resolve an item name from `scope` outwards.
    ///
    /// A hit in an enclosing scope marks the variable as correlated in
    /// `scope` and every scope between it and the owner, so each nested
    /// block projects it.
    pub fn resolve_item(&mut self, scope: GeneratorId, item_name: &str) -> Option<Variable> {
        let mut path = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(variable) = self.builders[id.0].item(item_name).cloned() {
                for between in path {
                    self.builder_mut(between).mark_correlated(variable.clone());
                }
                return Some(variable);
            }
            path.push(id);
            current = self.parents[id.0];
        }
        None
    }

    /// Visit every builder reachable from the root, children before parents
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(GeneratorId, &GraphPatternBuilder),
    {
        self.visit_post_order(self.root(), &mut visit);
    }

    fn visit_post_order<F>(&self, id: GeneratorId, visit: &mut F)
    where
        F: FnMut(GeneratorId, &GraphPatternBuilder),
    {
        for child in &self.children[id.0] {
            self.visit_post_order(*child, visit);
        }
        visit(id, &self.builders[id.0]);
    }

    /// Block document of the subtree rooted at `id`
    pub fn block(&self, id: GeneratorId, ctx: &mut RenderContext) -> QueryBlock {
        let children: Vec<QueryBlock> = self.children[id.0]
            .iter()
            .map(|child| self.block(*child, ctx))
            .collect();
        let mut block = self.builders[id.0].to_block(ctx);
        block.children = children;
        block
    }

    /// Complete query text: prologue followed by the nested root block
    pub fn assemble(&self, prefixes: &PrefixMap) -> String {
        let mut ctx = RenderContext::new(prefixes);
        let block = self.block(self.root(), &mut ctx);
        log::debug!(
            "Assembled {} query blocks from {} builders",
            block.block_count(),
            self.len()
        );
        format!("{}{}", ctx.prologue(), block)
    }
}
