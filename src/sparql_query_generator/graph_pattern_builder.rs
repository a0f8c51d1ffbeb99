//! Per-scope SELECT block accumulator.
//!
//! A [`GraphPatternBuilder`] collects everything one query scope contributes
//! to the generated query:
//! - subject / predicate / object variables of the scope's source
//! - item bindings (the scope's symbol table)
//! - member bindings, so `x.Name` used twice shares one variable
//! - triple patterns and FILTER expressions
//! - an optional aggregate that replaces the object in the selection
//! - correlated variables taken from enclosing scopes
//! - ordering and offset
//!
//! # Selection
//!
//! ```text
//! aggregate present:  SELECT <correlated> (AGG(?o) AS ?alias) ... GROUP BY <correlated>
//! no aggregate:       SELECT <correlated> ?s ?p ?o ...
//! ```
//!
//! The selection variable (what callers read back, and what an enclosing
//! scope compares against) is the aggregate alias when there is one, the
//! object variable otherwise.

use std::collections::HashMap;

use oxrdf::{NamedNode, Variable};

use super::query_block::QueryBlock;
use super::term::{Aggregate, OrderCondition, SparqlExpr, Term, TriplePattern};
use super::to_sparql::{bracketed, RenderContext, ToSparql};
use crate::resource_mapping::PrefixMap;

#[derive(Debug, Clone, Default)]
pub struct GraphPatternBuilder {
    subject: Option<Variable>,
    predicate: Option<Variable>,
    object: Option<Variable>,
    items: HashMap<String, Variable>,
    member_bindings: HashMap<(Term, NamedNode), Variable>,
    patterns: Vec<TriplePattern>,
    filters: Vec<SparqlExpr>,
    aggregate: Option<Aggregate>,
    correlated: Vec<Variable>,
    orderings: Vec<OrderCondition>,
    offset: u64,
}

impl GraphPatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_subject(&mut self, variable: Variable) {
        self.subject = Some(variable);
    }

    pub fn set_predicate(&mut self, variable: Variable) {
        self.predicate = Some(variable);
    }

    pub fn set_object(&mut self, variable: Variable) {
        self.object = Some(variable);
    }

    pub fn subject(&self) -> Option<&Variable> {
        self.subject.as_ref()
    }

    pub fn predicate(&self) -> Option<&Variable> {
        self.predicate.as_ref()
    }

    pub fn object(&self) -> Option<&Variable> {
        self.object.as_ref()
    }

    pub fn bind_item(&mut self, item_name: &str, variable: Variable) {
        self.items.insert(item_name.to_string(), variable);
    }

    /// Variable bound to an item in this scope only
    pub fn item(&self, item_name: &str) -> Option<&Variable> {
        self.items.get(item_name)
    }

    pub fn member_binding(&self, base: &Term, property: &NamedNode) -> Option<&Variable> {
        self.member_bindings.get(&(base.clone(), property.clone()))
    }

    pub fn bind_member(&mut self, base: Term, property: NamedNode, variable: Variable) {
        self.member_bindings.insert((base, property), variable);
    }

    /// Add a triple pattern; returns false if an identical one is already present
    pub fn add_triple(&mut self, triple: TriplePattern) -> bool {
        if self.patterns.contains(&triple) {
            return false;
        }
        self.patterns.push(triple);
        true
    }

    pub fn add_filter(&mut self, filter: SparqlExpr) {
        self.filters.push(filter);
    }

    /// Set the aggregate selection, replacing any earlier one
    pub fn set_aggregate(&mut self, aggregate: Aggregate) {
        if let Some(previous) = &self.aggregate {
            log::trace!("Replacing aggregate {} with {}", previous, aggregate);
        }
        self.aggregate = Some(aggregate);
    }

    pub fn add_ordering(&mut self, ordering: OrderCondition) {
        self.orderings.push(ordering);
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    /// Record a variable of an enclosing scope used by this one
    pub fn mark_correlated(&mut self, variable: Variable) {
        if !self.correlated.contains(&variable) {
            self.correlated.push(variable);
        }
    }

    pub fn correlated(&self) -> &[Variable] {
        &self.correlated
    }

    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    pub fn orderings(&self) -> &[OrderCondition] {
        &self.orderings
    }

    /// Aggregate alias if present, otherwise the object variable
    pub fn selection_variable(&self) -> Option<&Variable> {
        match &self.aggregate {
            Some(aggregate) => Some(&aggregate.alias),
            None => self.object.as_ref(),
        }
    }

    /// Variables bound by this block's projection
    pub fn projected_variables(&self) -> Vec<&Variable> {
        let mut projected: Vec<&Variable> = self.correlated.iter().collect();
        let own = match &self.aggregate {
            Some(aggregate) => vec![Some(&aggregate.alias)],
            None => vec![
                self.subject.as_ref(),
                self.predicate.as_ref(),
                self.object.as_ref(),
            ],
        };
        for variable in own.into_iter().flatten() {
            if !projected.contains(&variable) {
                projected.push(variable);
            }
        }
        projected
    }

    /// Build this scope's block without any nested children
    pub fn to_block(&self, ctx: &mut RenderContext) -> QueryBlock {
        let mut projection: Vec<String> =
            self.correlated.iter().map(|v| v.to_string()).collect();
        match &self.aggregate {
            Some(aggregate) => projection.push(aggregate.to_sparql(ctx)),
            None => {
                for variable in self.projected_variables().into_iter().skip(self.correlated.len()) {
                    projection.push(variable.to_string());
                }
            }
        }

        let mut elements: Vec<String> = self
            .patterns
            .iter()
            .map(|triple| triple.to_sparql(ctx))
            .collect();
        for filter in &self.filters {
            elements.push(format!("FILTER {}", bracketed(filter, ctx)));
        }

        let group_by = if self.aggregate.is_some() {
            self.correlated.iter().map(|v| v.to_string()).collect()
        } else {
            Vec::new()
        };

        QueryBlock {
            projection,
            children: Vec::new(),
            elements,
            group_by,
            order_by: self
                .orderings
                .iter()
                .map(|ordering| ordering.to_sparql(ctx))
                .collect(),
            offset: self.offset,
        }
    }

    /// Render this scope alone as a complete query, prologue included
    pub fn render(&self, prefixes: &PrefixMap) -> String {
        let mut ctx = RenderContext::new(prefixes);
        let block = self.to_block(&mut ctx);
        format!("{}{}", ctx.prologue(), block)
    }
}
