//! SPARQL text generation.
//!
//! [`GraphPatternBuilder`] accumulates one query scope, [`GeneratorTree`]
//! owns every builder of a compilation pass and assembles them into nested
//! sub-selects. Rendering goes through the [`ToSparql`] trait and a
//! [`RenderContext`] that abbreviates IRIs with registered prefixes.

pub mod generator_tree;
pub mod graph_pattern_builder;
pub mod query_block;
pub mod term;
pub mod to_sparql;

pub use generator_tree::{GeneratorId, GeneratorTree};
pub use graph_pattern_builder::GraphPatternBuilder;
pub use query_block::QueryBlock;
pub use term::{
    Aggregate, AggregateFunction, OrderCondition, SortDirection, SparqlExpr, SparqlFunction,
    SparqlOperator, Term, TriplePattern,
};
pub use to_sparql::{RenderContext, ToSparql};
