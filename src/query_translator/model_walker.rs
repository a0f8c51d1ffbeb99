//! Query model walker.
//!
//! Drives one compilation pass over a [`QueryModel`]:
//!
//! 1. Reject untranslatable body clauses anywhere in the tree, before any
//!    builder exists.
//! 2. Seed the scope from the main `from` clause.
//! 3. Evaluate body clauses in order (`where`, `order by`).
//! 4. Apply result operators in order.
//!
//! Sub-queries recurse through the same steps in a child scope registered
//! under their [`SubQueryId`](crate::query_model::SubQueryId).

use super::errors::TranslationError;
use super::expression_translator::translate_value;
use super::order_by_clause::evaluate_order_by_clause;
use super::result_operators::apply_result_operator;
use super::translation_ctx::TranslationCtx;
use super::where_clause::evaluate_where_clause;
use crate::query_model::{BodyClause, Expression, MainFromClause, QueryModel, SubQueryExpression};
use crate::resource_mapping::TypeMetadata;
use crate::sparql_query_generator::{GeneratorId, GeneratorTree, SparqlExpr, Term, TriplePattern};

const PREDICATE_HINT: &str = "p_";
const OBJECT_HINT: &str = "o_";

pub struct QueryModelWalker<'a> {
    metadata: &'a dyn TypeMetadata,
    max_sub_query_depth: usize,
}

impl<'a> QueryModelWalker<'a> {
    pub fn new(metadata: &'a dyn TypeMetadata, max_sub_query_depth: usize) -> Self {
        Self {
            metadata,
            max_sub_query_depth,
        }
    }

    /// Translate a query model into a tree of graph pattern builders
    pub fn walk(&self, query: &QueryModel) -> Result<GeneratorTree, TranslationError> {
        validate_clauses(query)?;

        let mut ctx = TranslationCtx::new(self.metadata, self.max_sub_query_depth);
        let root = ctx.tree().root();
        visit_query_model(&mut ctx, query, root)?;

        log::debug!("Walked query model into {} builders", ctx.tree().len());
        Ok(ctx.into_tree())
    }
}

/// Fail on additional-from, join and group-join clauses, including those of
/// nested sub-queries.
pub fn validate_clauses(query: &QueryModel) -> Result<(), TranslationError> {
    for clause in &query.body_clauses {
        match clause {
            BodyClause::Where(_) | BodyClause::OrderBy(_) => {}
            BodyClause::AdditionalFrom(_) | BodyClause::Join(_) | BodyClause::GroupJoin(_) => {
                return Err(TranslationError::UnsupportedClause {
                    clause: clause.kind_name(),
                });
            }
        }
    }
    for sub_query in query.sub_queries() {
        validate_clauses(&sub_query.query_model)?;
    }
    Ok(())
}

fn visit_query_model(
    ctx: &mut TranslationCtx,
    query: &QueryModel,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    visit_main_from_clause(ctx, &query.main_from, scope)?;

    for clause in &query.body_clauses {
        log::trace!("Visiting {} clause in {}", clause.kind_name(), scope);
        match clause {
            BodyClause::Where(where_clause) => evaluate_where_clause(ctx, where_clause, scope)?,
            BodyClause::OrderBy(order_by) => evaluate_order_by_clause(ctx, order_by, scope)?,
            BodyClause::AdditionalFrom(_) | BodyClause::Join(_) | BodyClause::GroupJoin(_) => {
                return Err(TranslationError::UnsupportedClause {
                    clause: clause.kind_name(),
                });
            }
        }
    }

    for operator in &query.result_operators {
        apply_result_operator(ctx, operator, scope)?;
    }
    Ok(())
}

fn visit_main_from_clause(
    ctx: &mut TranslationCtx,
    main_from: &MainFromClause,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    match &main_from.from_expression {
        // Query over all resources: ?item ?p_ ?o_ .
        Expression::QuerySourceReference(_) => {
            let subject = ctx.allocate(&main_from.item_name)?;
            let predicate = ctx.allocate(PREDICATE_HINT)?;
            let object = ctx.allocate(OBJECT_HINT)?;

            let builder = ctx.builder_mut(scope);
            builder.bind_item(&main_from.item_name, subject.clone());
            builder.set_subject(subject.clone());
            builder.set_predicate(predicate.clone());
            builder.set_object(object.clone());
            builder.add_triple(TriplePattern::new(subject, predicate, object));
        }
        // Member chain, possibly rooted in a sub-query
        from_expression => {
            let mut sub_queries = Vec::new();
            from_expression.collect_sub_queries(&mut sub_queries);
            for sub_query in sub_queries {
                translate_sub_query(ctx, sub_query, scope)?;
            }

            let variable = match translate_value(ctx, from_expression, scope)? {
                SparqlExpr::Term(Term::Variable(variable)) => variable,
                other => {
                    return Err(TranslationError::UnsupportedExpression {
                        reason: format!(
                            "source of `{}` does not bind a variable: {:?}",
                            main_from.item_name, other
                        ),
                    })
                }
            };

            let builder = ctx.builder_mut(scope);
            builder.bind_item(&main_from.item_name, variable.clone());
            builder.set_subject(variable.clone());
            builder.set_object(variable);
        }
    }
    Ok(())
}

/// Translate a sub-query into a child scope of `scope`.
///
/// A sub-query id seen before keeps its first builder, provided that builder
/// is nested in `scope` or one of its enclosing scopes. Otherwise its
/// selection would not be joined into `scope` and the id is unknown there.
pub fn translate_sub_query(
    ctx: &mut TranslationCtx,
    sub_query: &SubQueryExpression,
    scope: GeneratorId,
) -> Result<GeneratorId, TranslationError> {
    if let Some(existing) = ctx.tree().generator_for(sub_query.id) {
        let visible = ctx
            .tree()
            .parent(existing)
            .is_some_and(|parent| ctx.tree().encloses(parent, scope));
        if !visible {
            log::warn!(
                "Sub-query {} was translated in {}, which is not visible from {}",
                sub_query.id,
                existing,
                scope
            );
            return Err(TranslationError::UnknownSubQuery { id: sub_query.id });
        }
        log::trace!("Sub-query {} already translated in {}", sub_query.id, existing);
        return Ok(existing);
    }

    let depth = ctx.tree().depth(scope) + 1;
    if depth > ctx.max_sub_query_depth() {
        return Err(TranslationError::SubQueryDepthExceeded {
            depth,
            max: ctx.max_sub_query_depth(),
        });
    }

    let child = ctx.tree_mut().create_builder();
    ctx.tree_mut().add_child(scope, child);
    ctx.tree_mut().register_for_node(sub_query.id, child);
    log::debug!(
        "Translating sub-query {} into {} (parent {}, depth {})",
        sub_query.id,
        child,
        scope,
        depth
    );

    visit_query_model(ctx, &sub_query.query_model, child)?;
    Ok(child)
}
