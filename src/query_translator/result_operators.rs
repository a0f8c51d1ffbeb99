//! Result operator processing.
//!
//! Each operator rewrites the selection of the scope it is visited in:
//!
//! ```text
//! Any      → SAMPLE(?o)        Average → AVG(?o)
//! Count    → COUNT(?o)         Sum     → SUM(?o)
//! Max      → MAX(?o)           Min     → MIN(?o)
//! First    → MIN(?o) + ORDER BY ASC(?min_o)
//! Last     → MIN(?o) + ORDER BY DESC(?min_o)
//! OfType T → ?s rdf:type <class of T> .
//! Skip n   → OFFSET n
//! ```
//!
//! First and Last both aggregate with MIN and differ only in sort
//! direction; the ordering key is the aggregate alias.

use oxrdf::vocab::rdf;

use super::errors::TranslationError;
use super::translation_ctx::TranslationCtx;
use crate::query_model::ResultOperator;
use crate::sparql_query_generator::{
    Aggregate, AggregateFunction, GeneratorId, OrderCondition, SortDirection, TriplePattern,
};

pub fn apply_result_operator(
    ctx: &mut TranslationCtx,
    operator: &ResultOperator,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    log::trace!("Applying result operator {} in {}", operator.name(), scope);

    match operator {
        ResultOperator::Any => set_aggregate(ctx, AggregateFunction::Sample, scope),
        ResultOperator::Average => set_aggregate(ctx, AggregateFunction::Avg, scope),
        ResultOperator::Count => set_aggregate(ctx, AggregateFunction::Count, scope),
        ResultOperator::Sum => set_aggregate(ctx, AggregateFunction::Sum, scope),
        ResultOperator::Max => set_aggregate(ctx, AggregateFunction::Max, scope),
        ResultOperator::Min => set_aggregate(ctx, AggregateFunction::Min, scope),
        ResultOperator::First => {
            set_aggregate(ctx, AggregateFunction::Min, scope)?;
            order_by_selection(ctx, SortDirection::Ascending, scope)
        }
        ResultOperator::Last => {
            set_aggregate(ctx, AggregateFunction::Min, scope)?;
            order_by_selection(ctx, SortDirection::Descending, scope)
        }
        ResultOperator::OfType(resource_type) => {
            let class = ctx.metadata().resolve_class_uri(resource_type).ok_or_else(|| {
                TranslationError::MissingTypeMapping {
                    resource_type: resource_type.clone(),
                }
            })?;
            let subject = ctx
                .builder(scope)
                .subject()
                .cloned()
                .ok_or(TranslationError::EmptyScope("subject"))?;
            ctx.builder_mut(scope)
                .add_triple(TriplePattern::new(subject, rdf::TYPE.into_owned(), class));
            Ok(())
        }
        ResultOperator::Skip(count) => {
            ctx.builder_mut(scope).set_offset(*count);
            Ok(())
        }
        ResultOperator::Take(_)
        | ResultOperator::Distinct
        | ResultOperator::Reverse
        | ResultOperator::Contains(_) => Err(TranslationError::UnsupportedOperator {
            operator: operator.name(),
        }),
    }
}

fn set_aggregate(
    ctx: &mut TranslationCtx,
    function: AggregateFunction,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    let argument = ctx
        .builder(scope)
        .object()
        .cloned()
        .ok_or(TranslationError::EmptyScope("object"))?;
    let alias = ctx.allocate(&format!(
        "{}_{}",
        function.name().to_lowercase(),
        argument.as_str()
    ))?;
    ctx.builder_mut(scope).set_aggregate(Aggregate {
        function,
        argument,
        alias,
    });
    Ok(())
}

fn order_by_selection(
    ctx: &mut TranslationCtx,
    direction: SortDirection,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    let selection = ctx
        .builder(scope)
        .selection_variable()
        .cloned()
        .ok_or(TranslationError::EmptyScope("selection"))?;
    ctx.builder_mut(scope).add_ordering(OrderCondition {
        expression: selection.into(),
        direction,
    });
    Ok(())
}
