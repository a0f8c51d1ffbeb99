use super::errors::TranslationError;
use super::expression_translator::translate_ordering;
use super::translation_ctx::TranslationCtx;
use crate::query_model::OrderByClause;
use crate::sparql_query_generator::GeneratorId;

/// Forward each ordering, in clause order, to the expression translator.
///
/// Ordering keys are not searched for sub-queries; a sub-query used as a
/// key has no builder and fails with `UnknownSubQuery`.
pub fn evaluate_order_by_clause(
    ctx: &mut TranslationCtx,
    order_by_clause: &OrderByClause,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    for ordering in &order_by_clause.orderings {
        translate_ordering(ctx, ordering, scope)?;
    }
    Ok(())
}
