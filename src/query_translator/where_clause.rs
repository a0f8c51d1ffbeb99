//! WHERE clause processing.
//!
//! Sub-queries inside the predicate are translated first, each into its own
//! child scope, so the filter can reference their selection variables:
//!
//! ```text
//! where x.Accounts.Count() > 2
//! → child scope:  SELECT ?x (COUNT(?accounts) AS ?count_accounts) ... GROUP BY ?x
//! → filter:       FILTER (?count_accounts > 2)
//! ```

use super::errors::TranslationError;
use super::expression_translator::translate_predicate;
use super::model_walker::translate_sub_query;
use super::translation_ctx::TranslationCtx;
use crate::query_model::WhereClause;
use crate::sparql_query_generator::GeneratorId;

pub fn evaluate_where_clause(
    ctx: &mut TranslationCtx,
    where_clause: &WhereClause,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    let mut sub_queries = Vec::new();
    where_clause.predicate.collect_sub_queries(&mut sub_queries);
    for sub_query in sub_queries {
        translate_sub_query(ctx, sub_query, scope)?;
    }

    let filter = translate_predicate(ctx, &where_clause.predicate, scope)?;
    ctx.builder_mut(scope).add_filter(filter);
    Ok(())
}
