//! Expression translation.
//!
//! Converts query-model expressions into SPARQL expressions inside one
//! scope. Member accesses emit their triple patterns into the scope's
//! builder as a side effect:
//!
//! ```text
//! x.Name == "A"
//! → ?x schema:name ?name .          (triple, added to the builder)
//! → (?name = "A")                   (returned filter expression)
//! ```
//!
//! Sub-query expressions are never translated here; they must already have
//! a builder registered for their id, and resolve to its selection variable.

use oxrdf::{Literal, NamedNode, Variable};

use super::errors::TranslationError;
use super::translation_ctx::TranslationCtx;
use crate::query_model::{
    BinaryExpression, BinaryOperator, Constant, Expression, MemberExpression,
    MethodCallExpression, Ordering, OrderingDirection, StringMethod, SubQueryExpression,
};
use crate::sparql_query_generator::{
    GeneratorId, OrderCondition, SortDirection, SparqlExpr, SparqlFunction, SparqlOperator, Term,
    TriplePattern,
};

/// Translate a boolean condition
pub fn translate_predicate(
    ctx: &mut TranslationCtx,
    expression: &Expression,
    scope: GeneratorId,
) -> Result<SparqlExpr, TranslationError> {
    match expression {
        Expression::Binary(binary) => match comparison_operator(binary.operator) {
            Some(operator) => {
                let left = translate_value(ctx, &binary.left, scope)?;
                let right = translate_value(ctx, &binary.right, scope)?;
                Ok(SparqlExpr::binary(operator, left, right))
            }
            None => match binary.operator {
                BinaryOperator::AndAlso | BinaryOperator::OrElse => {
                    let operator = if binary.operator == BinaryOperator::AndAlso {
                        SparqlOperator::And
                    } else {
                        SparqlOperator::Or
                    };
                    let left = translate_predicate(ctx, &binary.left, scope)?;
                    let right = translate_predicate(ctx, &binary.right, scope)?;
                    Ok(SparqlExpr::binary(operator, left, right))
                }
                BinaryOperator::Coalesce => translate_binary_value(ctx, binary, scope),
                _ => Err(TranslationError::UnsupportedExpression {
                    reason: format!("{:?} is not a condition", binary.operator),
                }),
            },
        },
        Expression::Not(inner) => Ok(SparqlExpr::Not(Box::new(translate_predicate(
            ctx, inner, scope,
        )?))),
        Expression::MethodCall(call) => match call.method {
            StringMethod::Contains | StringMethod::StartsWith | StringMethod::EndsWith => {
                translate_method_call(ctx, call, scope)
            }
            StringMethod::ToLower | StringMethod::ToUpper => {
                Err(TranslationError::UnsupportedExpression {
                    reason: format!("{:?} does not produce a condition", call.method),
                })
            }
        },
        // Existence test: the sub-select produced a binding
        Expression::SubQuery(sub_query) => {
            let selection = sub_query_selection(ctx, sub_query)?;
            Ok(SparqlExpr::call(
                SparqlFunction::Bound,
                vec![selection.into()],
            ))
        }
        Expression::Member(_) | Expression::Constant(Constant::Boolean(_)) => {
            translate_value(ctx, expression, scope)
        }
        Expression::Constant(constant) => Err(TranslationError::UnsupportedExpression {
            reason: format!("constant {:?} is not a condition", constant),
        }),
        Expression::QuerySourceReference(item) => Err(TranslationError::UnsupportedExpression {
            reason: format!("query item `{}` is not a condition", item),
        }),
    }
}

/// Translate a value: member path, literal, arithmetic or sub-query result
pub fn translate_value(
    ctx: &mut TranslationCtx,
    expression: &Expression,
    scope: GeneratorId,
) -> Result<SparqlExpr, TranslationError> {
    match expression {
        Expression::QuerySourceReference(item) => Ok(ctx.resolve_item(scope, item)?.into()),
        Expression::Member(member) => Ok(translate_member(ctx, member, scope)?.into()),
        Expression::Constant(constant) => Ok(SparqlExpr::Term(constant_term(constant)?)),
        Expression::Binary(binary) => translate_binary_value(ctx, binary, scope),
        Expression::Not(_) => translate_predicate(ctx, expression, scope),
        Expression::MethodCall(call) => translate_method_call(ctx, call, scope),
        Expression::SubQuery(sub_query) => Ok(sub_query_selection(ctx, sub_query)?.into()),
    }
}

/// Translate an ordering key and append it to the scope's ordering list
pub fn translate_ordering(
    ctx: &mut TranslationCtx,
    ordering: &Ordering,
    scope: GeneratorId,
) -> Result<(), TranslationError> {
    let expression = translate_value(ctx, &ordering.expression, scope)?;
    let direction = match ordering.direction {
        OrderingDirection::Ascending => SortDirection::Ascending,
        OrderingDirection::Descending => SortDirection::Descending,
    };
    ctx.builder_mut(scope).add_ordering(OrderCondition {
        expression,
        direction,
    });
    Ok(())
}

/// Resolve a member path to the variable holding its value.
///
/// A (base, property) pair already bound in the scope reuses its variable;
/// otherwise a fresh variable is allocated and the triple
/// `base property ?var` is added.
pub fn translate_member(
    ctx: &mut TranslationCtx,
    member: &MemberExpression,
    scope: GeneratorId,
) -> Result<Variable, TranslationError> {
    let base = match translate_value(ctx, &member.expression, scope)? {
        SparqlExpr::Term(term) if term.is_resource() => term,
        SparqlExpr::Term(Term::Literal(literal)) => {
            return Err(TranslationError::UnsupportedExpression {
                reason: format!("member `{}` accessed on literal {}", member.member, literal),
            })
        }
        _ => {
            return Err(TranslationError::UnsupportedExpression {
                reason: format!("member `{}` accessed on a computed value", member.member),
            })
        }
    };

    let property = ctx
        .metadata()
        .resolve_property_uri(&member.declaring_type, &member.member)
        .ok_or_else(|| TranslationError::MissingPropertyMapping {
            resource_type: member.declaring_type.clone(),
            member: member.member.clone(),
        })?;

    if let Some(bound) = ctx.builder(scope).member_binding(&base, &property) {
        return Ok(bound.clone());
    }

    let variable = ctx.allocate(&member.member.to_lowercase())?;
    log::trace!(
        "Binding {}.{} to {} in {}",
        base,
        member.member,
        variable,
        scope
    );
    let builder = ctx.builder_mut(scope);
    builder.add_triple(TriplePattern::new(
        base.clone(),
        property.clone(),
        variable.clone(),
    ));
    builder.bind_member(base, property, variable.clone());
    Ok(variable)
}

fn translate_binary_value(
    ctx: &mut TranslationCtx,
    binary: &BinaryExpression,
    scope: GeneratorId,
) -> Result<SparqlExpr, TranslationError> {
    let operator = match binary.operator {
        BinaryOperator::Add => SparqlOperator::Add,
        BinaryOperator::Subtract => SparqlOperator::Subtract,
        BinaryOperator::Multiply => SparqlOperator::Multiply,
        BinaryOperator::Divide => SparqlOperator::Divide,
        BinaryOperator::Coalesce => {
            let left = translate_value(ctx, &binary.left, scope)?;
            let right = translate_value(ctx, &binary.right, scope)?;
            return Ok(SparqlExpr::call(SparqlFunction::Coalesce, vec![left, right]));
        }
        BinaryOperator::Modulo => {
            return Err(TranslationError::UnsupportedExpression {
                reason: "SPARQL has no modulo operator".to_string(),
            })
        }
        // Comparisons and connectives used as values
        _ => {
            return translate_predicate(ctx, &Expression::Binary(binary.clone()), scope);
        }
    };
    let left = translate_value(ctx, &binary.left, scope)?;
    let right = translate_value(ctx, &binary.right, scope)?;
    Ok(SparqlExpr::binary(operator, left, right))
}

fn translate_method_call(
    ctx: &mut TranslationCtx,
    call: &MethodCallExpression,
    scope: GeneratorId,
) -> Result<SparqlExpr, TranslationError> {
    if call.arguments.len() != call.method.arity() {
        return Err(TranslationError::UnsupportedExpression {
            reason: format!(
                "{:?} takes {} argument(s), got {}",
                call.method,
                call.method.arity(),
                call.arguments.len()
            ),
        });
    }

    let function = match call.method {
        StringMethod::Contains => SparqlFunction::Contains,
        StringMethod::StartsWith => SparqlFunction::StrStarts,
        StringMethod::EndsWith => SparqlFunction::StrEnds,
        StringMethod::ToLower => SparqlFunction::LCase,
        StringMethod::ToUpper => SparqlFunction::UCase,
    };

    let mut arguments = vec![translate_value(ctx, &call.target, scope)?];
    for argument in &call.arguments {
        arguments.push(translate_value(ctx, argument, scope)?);
    }
    Ok(SparqlExpr::call(function, arguments))
}

fn sub_query_selection(
    ctx: &TranslationCtx,
    sub_query: &SubQueryExpression,
) -> Result<Variable, TranslationError> {
    let generator = ctx.current_generator_for(sub_query.id)?;
    ctx.builder(generator)
        .selection_variable()
        .cloned()
        .ok_or(TranslationError::EmptyScope("selection"))
}

fn comparison_operator(operator: BinaryOperator) -> Option<SparqlOperator> {
    match operator {
        BinaryOperator::Equal => Some(SparqlOperator::Equal),
        BinaryOperator::NotEqual => Some(SparqlOperator::NotEqual),
        BinaryOperator::LessThan => Some(SparqlOperator::Less),
        BinaryOperator::LessThanOrEqual => Some(SparqlOperator::LessOrEqual),
        BinaryOperator::GreaterThan => Some(SparqlOperator::Greater),
        BinaryOperator::GreaterThanOrEqual => Some(SparqlOperator::GreaterOrEqual),
        _ => None,
    }
}

/// RDF term for a constant. `Null` has no RDF counterpart.
pub fn constant_term(constant: &Constant) -> Result<Term, TranslationError> {
    match constant {
        Constant::String(value) => Ok(Literal::new_simple_literal(value).into()),
        Constant::Integer(value) => Ok(Literal::from(*value).into()),
        Constant::Double(value) => Ok(Literal::from(*value).into()),
        Constant::Boolean(value) => Ok(Literal::from(*value).into()),
        Constant::Uri(iri) => NamedNode::new(iri.as_str())
            .map(Term::NamedNode)
            .map_err(|e| TranslationError::InvalidIri {
                iri: iri.clone(),
                reason: e.to_string(),
            }),
        Constant::Null => Err(TranslationError::UnsupportedExpression {
            reason: "null constants cannot be expressed as RDF terms".to_string(),
        }),
    }
}
