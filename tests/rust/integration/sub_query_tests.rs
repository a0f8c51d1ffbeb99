//! Sub-queries become nested sub-selects, correlated with the enclosing
//! scope through the outer item variables they reference.

use sparql_linq::config::CompilerConfig;
use sparql_linq::query_model::{Expression, QueryModel, ResultOperator};
use sparql_linq::{compile_query, TranslationError};

use super::common::{assert_valid_sparql, compile, social_mapping};

fn accounts_of(item: &str) -> Expression {
    Expression::member(Expression::source(item), "Accounts", "Person")
}

fn nick_of(item: &str) -> Expression {
    Expression::member(Expression::source(item), "Nick", "OnlineAccount")
}

fn age_of(item: &str) -> Expression {
    Expression::member(Expression::source(item), "Age", "Person")
}

/// from a in x.Accounts where a.Nick == "bob" select a
fn accounts_named_bob(outer: &str) -> QueryModel {
    QueryModel::from_expression("a", "OnlineAccount", accounts_of(outer))
        .with_where(Expression::equal(nick_of("a"), Expression::string("bob")))
}

#[test]
fn test_any_becomes_bound_check_on_nested_select() {
    let sub_query = accounts_named_bob("x").with_result_operator(ResultOperator::Any);
    let query = QueryModel::from_item("x", "Person").with_where(Expression::sub_query(0, sub_query));

    let compiled = compile(&query).unwrap();
    assert_eq!(
        compiled.query,
        "PREFIX schema: <http://schema.org/>\n\
         PREFIX sioc: <http://rdfs.org/sioc/ns#>\n\
         SELECT ?x ?p_ ?o_ WHERE { \
         { SELECT ?x (SAMPLE(?accounts) AS ?sample_accounts) WHERE { ?x schema:account ?accounts . ?accounts sioc:name ?nick . FILTER (?nick = \"bob\") } GROUP BY ?x } \
         ?x ?p_ ?o_ . FILTER (BOUND(?sample_accounts)) }"
    );
    assert_eq!(compiled.selection.as_str(), "o_");
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_nested_block_follows_where_brace_and_leaves_parent_intact() {
    let sub_query = accounts_named_bob("x").with_result_operator(ResultOperator::Count);
    let query = QueryModel::from_item("x", "Person")
        .with_where(Expression::greater_than(
            Expression::sub_query(0, sub_query),
            Expression::integer(1),
        ))
        .with_result_operator(ResultOperator::Count);

    let compiled = compile(&query).unwrap();
    let body = compiled
        .query
        .split_once("SELECT (COUNT(?o_) AS ?count_o_) WHERE { ")
        .map(|(_, body)| body)
        .unwrap();
    assert!(body.starts_with("{ SELECT ?x (COUNT(?accounts) AS ?count_accounts) WHERE {"));

    let nested_end = body.find("GROUP BY ?x } ").unwrap() + "GROUP BY ?x } ".len();
    assert_eq!(
        &body[nested_end..],
        "?x ?p_ ?o_ . FILTER (?count_accounts > 1) }"
    );
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_correlation_propagates_through_intermediate_scopes() {
    // from b in Person where b.Age > x.Age select b).Any()
    let innermost = QueryModel::from_item("b", "Person")
        .with_where(Expression::greater_than(age_of("b"), age_of("x")))
        .with_result_operator(ResultOperator::Any);
    let middle = QueryModel::from_expression("a", "OnlineAccount", accounts_of("x"))
        .with_where(Expression::sub_query(1, innermost))
        .with_result_operator(ResultOperator::Any);
    let query = QueryModel::from_item("x", "Person").with_where(Expression::sub_query(0, middle));

    let compiled = compile(&query).unwrap();
    assert!(compiled.query.contains(
        "{ SELECT ?x (SAMPLE(?accounts) AS ?sample_accounts) WHERE { \
         { SELECT ?x (SAMPLE(?o_1) AS ?sample_o_1) WHERE { ?b ?p_1 ?o_1 . ?b schema:age ?age . ?x schema:age ?age1 . FILTER (?age > ?age1) } GROUP BY ?x } \
         ?x schema:account ?accounts . FILTER (BOUND(?sample_o_1)) } GROUP BY ?x }"
    ));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_uncorrelated_sub_query_has_no_group_by() {
    let adults = QueryModel::from_item("y", "Person").with_result_operator(ResultOperator::Max);
    let query = QueryModel::from_item("x", "Person").with_where(Expression::equal(
        age_of("x"),
        Expression::sub_query(0, adults),
    ));

    let compiled = compile(&query).unwrap();
    assert!(compiled
        .query
        .contains("{ SELECT (MAX(?o_1) AS ?max_o_1) WHERE { ?y ?p_1 ?o_1 . } }"));
    assert!(compiled.query.contains("FILTER (?age = ?max_o_1)"));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_sibling_sub_queries_keep_distinct_variables() {
    let first = accounts_named_bob("x").with_result_operator(ResultOperator::Count);
    let second = accounts_named_bob("x").with_result_operator(ResultOperator::Count);
    let query = QueryModel::from_item("x", "Person").with_where(Expression::and_also(
        Expression::greater_than(Expression::sub_query(0, first), Expression::integer(0)),
        Expression::greater_than(Expression::sub_query(1, second), Expression::integer(0)),
    ));

    let compiled = compile(&query).unwrap();
    assert!(compiled.query.contains("(COUNT(?accounts) AS ?count_accounts)"));
    assert!(compiled.query.contains("(COUNT(?accounts1) AS ?count_accounts1)"));
    assert!(compiled
        .query
        .contains("FILTER ((?count_accounts > 0) && (?count_accounts1 > 0))"));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_depth_limit_from_configuration() {
    let sub_query = accounts_named_bob("x").with_result_operator(ResultOperator::Any);
    let query = QueryModel::from_item("x", "Person").with_where(Expression::sub_query(0, sub_query));

    let config = CompilerConfig {
        max_sub_query_depth: 1,
        ..CompilerConfig::default()
    };
    assert!(compile_query(&query, &social_mapping(), &config).is_ok());

    let nested = QueryModel::from_item("y", "Person")
        .with_where(Expression::sub_query(1, accounts_named_bob("y").with_result_operator(ResultOperator::Any)))
        .with_result_operator(ResultOperator::Any);
    let query = QueryModel::from_item("x", "Person").with_where(Expression::sub_query(0, nested));
    assert_eq!(
        compile_query(&query, &social_mapping(), &config).unwrap_err(),
        TranslationError::SubQueryDepthExceeded { depth: 2, max: 1 }
    );
}

#[test]
fn test_source_over_member_of_sub_query_result() {
    // from f in (from y in Person).First().Accounts select f
    let first_person = QueryModel::from_item("y", "Person").with_result_operator(ResultOperator::First);
    let query = QueryModel::from_expression(
        "f",
        "OnlineAccount",
        Expression::member(Expression::sub_query(0, first_person), "Accounts", "Person"),
    );

    let compiled = compile(&query).unwrap();
    assert_eq!(
        compiled.query,
        "PREFIX schema: <http://schema.org/>\n\
         SELECT ?accounts WHERE { \
         { SELECT (MIN(?o_) AS ?min_o_) WHERE { ?y ?p_ ?o_ . } ORDER BY ASC(?min_o_) } \
         ?min_o_ schema:account ?accounts . }"
    );
    assert_eq!(compiled.selection.as_str(), "accounts");
    assert_eq!(compiled.subject.as_ref().map(|v| v.as_str()), Some("accounts"));
    assert_valid_sparql(&compiled.query);
}
