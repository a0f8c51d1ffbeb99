use sparql_linq::config::CompilerConfig;
use sparql_linq::query_model::{
    BodyClause, Expression, JoinClause, OrderingDirection, QueryModel, ResultOperator,
    StringMethod,
};
use sparql_linq::{compile_query, TranslationError};

use super::common::{assert_valid_sparql, compile, social_mapping};

fn name_of(item: &str) -> Expression {
    Expression::member(Expression::source(item), "Name", "Person")
}

fn age_of(item: &str) -> Expression {
    Expression::member(Expression::source(item), "Age", "Person")
}

#[test]
fn test_count_of_filtered_source() {
    let query = QueryModel::from_item("x", "Person")
        .with_where(Expression::equal(name_of("x"), Expression::string("A")))
        .with_result_operator(ResultOperator::Count);

    let compiled = compile(&query).unwrap();
    assert_eq!(
        compiled.query,
        "PREFIX schema: <http://schema.org/>\n\
         SELECT (COUNT(?o_) AS ?count_o_) WHERE { ?x ?p_ ?o_ . ?x schema:name ?name . FILTER (?name = \"A\") }"
    );
    assert_eq!(compiled.selection.as_str(), "count_o_");
    assert_eq!(compiled.subject.as_ref().map(|v| v.as_str()), Some("x"));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_of_type_restricts_subject() {
    let query = QueryModel::from_item("x", "Thing")
        .with_result_operator(ResultOperator::OfType("Thing".to_string()));

    let compiled = compile(&query).unwrap();
    assert!(compiled
        .query
        .contains("?x rdf:type <http://example.org/Class> ."));
    assert!(compiled
        .query
        .starts_with("PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>\n"));
    assert_eq!(compiled.selection.as_str(), "o_");
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_of_type_with_prefixed_class() {
    let query = QueryModel::from_item("x", "Person")
        .with_result_operator(ResultOperator::OfType("Person".to_string()));

    let compiled = compile(&query).unwrap();
    assert!(compiled.query.contains("?x rdf:type schema:Person ."));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_ordering_and_offset() {
    let query = QueryModel::from_item("x", "Person")
        .with_ordering(name_of("x"), OrderingDirection::Descending)
        .with_result_operator(ResultOperator::Skip(10));

    let compiled = compile(&query).unwrap();
    assert_eq!(
        compiled.query,
        "PREFIX schema: <http://schema.org/>\n\
         SELECT ?x ?p_ ?o_ WHERE { ?x ?p_ ?o_ . ?x schema:name ?name . } ORDER BY DESC(?name) OFFSET 10"
    );
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_first_and_last_order_the_minimum() {
    let first = compile(&QueryModel::from_item("x", "Person").with_result_operator(ResultOperator::First))
        .unwrap();
    let last = compile(&QueryModel::from_item("x", "Person").with_result_operator(ResultOperator::Last))
        .unwrap();

    assert_eq!(
        first.query,
        "SELECT (MIN(?o_) AS ?min_o_) WHERE { ?x ?p_ ?o_ . } ORDER BY ASC(?min_o_)"
    );
    assert_eq!(
        last.query,
        "SELECT (MIN(?o_) AS ?min_o_) WHERE { ?x ?p_ ?o_ . } ORDER BY DESC(?min_o_)"
    );
    assert_valid_sparql(&first.query);
    assert_valid_sparql(&last.query);
}

#[test]
fn test_combined_conditions_are_valid_sparql() {
    let predicate = Expression::and_also(
        Expression::or_else(
            Expression::method_call(name_of("x"), StringMethod::Contains, vec![Expression::string("an")]),
            Expression::method_call(
                Expression::method_call(name_of("x"), StringMethod::ToUpper, vec![]),
                StringMethod::StartsWith,
                vec![Expression::string("J")],
            ),
        ),
        Expression::not(Expression::greater_than(age_of("x"), Expression::integer(65))),
    );
    let query = QueryModel::from_item("x", "Person")
        .with_where(predicate)
        .with_ordering(age_of("x"), OrderingDirection::Ascending);

    let compiled = compile(&query).unwrap();
    assert!(compiled.query.contains(
        "FILTER ((CONTAINS(?name, \"an\") || STRSTARTS(UCASE(?name), \"J\")) && !(?age > 65))"
    ));
    assert!(compiled.query.ends_with("ORDER BY ASC(?age)"));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_uri_constants_compare_resources() {
    let query = QueryModel::from_item("x", "Person").with_where(Expression::equal(
        Expression::source("x"),
        Expression::uri("http://example.org/people/alice"),
    ));

    let compiled = compile(&query).unwrap();
    assert!(compiled
        .query
        .contains("FILTER (?x = <http://example.org/people/alice>)"));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_without_prefixes_every_iri_is_full() {
    let query = QueryModel::from_item("x", "Person")
        .with_where(Expression::equal(name_of("x"), Expression::string("A")))
        .with_result_operator(ResultOperator::OfType("Person".to_string()));
    let config = CompilerConfig {
        emit_prefixes: false,
        ..CompilerConfig::default()
    };

    let compiled = compile_query(&query, &social_mapping(), &config).unwrap();
    assert!(!compiled.query.contains("PREFIX"));
    assert!(compiled.query.contains(
        "?x <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> ."
    ));
    assert_valid_sparql(&compiled.query);
}

#[test]
fn test_failures_produce_no_query() {
    let unmapped_type = QueryModel::from_item("x", "Person")
        .with_result_operator(ResultOperator::OfType("Robot".to_string()));
    assert_eq!(
        compile(&unmapped_type).unwrap_err(),
        TranslationError::MissingTypeMapping {
            resource_type: "Robot".to_string()
        }
    );

    let take = QueryModel::from_item("x", "Person").with_result_operator(ResultOperator::Take(3));
    assert_eq!(
        compile(&take).unwrap_err(),
        TranslationError::UnsupportedOperator { operator: "Take" }
    );

    let join = QueryModel::from_item("x", "Person").with_body_clause(BodyClause::Join(JoinClause {
        item_name: "y".to_string(),
        item_type: "Person".to_string(),
        inner_sequence: Expression::source("people"),
        outer_key_selector: name_of("x"),
        inner_key_selector: name_of("y"),
    }));
    assert_eq!(
        compile(&join).unwrap_err(),
        TranslationError::UnsupportedClause { clause: "join" }
    );

    let unmapped_member = QueryModel::from_item("x", "Person").with_where(Expression::equal(
        Expression::member(Expression::source("x"), "Email", "Person"),
        Expression::string("a@b.c"),
    ));
    assert!(matches!(
        compile(&unmapped_member),
        Err(TranslationError::MissingPropertyMapping { .. })
    ));
}
