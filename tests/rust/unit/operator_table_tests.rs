//! Result operator table, checked through complete compilation passes.

use sparql_linq::config::CompilerConfig;
use sparql_linq::query_model::{Expression, QueryModel, ResultOperator};
use sparql_linq::resource_mapping::ResourceMapping;
use sparql_linq::{compile_query, TranslationError};
use test_case::test_case;

fn compile(operators: Vec<ResultOperator>) -> Result<String, TranslationError> {
    let mut mapping = ResourceMapping::new();
    mapping.add_class("T", "http://example.org/Class").unwrap();

    let mut query = QueryModel::from_item("x", "T");
    for operator in operators {
        query = query.with_result_operator(operator);
    }
    compile_query(&query, &mapping, &CompilerConfig::default()).map(|compiled| compiled.query)
}

#[test_case(ResultOperator::Any, "SAMPLE(?o_)" ; "any")]
#[test_case(ResultOperator::Average, "AVG(?o_)" ; "average")]
#[test_case(ResultOperator::Count, "COUNT(?o_)" ; "count")]
#[test_case(ResultOperator::Sum, "SUM(?o_)" ; "sum")]
#[test_case(ResultOperator::Max, "MAX(?o_)" ; "max")]
#[test_case(ResultOperator::Min, "MIN(?o_)" ; "min")]
#[test_case(ResultOperator::First, "MIN(?o_)" ; "first")]
#[test_case(ResultOperator::Last, "MIN(?o_)" ; "last")]
fn test_aggregate_selection(operator: ResultOperator, aggregate: &str) {
    let query = compile(vec![operator]).unwrap();
    let selection = query
        .split_once(" WHERE")
        .map(|(head, _)| head.to_string())
        .unwrap();
    assert!(
        selection.starts_with(&format!("SELECT ({} AS ?", aggregate)),
        "{}",
        query
    );
}

#[test]
fn test_skip_offset() {
    assert!(compile(vec![ResultOperator::Skip(5)])
        .unwrap()
        .ends_with("} OFFSET 5"));
    // Last write wins
    assert!(compile(vec![ResultOperator::Skip(5), ResultOperator::Skip(7)])
        .unwrap()
        .ends_with("} OFFSET 7"));
}

#[test]
fn test_of_type_triple() {
    let query = compile(vec![ResultOperator::OfType("T".to_string())]).unwrap();
    assert!(query.contains("?x rdf:type <http://example.org/Class> ."));
}

#[test]
fn test_second_aggregate_replaces_first() {
    let query = compile(vec![ResultOperator::Sum, ResultOperator::Count]).unwrap();
    assert!(query.starts_with("SELECT (COUNT(?o_) AS ?count_o_) WHERE"));
    assert!(!query.contains("SUM"));
}

#[test_case(ResultOperator::Take(1), "Take" ; "take")]
#[test_case(ResultOperator::Distinct, "Distinct" ; "distinct")]
#[test_case(ResultOperator::Reverse, "Reverse" ; "reverse")]
#[test_case(ResultOperator::Contains(Expression::string("a")), "Contains" ; "contains")]
fn test_unsupported_operator(operator: ResultOperator, name: &'static str) {
    assert_eq!(
        compile(vec![ResultOperator::Count, operator]),
        Err(TranslationError::UnsupportedOperator { operator: name })
    );
}
