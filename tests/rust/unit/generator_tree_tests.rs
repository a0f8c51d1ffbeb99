use sparql_linq::query_model::{Expression, QueryModel, ResultOperator, SubQueryId};
use sparql_linq::query_translator::QueryModelWalker;
use sparql_linq::resource_mapping::{PrefixMap, ResourceMapping, TypeMetadata};

fn mapping() -> ResourceMapping {
    let mut mapping = ResourceMapping::new();
    mapping.add_prefix("ex", "http://example.org/").unwrap();
    mapping.add_property("Person", "Friends", "ex:friend").unwrap();
    mapping.add_property("Person", "Name", "ex:name").unwrap();
    mapping
}

fn friends_query() -> QueryModel {
    let friends = QueryModel::from_expression(
        "f",
        "Person",
        Expression::member(Expression::source("x"), "Friends", "Person"),
    )
    .with_result_operator(ResultOperator::Count);
    QueryModel::from_item("x", "Person").with_where(Expression::greater_than(
        Expression::sub_query(9, friends),
        Expression::integer(3),
    ))
}

#[test]
fn test_assembly_is_idempotent() {
    let mapping = mapping();
    let tree = QueryModelWalker::new(&mapping, 16)
        .walk(&friends_query())
        .unwrap();

    let prefixes = mapping.prefixes();
    assert_eq!(tree.assemble(&prefixes), tree.assemble(&prefixes));
    let root = tree.builder(tree.root());
    assert_eq!(root.render(&prefixes), root.render(&prefixes));
}

#[test]
fn test_every_builder_visited_once_children_first() {
    let mapping = mapping();
    let tree = QueryModelWalker::new(&mapping, 16)
        .walk(&friends_query())
        .unwrap();

    let child = tree.generator_for(SubQueryId(9)).unwrap();
    let mut visited = Vec::new();
    tree.traverse(|id, _| visited.push(id));
    assert_eq!(visited, vec![child, tree.root()]);
}

#[test]
fn test_prologue_emitted_once_for_whole_tree() {
    let mapping = mapping();
    let tree = QueryModelWalker::new(&mapping, 16)
        .walk(&friends_query())
        .unwrap();

    let text = tree.assemble(&mapping.prefixes());
    assert_eq!(text.matches("PREFIX ex:").count(), 1);
    assert!(text.starts_with("PREFIX ex: <http://example.org/>\nSELECT ?x ?p_ ?o_ WHERE { { SELECT ?x (COUNT(?friends) AS ?count_friends)"));

    // Each builder rendered on its own still carries the prologue it needs
    let child = tree.builder(tree.generator_for(SubQueryId(9)).unwrap());
    assert!(child.render(&mapping.prefixes()).starts_with("PREFIX ex:"));
    assert!(!tree.builder(tree.root()).render(&PrefixMap::empty()).contains("PREFIX"));
}
