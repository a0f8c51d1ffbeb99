use std::collections::HashSet;

use sparql_linq::utils::variable_naming::{sanitize_variable_name, VariableNamer};
use test_case::test_case;

#[test_case("name", "name" ; "plain")]
#[test_case("first name", "first_name" ; "space")]
#[test_case("<>h__TransparentIdentifier0", "__h__TransparentIdentifier0" ; "compiler generated")]
#[test_case("é", "_" ; "non ascii")]
#[test_case("", "v" ; "empty")]
fn test_sanitize(hint: &str, expected: &str) {
    assert_eq!(sanitize_variable_name(hint), expected);
}

#[test]
fn test_names_are_unique_across_hints() {
    let mut namer = VariableNamer::new();
    let hints = ["x", "p_", "o_", "x", "o_", "o_1", "x-1", "x_1", "o_"];

    let mut seen = HashSet::new();
    for hint in hints {
        let variable = namer.allocate(hint).unwrap();
        assert!(
            seen.insert(variable.as_str().to_string()),
            "{} allocated twice",
            variable
        );
    }
    assert_eq!(namer.len(), hints.len());
}
