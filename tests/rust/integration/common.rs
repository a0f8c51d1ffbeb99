use std::path::PathBuf;

use sparql_linq::config::CompilerConfig;
use sparql_linq::query_model::QueryModel;
use sparql_linq::resource_mapping::ResourceMapping;
use sparql_linq::{compile_query, CompiledQuery, TranslationError};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn social_mapping() -> ResourceMapping {
    ResourceMapping::from_yaml_file(fixture("social_mapping.yaml"))
        .expect("social mapping fixture should load")
}

pub fn compile(query: &QueryModel) -> Result<CompiledQuery, TranslationError> {
    compile_query(query, &social_mapping(), &CompilerConfig::default())
}

/// Panics with the query text if it is not valid SPARQL 1.1
pub fn assert_valid_sparql(query: &str) {
    if let Err(e) = spargebra::Query::parse(query, None) {
        panic!("generated query is not valid SPARQL: {}\n{}", e, query);
    }
}
