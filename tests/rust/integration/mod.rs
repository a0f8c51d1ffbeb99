//! Integration tests - full compilation passes from query model to SPARQL text
//!
//! Generated queries are checked against the expected text and parsed with a
//! SPARQL 1.1 parser to make sure they are well-formed.

mod common;
mod end_to_end_tests;
mod sub_query_tests;
