//! Unit tests - exercise individual components through the public API
//!
//! These tests need no files or external services.

mod generator_tree_tests;
mod operator_table_tests;
mod variable_naming_tests;
