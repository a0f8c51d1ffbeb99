//! SPARQL variable naming for one compilation pass.
//!
//! Every variable that ends up in a generated query (item variables, the
//! `p_`/`o_` pattern variables, member bindings and aggregate aliases) is
//! allocated here, so names stay distinct across all nested sub-selects.
//!
//! ## Naming Convention
//! - The hint is sanitized: characters outside `[A-Za-z0-9_]` become `_`
//! - The first request for a hint returns the hint itself
//! - Later requests append the smallest free counter
//!
//! Examples:
//! - `"o_"`, `"o_"`, `"o_"` → `o_`, `o_1`, `o_2`
//! - `"<>h__item"` → `__h__item`
//! - `""` → `v`

use std::collections::HashSet;
use std::sync::LazyLock;

use oxrdf::Variable;
use regex::Regex;

use crate::query_translator::errors::TranslationError;

/// Characters that may not appear in a SPARQL VARNAME (restricted to ASCII)
static INVALID_VARNAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_]").expect("variable name pattern is a valid regex")
});

const EMPTY_HINT: &str = "v";

/// Sanitize an arbitrary hint into a valid SPARQL variable name.
///
/// # Examples
/// ```
/// use sparql_linq::utils::variable_naming::sanitize_variable_name;
///
/// assert_eq!(sanitize_variable_name("name"), "name");
/// assert_eq!(sanitize_variable_name("first-name"), "first_name");
/// assert_eq!(sanitize_variable_name(""), "v");
/// ```
pub fn sanitize_variable_name(hint: &str) -> String {
    let sanitized = INVALID_VARNAME_CHARS.replace_all(hint, "_");
    if sanitized.is_empty() {
        EMPTY_HINT.to_string()
    } else {
        sanitized.into_owned()
    }
}

/// Pass-scoped allocator of unique query variables.
///
/// A fresh namer is created for every compilation pass and dropped with it;
/// it is never shared between passes.
#[derive(Debug, Default)]
pub struct VariableNamer {
    used: HashSet<String>,
}

impl VariableNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a variable named after `hint`, unique within this pass.
    pub fn allocate(&mut self, hint: &str) -> Result<Variable, TranslationError> {
        let base = sanitize_variable_name(hint);

        let mut name = base.clone();
        let mut counter = 1usize;
        while self.used.contains(&name) {
            name = format!("{}{}", base, counter);
            counter += 1;
        }

        let variable =
            Variable::new(name.as_str()).map_err(|e| TranslationError::InvalidVariableName {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        log::trace!("Allocated variable ?{} for hint '{}'", name, hint);
        self.used.insert(name);
        Ok(variable)
    }

    /// Number of variables handed out so far
    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
