//! Ontology prefix registry
//!
//! Maps prefix names (`rdf`, `schema`, ...) to namespace IRIs. The renderer
//! uses it to abbreviate IRIs into prefixed names and to emit the matching
//! `PREFIX` declarations.

use std::sync::LazyLock;

use oxrdf::NamedNode;
use regex::Regex;

use super::errors::ResourceMappingError;

/// Conservative PN_PREFIX subset
static PREFIX_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("prefix pattern is a valid regex")
});

/// Conservative PN_LOCAL subset: no dots, no escapes
static LOCAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("local name pattern is a valid regex")
});

// Prefixes every map starts with
lazy_static::lazy_static! {
    static ref DEFAULT_PREFIXES: Vec<(&'static str, &'static str)> = vec![
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMap {
    entries: Vec<(String, String)>,
}

impl Default for PrefixMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PREFIXES
                .iter()
                .map(|(prefix, namespace)| (prefix.to_string(), namespace.to_string()))
                .collect(),
        }
    }
}

impl PrefixMap {
    /// A map without any prefix; every IRI renders in full.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a prefix, replacing an earlier namespace for the same name
    pub fn insert(&mut self, prefix: &str, namespace: &str) -> Result<(), ResourceMappingError> {
        if !PREFIX_NAME.is_match(prefix) {
            return Err(ResourceMappingError::InvalidPrefix {
                prefix: prefix.to_string(),
            });
        }
        NamedNode::new(namespace).map_err(|e| ResourceMappingError::InvalidIri {
            iri: namespace.to_string(),
            reason: e.to_string(),
        })?;

        match self.entries.iter_mut().find(|(name, _)| name == prefix) {
            Some(entry) => entry.1 = namespace.to_string(),
            None => self
                .entries
                .push((prefix.to_string(), namespace.to_string())),
        }
        Ok(())
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == prefix)
            .map(|(_, namespace)| namespace.as_str())
    }

    /// Split an IRI into `(prefix, local)` using the longest matching
    /// namespace. Returns `None` when no namespace matches or the remainder
    /// is not a plain local name.
    pub fn abbreviate<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        self.entries
            .iter()
            .filter(|(_, namespace)| iri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .and_then(|(prefix, namespace)| {
                let local = &iri[namespace.len()..];
                LOCAL_NAME
                    .is_match(local)
                    .then_some((prefix.as_str(), local))
            })
    }

    /// Expand `prefix:local` into a full IRI string.
    ///
    /// Values that already look like absolute IRIs (`scheme://...`, `urn:...`)
    /// are returned unchanged.
    pub fn expand(&self, value: &str) -> Result<String, ResourceMappingError> {
        if value.contains("://") || value.starts_with("urn:") {
            return Ok(value.to_string());
        }
        let (prefix, local) = value.split_once(':').ok_or_else(|| {
            ResourceMappingError::InvalidIri {
                iri: value.to_string(),
                reason: "neither an absolute IRI nor a prefixed name".to_string(),
            }
        })?;
        let namespace =
            self.namespace(prefix)
                .ok_or_else(|| ResourceMappingError::UnknownPrefix {
                    prefix: prefix.to_string(),
                    value: value.to_string(),
                })?;
        Ok(format!("{}{}", namespace, local))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
