//! Resource mapping configuration.
//!
//! Declares ontology prefixes and maps logical resource types and their
//! members onto RDF classes and properties:
//!
//! ```yaml
//! ontologies:                      # Prefix registrations
//!   - prefix: schema
//!     uri: http://schema.org/
//! resources:
//!   - type: Person                 # Logical resource type
//!     class: schema:Person         # Prefixed name or absolute IRI
//!     properties:                  # Member name -> RDF property
//!       Name: schema:name
//!       Accounts: http://example.org/accounts
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::ResourceMappingError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMappingConfig {
    #[serde(default)]
    pub ontologies: Vec<OntologyDefinition>,
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

/// One ontology: its prefix and namespace IRI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyDefinition {
    pub prefix: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    #[serde(rename = "type")]
    pub type_name: String,
    /// RDF class; resources without one cannot be used with `OfType`
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl ResourceMappingConfig {
    /// Load the mapping configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceMappingError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ResourceMappingError::ConfigReadError {
                error: e.to_string(),
            })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse the mapping configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ResourceMappingError> {
        serde_yaml::from_str(yaml).map_err(|e| ResourceMappingError::ConfigParseError {
            error: e.to_string(),
        })
    }
}
