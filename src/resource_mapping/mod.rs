//! Resource-to-RDF mapping.
//!
//! The translator only needs a narrow view of the mapping layer, the
//! [`TypeMetadata`] trait: which RDF class a logical resource type maps to,
//! which RDF property a member maps to, and which prefixes are registered.
//! [`ResourceMapping`] is the in-memory implementation, built in code or
//! loaded from a YAML [`ResourceMappingConfig`].

pub mod config;
pub mod errors;
pub mod prefixes;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use oxrdf::NamedNode;

pub use config::{OntologyDefinition, ResourceDefinition, ResourceMappingConfig};
pub use errors::ResourceMappingError;
pub use prefixes::PrefixMap;

/// Type-metadata collaborator used during translation
pub trait TypeMetadata {
    /// RDF class a logical resource type is mapped to
    fn resolve_class_uri(&self, resource_type: &str) -> Option<NamedNode>;

    /// RDF property a member of a resource type is mapped to
    fn resolve_property_uri(&self, resource_type: &str, member: &str) -> Option<NamedNode>;

    /// Prefixes available for abbreviating IRIs in generated queries
    fn prefixes(&self) -> PrefixMap {
        PrefixMap::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceMapping {
    prefixes: PrefixMap,
    classes: HashMap<String, NamedNode>,
    /// (resource type, member) -> property
    properties: HashMap<(String, String), NamedNode>,
}

impl ResourceMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from its configuration, expanding prefixed names
    pub fn from_config(config: &ResourceMappingConfig) -> Result<Self, ResourceMappingError> {
        let mut mapping = Self::new();

        for ontology in &config.ontologies {
            mapping.add_prefix(&ontology.prefix, &ontology.uri)?;
        }

        let mut seen_types = HashSet::new();
        for resource in &config.resources {
            if !seen_types.insert(resource.type_name.as_str()) {
                return Err(ResourceMappingError::DuplicateResourceType {
                    resource_type: resource.type_name.clone(),
                });
            }
            if let Some(class) = &resource.class {
                mapping.add_class(&resource.type_name, class)?;
            }
            for (member, property) in &resource.properties {
                mapping.add_property(&resource.type_name, member, property)?;
            }
        }

        log::debug!(
            "Loaded resource mapping: {} classes, {} properties",
            mapping.classes.len(),
            mapping.properties.len()
        );
        Ok(mapping)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ResourceMappingError> {
        Self::from_config(&ResourceMappingConfig::from_yaml_file(path)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ResourceMappingError> {
        Self::from_config(&ResourceMappingConfig::from_yaml_str(yaml)?)
    }

    pub fn add_prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), ResourceMappingError> {
        self.prefixes.insert(prefix, namespace)
    }

    /// Map a resource type to an RDF class (absolute IRI or prefixed name)
    pub fn add_class(&mut self, resource_type: &str, class: &str) -> Result<(), ResourceMappingError> {
        let class = self.named_node(class)?;
        self.classes.insert(resource_type.to_string(), class);
        Ok(())
    }

    /// Map a member of a resource type to an RDF property (absolute IRI or prefixed name)
    pub fn add_property(
        &mut self,
        resource_type: &str,
        member: &str,
        property: &str,
    ) -> Result<(), ResourceMappingError> {
        let property = self.named_node(property)?;
        self.properties
            .insert((resource_type.to_string(), member.to_string()), property);
        Ok(())
    }

    fn named_node(&self, value: &str) -> Result<NamedNode, ResourceMappingError> {
        let iri = self.prefixes.expand(value)?;
        NamedNode::new(iri.as_str()).map_err(|e| ResourceMappingError::InvalidIri {
            iri,
            reason: e.to_string(),
        })
    }
}

impl TypeMetadata for ResourceMapping {
    fn resolve_class_uri(&self, resource_type: &str) -> Option<NamedNode> {
        self.classes.get(resource_type).cloned()
    }

    fn resolve_property_uri(&self, resource_type: &str, member: &str) -> Option<NamedNode> {
        self.properties
            .get(&(resource_type.to_string(), member.to_string()))
            .cloned()
    }

    fn prefixes(&self) -> PrefixMap {
        self.prefixes.clone()
    }
}
