//! HAL resources and registry propagation
//!
//! A [`Resource`] couples its [`Links`], its [`Embedded`] resources, the
//! [`RelRegistry`] in effect for it and any extra attributes of the
//! document. Link-relation types are resolved eagerly: whenever the
//! registry changes, the resource rewrites its own rels and pushes the
//! registry down into every embedded resource.

use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};
use tracing::debug;

use crate::embedded::{Embedded, EmbeddedBuilder};
use crate::link::Link;
use crate::links::{Links, LinksBuilder};
use crate::registry::RelRegistry;

/// A HAL resource
///
/// Equality and hashing only consider links and embedded resources; the
/// registry and the extra attributes are ignored.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    links: Links,
    embedded: Embedded,
    attributes: Map<String, Value>,
    registry: RelRegistry,
}

impl Resource {
    /// A resource without links or embedded resources
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_links(links: Links) -> Self {
        Self::with_registry(links, Embedded::empty(), RelRegistry::default())
    }

    pub fn from_parts(links: Links, embedded: Embedded) -> Self {
        Self::with_registry(links, embedded, RelRegistry::default())
    }

    /// Create a resource whose rels are resolved using `registry`
    ///
    /// CURIEs declared in `links` are added to the registry, so they apply
    /// to the embedded resources too.
    pub fn with_registry(links: Links, embedded: Embedded, registry: RelRegistry) -> Self {
        let registry = registry.merge_with(&links.declared_registry());
        Self {
            links: links.using(&registry),
            embedded: embedded.using(&registry),
            attributes: Map::new(),
            registry,
        }
    }

    /// Links of the resource, empty if it has none
    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Embedded resources, empty if there are none
    pub fn embedded(&self) -> &Embedded {
        &self.embedded
    }

    /// Registry used to resolve the rels of this resource
    pub fn registry(&self) -> &RelRegistry {
        &self.registry
    }

    /// Attributes of the document not mapped to links or embedded resources
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Add links, skipping those equivalent to existing ones
    ///
    /// CURIEs declared among the new links join the registry, and the
    /// embedded resources are resolved again.
    pub fn with_links(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        let links = LinksBuilder::from(self.links)
            .with_all(links)
            .using(&self.registry)
            .build();
        self.registry = self.registry.merge_with(&links.declared_registry());
        self.links = links.using(&self.registry);
        if !self.embedded.is_empty() {
            self.embedded = self.embedded.using(&self.registry);
        }
        self
    }

    /// Add or replace the embedded resources of a rel
    pub fn with_embedded(mut self, rel: impl Into<String>, items: Vec<Resource>) -> Self {
        self.embedded = EmbeddedBuilder::from(self.embedded)
            .with(rel, items)
            .using(&self.registry)
            .build();
        self
    }

    /// Merge the registry of the embedding resource into this one
    ///
    /// Called for every resource found while an [`Embedded`] is rewritten,
    /// so the rewrite continues down to the deepest nested resource.
    pub(crate) fn merge_with_embedding(mut self, parent: &RelRegistry) -> Self {
        self.registry = self.registry.merge_with(parent);
        if !self.links.is_empty() {
            self.links = self.links.using(parent);
            if !self.embedded.is_empty() {
                debug!("Propagating merged registry to nested embedded resources");
                self.embedded = self.embedded.using(&self.registry);
            }
        } else if !self.embedded.is_empty() {
            self.embedded = self.embedded.using(parent);
        }
        self
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.links == other.links && self.embedded == other.embedded
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.links.hash(state);
        self.embedded.hash(state);
    }
}
