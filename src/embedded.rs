//! Embedded resources of a HAL resource, grouped by link-relation type
//!
//! Rewriting an [`Embedded`] under a [`RelRegistry`] recurses into every
//! contained [`Resource`], so CURIEs apply to arbitrarily nested documents
//! in a single top-down pass.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::registry::RelRegistry;
use crate::resource::Resource;

/// Embedded resources keyed by link-relation type, in first-insertion order
///
/// Every bucket holds at least one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embedded {
    items: IndexMap<String, Vec<Resource>>,
}

impl Embedded {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Embedded resources under a single rel
    pub fn embedded(rel: impl Into<String>, items: Vec<Resource>) -> Self {
        Self::builder().with(rel, items).build()
    }

    pub fn builder() -> EmbeddedBuilder {
        EmbeddedBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Link-relation types in first-insertion order
    pub fn rels(&self) -> Vec<&str> {
        self.items.keys().map(String::as_str).collect()
    }

    /// All resources embedded under a rel; empty for unknown rels
    pub fn items_by(&self, rel: &str) -> &[Resource] {
        self.items.get(rel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resources embedded under a rel, read as `T` from their attributes
    ///
    /// Items whose attributes do not deserialize into `T` are skipped.
    pub fn items_as<T: DeserializeOwned>(&self, rel: &str) -> Vec<T> {
        self.items_by(rel)
            .iter()
            .filter_map(|item| {
                serde_json::from_value(Value::Object(item.attributes().clone())).ok()
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Resource])> {
        self.items
            .iter()
            .map(|(rel, items)| (rel.as_str(), items.as_slice()))
    }

    /// Copy with the resources of one rel replaced; no items removes the rel
    pub fn with(self, rel: impl Into<String>, items: Vec<Resource>) -> Embedded {
        EmbeddedBuilder::from(self).with(rel, items).build()
    }

    /// Rewrite link-relation types here and in all nested resources
    ///
    /// Every contained resource merges the registry into its own and
    /// rewrites its links and embedded resources accordingly. Rels that
    /// shorten to the same CURIE are concatenated in their original order.
    pub fn using(self, registry: &RelRegistry) -> Embedded {
        if registry.is_empty() || self.is_empty() {
            return self;
        }
        debug!(
            rels = self.items.len(),
            curies = registry.curies().len(),
            "Applying registry to embedded resources"
        );

        let mut items: IndexMap<String, Vec<Resource>> = IndexMap::with_capacity(self.items.len());
        for (rel, resources) in self.items {
            let curied = registry.resolve(&rel);
            if rel != curied {
                trace!(from = %rel, to = %curied, "Rewriting embedded rel");
            }
            items.entry(curied).or_default().extend(
                resources
                    .into_iter()
                    .map(|resource| resource.merge_with_embedding(registry)),
            );
        }
        Embedded { items }
    }
}

/// Builder for [`Embedded`]
#[derive(Debug, Clone, Default)]
pub struct EmbeddedBuilder {
    items: IndexMap<String, Vec<Resource>>,
    registry: Option<RelRegistry>,
}

impl Hash for Embedded {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items.hash(state);
    }
}

impl From<Embedded> for EmbeddedBuilder {
    fn from(embedded: Embedded) -> Self {
        Self {
            items: embedded.items,
            registry: None,
        }
    }
}

impl EmbeddedBuilder {
    /// Start from a copy of existing embedded resources, leaving the original untouched
    pub fn copy_of(embedded: &Embedded) -> Self {
        Self::from(embedded.clone())
    }

    /// Replace the resources of a rel; no items removes the rel
    pub fn with(mut self, rel: impl Into<String>, items: Vec<Resource>) -> Self {
        let rel = rel.into();
        if items.is_empty() {
            self.items.shift_remove(&rel);
        } else {
            self.items.insert(rel, items);
        }
        self
    }

    pub fn without(mut self, rel: &str) -> Self {
        self.items.shift_remove(rel);
        self
    }

    /// Registry applied at build time, recursively
    pub fn using(mut self, registry: &RelRegistry) -> Self {
        self.registry = Some(match self.registry {
            Some(current) => current.merge_with(registry),
            None => registry.clone(),
        });
        self
    }

    pub fn build(self) -> Embedded {
        let embedded = Embedded { items: self.items };
        match self.registry {
            Some(registry) => embedded.using(&registry),
            None => embedded,
        }
    }
}
