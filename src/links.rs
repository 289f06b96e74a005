//! Links of a HAL resource, grouped by link-relation type
//!
//! [`Links`] is immutable once built. Additions go through a
//! [`LinksBuilder`], either fresh or seeded from an existing instance, and
//! rewriting under a [`RelRegistry`] produces a new value.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::curie::CuriTemplate;
use crate::link::Link;
use crate::registry::RelRegistry;
use crate::vocab::CURIES_REL;

/// Links keyed by link-relation type, in first-insertion order
///
/// Every bucket holds at least one link and no two equivalent links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    rels: IndexMap<String, Vec<Link>>,
}

/// Append a link to its bucket unless an equivalent link is already there
fn add_link(rels: &mut IndexMap<String, Vec<Link>>, link: Link) {
    let bucket = rels.entry(link.rel().to_string()).or_default();
    if !bucket.iter().any(|existing| existing.is_equivalent_to(&link)) {
        bucket.push(link);
    }
}

impl Links {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Links to the given targets, with CURIEs declared among them applied
    pub fn linking_to(links: impl IntoIterator<Item = Link>) -> Self {
        Self::builder().with_all(links).build()
    }

    pub fn builder() -> LinksBuilder {
        LinksBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Link-relation types in first-insertion order
    pub fn rels(&self) -> Vec<&str> {
        self.rels.keys().map(String::as_str).collect()
    }

    /// All links of a rel; empty for unknown rels
    pub fn links_by(&self, rel: &str) -> &[Link] {
        self.rels.get(rel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First link of a rel
    pub fn link_by(&self, rel: &str) -> Option<&Link> {
        self.links_by(rel).first()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Link])> {
        self.rels
            .iter()
            .map(|(rel, links)| (rel.as_str(), links.as_slice()))
    }

    /// Registry made of the CURIEs declared under the `curies` rel
    ///
    /// Malformed declarations are skipped.
    pub fn declared_registry(&self) -> RelRegistry {
        let templates = self
            .links_by(CURIES_REL)
            .iter()
            .filter_map(|link| match CuriTemplate::from_link(link) {
                Ok(template) => Some(template),
                Err(e) => {
                    warn!("Ignoring CURIE declaration: {}", e);
                    None
                }
            });
        RelRegistry::new(templates)
    }

    /// Copy of these links with more links appended
    pub fn with(self, links: impl IntoIterator<Item = Link>) -> Links {
        LinksBuilder::from(self).with_all(links).build()
    }

    /// Rewrite all link-relation types using the registry
    ///
    /// Rels that shorten to the same CURIE are merged in their original
    /// order, dropping equivalent duplicates. Returns `self` unchanged if no
    /// rel is affected.
    pub fn using(self, registry: &RelRegistry) -> Links {
        let resolved: Vec<String> = self.rels.keys().map(|rel| registry.resolve(rel)).collect();
        if self.rels.keys().zip(&resolved).all(|(rel, curied)| rel == curied) {
            return self;
        }

        let mut rels = IndexMap::with_capacity(self.rels.len());
        for ((rel, links), curied) in self.rels.into_iter().zip(resolved) {
            if rel != curied {
                trace!(from = %rel, to = %curied, "Rewriting link rel");
            }
            for link in links {
                add_link(&mut rels, link.with_rel(curied.as_str()));
            }
        }
        Links { rels }
    }
}

/// Builder for [`Links`]
#[derive(Debug, Clone, Default)]
pub struct LinksBuilder {
    rels: IndexMap<String, Vec<Link>>,
    registry: RelRegistry,
}

/// Hashes buckets sorted by rel, matching the order-insensitive equality
impl Hash for Links {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut rels: Vec<_> = self.rels.iter().collect();
        rels.sort_by(|a, b| a.0.cmp(b.0));
        rels.hash(state);
    }
}

impl From<Links> for LinksBuilder {
    fn from(links: Links) -> Self {
        Self {
            rels: links.rels,
            registry: RelRegistry::default(),
        }
    }
}

impl LinksBuilder {
    /// Start from a copy of existing links, leaving the original untouched
    pub fn copy_of(links: &Links) -> Self {
        Self::from(links.clone())
    }

    pub fn with(mut self, link: Link) -> Self {
        add_link(&mut self.rels, link);
        self
    }

    pub fn with_all(mut self, links: impl IntoIterator<Item = Link>) -> Self {
        for link in links {
            add_link(&mut self.rels, link);
        }
        self
    }

    /// Remove all links of a rel
    pub fn without(mut self, rel: &str) -> Self {
        self.rels.shift_remove(rel);
        self
    }

    /// Registry applied to the rels at build time
    pub fn using(mut self, registry: &RelRegistry) -> Self {
        self.registry = self.registry.merge_with(registry);
        self
    }

    pub fn build(self) -> Links {
        let links = Links { rels: self.rels };
        let registry = self.registry.merge_with(&links.declared_registry());
        links.using(&registry)
    }
}
