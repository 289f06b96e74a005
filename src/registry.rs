//! Registry of CURIE templates in effect for a resource
//!
//! The registry shortens full link-relation URIs to `prefix:local` form and
//! keeps the link-relation types the codec always renders as arrays.
//! Registries of nested resources are combined with [`RelRegistry::merge_with`],
//! where the receiver wins on prefix collisions.

use url::Url;

use crate::curie::CuriTemplate;
use crate::error::HalError;
use crate::link::Link;
use crate::vocab::CURIES_REL;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelRegistry {
    curies: Vec<CuriTemplate>,
    array_rels: Vec<String>,
}

impl RelRegistry {
    /// Create a registry from templates; later duplicates of a prefix are ignored
    pub fn new(templates: impl IntoIterator<Item = CuriTemplate>) -> Self {
        let mut registry = Self::default();
        for template in templates {
            registry.add_curie(template);
        }
        registry
    }

    /// Create a registry from links declared under the `curies` rel
    ///
    /// Links under other rels are ignored. A CURIE link without a name or
    /// with a malformed template is an error.
    pub fn from_curies(links: &[Link]) -> Result<Self, HalError> {
        let templates = links
            .iter()
            .filter(|link| link.rel() == CURIES_REL)
            .map(CuriTemplate::from_link)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(templates))
    }

    /// Link-relation types that are always rendered as arrays
    pub fn with_array_rels<I, S>(mut self, rels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for rel in rels {
            let rel = rel.into();
            if !self.array_rels.contains(&rel) {
                self.array_rels.push(rel);
            }
        }
        self
    }

    fn add_curie(&mut self, template: CuriTemplate) {
        if self.curie(template.prefix()).is_none() {
            self.curies.push(template);
        }
    }

    pub fn curies(&self) -> &[CuriTemplate] {
        &self.curies
    }

    pub fn curie(&self, prefix: &str) -> Option<&CuriTemplate> {
        self.curies.iter().find(|c| c.prefix() == prefix)
    }

    pub fn array_rels(&self) -> &[String] {
        &self.array_rels
    }

    pub fn is_empty(&self) -> bool {
        self.curies.is_empty() && self.array_rels.is_empty()
    }

    /// Check if a rel is a CURIE with a registered prefix
    fn is_curied(&self, rel: &str) -> bool {
        match rel.split_once(':') {
            Some((prefix, local)) => !local.starts_with("//") && self.curie(prefix).is_some(),
            None => false,
        }
    }

    /// Shorten a full link-relation URI using the first matching template
    ///
    /// Keywords, relative references and already curied rels are returned
    /// unchanged, so resolving twice gives the same result as resolving once.
    pub fn resolve(&self, rel: &str) -> String {
        if self.curies.is_empty() || self.is_curied(rel) || Url::parse(rel).is_err() {
            return rel.to_string();
        }
        self.curies
            .iter()
            .find_map(|curie| {
                curie
                    .local_name(rel)
                    .map(|local| format!("{}:{}", curie.prefix(), local))
            })
            .unwrap_or_else(|| rel.to_string())
    }

    /// Expand a CURIE with a registered prefix to its full URI
    pub fn expand(&self, rel: &str) -> String {
        if !self.is_curied(rel) {
            return rel.to_string();
        }
        self.curies
            .iter()
            .find_map(|curie| curie.expand_curie(rel))
            .unwrap_or_else(|| rel.to_string())
    }

    /// Check if links of this rel are always rendered as an array
    pub fn is_array_rel(&self, rel: &str) -> bool {
        if rel == CURIES_REL {
            return true;
        }
        let resolved = self.resolve(rel);
        self.array_rels
            .iter()
            .any(|array_rel| array_rel == rel || self.resolve(array_rel) == resolved)
    }

    /// Receiver's entries first, then entries of `other` with unseen prefixes
    pub fn merge_with(&self, other: &RelRegistry) -> RelRegistry {
        let mut merged = self.clone();
        for template in &other.curies {
            merged.add_curie(template.clone());
        }
        merged.with_array_rels(other.array_rels.iter().cloned())
    }
}
