//! CURIE templates
//!
//! A template such as `http://example.com/rels/{rel}` declared under the
//! prefix `ex` turns `http://example.com/rels/orders` into `ex:orders` and
//! back.

use crate::error::HalError;
use crate::link::Link;
use crate::vocab::REL_PLACEHOLDER;

/// One CURIE declaration: a prefix and a URI template with a single `{rel}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuriTemplate {
    prefix: String,
    template: String,
    /// Literal text before `{rel}`
    head: String,
    /// Literal text after `{rel}`
    tail: String,
}

impl CuriTemplate {
    pub fn new(prefix: impl Into<String>, template: impl Into<String>) -> Result<Self, HalError> {
        let prefix = prefix.into();
        let template = template.into();

        if prefix.is_empty() {
            return Err(HalError::MissingField {
                what: format!("CURIE '{}'", template),
                field: "name".to_string(),
            });
        }

        let (head, tail) = match template.split_once(REL_PLACEHOLDER) {
            Some((head, tail)) if !tail.contains(REL_PLACEHOLDER) => {
                (head.to_string(), tail.to_string())
            }
            _ => return Err(HalError::InvalidCuriTemplate { prefix, template }),
        };

        Ok(Self {
            prefix,
            template,
            head,
            tail,
        })
    }

    /// Build a template from a link declared under the `curies` rel
    pub fn from_link(link: &Link) -> Result<Self, HalError> {
        let prefix = link.name().ok_or_else(|| HalError::MissingField {
            what: format!("CURIE link '{}'", link.href()),
            field: "name".to_string(),
        })?;
        Self::new(prefix, link.href())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The local name a full URI maps to, if the URI matches this template
    ///
    /// The local name must be non-empty and must not contain a `/`, so that
    /// nested paths below the template are not mistaken for CURIEs.
    pub fn local_name<'a>(&self, uri: &'a str) -> Option<&'a str> {
        let local = uri.strip_prefix(self.head.as_str())?;
        let local = local.strip_suffix(self.tail.as_str())?;
        if local.is_empty() || local.contains('/') {
            None
        } else {
            Some(local)
        }
    }

    pub fn matches(&self, uri: &str) -> bool {
        self.local_name(uri).is_some()
    }

    /// Substitute `{rel}` with a local name
    pub fn expand(&self, local_name: &str) -> String {
        format!("{}{}{}", self.head, local_name, self.tail)
    }

    /// `prefix:local` for a matching URI, the URI unchanged otherwise
    pub fn curied_rel(&self, uri: &str) -> String {
        match self.local_name(uri) {
            Some(local) => format!("{}:{}", self.prefix, local),
            None => uri.to_string(),
        }
    }

    /// Expand a `prefix:local` CURIE carrying this template's prefix
    pub fn expand_curie(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        if prefix == self.prefix && !local.is_empty() {
            Some(self.expand(local))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rels() -> CuriTemplate {
        CuriTemplate::new("ex", "http://example.com/rels/{rel}").unwrap()
    }

    #[test]
    fn test_requires_single_placeholder() {
        assert!(matches!(
            CuriTemplate::new("ex", "http://example.com/rels/"),
            Err(HalError::InvalidCuriTemplate { .. })
        ));
        assert!(matches!(
            CuriTemplate::new("ex", "http://example.com/{rel}/{rel}"),
            Err(HalError::InvalidCuriTemplate { .. })
        ));
        assert!(matches!(
            CuriTemplate::new("", "http://example.com/{rel}"),
            Err(HalError::MissingField { .. })
        ));
    }

    #[test]
    fn test_matches() {
        let curi = rels();
        assert!(curi.matches("http://example.com/rels/foo"));
        assert!(!curi.matches("http://example.com/rels/foo/bar"));
        assert!(!curi.matches("http://example.com/rels/"));
        assert!(!curi.matches("http://example.com/other/foo"));
        assert!(!curi.matches("ex:foo"));
    }

    #[test]
    fn test_matches_with_suffix() {
        let curi = CuriTemplate::new("doc", "http://example.com/docs/{rel}.html").unwrap();
        assert_eq!(curi.local_name("http://example.com/docs/orders.html"), Some("orders"));
        assert!(!curi.matches("http://example.com/docs/orders"));
        assert!(!curi.matches("http://example.com/docs/.html"));
    }

    #[test]
    fn test_curied_rel_and_expand() {
        let curi = rels();
        assert_eq!(curi.curied_rel("http://example.com/rels/foo"), "ex:foo");
        assert_eq!(curi.curied_rel("self"), "self");
        assert_eq!(curi.expand("foo"), "http://example.com/rels/foo");
        assert_eq!(
            curi.expand_curie("ex:foo"),
            Some("http://example.com/rels/foo".to_string())
        );
        assert_eq!(curi.expand_curie("other:foo"), None);
    }

    #[test]
    fn test_from_link() {
        let link = Link::curi("ex", "http://example.com/rels/{rel}").unwrap();
        let curi = CuriTemplate::from_link(&link).unwrap();
        assert_eq!(curi, rels());

        let unnamed = Link::new("curies", "http://example.com/rels/{rel}");
        assert!(matches!(
            CuriTemplate::from_link(&unnamed),
            Err(HalError::MissingField { .. })
        ));
    }
}
