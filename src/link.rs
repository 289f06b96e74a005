//! Hyperlinks of a HAL resource
//!
//! A [`Link`] is an immutable value: constructors and `with_*` methods
//! return new values instead of mutating in place.

use serde::{Deserialize, Serialize};

use crate::curie::CuriTemplate;
use crate::error::HalError;
use crate::vocab::{CURIES_REL, SELF_REL};

/// A single link of a resource
///
/// The link-relation type is not part of the serialized link object; in a
/// HAL document it is the key the link sits under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LinkObject")]
pub struct Link {
    #[serde(skip)]
    rel: String,
    href: String,
    #[serde(default, skip_serializing_if = "is_false")]
    templated: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hreflang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deprecation: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !value
}

/// Serialized form of a link; `templated` may be omitted
#[derive(Deserialize)]
struct LinkObject {
    href: String,
    #[serde(default)]
    templated: Option<bool>,
    #[serde(rename = "type", default)]
    media_type: Option<String>,
    #[serde(default)]
    hreflang: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    profile: Option<String>,
    #[serde(default)]
    deprecation: Option<String>,
}

impl From<LinkObject> for Link {
    fn from(object: LinkObject) -> Self {
        Self {
            rel: String::new(),
            templated: object
                .templated
                .unwrap_or_else(|| is_uri_template(&object.href)),
            href: object.href,
            media_type: object.media_type,
            hreflang: object.hreflang,
            title: object.title,
            name: object.name,
            profile: object.profile,
            deprecation: object.deprecation,
        }
    }
}

/// Check if an href is a URI template (contains a `{...}` expression)
pub fn is_uri_template(href: &str) -> bool {
    href.find('{')
        .map(|open| href[open..].contains('}'))
        .unwrap_or(false)
}

impl Link {
    /// Create a link; `templated` is derived from the href
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            rel: rel.into(),
            templated: is_uri_template(&href),
            href,
            media_type: None,
            hreflang: None,
            title: None,
            name: None,
            profile: None,
            deprecation: None,
        }
    }

    /// Create a `self` link
    pub fn self_link(href: impl Into<String>) -> Self {
        Self::new(SELF_REL, href)
    }

    /// Create a CURIE declaration under the `curies` rel
    ///
    /// Fails if `template` does not contain exactly one `{rel}` placeholder.
    pub fn curi(name: impl Into<String>, template: impl Into<String>) -> Result<Self, HalError> {
        let name = name.into();
        let template = template.into();
        CuriTemplate::new(name.as_str(), template.as_str())?;
        Ok(Self::new(CURIES_REL, template).with_name(name))
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn is_templated(&self) -> bool {
        self.templated
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    pub fn with_templated(mut self, templated: bool) -> Self {
        self.templated = templated;
        self
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_deprecation(mut self, deprecation: impl Into<String>) -> Self {
        self.deprecation = Some(deprecation.into());
        self
    }

    /// Same link under another link-relation type
    pub(crate) fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = rel.into();
        self
    }

    /// Two links are equivalent if they share href and name
    ///
    /// Other attributes (title, type, ...) are not compared.
    pub fn is_equivalent_to(&self, other: &Link) -> bool {
        self.href == other.href && self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_templated_detection() {
        assert!(Link::new("search", "/search{?q}").is_templated());
        assert!(!Link::new("next", "/page/2").is_templated());
        assert!(!Link::new("odd", "/broken{").is_templated());
        assert!(!Link::new("search", "/search{?q}")
            .with_templated(false)
            .is_templated());
    }

    #[test]
    fn test_equivalence_ignores_title() {
        let a = Link::new("item", "/items/1").with_title("First");
        let b = Link::new("item", "/items/1").with_title("Erster");
        assert!(a.is_equivalent_to(&b));
        assert_ne!(a, b);

        let named = Link::new("item", "/items/1").with_name("one");
        assert!(!a.is_equivalent_to(&named));
    }

    #[test]
    fn test_curi() {
        let curi = Link::curi("ex", "http://example.com/rels/{rel}").unwrap();
        assert_eq!(curi.rel(), "curies");
        assert_eq!(curi.name(), Some("ex"));
        assert!(curi.is_templated());

        let result = Link::curi("ex", "http://example.com/rels/");
        assert!(matches!(result, Err(HalError::InvalidCuriTemplate { .. })));
    }

    #[test]
    fn test_serialize_skips_rel_and_empty_fields() {
        let link = Link::self_link("/orders/1").with_type("application/hal+json");
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            json!({"href": "/orders/1", "type": "application/hal+json"})
        );
    }

    #[test]
    fn test_deserialize_requires_href() {
        let link: Link = serde_json::from_value(json!({"href": "/a", "templated": true})).unwrap();
        assert_eq!(link.href(), "/a");
        assert!(link.is_templated());
        assert_eq!(link.rel(), "");

        let missing: Result<Link, _> = serde_json::from_value(json!({"title": "no href"}));
        assert!(missing.is_err());
    }

    #[test]
    fn test_deserialize_derives_templated_from_href() {
        let link: Link = serde_json::from_value(json!({"href": "/orders{?id}"})).unwrap();
        assert!(link.is_templated());

        let explicit: Link =
            serde_json::from_value(json!({"href": "/orders{?id}", "templated": false})).unwrap();
        assert!(!explicit.is_templated());

        let plain: Link = serde_json::from_value(json!({"href": "/orders"})).unwrap();
        assert!(!plain.is_templated());
    }
}
