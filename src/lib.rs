//! HAL+JSON Link-Relation Library
//!
//! This library models HAL+JSON documents: resources with typed links and
//! embedded sub-resources, both keyed by link-relation type. Link-relation
//! types may be shortened to CURIEs (`prefix:local`) declared through a
//! [`RelRegistry`].
//!
//! # Overview
//!
//! CURIE resolution is consistent across a whole document:
//!
//! 1. A [`Resource`] is built with a registry (explicit, empty, or declared
//!    by its own `curies` links)
//! 2. Full link-relation URIs of its [`Links`] and [`Embedded`] resources
//!    are rewritten to their shortest CURIE form
//! 3. The registry is merged into every embedded resource, which rewrites
//!    its own rels and passes the merged registry further down
//!
//! On prefix collisions the nested resource keeps its own declaration.
//!
//! # Usage
//!
//! ## Build a resource
//!
//! ```ignore
//! use hal_curies::{CuriTemplate, Embedded, Link, Links, RelRegistry, Resource};
//!
//! let registry = RelRegistry::new([CuriTemplate::new("ex", "http://example.com/rels/{rel}")?]);
//! let order = Resource::from_links(Links::linking_to([
//!     Link::new("http://example.com/rels/customer", "/customers/7809"),
//! ]));
//! let orders = Resource::with_registry(
//!     Links::linking_to([Link::self_link("/orders")]),
//!     Embedded::embedded("http://example.com/rels/order", vec![order]),
//!     registry,
//! );
//!
//! assert_eq!(orders.embedded().rels(), vec!["ex:order"]);
//! let order = &orders.embedded().items_by("ex:order")[0];
//! assert_eq!(order.links().rels(), vec!["ex:customer"]);
//! ```
//!
//! ## Read and write a document
//!
//! ```ignore
//! use hal_curies::{decode, parse_document, to_json_string, EncodeOptions};
//!
//! let document = parse_document(&content, "orders.json")?;
//! let resource = decode(&document)?;
//! println!("{}", to_json_string(&resource, &EncodeOptions::default())?);
//! ```

pub mod codec;
pub mod curie;
pub mod embedded;
pub mod error;
pub mod link;
pub mod links;
pub mod registry;
pub mod resource;
pub mod vocab;

// Re-export main types for convenience
pub use crate::codec::{
    decode, decode_with, encode, parse_document, to_json_string, EncodeOptions,
};
pub use crate::curie::CuriTemplate;
pub use crate::embedded::{Embedded, EmbeddedBuilder};
pub use crate::error::HalError;
pub use crate::link::Link;
pub use crate::links::{Links, LinksBuilder};
pub use crate::registry::RelRegistry;
pub use crate::resource::Resource;
pub use crate::vocab::{CURIES_REL, EMBEDDED, HAL_MEDIA_TYPE, LINKS, SELF_REL};
