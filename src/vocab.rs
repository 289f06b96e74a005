//! Reserved names of the HAL+JSON format
//!
//! Field names of the document and link-relation types with a fixed
//! meaning.

/// Field holding the links of a resource
pub const LINKS: &str = "_links";

/// Field holding the embedded resources of a resource
pub const EMBEDDED: &str = "_embedded";

/// Link-relation type under which CURIE templates are declared
pub const CURIES_REL: &str = "curies";

/// Link-relation type of the link to the resource itself
pub const SELF_REL: &str = "self";

/// Placeholder inside a CURIE template that stands for the local name
pub const REL_PLACEHOLDER: &str = "{rel}";

/// Media type of HAL+JSON documents
pub const HAL_MEDIA_TYPE: &str = "application/hal+json";

/// Check if a field name is reserved by the format (not an extra attribute)
pub fn is_reserved_field(name: &str) -> bool {
    name == LINKS || name == EMBEDDED
}
