//! JSON encoding and decoding of HAL documents
//!
//! Decoding splits a HAL+JSON object into links, embedded resources and
//! extra attributes and builds a [`Resource`] from them, taking CURIEs
//! declared on every level into account. Encoding writes a resource back,
//! leaving out empty `_links` and `_embedded`.

use serde_json::{Map, Value};
use tracing::debug;

use crate::embedded::Embedded;
use crate::error::HalError;
use crate::link::Link;
use crate::links::Links;
use crate::registry::RelRegistry;
use crate::resource::Resource;
use crate::vocab::{is_reserved_field, EMBEDDED, LINKS};

/// Options for encoding
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Render embedded resources as arrays even if a rel holds a single one
    pub embedded_as_array: bool,
}

/// Parse the text of a HAL document
pub fn parse_document(content: &str, source: &str) -> Result<Value, HalError> {
    serde_json::from_str(content).map_err(|e| HalError::LoadError {
        path: source.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a HAL document into a resource
pub fn decode(document: &Value) -> Result<Resource, HalError> {
    decode_with(document, &RelRegistry::default())
}

/// Decode a HAL document, resolving rels with `registry` and the CURIEs the
/// document declares
pub fn decode_with(document: &Value, registry: &RelRegistry) -> Result<Resource, HalError> {
    let obj = document.as_object().ok_or_else(|| {
        HalError::InvalidDocument(format!("expected a JSON object, found {}", kind_of(document)))
    })?;

    let mut links = Vec::new();
    let mut embedded = Embedded::empty();
    let mut attributes = Map::new();

    for (key, value) in obj {
        match key.as_str() {
            LINKS => links = decode_links(value)?,
            EMBEDDED => embedded = decode_embedded(value)?,
            _ => {
                attributes.insert(key.clone(), value.clone());
            }
        }
    }

    let declared = RelRegistry::from_curies(&links)?;
    let registry = registry.merge_with(&declared);
    debug!(
        links = links.len(),
        embedded = embedded.rels().len(),
        curies = registry.curies().len(),
        "Decoded HAL resource"
    );

    Ok(
        Resource::with_registry(Links::linking_to(links), embedded, registry)
            .with_attributes(attributes),
    )
}

fn decode_links(value: &Value) -> Result<Vec<Link>, HalError> {
    let obj = value.as_object().ok_or_else(|| {
        HalError::InvalidDocument(format!("{} must be an object, found {}", LINKS, kind_of(value)))
    })?;

    let mut links = Vec::new();
    for (rel, entry) in obj {
        match entry {
            Value::Array(arr) => {
                for item in arr {
                    links.push(decode_link(rel, item)?);
                }
            }
            _ => links.push(decode_link(rel, entry)?),
        }
    }
    Ok(links)
}

fn decode_link(rel: &str, value: &Value) -> Result<Link, HalError> {
    if !value.is_object() {
        return Err(HalError::InvalidLink {
            rel: rel.to_string(),
            reason: format!("expected a link object, found {}", kind_of(value)),
        });
    }
    let link: Link = serde_json::from_value(value.clone()).map_err(|e| HalError::InvalidLink {
        rel: rel.to_string(),
        reason: e.to_string(),
    })?;
    Ok(link.with_rel(rel))
}

fn decode_embedded(value: &Value) -> Result<Embedded, HalError> {
    let obj = value.as_object().ok_or_else(|| {
        HalError::InvalidDocument(format!(
            "{} must be an object, found {}",
            EMBEDDED,
            kind_of(value)
        ))
    })?;

    let mut builder = Embedded::builder();
    for (rel, entry) in obj {
        let items = match entry {
            Value::Array(arr) => arr.iter().map(decode).collect::<Result<Vec<_>, _>>()?,
            _ => vec![decode(entry)?],
        };
        builder = builder.with(rel.as_str(), items);
    }
    Ok(builder.build())
}

/// Encode a resource as a HAL document
pub fn encode(resource: &Resource, options: &EncodeOptions) -> Result<Value, HalError> {
    let mut doc = Map::new();

    if !resource.links().is_empty() {
        doc.insert(
            LINKS.to_string(),
            encode_links(resource.links(), resource.registry())?,
        );
    }

    for (key, value) in resource.attributes() {
        if !is_reserved_field(key) {
            doc.insert(key.clone(), value.clone());
        }
    }

    if !resource.embedded().is_empty() {
        doc.insert(
            EMBEDDED.to_string(),
            encode_embedded(resource.embedded(), resource.registry(), options)?,
        );
    }

    Ok(Value::Object(doc))
}

fn encode_links(links: &Links, registry: &RelRegistry) -> Result<Value, HalError> {
    let mut obj = Map::new();
    for (rel, bucket) in links.iter() {
        let mut encoded = bucket
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        let value = if encoded.len() == 1 && !registry.is_array_rel(rel) {
            encoded.remove(0)
        } else {
            Value::Array(encoded)
        };
        obj.insert(rel.to_string(), value);
    }
    Ok(Value::Object(obj))
}

fn encode_embedded(
    embedded: &Embedded,
    registry: &RelRegistry,
    options: &EncodeOptions,
) -> Result<Value, HalError> {
    let mut obj = Map::new();
    for (rel, items) in embedded.iter() {
        let mut encoded = items
            .iter()
            .map(|item| encode(item, options))
            .collect::<Result<Vec<_>, _>>()?;
        let value = if encoded.len() == 1
            && !options.embedded_as_array
            && !registry.is_array_rel(rel)
        {
            encoded.remove(0)
        } else {
            Value::Array(encoded)
        };
        obj.insert(rel.to_string(), value);
    }
    Ok(Value::Object(obj))
}

/// Serialize a resource to a JSON string
pub fn to_json_string(resource: &Resource, options: &EncodeOptions) -> Result<String, HalError> {
    let doc = encode(resource, options)?;
    if options.pretty {
        Ok(serde_json::to_string_pretty(&doc)?)
    } else {
        Ok(serde_json::to_string(&doc)?)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
