//! Integration tests for CURIE resolution across nested HAL documents.

use hal_curies::{
    decode, encode, CuriTemplate, EmbeddedBuilder, EncodeOptions, Embedded, Link, Links,
    RelRegistry, Resource,
};
use serde::Deserialize;
use serde_json::json;

fn test_registry() -> RelRegistry {
    RelRegistry::new([CuriTemplate::new("test", "http://example.com/rels/{rel}").unwrap()])
}

#[test]
fn nested_embedded_rels_are_curied() {
    let inner = Resource::from_parts(
        Links::empty(),
        Embedded::embedded("http://example.com/rels/bar", vec![Resource::new()]),
    );
    let outer = Resource::with_registry(
        Links::empty(),
        Embedded::embedded("http://example.com/rels/foo", vec![inner]),
        test_registry(),
    );

    assert_eq!(outer.embedded().rels(), vec!["test:foo"]);
    let inner = &outer.embedded().items_by("test:foo")[0];
    assert_eq!(inner.embedded().rels(), vec!["test:bar"]);
}

#[test]
fn nested_link_rels_are_curied() {
    let inner = Resource::from_links(Links::linking_to([Link::new(
        "http://example.com/rels/bar",
        "http://example.com",
    )]));
    let outer = Resource::with_registry(
        Links::empty(),
        Embedded::embedded("http://example.com/rels/foo", vec![inner]),
        test_registry(),
    );

    let inner = &outer.embedded().items_by("test:foo")[0];
    assert_eq!(inner.links().rels(), vec!["test:bar"]);
}

#[test]
fn curies_reach_deeply_nested_resources() {
    let mut resource = Resource::from_links(Links::linking_to([Link::new(
        "http://example.com/rels/leaf",
        "/leaf",
    )]));
    for _ in 0..5 {
        resource = Resource::from_parts(
            Links::linking_to([Link::self_link("/level")]),
            Embedded::embedded("http://example.com/rels/child", vec![resource]),
        );
    }
    let root = Resource::with_registry(
        Links::empty(),
        Embedded::embedded("http://example.com/rels/child", vec![resource]),
        test_registry(),
    );

    let mut current = &root;
    for _ in 0..6 {
        assert_eq!(current.embedded().rels(), vec!["test:child"]);
        current = &current.embedded().items_by("test:child")[0];
    }
    assert_eq!(current.links().rels(), vec!["test:leaf"]);
    assert_eq!(current.registry(), &test_registry());
}

#[test]
fn resolution_is_idempotent_through_resources() {
    let resource = Resource::with_registry(
        Links::linking_to([Link::new("http://example.com/rels/foo", "/foo")]),
        Embedded::embedded("http://example.com/rels/bar", vec![Resource::new()]),
        test_registry(),
    );
    let again = Resource::with_registry(
        resource.links().clone(),
        resource.embedded().clone(),
        test_registry(),
    );
    assert_eq!(again.links().rels(), vec!["test:foo"]);
    assert_eq!(again.embedded().rels(), vec!["test:bar"]);
    assert_eq!(again, resource);
}

#[test]
fn embedded_builder_copy_of_keeps_original() {
    let original = Embedded::embedded("foo", vec![Resource::new()]);
    let extended = EmbeddedBuilder::copy_of(&original)
        .with("bar", vec![Resource::new()])
        .using(&test_registry())
        .build();

    assert_eq!(original.rels(), vec!["foo"]);
    assert_eq!(extended.rels(), vec!["foo", "bar"]);
}

#[derive(Debug, Deserialize)]
struct Order {
    total: f64,
    currency: String,
}

#[test]
fn decoded_document_round_trips_with_typed_items() {
    let document = json!({
        "_links": {
            "self": {"href": "/orders"},
            "curies": [{"name": "acme", "href": "https://acme.example.com/rels/{rel}", "templated": true}]
        },
        "count": 2,
        "_embedded": {
            "https://acme.example.com/rels/order": [
                {
                    "_links": {
                        "self": {"href": "/orders/1"},
                        "https://acme.example.com/rels/basket": {"href": "/baskets/98712"}
                    },
                    "total": 30.0,
                    "currency": "USD"
                },
                {
                    "_links": {"self": {"href": "/orders/2"}},
                    "status": "cancelled"
                }
            ]
        }
    });

    let resource = decode(&document).unwrap();
    assert_eq!(resource.embedded().rels(), vec!["acme:order"]);
    assert_eq!(resource.attribute("count"), Some(&json!(2)));

    let orders: Vec<Order> = resource.embedded().items_as("acme:order");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].total, 30.0);
    assert_eq!(orders[0].currency, "USD");

    let encoded = encode(&resource, &EncodeOptions::default()).unwrap();
    assert_eq!(
        encoded["_embedded"]["acme:order"][0]["_links"]["acme:basket"],
        json!({"href": "/baskets/98712"})
    );
    assert_eq!(encoded["_embedded"]["acme:order"][1]["status"], json!("cancelled"));
    assert_eq!(decode(&encoded).unwrap(), resource);
}

#[test]
fn nested_declaration_wins_on_prefix_collision() {
    let document = json!({
        "_links": {
            "curies": [{"name": "ns", "href": "http://outer.example.com/{rel}"}]
        },
        "_embedded": {
            "http://outer.example.com/item": {
                "_links": {
                    "curies": [{"name": "ns", "href": "http://inner.example.com/{rel}"}],
                    "http://inner.example.com/detail": {"href": "/detail"}
                }
            }
        }
    });

    let resource = decode(&document).unwrap();
    assert_eq!(resource.embedded().rels(), vec!["ns:item"]);
    let item = &resource.embedded().items_by("ns:item")[0];
    assert_eq!(item.links().rels(), vec!["curies", "ns:detail"]);
    assert_eq!(
        item.registry().curie("ns").unwrap().template(),
        "http://inner.example.com/{rel}"
    );
}
