//! Scenario tests for the content service facade: conversion and rich-text
//! resolution over realistic wire-shaped fixtures.

use crate::models::{ContentItem, ElementKind, ItemResponse, LinkedItemSet};
use crate::registry::TypeDescriptor;
use crate::richtext::RichTextOptions;
use crate::services::{ContentService, ContentServiceError};
use serde_json::{json, Value};

fn item(value: Value) -> ContentItem {
    serde_json::from_value(value).unwrap()
}

fn system(codename: &str, content_type: &str) -> Value {
    json!({
        "id": format!("id-{}", codename),
        "name": codename,
        "codename": codename,
        "language": "en-US",
        "type": content_type,
        "last_modified": "2019-09-18T10:58:38.917Z"
    })
}

fn scope(entries: Vec<(&str, ContentItem)>) -> LinkedItemSet {
    entries
        .into_iter()
        .map(|(codename, item)| (codename.to_string(), item))
        .collect()
}

/// The published/broken two-anchor item from the delivery fixture set.
fn on_roasts() -> ContentItem {
    item(json!({
        "system": system("on_roasts", "article"),
        "elements": {
            "description": {
                "type": "rich_text",
                "name": "Description",
                "codename": "description",
                "value": "<p>Our <a data-item-id=\"f4b3fc05-e988-4dae-9ac1-a94aba566474\" href=\"\">roasts</a> and <a data-item-id=\"not-found\" href=\"\">archive</a>.</p>",
                "images": {},
                "links": {
                    "f4b3fc05-e988-4dae-9ac1-a94aba566474": {
                        "type": "article",
                        "codename": "coffee_processing_techniques",
                        "url_slug": ""
                    }
                },
                "modular_content": []
            }
        }
    }))
}

#[test]
fn test_published_and_broken_anchor_resolution() {
    let service = ContentService::with_options(
        RichTextOptions::new()
            .with_link_resolver(|link| format!("/articles/{}", link.url_slug))
            .with_broken_link_resolver(|_| "/404".to_string()),
    );

    let resolved = service
        .resolve_rich_text(&on_roasts(), "description", &LinkedItemSet::new())
        .unwrap();

    // published anchor through the link resolver, broken anchor through the
    // broken-link resolver, everything else byte-identical
    assert_eq!(
        resolved,
        "<p>Our <a data-item-id=\"f4b3fc05-e988-4dae-9ac1-a94aba566474\" href=\"/articles/\">roasts</a> and <a data-item-id=\"not-found\" href=\"/404\">archive</a>.</p>"
    );
}

#[test]
fn test_broken_anchor_href_is_exactly_the_resolver_output() {
    let service = ContentService::with_options(
        RichTextOptions::new().with_broken_link_resolver(|broken| {
            assert_eq!(broken.item_id, "not-found");
            "/404".to_string()
        }),
    );

    let resolved = service
        .resolve_rich_text(&on_roasts(), "description", &LinkedItemSet::new())
        .unwrap();

    assert!(resolved.contains("href=\"/404\""));
    // the resolvable anchor had no link resolver configured: untouched
    assert!(resolved.contains("<a data-item-id=\"f4b3fc05-e988-4dae-9ac1-a94aba566474\" href=\"\">"));
}

#[test]
fn test_resolution_is_idempotent() {
    let service = ContentService::with_options(
        RichTextOptions::new()
            .with_link_resolver(|link| format!("/articles/{}", link.codename))
            .with_broken_link_resolver(|_| "/404".to_string()),
    );

    let first = service
        .resolve_rich_text(&on_roasts(), "description", &LinkedItemSet::new())
        .unwrap();

    // feed the resolved markup back through a second resolution
    let mut resolved_item = on_roasts();
    if let Some(crate::models::Element::RichText { value, .. }) =
        resolved_item.elements.get_mut("description")
    {
        *value = first.clone();
    }
    let second = service
        .resolve_rich_text(&resolved_item, "description", &LinkedItemSet::new())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_inline_text_item_expansion() {
    let donate = item(json!({
        "system": system("donate_with_us", "callout"),
        "elements": {
            "message": {
                "type": "text",
                "name": "Message",
                "codename": "message",
                "value": "Please donate with us."
            }
        }
    }));
    let host = item(json!({
        "system": system("coffee_beverages_explained", "article"),
        "elements": {
            "body": {
                "type": "rich_text",
                "name": "Body",
                "codename": "body",
                "value": "<p>Read on.</p><object type=\"application/kenticocloud\" data-type=\"item\" data-codename=\"donate_with_us\"></object><p>Thanks!</p>",
                "images": {},
                "links": {},
                "modular_content": ["donate_with_us"]
            }
        }
    }));

    let service = ContentService::with_options(RichTextOptions::new().with_inline_renderer(
        |converted| converted.system().content_type == "callout",
        |converted| {
            converted
                .as_untyped()
                .and_then(|item| item.string_value("message"))
                .unwrap_or_default()
                .to_string()
        },
    ));

    let resolved = service
        .resolve_rich_text(&host, "body", &scope(vec![("donate_with_us", donate)]))
        .unwrap();

    assert_eq!(
        resolved,
        "<p>Read on.</p>Please donate with us.<p>Thanks!</p>"
    );
}

fn embed_article(codename: &str, other: &str) -> ContentItem {
    item(json!({
        "system": system(codename, "embed_article"),
        "elements": {
            "body": {
                "type": "rich_text",
                "name": "Body",
                "codename": "body",
                "value": format!(
                    "<p>{}-start</p><object type=\"application/kenticocloud\" data-type=\"item\" data-codename=\"{}\"></object><p>{}-end</p>",
                    codename, other, codename
                ),
                "images": {},
                "links": {},
                "modular_content": [other]
            }
        }
    }))
}

fn embed_service() -> ContentService {
    let mut service = ContentService::with_options(RichTextOptions::new().with_inline_renderer(
        |converted| converted.as_typed().is_some_and(|o| o.type_name == "EmbedArticle"),
        |converted| {
            converted
                .as_typed()
                .and_then(|object| object.text("body"))
                .unwrap_or_default()
                .to_string()
        },
    ));
    service
        .register_type(
            TypeDescriptor::builder("embed_article", "EmbedArticle")
                .element("body", ElementKind::RichText)
                .build(),
        )
        .unwrap();
    service
}

#[test]
fn test_mutual_embedding_terminates_with_verbatim_placeholder() {
    let a = embed_article("cycle_a", "cycle_b");
    let b = embed_article("cycle_b", "cycle_a");
    let scope = scope(vec![("cycle_a", a.clone()), ("cycle_b", b)]);

    let service = embed_service();
    let resolved = service.resolve_rich_text(&a, "body", &scope).unwrap();

    // B expanded once; the re-embedded occurrence of A inside B's expansion
    // stays as the original placeholder markup
    assert_eq!(
        resolved,
        "<p>cycle_a-start</p><p>cycle_b-start</p><object type=\"application/kenticocloud\" data-type=\"item\" data-codename=\"cycle_a\"></object><p>cycle_b-end</p><p>cycle_a-end</p>"
    );
}

#[test]
fn test_self_embedding_item_keeps_placeholder() {
    let narcissus = embed_article("narcissus", "narcissus");
    let scope = scope(vec![("narcissus", narcissus.clone())]);

    let service = embed_service();
    let resolved = service.resolve_rich_text(&narcissus, "body", &scope).unwrap();

    assert_eq!(
        resolved,
        "<p>narcissus-start</p><object type=\"application/kenticocloud\" data-type=\"item\" data-codename=\"narcissus\"></object><p>narcissus-end</p>"
    );
}

#[test]
fn test_sibling_resolutions_do_not_share_the_visited_set() {
    let a = embed_article("cycle_a", "cycle_b");
    let b = embed_article("cycle_b", "cycle_a");
    let scope = scope(vec![("cycle_a", a.clone()), ("cycle_b", b)]);

    let service = embed_service();
    let first = service.resolve_rich_text(&a, "body", &scope).unwrap();
    // a second top-level call starts from a fresh visited set
    let second = service.resolve_rich_text(&a, "body", &scope).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unregistered_type_converts_to_identity() {
    let service = ContentService::new();
    let input = on_roasts();

    let result = service.convert_item(&input, &LinkedItemSet::new());

    assert_eq!(result.item.as_untyped(), Some(&input));
    assert!(result.field_errors.is_empty());
}

#[test]
fn test_field_matching_by_derived_codename_and_override() {
    let mut service = ContentService::new();
    service
        .register_type(
            TypeDescriptor::builder("article", "Article")
                // "postDate" case-folds to the element codename "post_date"
                .element("postDate", ElementKind::DateTime)
                // identifier does not fold to the codename: override matches
                .element_from("teaser", ElementKind::Text, "metadata_teaser")
                .build(),
        )
        .unwrap();

    let article = item(json!({
        "system": system("matching", "article"),
        "elements": {
            "post_date": {"type": "date_time", "name": "Post date", "codename": "post_date", "value": "2014-11-07T00:00:00Z"},
            "metadata_teaser": {"type": "text", "name": "Teaser", "codename": "metadata_teaser", "value": "short"}
        }
    }));

    let result = service.convert_item(&article, &LinkedItemSet::new());
    let object = result.item.as_typed().unwrap();

    assert!(object.field("postDate").unwrap().as_date_time().is_some());
    assert_eq!(object.text("teaser"), Some("short"));
}

#[test]
fn test_conversion_resolves_rich_text_fields() {
    let mut service = ContentService::with_options(
        RichTextOptions::new().with_broken_link_resolver(|_| "/404".to_string()),
    );
    service
        .register_type(
            TypeDescriptor::builder("article", "Article")
                .element("description", ElementKind::RichText)
                .build(),
        )
        .unwrap();

    let result = service.convert_item(&on_roasts(), &LinkedItemSet::new());
    let object = result.item.as_typed().unwrap();
    let description = object.text("description").unwrap();

    assert!(description.contains("href=\"/404\""));
}

#[test]
fn test_sibling_rich_text_fields_expand_independently() {
    // both fields embed the same codename; each field opens its own
    // resolution scope, so the second field is not blocked by the first
    let note = item(json!({
        "system": system("shared_note", "callout"),
        "elements": {
            "message": {"type": "text", "name": "Message", "codename": "message", "value": "twice"}
        }
    }));
    let host = item(json!({
        "system": system("host", "two_bodies"),
        "elements": {
            "intro": {
                "type": "rich_text",
                "name": "Intro",
                "codename": "intro",
                "value": "<object type=\"application/kenticocloud\" data-type=\"item\" data-codename=\"shared_note\"></object>",
                "images": {}, "links": {}, "modular_content": ["shared_note"]
            },
            "outro": {
                "type": "rich_text",
                "name": "Outro",
                "codename": "outro",
                "value": "<object type=\"application/kenticocloud\" data-type=\"item\" data-codename=\"shared_note\"></object>",
                "images": {}, "links": {}, "modular_content": ["shared_note"]
            }
        }
    }));

    let mut service = ContentService::with_options(RichTextOptions::new().with_inline_renderer(
        |converted| converted.system().content_type == "callout",
        |converted| {
            converted
                .as_untyped()
                .and_then(|item| item.string_value("message"))
                .unwrap_or_default()
                .to_string()
        },
    ));
    service
        .register_type(
            TypeDescriptor::builder("two_bodies", "TwoBodies")
                .element("intro", ElementKind::RichText)
                .element("outro", ElementKind::RichText)
                .build(),
        )
        .unwrap();

    let result = service.convert_item(&host, &scope(vec![("shared_note", note)]));
    let object = result.item.as_typed().unwrap();

    assert_eq!(object.text("intro"), Some("twice"));
    assert_eq!(object.text("outro"), Some("twice"));
}

#[test]
fn test_convert_item_as_unknown_type_is_an_error() {
    let service = ContentService::new();

    let err = service
        .convert_item_as(&on_roasts(), &LinkedItemSet::new(), "article")
        .unwrap_err();

    assert_eq!(
        err,
        ContentServiceError::UnknownContentType {
            content_type: "article".to_string()
        }
    );
}

#[test]
fn test_convert_item_as_ignores_system_type() {
    let mut service = ContentService::new();
    service
        .register_type(
            TypeDescriptor::builder("teaser_block", "TeaserBlock")
                .element_from("headline", ElementKind::Text, "message")
                .build(),
        )
        .unwrap();

    // system type "callout" is unregistered; the explicit target applies
    let callout = item(json!({
        "system": system("weekly", "callout"),
        "elements": {
            "message": {"type": "text", "name": "Message", "codename": "message", "value": "Fresh beans"}
        }
    }));

    let result = service
        .convert_item_as(&callout, &LinkedItemSet::new(), "teaser_block")
        .unwrap();

    assert_eq!(result.item.as_typed().unwrap().text("headline"), Some("Fresh beans"));
}

#[test]
fn test_resolve_rich_text_caller_errors() {
    let service = ContentService::new();
    let article = on_roasts();

    let err = service
        .resolve_rich_text(&article, "missing", &LinkedItemSet::new())
        .unwrap_err();
    assert_eq!(
        err,
        ContentServiceError::ElementNotFound {
            item: "on_roasts".to_string(),
            codename: "missing".to_string()
        }
    );

    let text_item = item(json!({
        "system": system("plain", "article"),
        "elements": {
            "title": {"type": "text", "name": "Title", "codename": "title", "value": "Plain"}
        }
    }));
    let err = service
        .resolve_rich_text(&text_item, "title", &LinkedItemSet::new())
        .unwrap_err();
    assert_eq!(
        err,
        ContentServiceError::NotRichText {
            item: "plain".to_string(),
            codename: "title".to_string(),
            actual: ElementKind::Text
        }
    );
}

#[test]
fn test_convert_response_envelope() {
    let mut service = ContentService::new();
    service
        .register_type(
            TypeDescriptor::builder("article", "Article")
                .element("description", ElementKind::RichText)
                .build(),
        )
        .unwrap();

    let response: ItemResponse = serde_json::from_value(json!({
        "item": {
            "system": system("on_roasts", "article"),
            "elements": {
                "description": {
                    "type": "rich_text",
                    "name": "Description",
                    "codename": "description",
                    "value": "<p>plain</p>",
                    "images": {}, "links": {}, "modular_content": []
                }
            }
        },
        "modular_content": {}
    }))
    .unwrap();

    let result = service.convert_response(&response);
    let object = result.item.as_typed().unwrap();

    assert_eq!(object.content_type, "article");
    assert_eq!(object.text("description"), Some("<p>plain</p>"));
}
