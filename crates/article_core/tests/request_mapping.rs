use article_core::{ArticlePayload, ArticleUpdatePayload, BulkItem, CreateArticleBody};
use chrono::{TimeZone, Utc};
use serde_json::json;

#[test]
fn single_object_decodes_as_single() {
    let body = CreateArticleBody::from_value(json!({
        "title": "T",
        "content": "C",
        "author": "A",
        "category": "news",
        "published_at": "2024-02-03T04:05:06Z"
    }))
    .unwrap();

    let expected = ArticlePayload {
        title: Some("T".to_string()),
        content: Some("C".to_string()),
        author: Some("A".to_string()),
        category: Some("news".to_string()),
        published_at: Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap()),
    };
    assert_eq!(body, CreateArticleBody::Single(expected));
}

#[test]
fn array_decodes_as_list_and_keeps_malformed_elements() {
    let body = CreateArticleBody::from_value(json!([
        {"title": "first", "content": "C", "author": "A"},
        "not an article",
        [1, 2, 3],
        {"title": "second"}
    ]))
    .unwrap();

    let CreateArticleBody::List(items) = body else {
        panic!("expected a list body");
    };
    assert_eq!(items.len(), 4);
    assert!(matches!(&items[0], BulkItem::Object(p) if p.title.as_deref() == Some("first")));
    assert_eq!(items[1], BulkItem::Malformed(json!("not an article")));
    assert_eq!(items[2], BulkItem::Malformed(json!([1, 2, 3])));
    assert!(matches!(&items[3], BulkItem::Object(p) if p.content.is_none()));
}

#[test]
fn scalar_bodies_are_rejected() {
    for value in [json!("text"), json!(42), json!(true), json!(null)] {
        let err = CreateArticleBody::from_value(value.clone()).unwrap_err();
        assert!(err.contains("invalid body format"), "value={value} err={err}");
    }
}

#[test]
fn mistyped_and_unknown_fields_are_ignored() {
    let body = CreateArticleBody::from_value(json!({
        "title": 12,
        "content": ["c"],
        "author": "A",
        "category": null,
        "views": 100,
        "id": 7
    }))
    .unwrap();

    let CreateArticleBody::Single(payload) = body else {
        panic!("expected a single body");
    };
    assert_eq!(payload.title, None);
    assert_eq!(payload.content, None);
    assert_eq!(payload.author.as_deref(), Some("A"));
    assert_eq!(payload.category, None);
}

#[test]
fn unparsable_published_at_is_left_unset() {
    let body = CreateArticleBody::from_value(json!({
        "title": "T",
        "content": "C",
        "author": "A",
        "published_at": "03/02/2024"
    }))
    .unwrap();

    let CreateArticleBody::Single(payload) = body else {
        panic!("expected a single body");
    };
    assert_eq!(payload.published_at, None);
    assert_eq!(payload.into_draft().published_at, None);
}

#[test]
fn payload_into_draft_fills_missing_text_with_empty_strings() {
    let payload = ArticlePayload {
        title: Some("T".to_string()),
        ..ArticlePayload::default()
    };
    let draft = payload.into_draft();
    assert_eq!(draft.title, "T");
    assert_eq!(draft.content, "");
    assert!(draft.validate().is_err());
}

#[test]
fn update_payload_requires_text_fields() {
    let err = serde_json::from_value::<ArticleUpdatePayload>(json!({
        "content": "C",
        "author": "A"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("title"), "unexpected error: {err}");

    let err = serde_json::from_value::<ArticleUpdatePayload>(json!({
        "title": 5,
        "content": "C",
        "author": "A"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("invalid type"), "unexpected error: {err}");
}

#[test]
fn update_payload_parses_optional_fields() {
    let payload: ArticleUpdatePayload = serde_json::from_value(json!({
        "id": 99,
        "title": "T",
        "content": "C",
        "author": "A",
        "category": "ops",
        "published_at": "2025-07-01T09:00:00+09:00"
    }))
    .unwrap();
    assert_eq!(payload.category.as_deref(), Some("ops"));
    assert_eq!(
        payload.published_at,
        Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap())
    );

    let payload: ArticleUpdatePayload =
        serde_json::from_value(json!({"title": "T", "content": "C", "author": "A"})).unwrap();
    assert_eq!(payload.category, None);
    assert_eq!(payload.published_at, None);
}

#[test]
fn update_payload_rejects_bad_published_at() {
    let err = serde_json::from_value::<ArticleUpdatePayload>(json!({
        "title": "T",
        "content": "C",
        "author": "A",
        "published_at": "soon"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("RFC 3339"), "unexpected error: {err}");
}
