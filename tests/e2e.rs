//! End-to-end tests for edgequake-pageitems.
//!
//! Each test feeds a host item collection shaped like the page-splitting
//! function's real output through the public API and checks the items the
//! workflow engine would receive.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture

use edgequake_pageitems::{
    parse_items, read_items, transform_items, transform_record, write_items, ItemSource,
    MissingImages, PageItemsError, TransformConfig,
};
use serde_json::{json, Value};
use std::io::Write;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Wrap a body the way the host engine delivers the function result.
fn host_items(body: Value) -> Vec<Value> {
    vec![json!({ "json": { "result": { "statusCode": 200, "body": body } } })]
}

/// A body like the one the page-splitting function returns for `n` pages.
fn lambda_body(n: usize) -> Value {
    let images: Vec<Value> = (1..=n)
        .map(|i| {
            json!({
                "filename": format!("page_{i}.jpg"),
                "content": format!("cGFnZS0{i}"),
                "content_type": "image/jpeg"
            })
        })
        .collect();
    json!({ "images": images, "total_pages": n })
}

fn run(items: &[Value]) -> Result<Vec<Value>, PageItemsError> {
    transform_items(items, &TransformConfig::default()).map(|records| {
        records
            .iter()
            .map(|r| r.to_item().expect("items serialise"))
            .collect()
    })
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn test_object_body_single_image() {
    let items = host_items(json!({
        "images": [{ "filename": "a.png", "content": "QQ==", "content_type": "image/png" }],
        "total_pages": 1
    }));

    let out = run(&items).expect("transform should succeed");

    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["json"]["fileName"], "a.png");
    assert_eq!(out[0]["json"]["totalPages"], 1);
    assert_eq!(out[0]["binary"]["data"]["data"], "QQ==");
    assert_eq!(out[0]["binary"]["data"]["mimeType"], "image/png");
    assert_eq!(out[0]["binary"]["data"]["fileName"], "a.png");
}

#[test]
fn test_string_body_no_images() {
    let items = host_items(json!(r#"{"images":[],"total_pages":0}"#));
    let out = run(&items).expect("transform should succeed");
    assert!(out.is_empty());
}

#[test]
fn test_malformed_string_body() {
    let items = host_items(json!("{bad json"));
    let err = run(&items).unwrap_err();
    assert!(
        matches!(err, PageItemsError::MalformedPayload { .. }),
        "got: {err:?}"
    );
    let msg = err.to_string();
    assert!(msg.contains("Failed to parse Lambda response body"), "got: {msg}");
    assert!(msg.contains("line 1"), "parse position missing: {msg}");
}

#[test]
fn test_body_without_images() {
    let items = host_items(json!({ "total_pages": 4 }));

    let err = run(&items).unwrap_err();
    match err {
        PageItemsError::MissingField { path } => assert_eq!(path, "result.body.images"),
        other => panic!("unexpected: {other:?}"),
    }

    let config = TransformConfig::builder()
        .missing_images(MissingImages::Empty)
        .build()
        .unwrap();
    let out = transform_items(&items, &config).expect("empty policy should succeed");
    assert!(out.is_empty());
}

// ── Properties ───────────────────────────────────────────────────────────────

#[test]
fn test_count_order_and_total_pages() {
    for n in [1, 2, 7, 30] {
        let body = lambda_body(n);
        let out = run(&host_items(body.clone())).unwrap();

        assert_eq!(out.len(), n);
        for (i, item) in out.iter().enumerate() {
            assert_eq!(item["json"]["fileName"], body["images"][i]["filename"]);
            assert_eq!(item["json"]["totalPages"], body["total_pages"]);
            assert_eq!(item["binary"]["data"]["data"], body["images"][i]["content"]);
        }
    }
}

#[test]
fn test_string_and_object_bodies_agree() {
    let body = lambda_body(3);
    let as_text = serde_json::to_string(&body).unwrap();

    let from_object = run(&host_items(body)).unwrap();
    let from_string = run(&host_items(Value::String(as_text))).unwrap();

    assert_eq!(from_object, from_string);
}

// ── Upstream failures ────────────────────────────────────────────────────────

#[test]
fn test_function_error_response() {
    let body = serde_json::to_string(&json!({
        "error": "Unable to get page count. Is poppler installed and in PATH?",
        "details": "Check CloudWatch logs for more information"
    }))
    .unwrap();
    let items = vec![json!({ "result": { "statusCode": 500, "body": body } })];

    match run(&items).unwrap_err() {
        PageItemsError::UpstreamFailure {
            status_code,
            message,
            details,
        } => {
            assert_eq!(status_code, Some(500));
            assert!(message.contains("poppler"));
            assert!(details.is_some());
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_bad_request_response() {
    let body = serde_json::to_string(&json!({ "error": "No body found in request" })).unwrap();
    let items = vec![json!({ "result": { "statusCode": 400, "body": body } })];
    let err = run(&items).unwrap_err();
    assert!(err.to_string().contains("400"), "got: {err}");
}

#[test]
fn test_non_numeric_status_code_with_pages() {
    for status in [json!("200"), json!(-1), json!(70000)] {
        let items = vec![json!({
            "json": { "result": { "statusCode": status, "body": lambda_body(2) } }
        })];
        let config = TransformConfig::builder()
            .check_upstream_status(false)
            .build()
            .unwrap();
        let out = transform_items(&items, &config).expect("status is not decoded when unchecked");
        assert_eq!(out.len(), 2);
    }
}

// ── Input shapes ─────────────────────────────────────────────────────────────

#[test]
fn test_bare_record_without_json_wrapper() {
    let record = json!({ "result": { "body": lambda_body(2) } });
    let out = transform_record(&record, &TransformConfig::default()).unwrap();
    assert_eq!(out.len(), 2);
}

#[test]
fn test_non_object_item_is_named() {
    let err = run(&[json!("not a record")]).unwrap_err();
    assert!(err.to_string().contains("'item'"), "got: {err}");
}

#[test]
fn test_custom_binary_property() {
    let config = TransformConfig::builder()
        .binary_property("page")
        .build()
        .unwrap();
    let out = transform_items(&host_items(lambda_body(1)), &config).unwrap();
    let item = out[0].to_item().expect("items serialise");
    assert_eq!(item["binary"]["page"]["fileName"], "page_1.jpg");
    assert!(item["binary"].get("data").is_none());
}

#[test]
fn test_verify_content_on_real_jpeg_header() {
    // JPEG SOI + APP0 marker, enough for signature sniffing.
    let jpeg = "/9j/4AAQSkZJRgABAQ==";
    let items = host_items(json!({
        "images": [{ "filename": "page_1.jpg", "content": jpeg, "content_type": "image/jpeg" }],
        "total_pages": 1
    }));
    let config = TransformConfig::builder().verify_content(true).build().unwrap();
    let out = transform_items(&items, &config).expect("valid jpeg should pass");
    assert_eq!(out[0].attachment.data, jpeg);
}

// ── File round trip ──────────────────────────────────────────────────────────

#[test]
fn test_read_transform_write() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("items.json");
    let output = dir.path().join("out").join("pages.json");

    let mut f = std::fs::File::create(&input).unwrap();
    let body = serde_json::to_string(&lambda_body(3)).unwrap();
    write!(
        f,
        "{}",
        json!([{ "json": { "result": { "statusCode": 200, "body": body } } }])
    )
    .unwrap();
    drop(f);

    let items = read_items(&ItemSource::File(input)).unwrap();
    let records = transform_items(&items, &TransformConfig::default()).unwrap();
    write_items(&output, &records, true).unwrap();

    let written = parse_items(&std::fs::read_to_string(&output).unwrap(), "out").unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[0]["json"]["fileName"], "page_1.jpg");
    assert_eq!(written[2]["json"]["totalPages"], 3);
}
