//! End-to-end facade tests: ingest through [`actx_sdk::ingest`], run edit
//! strategies and convert through [`actx_sdk::convert`], and check the
//! assembled output against the literal scenarios and quantified
//! properties of spec §8.

use actx_core::NullResolver;
use actx_sdk::{convert, ingest, ConvertRequest, IngestRequest};
use actx_types::{EditStrategy, Format};
use serde_json::json;

fn ingest_ok(source_format: Format, session_id: &str, role: &str, parts: Vec<serde_json::Value>) -> actx_types::Message {
    ingest(IngestRequest {
        source_format,
        session_id: session_id.to_string(),
        parent_id: None,
        id: None,
        role: role.to_string(),
        parts,
        user_meta: Default::default(),
    })
    .unwrap()
}

/// S2: ingest a provider-B thinking message, convert to `anthropic` (native
/// thinking block with signature) and to `openai` (downgraded to plain
/// text, signature dropped).
#[tokio::test]
async fn s2_thinking_downgrade_across_providers() {
    let message = ingest_ok(
        Format::Anthropic,
        "s1",
        "assistant",
        vec![
            json!({"type": "thinking", "thinking": "reasoning", "signature": "sig_abc"}),
            json!({"type": "text", "text": "answer"}),
        ],
    );

    let resolver = NullResolver;
    let anthropic_out = convert(ConvertRequest::new(vec![message.clone()], Format::Anthropic, &resolver)).await.unwrap();
    let v = &anthropic_out.items;
    assert_eq!(v[0]["content"][0], json!({"type": "thinking", "thinking": "reasoning", "signature": "sig_abc"}));
    assert_eq!(v[0]["content"][1], json!({"type": "text", "text": "answer"}));

    let openai_out = convert(ConvertRequest::new(vec![message], Format::OpenAI, &resolver)).await.unwrap();
    let v = &openai_out.items;
    assert_eq!(
        v[0]["content"],
        json!([{"type": "text", "text": "reasoning"}, {"type": "text", "text": "answer"}])
    );
    assert!(v[0]["content"][0].get("signature").is_none());
}

/// S5: `remove_tool_result {keep_recent_n_tool_results: 1}` over three
/// tool-results elides the two oldest while keeping every Part (and its
/// `tool_call_id`) in place.
#[tokio::test]
async fn s5_remove_tool_result_elides_oldest_pairs() {
    let messages = vec![
        ingest_ok(Format::OpenAI, "s1", "tool", vec![json!({"type": "tool_response", "tool_call_id": "c1", "content": "r1"})]),
        ingest_ok(Format::OpenAI, "s1", "tool", vec![json!({"type": "tool_response", "tool_call_id": "c2", "content": "r2"})]),
        ingest_ok(Format::OpenAI, "s1", "tool", vec![json!({"type": "tool_response", "tool_call_id": "c3", "content": "r3"})]),
    ];

    let resolver = NullResolver;
    let mut request = ConvertRequest::new(messages, Format::OpenAI, &resolver);
    request.edit_strategies = vec![EditStrategy::RemoveToolResult { keep_recent_n_tool_results: 1 }];
    let out = convert(request).await.unwrap();

    let v = &out.items;
    assert_eq!(v[0]["content"], "[tool result elided]");
    assert_eq!(v[1]["content"], "[tool result elided]");
    assert_eq!(v[2]["content"], "r3");
    assert_eq!(v[0]["tool_call_id"], "c1");
    assert_eq!(v[1]["tool_call_id"], "c2");
    assert_eq!(v[2]["tool_call_id"], "c3");
}

/// S6: `metas` exposes only the `user_meta` sub-map, regardless of target
/// format, and regardless of what other reserved keys a message carries.
#[tokio::test]
async fn s6_metas_expose_only_user_meta() {
    let mut user_meta = serde_json::Map::new();
    user_meta.insert("trace".to_string(), json!("t1"));
    let message = ingest(IngestRequest {
        source_format: Format::OpenAI,
        session_id: "s1".to_string(),
        parent_id: None,
        id: None,
        role: "user".to_string(),
        parts: vec![json!({"type": "text", "text": "hi"})],
        user_meta,
    })
    .unwrap();

    let resolver = NullResolver;
    let out = convert(ConvertRequest::new(vec![message], Format::OpenAI, &resolver)).await.unwrap();
    assert_eq!(out.metas.len(), 1);
    assert_eq!(out.metas[0].get("trace").unwrap(), "t1");
    assert!(out.metas[0].get("source_format").is_none());
}

/// Property 4: `ids`/`metas` stay index-aligned with `items` for every
/// non-merging converter (provider A here), across a multi-message
/// sequence run through the facade end to end.
#[tokio::test]
async fn ordering_is_preserved_end_to_end() {
    let messages = vec![
        ingest_ok(Format::OpenAI, "s1", "user", vec![json!({"type": "text", "text": "a"})]),
        ingest_ok(Format::OpenAI, "s1", "assistant", vec![json!({"type": "text", "text": "b"})]),
        ingest_ok(Format::OpenAI, "s1", "user", vec![json!({"type": "text", "text": "c"})]),
    ];
    let ids: Vec<_> = messages.iter().map(|m| m.id).collect();

    let resolver = NullResolver;
    let out = convert(ConvertRequest::new(messages, Format::OpenAI, &resolver)).await.unwrap();
    assert_eq!(out.ids, ids);
    assert_eq!(out.items.as_array().unwrap().len(), 3);
    assert_eq!(out.items[0]["content"], "a");
    assert_eq!(out.items[1]["content"], "b");
    assert_eq!(out.items[2]["content"], "c");
}

/// Property 6: `public_urls` is present iff the target format is
/// `canonical`.
#[tokio::test]
async fn public_urls_present_only_for_canonical_format() {
    let message = ingest_ok(Format::OpenAI, "s1", "user", vec![json!({"type": "text", "text": "hi"})]);

    let resolver = NullResolver;
    let canonical_out = convert(ConvertRequest::new(vec![message.clone()], Format::Canonical, &resolver)).await.unwrap();
    assert!(canonical_out.public_urls.is_some());

    let openai_out = convert(ConvertRequest::new(vec![message], Format::OpenAI, &resolver)).await.unwrap();
    assert!(openai_out.public_urls.is_none());
}

/// An ingress payload that violates §3.3 (a tool-result on an assistant
/// message) is rejected at ingest time, before it ever reaches the store.
#[tokio::test]
async fn ingest_rejects_invalid_shape_before_storage() {
    let err = ingest(IngestRequest {
        source_format: Format::OpenAI,
        session_id: "s1".to_string(),
        parent_id: None,
        id: None,
        role: "assistant".to_string(),
        parts: vec![json!({"type": "tool_response", "tool_call_id": "c1", "content": "ok"})],
        user_meta: Default::default(),
    })
    .unwrap_err();
    assert_eq!(err.kind(), actx_types::ErrorKind::InvalidShape);
}

/// An unsupported target format is rejected before any conversion work
/// happens.
#[test]
fn unsupported_format_string_is_rejected() {
    let err = "langchain".parse::<Format>().unwrap_err();
    assert_eq!(err.kind(), actx_types::ErrorKind::UnsupportedFormat);
    let err = "".parse::<Format>().unwrap_err();
    assert_eq!(err.kind(), actx_types::ErrorKind::UnsupportedFormat);
}
