//! # Provider HTTP Tests
//!
//! These tests run the real HTTP providers against a `wiremock` server to check
//! the request shape each upstream API expects and how responses are mapped.

mod common;

use crate::common::setup_tracing;
use diary_insight::{
    analysis::TextAnalyzerBuilder,
    providers::{
        ai::{gemini::GeminiProvider, openai::OpenAiProvider, AiProvider},
        factory::create_ai_provider,
        image::{openai::OpenAiImageProvider, ImageProvider, ImageRequest},
    },
    ProviderConfig, ProviderError,
};
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn chat_completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn test_openai_provider_sends_system_and_user_messages() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4.1-nano",
            "messages": [
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "hello" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(
        format!("{}/v1/chat/completions", server.uri()),
        Some("test-key".to_string()),
        Some("gpt-4.1-nano".to_string()),
        0.2,
    )
    .unwrap();

    let response = provider.generate("be brief", "hello").await.unwrap();
    assert_eq!(response, "hi there");
}

#[tokio::test]
async fn test_openai_provider_maps_error_status() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(server.uri(), None, None, 0.2).unwrap();

    let err = provider.generate("s", "u").await.unwrap_err();
    match err {
        ProviderError::AiApi { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_openai_provider_without_choices_is_empty_response() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(server.uri(), None, None, 0.2).unwrap();
    let err = provider.generate("s", "u").await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse));
}

#[tokio::test]
async fn test_gemini_provider_sends_key_and_system_instruction() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "gemini-key"))
        .and(body_partial_json(json!({
            "systemInstruction": { "parts": [{ "text": "be brief" }] },
            "contents": [{ "parts": [{ "text": "hello" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"ok\":true}" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(
        format!(
            "{}/v1beta/models/gemini-2.0-flash:generateContent",
            server.uri()
        ),
        "gemini-key".to_string(),
        0.2,
    )
    .unwrap();

    assert_eq!(
        provider.generate("be brief", "hello").await.unwrap(),
        "{\"ok\":true}"
    );
}

#[tokio::test]
async fn test_image_provider_requests_one_image() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("authorization", "Bearer image-key"))
        .and(body_partial_json(json!({
            "model": "dall-e-3",
            "prompt": "a minimal sketch of a kite",
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
            "style": "natural"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "url": "https://images.example.com/kite.png" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiImageProvider::new(
        format!("{}/v1/images/generations", server.uri()),
        "image-key".to_string(),
        "dall-e-3".to_string(),
        "standard".to_string(),
    )
    .unwrap();

    let url = provider
        .generate_image(&ImageRequest::new("a minimal sketch of a kite"))
        .await
        .unwrap();
    assert_eq!(url, "https://images.example.com/kite.png");
}

#[tokio::test]
async fn test_image_provider_without_url_is_empty_response() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{}] })))
        .mount(&server)
        .await;

    let provider = OpenAiImageProvider::new(
        server.uri(),
        "image-key".to_string(),
        "dall-e-3".to_string(),
        "standard".to_string(),
    )
    .unwrap();

    let err = provider
        .generate_image(&ImageRequest::new("p"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::EmptyResponse));
}

/// A provider built by the factory drives the whole analysis pipeline.
#[tokio::test]
async fn test_factory_provider_end_to_end() {
    setup_tracing();
    let server = MockServer::start().await;
    let model_output = "```json\n{\"Content Analysis\":{\"category\":\"Travel\",\"keywords\":\"train, mountains\",\"confidenceScore\":88},\"Content Moderation\":{\"hasInappropriateContent\":false}}\n```";
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(model_output)))
        .mount(&server)
        .await;

    let config = ProviderConfig {
        provider: "openai".to_string(),
        api_url: Some(format!("{}/v1/chat/completions", server.uri())),
        api_key: Some("test-key".to_string()),
        model_name: "gpt-4.1-nano".to_string(),
        temperature: 0.2,
    };
    let provider = create_ai_provider("openai_default", &config).unwrap();
    let analyzer = TextAnalyzerBuilder::new()
        .ai_provider(provider)
        .build()
        .unwrap();

    let result = analyzer
        .analyze_text("Took the train through the mountains.")
        .await;
    assert!(result.is_analyzed);
    assert_eq!(result.keywords, vec!["train", "mountains"]);
    assert_eq!(result.confidence_score, 88.0);
}

#[test]
fn test_factory_rejects_missing_or_blank_key() {
    let mut config = ProviderConfig {
        provider: "openai".to_string(),
        api_url: None,
        api_key: None,
        model_name: "gpt-4.1-nano".to_string(),
        temperature: 0.2,
    };
    assert!(matches!(
        create_ai_provider("openai_default", &config),
        Err(ProviderError::MissingApiKey(name)) if name == "openai_default"
    ));

    config.api_key = Some("  ".to_string());
    assert!(matches!(
        create_ai_provider("openai_default", &config),
        Err(ProviderError::MissingApiKey(_))
    ));
}

#[test]
fn test_factory_rejects_unknown_provider() {
    let config = ProviderConfig {
        provider: "mystery".to_string(),
        api_url: None,
        api_key: Some("key".to_string()),
        model_name: "m".to_string(),
        temperature: 0.2,
    };
    assert!(matches!(
        create_ai_provider("x", &config),
        Err(ProviderError::UnsupportedProvider(p)) if p == "mystery"
    ));
}
