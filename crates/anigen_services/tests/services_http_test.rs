//! Tests for the service clients against a local stand-in server.

use anigen_core::{BgmSettings, ParsedScript};
use anigen_error::{AnigenError, AnigenErrorKind, ServiceErrorKind};
use anigen_services::{
    ParserClient, RenderLine, RenderRequest, RenderScene, RenderSubScene, RendererClient,
    ScriptParser, SpeechClient, SpeechRequest, SpeechSynthesizer, VideoRenderer,
};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn service_kind(err: &AnigenError) -> &ServiceErrorKind {
    match err.kind() {
        AnigenErrorKind::Service(e) => &e.kind,
        other => panic!("expected service error, got {}", other),
    }
}

fn sample_render_request() -> RenderRequest {
    RenderRequest {
        scenes: vec![RenderScene {
            scene_id: None,
            scene_desc: "Rooftop".to_string(),
            background: String::new(),
            sub_scenes: vec![RenderSubScene {
                sub_scene_id: None,
                camera_movement: "pan".to_string(),
                storyboards: vec![RenderLine {
                    character: "Aki".to_string(),
                    expression: "calm".to_string(),
                    line: "It's late.".to_string(),
                    character_image: String::new(),
                    voice: Some("en-US-AriaNeural".to_string()),
                    audio_id: "0-0-0".to_string(),
                    has_audio: true,
                    extra: Map::new(),
                }],
                extra: Map::new(),
            }],
            extra: Map::new(),
        }],
        audio_files: vec!["data:audio/mpeg;base64,AA==".to_string()],
        bgm: Some(BgmSettings::new("bgm.mp3", "data:audio/mp3;base64,AA==")),
    }
}

#[tokio::test]
async fn test_parse_success() {
    let app = Router::new().route(
        "/parse",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["text"], "Aki: hi");
            Json(json!({
                "scenes": [{
                    "scene_id": 1,
                    "scene_desc": "Rooftop",
                    "sub_scenes": [{
                        "camera_movement": "pan",
                        "storyboards": [{"character": "Aki", "expression": "calm", "line": "hi"}]
                    }]
                }]
            }))
        }),
    );
    let parser = ParserClient::new(serve(app).await);

    let parsed = parser.parse("Aki: hi").await.unwrap();
    let storyboard = parsed.storyboard().unwrap();
    assert_eq!(storyboard.scenes.len(), 1);
    assert_eq!(storyboard.unique_characters(), vec!["Aki"]);
}

#[tokio::test]
async fn test_parse_error_payload_is_a_result() {
    let app = Router::new().route(
        "/parse",
        post(|| async { Json(json!({"error": "Could not find any dialogue"})) }),
    );
    let parser = ParserClient::new(serve(app).await);

    let parsed = parser.parse("???").await.unwrap();
    assert_eq!(
        parsed,
        ParsedScript::Failed(anigen_core::ParseFailure {
            error: "Could not find any dialogue".to_string()
        })
    );
}

#[tokio::test]
async fn test_parse_unreachable_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let parser = ParserClient::new(format!("http://{}", addr));
    let err = parser.parse("Aki: hi").await.unwrap_err();
    match service_kind(&err) {
        ServiceErrorKind::Network { service, message } => {
            assert_eq!(service, "parser");
            assert!(message.contains(&addr.to_string()));
        }
        other => panic!("unexpected kind: {}", other),
    }
}

#[tokio::test]
async fn test_speech_returns_audio() {
    let app = Router::new().route(
        "/generate_tts",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["voice"], "zh-HK-HiuGaaiNeural");
            ([(header::CONTENT_TYPE, "audio/mpeg")], vec![0x49u8, 0x44, 0x33])
        }),
    );
    let speech = SpeechClient::new(serve(app).await);

    let clip = speech
        .synthesize(&SpeechRequest::new("你好", "zh-HK-HiuGaaiNeural"))
        .await
        .unwrap();
    assert_eq!(clip.mime_type, "audio/mpeg");
    assert_eq!(&clip.bytes[..], b"ID3");
}

#[tokio::test]
async fn test_speech_status_error_includes_body_message() {
    let app = Router::new().route(
        "/generate_tts",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing text parameter"})),
            )
        }),
    );
    let speech = SpeechClient::new(serve(app).await);

    let err = speech
        .synthesize(&SpeechRequest::new("", "en-US-AriaNeural"))
        .await
        .unwrap_err();
    assert_eq!(
        service_kind(&err).to_string(),
        "HTTP error! status: 400, message: Missing text parameter"
    );
}

#[tokio::test]
async fn test_speech_rejects_non_audio() {
    let app = Router::new().route(
        "/generate_tts",
        post(|| async { Json(json!({"audio": "not really"})) }),
    );
    let speech = SpeechClient::new(serve(app).await);

    let err = speech
        .synthesize(&SpeechRequest::new("hi", "en-US-AriaNeural"))
        .await
        .unwrap_err();
    assert!(matches!(service_kind(&err), ServiceErrorKind::NotAudio(_)));
}

#[tokio::test]
async fn test_speech_rejects_empty_audio() {
    let app = Router::new().route(
        "/generate_tts",
        post(|| async { ([(header::CONTENT_TYPE, "audio/mpeg")], Vec::<u8>::new()).into_response() }),
    );
    let speech = SpeechClient::new(serve(app).await);

    let err = speech
        .synthesize(&SpeechRequest::new("hi", "en-US-AriaNeural"))
        .await
        .unwrap_err();
    assert_eq!(service_kind(&err), &ServiceErrorKind::EmptyAudio);
}

#[tokio::test]
async fn test_render_returns_video_reference() {
    let app = Router::new().route(
        "/render",
        post(|Json(body): Json<Value>| async move {
            let line = &body["scenes"][0]["sub_scenes"][0]["storyboards"][0];
            assert_eq!(line["audio_id"], "0-0-0");
            assert_eq!(line["has_audio"], true);
            assert_eq!(body["bgm"]["fileName"], "bgm.mp3");
            assert_eq!(body["audio_files"].as_array().unwrap().len(), 1);
            Json(json!({"video_file": "/videos/out.mp4"}))
        }),
    );
    let renderer = RendererClient::new(serve(app).await);

    let video = renderer.render(&sample_render_request()).await.unwrap();
    assert_eq!(video.as_str(), "/videos/out.mp4");
}

#[tokio::test]
async fn test_render_error_body_surfaces_message() {
    let app = Router::new().route(
        "/render",
        post(|| async { Json(json!({"error": "Background file not found: castle.png"})) }),
    );
    let renderer = RendererClient::new(serve(app).await);

    let err = renderer.render(&sample_render_request()).await.unwrap_err();
    assert_eq!(
        service_kind(&err),
        &ServiceErrorKind::Rejected("Background file not found: castle.png".to_string())
    );
}

#[tokio::test]
async fn test_render_status_error() {
    let app = Router::new().route(
        "/render",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let renderer = RendererClient::new(serve(app).await);

    let err = renderer.render(&sample_render_request()).await.unwrap_err();
    match service_kind(&err) {
        ServiceErrorKind::Status { status, message, .. } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Unknown error");
        }
        other => panic!("unexpected kind: {}", other),
    }
}

#[tokio::test]
async fn test_health_checks() {
    let app = Router::new().route(
        "/health",
        get(|| async { Json(json!({"status": "healthy", "service": "tts"})) }),
    );
    let base = serve(app).await;

    let report = SpeechSynthesizer::health(&SpeechClient::new(base.clone()))
        .await
        .unwrap();
    assert!(report.is_healthy());
    assert_eq!(report.service, "tts");

    // Trailing slash is tolerated
    let report = ScriptParser::health(&ParserClient::new(format!("{}/", base)))
        .await
        .unwrap();
    assert!(report.is_healthy());
}
