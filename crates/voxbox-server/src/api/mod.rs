//! HTTP routes

use axum::{
    extract::{DefaultBodyLimit, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::state::AppState;

mod audio;

pub fn create_router(state: AppState) -> Router {
    let server = state.config.server.clone();
    // Base64 inflates the payload by 4/3; leave headroom for the JSON envelope
    let body_limit = (state.max_pcm_bytes() / 3)
        .saturating_mul(4)
        .saturating_add(64 * 1024);

    let mut router = Router::new()
        .route("/health", get(health))
        .route("/v1/audio/wav", post(audio::wav))
        .route("/v1/audio/wav/raw", post(audio::wav_raw))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    if server.cors_enabled {
        router = router.layer(cors_layer(&server.cors_origins));
    }

    router.layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sample_rate": state.encoder.sample_rate(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use tower::ServiceExt;
    use voxbox_core::{decode_wav, VoxboxConfig};

    fn app() -> Router {
        create_router(AppState::new(VoxboxConfig::default()))
    }

    fn app_with(config: VoxboxConfig) -> Router {
        create_router(AppState::new(config))
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["sample_rate"], 24000);
    }

    #[tokio::test]
    async fn test_inline_to_wav() {
        let samples: Vec<i16> = vec![0, 100, -100, 2000];
        let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let request = json_request(
            "/v1/audio/wav",
            json!({
                "mimeType": "audio/L16;codec=pcm;rate=24000",
                "data": STANDARD.encode(&pcm),
            }),
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(response.headers()["x-sample-rate"], "24000");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.len(), 44 + pcm.len());
        let decoded = decode_wav(&body).unwrap();
        assert_eq!(decoded.sample_rate, 24000);
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.samples, samples);
    }

    #[tokio::test]
    async fn test_inline_raw_format() {
        let request = json_request(
            "/v1/audio/wav",
            json!({
                "mimeType": "audio/L16;rate=16000",
                "data": STANDARD.encode([1u8, 2, 3, 4]),
                "format": "rawpcm16",
            }),
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], &[1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_inline_unsupported_mime() {
        let request = json_request(
            "/v1/audio/wav",
            json!({ "mimeType": "audio/mpeg", "data": "AAAA" }),
        );

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_raw_body_to_wav() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/audio/wav/raw?sample_rate=16000")
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(Body::from(vec![0u8; 1000]))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-audio-duration-ms"], "31");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.len(), 1044);
        assert_eq!(&body[28..32], &32000u32.to_le_bytes());
        assert_eq!(&body[32..34], &2u16.to_le_bytes());
    }

    #[tokio::test]
    async fn test_raw_body_default_rate() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/audio/wav/raw")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.len(), 44);
        assert_eq!(&body[24..28], &24000u32.to_le_bytes());
        assert_eq!(&body[4..8], &36u32.to_le_bytes());
    }

    #[tokio::test]
    async fn test_raw_zero_rate_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/audio/wav/raw?sample_rate=0")
            .body(Body::from(vec![0u8; 4]))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_payload_too_large() {
        let mut config = VoxboxConfig::default();
        config.encoder.max_pcm_bytes = 8;

        let request = Request::builder()
            .method("POST")
            .uri("/v1/audio/wav/raw")
            .body(Body::from(vec![0u8; 10]))
            .unwrap();

        let response = app_with(config).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_huge_limit_does_not_overflow() {
        let mut config = VoxboxConfig::default();
        config.encoder.max_pcm_bytes = usize::MAX;

        let response = app_with(config)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_inline_payload_at_limit() {
        let mut config = VoxboxConfig::default();
        config.encoder.max_pcm_bytes = 8;

        let request = json_request(
            "/v1/audio/wav",
            json!({
                "mimeType": "audio/L16;rate=24000",
                "data": STANDARD.encode([0u8; 8]),
            }),
        );
        let response = app_with(config.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.len(), 52);

        let request = json_request(
            "/v1/audio/wav",
            json!({
                "mimeType": "audio/L16;rate=24000",
                "data": STANDARD.encode([0u8; 10]),
            }),
        );
        let response = app_with(config).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_malformed_json_has_json_error_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/audio/wav")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"mimeType\":"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], 400);
        assert!(value["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_bad_sample_rate_query_has_json_error_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/audio/wav/raw?sample_rate=fast")
            .body(Body::from(vec![0u8; 4]))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], 400);
    }

    #[tokio::test]
    async fn test_strict_alignment_from_config() {
        let mut config = VoxboxConfig::default();
        config.encoder.strict_alignment = true;

        let request = Request::builder()
            .method("POST")
            .uri("/v1/audio/wav/raw")
            .body(Body::from(vec![0u8; 3]))
            .unwrap();

        let response = app_with(config).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
