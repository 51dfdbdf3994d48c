pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::analysis::handlers as analysis;
use crate::errors::AppError;
use crate::extraction::handlers as extraction;
use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;
use crate::verdict::handlers as verdict;

async fn not_found() -> AppError {
    AppError::NotFound("Rota não encontrada.".to_string())
}

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis proxy
        .route("/api/v1/roast-cv", post(analysis::handle_analyze))
        .route(
            "/api/v1/extract",
            post(extraction::handle_extract).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Presentation
        .route("/api/v1/verdict/summary", post(verdict::handle_summary))
        .route("/api/v1/rewrite/document", post(render::handle_document))
        .route("/api/v1/rewrite/export", post(render::handle_export))
        // Pending analysis across the payment redirect
        .route(
            "/api/v1/sessions/:id/pending",
            put(session::handle_save_pending)
                .get(session::handle_restore_pending)
                .delete(session::handle_clear_pending),
        )
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::service::tests::ScriptedGateway;
    use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
    use crate::llm_client::{LlmError, DEFAULT_GATEWAY_URL, DEFAULT_MODEL};

    fn test_config(qa_overrides: bool) -> Config {
        Config {
            gateway_api_key: Some("test-key".to_string()),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            gateway_model: DEFAULT_MODEL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            pending_ttl_minutes: 60,
            qa_overrides,
        }
    }

    fn app_with(gateway: Arc<ScriptedGateway>, qa_overrides: bool) -> Router {
        build_router(AppState::new(gateway, test_config(qa_overrides)))
    }

    fn app() -> Router {
        app_with(Arc::new(ScriptedGateway::replying("ok")), false)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "sincero-api");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_blank_cv_text_is_rejected_before_gateway_call() {
        let gateway = Arc::new(ScriptedGateway::replying("unused"));
        let app = app_with(gateway.clone(), false);

        let req = json_request(Method::POST, "/api/v1/roast-cv", json!({"cvText": "   "}));
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["error"].is_string());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_cv_text_is_rejected() {
        let gateway = Arc::new(ScriptedGateway::replying("unused"));
        let app = app_with(gateway.clone(), false);

        let req = json_request(Method::POST, "/api/v1/roast-cv", json!({"mode": "roast"}));
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_mode_is_rejected_before_gateway_call() {
        let gateway = Arc::new(ScriptedGateway::replying("unused"));
        let app = app_with(gateway.clone(), false);

        let req = json_request(
            Method::POST,
            "/api/v1/roast-cv",
            json!({"cvText": "Ana", "mode": "premium"}),
        );
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_a_validation_error() {
        let req = Request::post("/api/v1/roast-cv")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_roast_is_default_mode() {
        let gateway = Arc::new(ScriptedGateway::replying("Nota: 7/10"));
        let app = app_with(gateway.clone(), false);

        let req = json_request(Method::POST, "/api/v1/roast-cv", json!({"cvText": "Ana"}));
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"roast": "Nota: 7/10"}));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_dossie_mode_returns_structured_payload() {
        let reply = r#"```json
{"errors": [{"error": "Sem métricas", "whyBad": "Vago", "howToFix": "Use números"}]}
```"#;
        let app = app_with(Arc::new(ScriptedGateway::replying(reply)), false);

        let req = json_request(
            Method::POST,
            "/api/v1/roast-cv",
            json!({"cvText": "Ana", "mode": "dossie"}),
        );
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["dossie"]["errors"][0]["howToFix"], "Use números");
    }

    #[tokio::test]
    async fn test_unparseable_rewrite_is_a_server_error() {
        let app = app_with(Arc::new(ScriptedGateway::replying("Claro! Segue o CV")), false);
        let req = json_request(
            Method::POST,
            "/api/v1/roast-cv",
            json!({"cvText": "Ana", "mode": "rewrite"}),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["code"], "MALFORMED_MODEL_OUTPUT");
    }

    #[tokio::test]
    async fn test_upstream_rate_limit_maps_to_429() {
        let app = app_with(Arc::new(ScriptedGateway::failing(LlmError::RateLimited)), false);
        let req = json_request(Method::POST, "/api/v1/roast-cv", json!({"cvText": "Ana"}));
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let json = body_json(response).await;
        assert_eq!(json["code"], "RATE_LIMITED");
        assert!(json["error"].as_str().unwrap().contains("Muitos pedidos"));
    }

    #[tokio::test]
    async fn test_missing_credential_maps_to_503() {
        let app = app_with(
            Arc::new(ScriptedGateway::failing(LlmError::MissingCredential)),
            false,
        );
        let req = json_request(Method::POST, "/api/v1/roast-cv", json!({"cvText": "Ana"}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_echoed() {
        let app = app_with(
            Arc::new(ScriptedGateway::failing(LlmError::Api {
                status: 500,
                message: "internal stack trace".to_string(),
            })),
            false,
        );
        let req = json_request(Method::POST, "/api/v1/roast-cv", json!({"cvText": "Ana"}));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(!json["error"].as_str().unwrap().contains("stack trace"));
    }

    #[tokio::test]
    async fn test_cors_preflight_is_answered() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/roast-cv")
            .header(header::ORIGIN, "https://cvsincero.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_verdict_summary_extracts_score_and_band() {
        let roast = "📢 A PRIMEIRA IMPRESSÃO\nBonito, mas vazio.\n\n😬 O CHOQUE DE REALIDADE\n• Sem métricas.\n\n📊 VEREDITO FINAL\nNota: 7/10";
        let req = json_request(Method::POST, "/api/v1/verdict/summary", json!({"roast": roast}));
        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["score"], 7.0);
        assert_eq!(json["band"], "good");
        assert_eq!(json["firstImpression"], "Bonito, mas vazio.");
        assert_eq!(json["criticalError"], "Sem métricas.");
    }

    fn rewrite_body() -> Value {
        json!({
            "summary": "Analista contábil.",
            "workHistory": [
                {"company": "Grupo Alfa", "role": "Coordenadora", "period": "2023 - Atualmente", "bullets": ["Liderou 5"]},
                {"company": "Silva", "role": "Analista", "period": "2019 - 2022", "bullets": []}
            ],
            "skills": ["SPED", "Excel"],
            "contactInfo": {"name": "Ana", "email": "ana@example.com"}
        })
    }

    #[tokio::test]
    async fn test_rewrite_document_returns_blocks() {
        let req = json_request(Method::POST, "/api/v1/rewrite/document", rewrite_body());
        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let blocks = json["blocks"].as_array().unwrap();
        assert_eq!(blocks[0]["kind"], "header");
        assert_eq!(blocks[0]["contact"], "ana@example.com");
        let spacers = blocks.iter().filter(|b| b["kind"] == "spacer").count();
        assert_eq!(spacers, 1);
    }

    #[tokio::test]
    async fn test_rewrite_export_returns_pdf_attachment() {
        let req = json_request(Method::POST, "/api/v1/rewrite/export", rewrite_body());
        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("CV_Blindado_CVSincero.pdf"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf_upload() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\
            Content-Type: text/plain\r\n\r\n\
            hello\r\n\
            --XBOUNDARY--\r\n";
        let req = Request::post("/api/v1/extract")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_extract_requires_file_part() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"other\"\r\n\r\n\
            value\r\n\
            --XBOUNDARY--\r\n";
        let req = Request::post("/api/v1/extract")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pending_slot_round_trip() {
        let gateway = Arc::new(ScriptedGateway::replying("unused"));
        let app = app_with(gateway, false);
        let uri = format!("/api/v1/sessions/{}/pending", uuid::Uuid::new_v4());

        let req = json_request(
            Method::PUT,
            &uri,
            json!({"cvText": "Ana", "roastResult": "Nota: 6/10"}),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["pending"]["cvText"], "Ana");
        assert_eq!(json["pending"]["roastResult"], "Nota: 6/10");
        assert_eq!(json["view"], "none");

        let response = app
            .clone()
            .oneshot(Request::delete(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["pending"], Value::Null);
    }

    #[tokio::test]
    async fn test_plan_override_requires_qa_flag() {
        let uri = format!("/api/v1/sessions/{}/pending?plan=PREMIUM", uuid::Uuid::new_v4());

        let disabled = app_with(Arc::new(ScriptedGateway::replying("unused")), false);
        let response = disabled
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["view"], "none");

        let enabled = app_with(Arc::new(ScriptedGateway::replying("unused")), true);
        let response = enabled
            .oneshot(Request::get(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["view"], "premium");
    }

    #[tokio::test]
    async fn test_malformed_session_id_is_a_json_validation_error() {
        for method in [Method::GET, Method::DELETE] {
            let req = Request::builder()
                .method(method)
                .uri("/api/v1/sessions/not-a-uuid/pending")
                .body(Body::empty())
                .unwrap();
            let response = app().oneshot(req).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json"
            );
            let json = body_json(response).await;
            assert_eq!(json["code"], "VALIDATION_ERROR");
            assert!(json["error"].is_string());
        }

        let req = json_request(
            Method::PUT,
            "/api/v1/sessions/not-a-uuid/pending",
            json!({"cvText": "Ana", "roastResult": "Nota: 6/10"}),
        );
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_without_multipart_body_is_a_json_validation_error() {
        let req = json_request(Method::POST, "/api/v1/extract", json!({"file": "cv.pdf"}));
        let response = app().oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_oversized_json_body_is_payload_too_large() {
        let gateway = Arc::new(ScriptedGateway::replying("unused"));
        let app = app_with(gateway.clone(), false);

        // above axum's default 2 MB body limit
        let cv_text = "a".repeat(3 * 1024 * 1024);
        let req = json_request(Method::POST, "/api/v1/roast-cv", json!({"cvText": cv_text}));
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_pending_body_is_rejected() {
        let uri = format!("/api/v1/sessions/{}/pending", uuid::Uuid::new_v4());
        let req = json_request(Method::PUT, &uri, json!({"cvText": "", "roastResult": "x"}));
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
