pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_resume;
use crate::resume::handlers::handle_upload_resume;
use crate::search::handlers::handle_web_search;
use crate::state::AppState;

/// Upper bound on a request body (résumé uploads).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/static/script.js", get(index::script_handler))
        .route("/health", get(health::health_handler))
        .route("/api/upload_resume", post(handle_upload_resume))
        .route("/api/analyze_resume", post(handle_analyze_resume))
        .route("/api/web_search", post(handle_web_search))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::Config;
    use crate::extraction::fixtures::pdf_with_pages;
    use crate::llm_client::LlmClient;
    use crate::search::provider::BraveSearchClient;

    const BOUNDARY: &str = "jobscout-test-boundary";
    const SEARCH_PATH: &str = "/res/v1/web/search";

    fn test_app(llm_url: &str, search_url: &str, search_key: Option<&str>) -> Router {
        let search_base = format!("{search_url}{SEARCH_PATH}");
        let config = Config::from_lookup(|key| match key {
            "LLM_BASE_URL" => Some(llm_url.to_string()),
            "SEARCH_BASE_URL" => Some(search_base.clone()),
            "SEARCH_API_KEY" => search_key.map(String::from),
            "HTTP_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();

        let state = AppState {
            llm: LlmClient::new(&config.llm).unwrap(),
            search: Arc::new(BraveSearchClient::new(&config.search).unwrap()),
            config,
        };
        build_router(state)
    }

    /// App whose upstreams are unreachable; fine for routes that never call them.
    fn offline_app() -> Router {
        test_app("http://127.0.0.1:1", "http://127.0.0.1:1", None)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload(field: &str, file_name: Option<&str>, data: &[u8]) -> Request<Body> {
        upload_parts(&[(field, file_name, data)])
    }

    /// Multipart request with one part per `(field, file name, data)` entry.
    fn upload_parts(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (field, file_name, data) in parts {
            let disposition = match file_name {
                Some(name) => format!(
                    "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\nContent-Type: application/pdf\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{field}\"\r\n"),
            };
            body.extend_from_slice(format!("--{BOUNDARY}\r\n{disposition}\r\n").as_bytes());
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/upload_resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    /// Newline-delimited generate stream that spells out `text` in small deltas.
    fn generate_stream(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut stream: String = chars
            .chunks(7)
            .map(|piece| {
                let delta: String = piece.iter().collect();
                format!("{}\n", json!({"model": "gpt-oss", "response": delta, "done": false}))
            })
            .collect();
        stream.push_str(&format!(
            "{}\n",
            json!({"model": "gpt-oss", "response": "", "done": true})
        ));
        stream
    }

    async fn mount_generate(server: &MockServer, text: &str) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string(generate_stream(text)))
            .mount(server)
            .await;
    }

    // ── landing page & health ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_index_serves_landing_page() {
        let response = offline_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("uploadButton"));
        assert!(html.contains("/static/script.js"));
    }

    #[tokio::test]
    async fn test_script_is_served_as_javascript() {
        let response = offline_app()
            .oneshot(Request::get("/static/script.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("application/javascript"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(
            &offline_app(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobscout");
        assert_eq!(body["llm_model"], "gpt-oss");
        assert_eq!(body["search_configured"], false);
    }

    // ── upload ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_upload_extracts_pdf_text() {
        let pdf = pdf_with_pages(&["Rustacean"]);
        let (status, body) = send(&offline_app(), upload("resume", Some("cv.pdf"), &pdf)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Resume uploaded and parsed successfully");
        assert!(body["resume_text"].as_str().unwrap().contains("Rustacean"));
    }

    #[tokio::test]
    async fn test_upload_of_blank_pdf_returns_empty_text() {
        let pdf = pdf_with_pages(&[""]);
        let (status, body) = send(&offline_app(), upload("resume", Some("scan.pdf"), &pdf)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_text"], "");
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_rejected() {
        let (status, body) = send(&offline_app(), upload("notes", Some("cv.pdf"), b"x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No resume file provided");
    }

    #[tokio::test]
    async fn test_upload_without_file_name_is_rejected() {
        let (status, body) = send(&offline_app(), upload("resume", None, b"x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");
    }

    #[tokio::test]
    async fn test_upload_uses_first_resume_part() {
        let pdf = pdf_with_pages(&["Rustacean"]);
        let request = upload_parts(&[
            ("notes", None, &b"hello"[..]),
            ("resume", Some("cv.pdf"), &pdf[..]),
            ("resume", Some("old.pdf"), &b"not a pdf at all"[..]),
        ]);
        let (status, body) = send(&offline_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["resume_text"].as_str().unwrap().contains("Rustacean"));
    }

    #[tokio::test]
    async fn test_upload_of_empty_file_is_rejected() {
        let (status, body) = send(&offline_app(), upload("resume", Some("cv.pdf"), b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Uploaded resume file is empty");
    }

    #[tokio::test]
    async fn test_upload_of_non_pdf_reports_parse_failure() {
        let (status, body) = send(
            &offline_app(),
            upload("resume", Some("cv.pdf"), b"definitely not a pdf"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to process resume file:"));
    }

    #[tokio::test]
    async fn test_upload_without_multipart_body_is_rejected() {
        let (status, body) = send(&offline_app(), post_json("/api/upload_resume", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    // ── analyze ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_analyze_requires_resume_text() {
        let app = offline_app();
        for payload in [
            json!({}),
            json!({"resume_text": ""}),
            json!({"resume_text": null}),
            json!({"resume_text": "  \n\t "}),
        ] {
            let (status, body) = send(&app, post_json("/api/analyze_resume", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "No resume text provided for analysis");
        }
    }

    #[tokio::test]
    async fn test_analyze_rejects_malformed_json_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze_resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&offline_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_extracts_json_from_prose() {
        let llm = MockServer::start().await;
        mount_generate(
            &llm,
            "Sure! Here is the analysis:\n```json\n{\"summary\":\"Backend dev\",\"skills\":[\"Rust\"],\"suggested_roles\":[\"Engineer\"]}\n```\nGood luck!",
        )
        .await;

        let app = test_app(&llm.uri(), "http://127.0.0.1:1", None);
        let (status, body) = send(
            &app,
            post_json("/api/analyze_resume", json!({"resume_text": "Jane Doe"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["summary"], "Backend dev");
        assert_eq!(body["analysis"]["skills"], json!(["Rust"]));
        assert_eq!(body["analysis"]["industries"], json!([]));
        assert_eq!(body["analysis"]["suggested_companies"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_coerces_off_schema_fields() {
        let llm = MockServer::start().await;
        mount_generate(
            &llm,
            r#"{"summary":"Rust dev","skills":[{"name":"Rust","level":"expert"},"Go"],"suggested_roles":"Engineer","industries":null}"#,
        )
        .await;

        let app = test_app(&llm.uri(), "http://127.0.0.1:1", None);
        let (status, body) = send(
            &app,
            post_json("/api/analyze_resume", json!({"resume_text": "Jane Doe"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["analysis"],
            json!({
                "summary": "Rust dev",
                "skills": ["Go"],
                "industries": [],
                "suggested_companies": [],
                "suggested_roles": ["Engineer"]
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_with_invalid_outer_object_is_parse_error() {
        let llm = MockServer::start().await;
        mount_generate(
            &llm,
            r#"Result: {"summary":"x","experience":{"company":"Acme","years":3},}"#,
        )
        .await;

        let app = test_app(&llm.uri(), "http://127.0.0.1:1", None);
        let (status, body) = send(
            &app,
            post_json("/api/analyze_resume", json!({"resume_text": "Jane Doe"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "ANALYSIS_PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_without_json_in_answer_is_parse_error() {
        let llm = MockServer::start().await;
        mount_generate(&llm, "I am unable to analyze this document.").await;

        let app = test_app(&llm.uri(), "http://127.0.0.1:1", None);
        let (status, body) = send(
            &app,
            post_json("/api/analyze_resume", json!({"resume_text": "Jane Doe"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Failed to parse AI analysis response. Check logs for details."
        );
    }

    #[tokio::test]
    async fn test_analyze_upstream_failure_is_generic_500() {
        let llm = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("CUDA out of memory"))
            .mount(&llm)
            .await;

        let app = test_app(&llm.uri(), "http://127.0.0.1:1", None);
        let (status, body) = send(
            &app,
            post_json("/api/analyze_resume", json!({"resume_text": "Jane Doe"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
        assert!(!body["error"].as_str().unwrap().contains("CUDA"));
    }

    #[tokio::test]
    async fn test_analyze_with_unreachable_llm_is_500() {
        let (status, body) = send(
            &offline_app(),
            post_json("/api/analyze_resume", json!({"resume_text": "Jane Doe"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    }

    // ── web search ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_web_search_requires_analysis() {
        let app = offline_app();
        for payload in [json!({}), json!({"analysis": null}), json!({"analysis": {}})] {
            let (status, body) = send(&app, post_json("/api/web_search", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "No analysis data provided for web search");
        }
    }

    #[tokio::test]
    async fn test_web_search_without_api_key_still_succeeds() {
        let (status, body) = send(
            &offline_app(),
            post_json(
                "/api/web_search",
                json!({"analysis": {"suggested_roles": ["Engineer"], "suggested_companies": ["Acme"]}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Web search completed");
        assert_eq!(
            body["queries_performed"],
            json!(["\"Engineer\" job openings", "\"Engineer\" job at \"Acme\""])
        );
        assert_eq!(body["results"], json!([]));
    }

    // ── end to end ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_upload_analyze_search_end_to_end() {
        let llm = MockServer::start().await;
        let search = MockServer::start().await;

        let analysis_json = json!({
            "summary": "Systems programmer",
            "skills": ["Rust", "Tokio"],
            "industries": ["Tech"],
            "suggested_companies": ["Acme", "Globex"],
            "suggested_roles": ["Engineer"]
        });

        // The résumé text must reach the prompt.
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_string_contains("Rustacean"))
            .respond_with(ResponseTemplate::new(200).set_body_string(generate_stream(&format!(
                "Here is the result: {analysis_json} Thanks!"
            ))))
            .expect(1)
            .mount(&llm)
            .await;

        // One query fails; the other two return one hit each.
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("q", "\"Engineer\" job at \"Globex\""))
            .respond_with(ResponseTemplate::new(503))
            .with_priority(1)
            .mount(&search)
            .await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "web": {"results": [
                    {"title": "Engineer", "url": "https://jobs.example/1", "description": "Rust role"}
                ]}
            })))
            .mount(&search)
            .await;

        let app = test_app(&llm.uri(), &search.uri(), Some("test-key"));

        let pdf = pdf_with_pages(&["Rustacean"]);
        let (status, uploaded) = send(&app, upload("resume", Some("cv.pdf"), &pdf)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, analyzed) = send(
            &app,
            post_json(
                "/api/analyze_resume",
                json!({"resume_text": uploaded["resume_text"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(analyzed["analysis"], analysis_json);

        let (status, searched) = send(
            &app,
            post_json("/api/web_search", json!({"analysis": analyzed["analysis"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let queries = searched["queries_performed"].as_array().unwrap();
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[2], "\"Engineer\" job at \"Globex\"");

        let results = searched["results"].as_array().unwrap();
        let successful_queries = 2;
        let results_per_query = 1;
        assert_eq!(results.len(), successful_queries * results_per_query);
        assert_eq!(results[0]["query_type"], "general_role");
        assert_eq!(results[1]["query_type"], "targeted_company_role");
    }
}
