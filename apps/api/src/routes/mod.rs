pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

/// Upper bound on résumés per screening request, used to size the body limit.
const MAX_FILES_PER_REQUEST: usize = 25;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(MAX_FILES_PER_REQUEST);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/screenings",
            post(handlers::handle_screen).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/v1/candidates",
            get(handlers::handle_list_candidates).delete(handlers::handle_clear_candidates),
        )
        .route(
            "/api/v1/candidates/qualified",
            get(handlers::handle_qualified_candidates),
        )
        .route("/api/v1/candidates/export", get(handlers::handle_export))
        .route("/api/v1/candidates/:id", get(handlers::handle_get_candidate))
        .route("/api/v1/stats", get(handlers::handle_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::extraction::{ExtractionError, TextExtractor, UploadedFile};
    use crate::llm_client::LlmError;
    use crate::models::candidate::NewCandidate;
    use crate::notify::DisabledNotifier;
    use crate::screening::field_extractor::FieldExtractor;
    use crate::screening::field_parser::{parse_candidate_fields, CandidateFields};
    use crate::screening::pipeline::{PipelineSettings, ScreeningPipeline};
    use crate::store::memory::MemoryCandidateStore;
    use crate::store::CandidateStore;

    const BOUNDARY: &str = "screener-test-boundary";

    /// Treats the uploaded bytes as the document text.
    struct PassthroughExtractor;

    #[async_trait]
    impl TextExtractor for PassthroughExtractor {
        async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
            Ok(String::from_utf8_lossy(&file.bytes).to_string())
        }
    }

    /// Canned LLM: JD skills are fixed, résumé text is parsed as a labeled response.
    struct CannedFieldExtractor;

    #[async_trait]
    impl FieldExtractor for CannedFieldExtractor {
        async fn extract_required_skills(&self, _jd: &str) -> Result<Vec<String>, LlmError> {
            Ok(vec!["Rust".to_string(), "SQL".to_string()])
        }

        async fn extract_candidate_fields(&self, text: &str) -> Result<CandidateFields, LlmError> {
            Ok(parse_candidate_fields(text))
        }
    }

    fn test_config() -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            anthropic_api_key: "unused".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            shortlist_threshold: 50.0,
            max_upload_bytes: 1024 * 1024,
            ocr_enabled: false,
            tesseract_lang: "eng".to_string(),
            smtp: None,
        }
    }

    fn app_with(store: Arc<MemoryCandidateStore>) -> Router {
        let config = test_config();
        let pipeline = ScreeningPipeline::new(
            Arc::new(PassthroughExtractor),
            Arc::new(CannedFieldExtractor),
            Arc::new(DisabledNotifier),
            store.clone(),
            PipelineSettings {
                shortlist_threshold: config.shortlist_threshold,
                max_upload_bytes: config.max_upload_bytes,
            },
        );
        build_router(AppState {
            store,
            pipeline: Arc::new(pipeline),
            config,
        })
    }

    fn seeded(name: &str, score: f64) -> NewCandidate {
        NewCandidate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            skills: "Rust".to_string(),
            matched_skills: "rust".to_string(),
            match_score: score,
            processed_at: Utc::now(),
        }
    }

    fn multipart_body(job_description: &str, files: &[(&str, &str)]) -> String {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{job_description}\r\n"
        );
        for (name, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"{name}\"\r\n\
                 Content-Type: application/pdf\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn screening_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/screenings")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(MemoryCandidateStore::new()));
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_screening_ranks_and_reports_skips() {
        let store = Arc::new(MemoryCandidateStore::new());
        let app = app_with(store.clone());

        let body = multipart_body(
            "Backend engineer: Rust and SQL",
            &[
                ("ann.pdf", "Name: Ann\nEmail: ann@example.com\nSkills: Rust"),
                ("notes.txt", "Name: Bob\nEmail: bob@example.com\nSkills: Rust"),
                ("cat.pdf", "Name: Cat\nEmail: cat@example.com\nSkills: Rust, SQL"),
            ],
        );
        let response = app.oneshot(screening_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["processed"], 2);
        assert_eq!(json["candidates"][0]["name"], "Cat");
        assert_eq!(json["candidates"][0]["match_score"], 100.0);
        assert_eq!(json["candidates"][1]["name"], "Ann");
        assert_eq!(json["skipped"][0]["file_name"], "notes.txt");
        assert_eq!(json["skipped"][0]["reason"]["kind"], "invalid_file");
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_screening_without_job_description_is_bad_request() {
        let app = app_with(Arc::new(MemoryCandidateStore::new()));
        let body = multipart_body("  ", &[("ann.pdf", "Name: Ann")]);
        let response = app.oneshot(screening_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_screening_without_files_is_bad_request() {
        let app = app_with(Arc::new(MemoryCandidateStore::new()));
        let response = app
            .oneshot(screening_request(multipart_body("Rust engineer", &[])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_screening_with_no_usable_files_reports_message() {
        let app = app_with(Arc::new(MemoryCandidateStore::new()));
        let body = multipart_body("Rust engineer", &[("scan.pdf", "Skills: Rust")]);
        let response = app.oneshot(screening_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["processed"], 0);
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("No candidates could be processed"));
        assert_eq!(json["skipped"][0]["reason"]["kind"], "missing_identity");
    }

    #[tokio::test]
    async fn test_stats_and_qualified() {
        let store = Arc::new(MemoryCandidateStore::new());
        store.save(seeded("Low", 20.0)).await.unwrap();
        store.save(seeded("High", 80.0)).await.unwrap();
        let app = app_with(store);

        let response = app.clone().oneshot(get_request("/api/v1/stats")).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(json["total_candidates"], 2);
        assert_eq!(json["qualified_candidates"], 1);
        assert_eq!(json["emails_sent"], 0);
        assert_eq!(json["average_score"], 50.0);
        assert_eq!(json["shortlist_threshold"], 50.0);

        let response = app.oneshot(get_request("/api/v1/candidates/qualified")).await.unwrap();
        let json = json_body(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["name"], "High");
    }

    #[tokio::test]
    async fn test_get_candidate_by_id() {
        let store = Arc::new(MemoryCandidateStore::new());
        let saved = store.save(seeded("Ann", 40.0)).await.unwrap();
        let app = app_with(store);

        let response = app
            .clone()
            .oneshot(get_request(&format!("/api/v1/candidates/{}", saved.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["email"], "ann@example.com");

        let response = app
            .oneshot(get_request(&format!("/api/v1/candidates/{}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_requires_candidates() {
        let app = app_with(Arc::new(MemoryCandidateStore::new()));
        let response = app.oneshot(get_request("/api/v1/candidates/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_returns_csv_attachment() {
        let store = Arc::new(MemoryCandidateStore::new());
        store.save(seeded("Ann", 40.0)).await.unwrap();
        let app = app_with(store);

        let response = app.oneshot(get_request("/api/v1/candidates/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("candidate_rankings_"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(csv.starts_with("RESUME SCREENING SUMMARY"));
        assert!(csv.contains("1,Ann,ann@example.com,40.0"));
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = Arc::new(MemoryCandidateStore::new());
        store.save(seeded("Ann", 40.0)).await.unwrap();
        store.save(seeded("Bob", 60.0)).await.unwrap();
        let app = app_with(store.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/candidates")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["deleted"], 2);
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
