//! End-to-end tests of the HTTP surface with in-memory collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use docsage_chat::Generator;
use docsage_core::{DataPaths, DocSageConfig, IndexBackend, Result};
use docsage_server::{build_router, AppState};
use docsage_store::{MemoryIndex, VectorIndex};

const BOUNDARY: &str = "docsage-test-boundary";

#[derive(Default)]
struct CountingGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl Generator for CountingGenerator {
    async fn complete(&self, _: &str, _: &str, _: f64, _: usize) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("According to Source 1, the runtime is Tokio.".into())
    }
}

struct Harness {
    app: Router,
    index: Arc<MemoryIndex>,
    generator: Arc<CountingGenerator>,
    _dir: tempfile::TempDir,
}

fn config(dir: &tempfile::TempDir) -> DocSageConfig {
    DocSageConfig {
        host: "127.0.0.1".into(),
        port: 0,
        data_paths: DataPaths::new(dir.path()).unwrap(),
        index_backend: IndexBackend::Memory,
        chunk_size: 1000,
        chunk_overlap: 200,
        default_top_k: 3,
        max_upload_bytes: 1024 * 1024,
    }
}

fn harness(with_generator: bool) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let index = Arc::new(MemoryIndex::new());
    let generator = Arc::new(CountingGenerator::default());
    let gen_port: Option<Arc<dyn Generator>> = if with_generator {
        Some(generator.clone())
    } else {
        None
    };
    let state = AppState::new(config(&dir), index.clone(), gen_port).unwrap();
    Harness {
        app: build_router(Arc::new(state)),
        index,
        generator,
        _dir: dir,
    }
}

fn multipart_upload(filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn article(topic: &str) -> Vec<u8> {
    format!("The {} section explains how the async runtime schedules tasks. ", topic)
        .repeat(40)
        .into_bytes()
}

#[tokio::test]
async fn test_upload_then_list_and_delete() {
    let h = harness(true);

    let (status, doc_a) = send(&h.app, multipart_upload("runtime.txt", &article("runtime"))).await;
    assert_eq!(status, StatusCode::OK, "{doc_a}");
    assert_eq!(doc_a["file_type"], "Text File");
    assert!(doc_a["id"].as_str().unwrap().starts_with("runtime.txt_"));

    let (status, doc_b) = send(&h.app, multipart_upload("notes.md", &article("notes"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, listing) = send(&h.app, get("/documents")).await;
    assert_eq!(status, StatusCode::OK);
    let docs = listing.as_array().unwrap();
    assert_eq!(docs.len(), 2);
    let listed_total: u64 = docs.iter().map(|d| d["chunk_count"].as_u64().unwrap()).sum();
    assert_eq!(listed_total as usize, h.index.count().unwrap());

    let uri = format!("/documents/{}", doc_a["id"].as_str().unwrap());
    let req = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, deleted) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted_chunks"], doc_a["chunk_count"]);

    let (_, listing) = send(&h.app, get("/documents")).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["id"], doc_b["id"]);
}

#[tokio::test]
async fn test_upload_rejections_write_nothing() {
    let h = harness(true);

    let (status, body) = send(&h.app, multipart_upload("virus.exe", b"MZ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains(".exe"));

    let (status, _) = send(&h.app, multipart_upload("empty.txt", b"   \n\t")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&h.app, multipart_upload("broken.docx", b"not a zip")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("DOCX"));

    assert_eq!(h.index.count().unwrap(), 0);
}

#[tokio::test]
async fn test_delete_unknown_document_is_404() {
    let h = harness(true);
    let req = Request::builder()
        .method("DELETE")
        .uri("/documents/missing.txt_00000000")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("missing.txt_00000000"));
}

#[tokio::test]
async fn test_query_with_empty_index_skips_generation() {
    let h = harness(true);
    let (status, body) = send(
        &h.app,
        json_request("POST", "/query", serde_json::json!({"question": "What runtime?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], 0.0);
    assert_eq!(body["sources"].as_array().unwrap().len(), 0);
    assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_returns_answer_with_sources() {
    let h = harness(true);
    send(&h.app, multipart_upload("runtime.txt", &article("runtime"))).await;

    let (status, body) = send(
        &h.app,
        json_request(
            "POST",
            "/query",
            serde_json::json!({"question": "How are async tasks scheduled?", "top_k": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["answer"], "According to Source 1, the runtime is Tokio.");
    let sources = body["sources"].as_array().unwrap();
    assert!(!sources.is_empty() && sources.len() <= 2);
    assert_eq!(sources[0]["filename"], "runtime.txt");
    assert_eq!(sources[0]["file_type"], "Text File");
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
    assert_eq!(h.generator.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_query_without_credentials_fails_fast() {
    let h = harness(false);
    let (status, body) = send(
        &h.app,
        json_request("POST", "/query", serde_json::json!({"question": "Anything?"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].as_str().unwrap().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn test_informational_endpoints() {
    let h = harness(false);

    let (status, root) = send(&h.app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(root["status"], "operational");

    let (status, health) = send(&h.app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["openai_configured"], false);
    assert_eq!(health["documents_count"], 0);
    assert!(health["supported_formats"]
        .as_array()
        .unwrap()
        .contains(&Value::from(".xlsx")));

    let (status, formats) = send(&h.app, get("/supported-formats")).await;
    assert_eq!(status, StatusCode::OK);
    let formats = formats["formats"].as_array().unwrap();
    assert_eq!(formats.len(), 9);
    assert_eq!(formats[0]["extension"], ".pdf");
    assert_eq!(formats[0]["description"], "PDF Document");
}
