//! # DexQA CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`:
//! - `dexqa_cmd()` builds a command for the compiled binary with the `DEXQA_*`
//!   environment cleared so the host's settings cannot leak into a test.
//! - `isolated_config()` writes an empty config file for `--config`, which stops
//!   the binary from reading project or user configuration.
//! - `MockService` runs an `axum` router on its own Tokio runtime so the
//!   blocking `assert_cmd` calls can talk to it.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// # Get DexQA Command (`dexqa_cmd`)
///
/// ## Panics
/// Panics if the `dexqa` binary cannot be found via `Command::cargo_bin`.
pub fn dexqa_cmd() -> Command {
    let mut cmd = Command::cargo_bin("dexqa").expect("Failed to find dexqa binary for testing");
    cmd.env_remove("DEXQA_BASE_URL")
        .env_remove("DEXQA_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// An empty configuration file. Keep the `TempDir` alive while the path is used.
pub fn isolated_config() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir for config");
    let path = dir.path().join("dexqa.toml");
    std::fs::write(&path, "").expect("Failed to write empty config");
    (dir, path)
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{}", addr)
}

/// # Mock Question-Answering Service (`MockService`)
///
/// Serves a router on `127.0.0.1` with an OS-assigned port until dropped.
pub struct MockService {
    _runtime: Runtime,
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockService {
    /// Serves `app` as-is.
    pub fn start(app: Router) -> Self {
        Self::start_counting(app, Arc::new(AtomicUsize::new(0)))
    }

    /// `POST /api/v1/ask` answers every question with the given JSON body and status.
    pub fn replying(status: u16, body: Value) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/api/v1/ask",
                post(
                    move |State(hits): State<Arc<AtomicUsize>>| {
                        let body = body.clone();
                        async move {
                            hits.fetch_add(1, Ordering::SeqCst);
                            let status = axum::http::StatusCode::from_u16(status)
                                .expect("valid status code");
                            (status, Json(body))
                        }
                    },
                ),
            )
            .with_state(hits.clone());
        Self::start_counting(app, hits)
    }

    /// `POST /api/v1/ask` answering with the pure function `answer_for(question)`.
    pub fn answering(answer_for: fn(&str) -> String) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/api/v1/ask",
                post(
                    move |State(hits): State<Arc<AtomicUsize>>, Json(req): Json<Value>| async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        let question = req["question"].as_str().unwrap_or_default();
                        Json(json!({
                            "answer": answer_for(question),
                            "pokemon_name": "pikachu",
                            "pokemon_id": 25
                        }))
                    },
                ),
            )
            .with_state(hits.clone());
        Self::start_counting(app, hits)
    }

    fn start_counting(app: Router, hits: Arc<AtomicUsize>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("Failed to build mock service runtime");
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().expect("Failed to read mock address");
        runtime.spawn(async move {
            axum::serve(listener, app).await.expect("Mock service failed");
        });
        Self {
            _runtime: runtime,
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    /// Number of ask requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
