//! Test helpers for web API tests.
//!
//! Provides a [`TestContext`] wrapping an axum-test server over a temporary
//! storage root, plus helpers for building upload requests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderName;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use tempfile::TempDir;

use jarstore::{create_router, AppState, FolderStore, SharedSecret};

/// Shared secret used by every test server.
pub const SECRET: &str = "fox";

/// Name of the auth header.
pub fn pass_header() -> HeaderName {
    HeaderName::from_static("pass")
}

/// A running test server and the storage it writes into.
pub struct TestContext {
    pub server: TestServer,
    /// Storage root; a `root` directory inside `temp_dir` so traversal
    /// tests can observe the parent.
    pub root: PathBuf,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Path of a folder under the storage root.
    pub fn folder(&self, folder: &str) -> PathBuf {
        self.root.join(folder)
    }

    /// Path of a file under the storage root.
    pub fn file(&self, folder: &str, file: &str) -> PathBuf {
        self.root.join(folder).join(file)
    }

    /// Write a file directly to disk, bypassing the API.
    pub fn put_file(&self, folder: &str, file: &str, content: &[u8]) {
        std::fs::create_dir_all(self.folder(folder)).unwrap();
        std::fs::write(self.file(folder, file), content).unwrap();
    }

    /// Upload files with the correct secret.
    pub async fn upload(&self, folder: &str, files: &[(&str, &[u8])]) -> TestResponse {
        self.server
            .post(&format!("/{folder}/upload"))
            .add_header(pass_header(), SECRET)
            .multipart(jar_form(files))
            .await
    }
}

/// Create a test server with default settings.
pub fn create_test_server() -> TestContext {
    create_test_server_with(|state| state)
}

/// Create a test server, letting the caller adjust the state first.
pub fn create_test_server_with(configure: impl FnOnce(AppState) -> AppState) -> TestContext {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("root");

    let store = FolderStore::new(&root).expect("Failed to create folder store");
    let state = configure(AppState::new(store, Arc::new(SharedSecret::new(SECRET))));

    let server =
        TestServer::new(create_router(Arc::new(state))).expect("Failed to create test server");

    TestContext {
        server,
        root,
        temp_dir,
    }
}

/// A file part under the `files[]` field.
pub fn file_part(name: &str, content: &[u8]) -> Part {
    Part::bytes(content.to_vec())
        .file_name(name)
        .mime_type("application/java-archive")
}

/// A multipart form with one `files[]` part per entry.
pub fn jar_form(files: &[(&str, &[u8])]) -> MultipartForm {
    files
        .iter()
        .fold(MultipartForm::new(), |form, (name, content)| {
            form.add_part("files[]", file_part(name, content))
        })
}
