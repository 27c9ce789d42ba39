//! Server Integration Tests
//!
//! Drives the real TCP listener end to end with reqwest.

use std::io::{Cursor, Read};

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use tempfile::TempDir;

use jarstore::{Config, WebServer};

async fn start_server(temp_dir: &TempDir) -> String {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.storage.root = temp_dir.path().join("storage").display().to_string();

    let server = WebServer::new(&config).expect("Failed to create server");
    let addr = server.run_with_addr().await.expect("Failed to start server");
    format!("http://{}", addr)
}

async fn json(resp: reqwest::Response) -> Value {
    serde_json::from_slice(&resp.bytes().await.unwrap()).unwrap()
}

fn jar(name: &str, content: &[u8]) -> Part {
    Part::bytes(content.to_vec()).file_name(name.to_string())
}

#[tokio::test]
async fn test_full_folder_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let base = start_server(&temp_dir).await;
    let client = reqwest::Client::new();

    // Nothing there yet
    let resp = client.get(format!("{base}/plugins")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Upload two jars
    let form = Form::new()
        .part("files[]", jar("alpha.jar", b"alpha"))
        .part("files[]", jar("beta.jar", b"beta-beta"));
    let resp = client
        .post(format!("{base}/plugins/upload"))
        .header("pass", "fox")
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = json(resp).await;
    assert_eq!(body["files"].as_array().unwrap().len(), 2);

    // Info
    let resp = client
        .get(format!("{base}/plugins/info"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let info: Value = json(resp).await;
    assert_eq!(info.as_array().unwrap().len(), 2);

    // Single file
    let resp = client
        .get(format!("{base}/plugins/get/beta.jar"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&resp.bytes().await.unwrap()[..], b"beta-beta");

    // Zip
    let resp = client.get(format!("{base}/plugins")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=plugins.zip"
    );
    let bytes = resp.bytes().await.unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut alpha = Vec::new();
    archive
        .by_name("alpha.jar")
        .unwrap()
        .read_to_end(&mut alpha)
        .unwrap();
    assert_eq!(alpha, b"alpha");

    // Delete both, then the folder is empty
    for name in ["alpha.jar", "beta.jar"] {
        let resp = client
            .delete(format!("{base}/plugins/{name}"))
            .header("pass", "fox")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client.get(format!("{base}/plugins")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = json(resp).await;
    assert_eq!(body["message"], "Folder is empty");
}

#[tokio::test]
async fn test_storage_root_created_on_start() {
    let temp_dir = TempDir::new().unwrap();
    let _base = start_server(&temp_dir).await;

    assert!(temp_dir.path().join("storage").is_dir());
}
