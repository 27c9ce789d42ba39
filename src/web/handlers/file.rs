//! Folder and file handlers.

use axum::{
    body::Body,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use tokio_util::io::ReaderStream;

use crate::file::{has_extension, spool_folder_archive, upload_name, StoredFile};
use crate::web::dto::{FolderEntryResponse, MessageResponse, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::PassHeader;

/// Multipart field name that carries uploaded files.
pub const UPLOAD_FIELD: &str = "files[]";

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters are dropped, quotes and backslashes in the ASCII
/// fallback become `_`, and non-ASCII names get an RFC 5987 `filename*`.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && sanitized == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized,
        urlencoding::encode(filename)
    )
}

/// Content-Disposition for a folder archive: `attachment; filename=<folder>.zip`.
///
/// Names that are not plain tokens fall back to the quoted form.
fn archive_disposition_header(folder: &str) -> String {
    let name = format!("{folder}.zip");
    let is_token = name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&b));

    if is_token {
        format!("attachment; filename={name}")
    } else {
        content_disposition_header(&name)
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("Upload too large")
    } else {
        tracing::debug!("Failed to read multipart data: {}", e);
        ApiError::bad_request("Invalid multipart data")
    }
}

/// POST /:folder/upload - Upload `.jar` files into a folder.
///
/// Request body: multipart/form-data with one or more `files[]` parts.
/// Either every file is stored or none is.
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    _pass: PassHeader,
    Path(folder): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut stored = Vec::new();

    if let Ok(mut multipart) = multipart {
        if let Err(e) = receive_files(&state, &folder, &mut multipart, &mut stored).await {
            discard_files(&stored);
            return Err(e);
        }
    }

    if stored.is_empty() {
        return Err(ApiError::bad_request("No files uploaded"));
    }

    tracing::info!(folder = %folder, count = stored.len(), "Files uploaded");

    Ok(Json(UploadResponse {
        message: "Files uploaded successfully".to_string(),
        files: stored.into_iter().map(Into::into).collect(),
    }))
}

async fn receive_files(
    state: &AppState,
    folder: &str,
    multipart: &mut Multipart,
    stored: &mut Vec<StoredFile>,
) -> Result<(), ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        // Plain text fields are ignored.
        let Some(file_name) = field.file_name().map(|n| upload_name(n).to_string()) else {
            continue;
        };

        if field.name() != Some(UPLOAD_FIELD) {
            return Err(ApiError::bad_request("Unexpected field"));
        }
        if stored.len() >= state.max_files {
            return Err(ApiError::bad_request("Too many files"));
        }
        if !has_extension(&file_name, &state.allowed_extension) {
            return Err(ApiError::bad_request(format!(
                "Only .{} files are allowed",
                state.allowed_extension
            )));
        }

        let content = field.bytes().await.map_err(multipart_error)?;

        state.store.ensure_folder(folder)?;
        let path = state.store.write_file(folder, &file_name, &content)?;

        stored.push(StoredFile {
            original_name: file_name,
            path,
            size: content.len() as u64,
        });
    }

    Ok(())
}

fn discard_files(stored: &[StoredFile]) {
    for file in stored {
        if let Err(e) = std::fs::remove_file(&file.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %file.path.display(), "Failed to discard upload: {}", e);
            }
        }
    }
}

/// GET /:folder - Download the whole folder as a zip archive.
///
/// An empty folder yields a JSON message instead of an archive.
pub async fn download_folder(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
) -> Result<Response, ApiError> {
    if !state.store.folder_exists(&folder) {
        return Err(ApiError::folder_not_found());
    }

    if state.store.is_empty(&folder)? {
        return Ok(Json(MessageResponse::new("Folder is empty")).into_response());
    }

    let dir = state.store.folder_path(&folder);
    let (archive, len) = tokio::task::spawn_blocking(move || spool_folder_archive(&dir))
        .await
        .map_err(|e| {
            tracing::error!(folder = %folder, "Archive task failed: {}", e);
            ApiError::internal("Failed to create ZIP")
        })?
        .map_err(|e| {
            tracing::error!(folder = %folder, "Failed to create ZIP: {}", e);
            ApiError::internal("Failed to create ZIP")
        })?;

    Response::builder()
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            archive_disposition_header(&folder),
        )
        .header(header::CONTENT_LENGTH, len)
        .body(Body::from_stream(ReaderStream::new(
            tokio::fs::File::from_std(archive),
        )))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to create ZIP")
        })
}

/// GET /:folder/get/:file - Download a single file.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path((folder, file)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    if !state.store.file_exists(&folder, &file) {
        return Err(ApiError::file_not_found());
    }

    let path = state.store.file_path(&folder, &file);
    let content = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::file_not_found()
        } else {
            tracing::error!(path = %path.display(), "Failed to read file: {}", e);
            ApiError::internal("Failed to read file")
        }
    })?;

    let content_type = mime_guess::from_path(&file)
        .first_or_octet_stream()
        .to_string();

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&file),
        )
        .header(header::CONTENT_LENGTH, content.len())
        .body(Body::from(content))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// GET /:folder/info - List name, size and modification time of each entry.
pub async fn folder_info(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
) -> Result<Json<Vec<FolderEntryResponse>>, ApiError> {
    if !state.store.folder_exists(&folder) {
        return Err(ApiError::folder_not_found());
    }

    let entries = state.store.list_entries(&folder)?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// DELETE /:folder/:file - Delete a single file.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    _pass: PassHeader,
    Path((folder, file)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_file(&state, &folder, &file)
}

/// DELETE /:folder/upload - Delete a file literally named `upload`.
pub async fn delete_upload_file(
    State(state): State<Arc<AppState>>,
    _pass: PassHeader,
    Path(folder): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_file(&state, &folder, "upload")
}

/// DELETE /:folder/info - Delete a file literally named `info`.
pub async fn delete_info_file(
    State(state): State<Arc<AppState>>,
    _pass: PassHeader,
    Path(folder): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_file(&state, &folder, "info")
}

fn remove_file(
    state: &AppState,
    folder: &str,
    file: &str,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.remove_file(folder, file).map_err(|e| match e {
        crate::JarstoreError::NotFound(_) => ApiError::file_not_found(),
        other => other.into(),
    })?;

    tracing::info!(folder = %folder, file = %file, "File deleted");

    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// Fallback for every unmatched route or method.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_header_simple_ascii() {
        let result = content_disposition_header("worldedit.jar");
        assert_eq!(result, "attachment; filename=\"worldedit.jar\"");
    }

    #[test]
    fn test_content_disposition_header_with_spaces() {
        let result = content_disposition_header("my plugin.jar");
        assert_eq!(result, "attachment; filename=\"my plugin.jar\"");
    }

    #[test]
    fn test_content_disposition_header_non_ascii() {
        let result = content_disposition_header("日本語.jar");
        assert!(result.starts_with("attachment; filename=\""));
        assert!(result.contains("filename*=UTF-8''%E6%97%A5%E6%9C%AC%E8%AA%9E.jar"));
    }

    #[test]
    fn test_content_disposition_header_double_quote() {
        let result = content_disposition_header("a\"b.jar");
        assert!(result.contains("filename=\"a_b.jar\""));
        assert!(result.contains("%22"));
    }

    #[test]
    fn test_content_disposition_header_control_characters() {
        let result = content_disposition_header("a\r\nX-Injected: bad.jar");
        assert!(!result.contains('\r'));
        assert!(!result.contains('\n'));
        assert!(result.starts_with("attachment; filename="));
    }

    #[test]
    fn test_archive_disposition_header_plain() {
        assert_eq!(
            archive_disposition_header("mods"),
            "attachment; filename=mods.zip"
        );
        assert_eq!(
            archive_disposition_header("my-mods_1.20"),
            "attachment; filename=my-mods_1.20.zip"
        );
    }

    #[test]
    fn test_archive_disposition_header_quoted_fallback() {
        assert_eq!(
            archive_disposition_header("my mods"),
            "attachment; filename=\"my mods.zip\""
        );
    }
}
