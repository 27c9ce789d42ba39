//! Router configuration for the web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_file, delete_info_file, delete_upload_file, download_file, download_folder,
    folder_info, not_found, upload_files, AppState,
};

/// Create the main API router.
///
/// `/:folder/upload` and `/:folder/info` shadow `/:folder/:file`, so they also
/// accept DELETE for files literally named `upload` or `info`. Every route
/// answers unsupported methods with the JSON 404.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let body_limit = app_state.max_upload_bytes;

    Router::new()
        .route("/:folder", get(download_folder).fallback(not_found))
        .route(
            "/:folder/upload",
            post(upload_files)
                .delete(delete_upload_file)
                .fallback(not_found),
        )
        .route(
            "/:folder/info",
            get(folder_info)
                .delete(delete_info_file)
                .fallback(not_found),
        )
        .route("/:folder/get/:file", get(download_file).fallback(not_found))
        .route("/:folder/:file", delete(delete_file).fallback(not_found))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}
