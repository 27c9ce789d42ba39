//! HTTP API for jarstore.
//!
//! Folder zip/info/file downloads are public; upload and delete require the
//! shared-secret header.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
