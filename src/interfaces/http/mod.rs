//! HTTP REST API interfaces
//!
//! - `common`: Response envelope, validated JSON extractor, instant parsing
//! - `modules`: Request handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use common::{ApiResponse, ValidatedJson};
pub use router::create_api_router;
