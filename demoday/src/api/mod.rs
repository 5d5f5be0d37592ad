//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for the registration API
//! - **[`models`]**: Request/response data structures for API communication
//!
//! The surface is small: two read projections (`GET /api/demo-slots`,
//! `GET /api/students`) and the multipart registration intake
//! (`POST /api/students`). All endpoints are documented with OpenAPI
//! annotations via `utoipa`; the rendered docs are served at `/docs`.

pub mod handlers;
pub mod models;
