// ABOUTME: HTTP middleware for authentication, CORS and request tracing
// ABOUTME: Bearer token checks plus the tower-http layer stack applied to every route

pub mod auth;
pub mod cors;
pub mod layers;

// Authentication middleware
pub use auth::{AuthMiddleware, AuthResult};

// CORS configuration
pub use cors::setup_cors;

// Request tracing and limits
pub use layers::{apply_http_layers, REQUEST_ID_HEADER};
