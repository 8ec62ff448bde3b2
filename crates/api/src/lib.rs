//! HTTP API: routing, session auth, and request/response mapping.

pub mod app;
pub mod context;
pub mod middleware;
pub mod session;
