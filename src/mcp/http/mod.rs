//! HTTP client and API communication layer for the HR Enterprise API.
//!
//! This module handles all HTTP communication with the upstream HR system,
//! including the API-key header, request construction, and response
//! classification.

mod client;

// Re-export client's public API
pub use client::HrApiClient;
