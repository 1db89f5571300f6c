//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check payload, wrapped in the success envelope.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: String,
    pub response_time_ms: u64,
}
