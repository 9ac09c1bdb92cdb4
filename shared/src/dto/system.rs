use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub network: String,
    pub timestamp: String,
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub network: String,
    pub endpoints: BTreeMap<String, String>,
}
