use serde::{Deserialize, Serialize};

/// Error response body: `{"error": {"message", "code"}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
    /// Machine readable code, e.g. `INVALID_TOKEN`
    pub code: String,
    /// Only present in development mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}
