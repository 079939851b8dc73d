use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform envelope returned for every API outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            data: Some(data.into()),
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            success: false,
            error,
        }
    }
}
