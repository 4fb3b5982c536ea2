//! Response envelopes shared by the content endpoints.
//!
//! The API wraps every payload as `{ success, data, ... }`. List endpoints may add
//! `pagination`; status-only endpoints (health, contact) return `{ success, message }`.

use serde::{Deserialize, Serialize};

use crate::models::Pagination;

/// `{ success, data: T }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

/// `{ success, data: T[], pagination? }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// `{ success, message }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusMessage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}
