use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for successful creates: `{"id": ..., "status": "created"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub status: String,
}

impl CreatedResponse {
    pub fn new(id: Uuid) -> Self {
        CreatedResponse {
            id,
            status: "created".to_string(),
        }
    }
}

/// Envelope for updates, deletes and other acknowledgements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        StatusResponse {
            status: status.to_string(),
        }
    }
}
