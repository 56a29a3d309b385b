use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message for a technician, consumed pull-on-demand. Clients fetch the
/// list when they need it; there is no delivery push and no polling loop in
/// this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNotificationsResponse {
    pub technician_id: Uuid,
    pub notifications: Vec<Notification>,
}
