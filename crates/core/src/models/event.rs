use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FieldError;

/// Kind of a booked commitment. Events are tracked separately from offered
/// availability and the two calendars are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Installation,
    Maintenance,
    Intervention,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Installation => "installation",
            EventKind::Maintenance => "maintenance",
            EventKind::Intervention => "intervention",
        }
    }
}

impl FromStr for EventKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "installation" => Ok(EventKind::Installation),
            "maintenance" => Ok(EventKind::Maintenance),
            "intervention" => Ok(EventKind::Intervention),
            other => Err(FieldError::InvalidInput(format!(
                "Unknown event kind: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: EventKind,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: EventKind,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEventsResponse {
    pub technician_id: Uuid,
    pub events: Vec<ScheduledEvent>,
}
