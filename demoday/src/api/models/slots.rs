use crate::db::models::slots::SlotOccupancyDBResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A demo slot with its derived occupancy, as shown on the signup page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlotResponse {
    /// Slot identifier, submitted back as the `demoTime` form field
    pub id: i32,
    /// Slot start time
    #[schema(value_type = String, format = "date-time")]
    pub time: DateTime<Utc>,
    /// Maximum number of registrants
    pub capacity: i32,
    /// Registrations currently referencing this slot
    pub current_count: i64,
    /// Whether a new registrant would still be accepted
    pub available: bool,
}

impl From<SlotOccupancyDBResponse> for SlotResponse {
    fn from(row: SlotOccupancyDBResponse) -> Self {
        let available = row.current_count < i64::from(row.capacity);
        Self {
            id: row.id,
            time: row.time,
            capacity: row.capacity,
            current_count: row.current_count,
            available,
        }
    }
}
