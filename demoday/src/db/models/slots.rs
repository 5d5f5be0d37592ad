use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A slot joined with its derived occupancy. Occupancy is never stored;
/// it is aggregated from `students.demo_slot_id` at read time.
#[derive(Debug, Clone, FromRow)]
pub struct SlotOccupancyDBResponse {
    pub id: i32,
    pub time: DateTime<Utc>,
    pub capacity: i32,
    pub current_count: i64,
}
