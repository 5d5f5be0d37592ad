use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub project_name: String,
    pub demo_slot_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized registration fields written by both the insert and update
/// branches of the registration transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentWriteDBRequest {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub project_name: String,
    pub demo_slot_id: i32,
}

/// A student joined with their slot's start time, for the listing projection.
/// `demo_time` is null when the referenced slot row does not exist.
#[derive(Debug, Clone, FromRow)]
pub struct StudentWithSlotDBResponse {
    pub student_id: String,
    pub name: String,
    pub project_name: String,
    pub email: String,
    pub phone_number: String,
    pub demo_time: Option<DateTime<Utc>>,
}
