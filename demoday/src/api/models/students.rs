use crate::db::models::students::StudentWithSlotDBResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered student joined with their slot's start time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    /// 8-digit student identifier
    pub student_id: String,
    pub name: String,
    pub project_name: String,
    pub email: String,
    pub phone_number: String,
    /// Start time of the student's slot; null when the referenced slot row
    /// does not exist
    #[schema(value_type = Option<String>, format = "date-time")]
    pub demo_time: Option<DateTime<Utc>>,
}

impl From<StudentWithSlotDBResponse> for StudentResponse {
    fn from(row: StudentWithSlotDBResponse) -> Self {
        Self {
            student_id: row.student_id,
            name: row.name,
            project_name: row.project_name,
            email: row.email,
            phone_number: row.phone_number,
            demo_time: row.demo_time,
        }
    }
}

/// Success body for the registration endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationMessage {
    /// "Student registered successfully" on insert, "Registration updated." on update
    pub message: String,
}

/// Failure body shared by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
