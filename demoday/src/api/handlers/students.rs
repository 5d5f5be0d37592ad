use crate::AppState;
use crate::api::models::students::{RegistrationMessage, StudentResponse};
use crate::db::handlers::{Registrations, Students, registrations::RegistrationOutcome};
use crate::errors::{Error, Result};
use crate::validation::{self, RawRegistration, coerce_field};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};

/// GET /api/students - List registrations joined with their slot times
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "students",
    responses(
        (status = 200, description = "Students ordered by demo time", body = Vec<StudentResponse>),
        (status = 500, description = "Store failure", body = crate::api::models::students::ErrorBody),
    )
)]
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentResponse>>> {
    let mut conn = state
        .db
        .acquire()
        .await
        .map_err(|e| Error::db("Error fetching students")(e.into()))?;

    let students = Students::new(&mut conn)
        .list_with_slot_times()
        .await
        .map_err(Error::db("Error fetching students"))?;

    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// POST /api/students - Register a student for a demo slot (multipart form)
///
/// Inserts on first submission, updates in place on re-submission by the same
/// student id, and rejects new entrants targeting a full slot.
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "students",
    responses(
        (status = 201, description = "Student registered successfully", body = RegistrationMessage),
        (status = 200, description = "Registration updated", body = RegistrationMessage),
        (status = 400, description = "Validation failure or capacity conflict", body = crate::api::models::students::ErrorBody),
        (status = 500, description = "Store failure", body = crate::api::models::students::ErrorBody),
    )
)]
pub async fn register_student(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<RegistrationMessage>)> {
    let mut multipart = multipart.map_err(|e| Error::FormParsing { detail: e.to_string() })?;

    let raw = collect_form(&mut multipart).await?;
    tracing::debug!(student_id = %raw.student_id, demo_time = %raw.demo_time, "received registration form");

    let request = validation::validate(&raw)?;

    let mut conn = state
        .db
        .acquire()
        .await
        .map_err(|e| Error::db("Server error")(e.into()))?;

    let outcome = Registrations::new(&mut conn)
        .register(&request, &state.config.registration)
        .await
        .map_err(Error::db("Server error"))?;

    match outcome {
        RegistrationOutcome::Created => Ok((
            StatusCode::CREATED,
            Json(RegistrationMessage {
                message: "Student registered successfully".to_string(),
            }),
        )),
        RegistrationOutcome::Updated => Ok((
            StatusCode::OK,
            Json(RegistrationMessage {
                message: "Registration updated.".to_string(),
            }),
        )),
        RegistrationOutcome::SlotFull => Err(Error::SlotFull),
    }
}

/// Drain the multipart stream into raw fields. Repeated fields keep their
/// first value (the list-or-scalar coercion); unknown fields are ignored.
async fn collect_form(multipart: &mut Multipart) -> Result<RawRegistration> {
    let mut full_name = None;
    let mut email = None;
    let mut student_id = None;
    let mut number = None;
    let mut project_description = None;
    let mut demo_time = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::FormParsing { detail: e.to_string() })?
    {
        let field_name = field.name().unwrap_or("").to_string();
        let value = field
            .text()
            .await
            .map_err(|e| Error::FormParsing { detail: e.to_string() })?;

        match field_name.as_str() {
            "fullName" => coerce_field(&mut full_name, &value),
            "email" => coerce_field(&mut email, &value),
            "studentId" => coerce_field(&mut student_id, &value),
            "number" => coerce_field(&mut number, &value),
            "projectDescription" => coerce_field(&mut project_description, &value),
            "demoTime" => coerce_field(&mut demo_time, &value),
            _ => {}
        }
    }

    Ok(RawRegistration {
        full_name: full_name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        student_id: student_id.unwrap_or_default(),
        number: number.unwrap_or_default(),
        project_description: project_description.unwrap_or_default(),
        demo_time: demo_time.unwrap_or_default(),
    })
}
