//! Pure validation of registration form fields.
//!
//! Field rules run in a fixed order with first-failure-wins semantics, and
//! every rejection carries the exact human-readable message the client shows
//! next to the form. Validation has no side effects and touches no I/O.

use crate::db::models::students::StudentWriteDBRequest;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:\s[A-Za-z]+)+$").unwrap());
static STUDENT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[A-Za-z]{2,}$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap());

/// A user-correctable rejection. The Display impl is the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must include first and last name using letters only")]
    InvalidName,
    #[error("Student ID must be exactly 8 digits")]
    InvalidStudentId,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Phone number must be in the format 999-999-9999")]
    InvalidPhone,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid demo slot")]
    InvalidSlot,
}

/// Raw form fields after boundary coercion, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawRegistration {
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub number: String,
    pub project_description: String,
    pub demo_time: String,
}

/// Reduce a list-or-scalar form field to a single trimmed string: first value
/// wins, later duplicates are ignored. Applied uniformly at the boundary
/// before any validation runs.
pub fn coerce_field(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.trim().to_string());
    }
}

/// Validate raw fields and produce the normalized write request.
///
/// Evaluation order is fixed and first failure wins: name pattern, student id
/// pattern, email pattern, phone pattern, then the non-empty check over all
/// six required fields, then the slot id parse.
pub fn validate(raw: &RawRegistration) -> Result<StudentWriteDBRequest, ValidationError> {
    if !NAME_RE.is_match(&raw.full_name) {
        return Err(ValidationError::InvalidName);
    }
    if !STUDENT_ID_RE.is_match(&raw.student_id) {
        return Err(ValidationError::InvalidStudentId);
    }
    if !EMAIL_RE.is_match(&raw.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !PHONE_RE.is_match(&raw.number) {
        return Err(ValidationError::InvalidPhone);
    }
    if raw.full_name.is_empty()
        || raw.email.is_empty()
        || raw.student_id.is_empty()
        || raw.number.is_empty()
        || raw.project_description.is_empty()
        || raw.demo_time.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }

    // The demoTime field carries the target slot id. The original stack fed
    // the raw string to SQL and surfaced a 500 on garbage; a client mistake
    // should read as a client error instead.
    let demo_slot_id: i32 = raw.demo_time.parse().map_err(|_| ValidationError::InvalidSlot)?;

    Ok(StudentWriteDBRequest {
        student_id: raw.student_id.clone(),
        name: raw.full_name.clone(),
        email: raw.email.clone(),
        phone_number: raw.number.clone(),
        project_name: raw.project_description.clone(),
        demo_slot_id,
    })
}
