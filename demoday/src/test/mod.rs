use crate::test_utils::{
    create_test_app, create_test_app_with_config, create_test_config, create_test_slot, registration_form, slot_occupancy,
    slot_time, student_count,
};
use serde_json::Value;
use sqlx::PgPool;

/// Full happy path: register, then observe the registration through both read
/// projections.
#[sqlx::test]
#[test_log::test]
async fn test_register_new_student_into_open_slot(pool: PgPool) {
    let slot_id = create_test_slot(&pool, slot_time(13), 6).await;
    let server = create_test_app(pool.clone()).await;

    let response = server
        .post("/api/students")
        .multipart(registration_form("12345678", "Ada Lovelace", slot_id))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "Student registered successfully");

    let slots: Value = server.get("/api/demo-slots").await.json();
    let slot = slots
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == slot_id)
        .expect("slot missing from listing");
    assert_eq!(slot["current_count"], 1);
    assert_eq!(slot["capacity"], 6);
    assert_eq!(slot["available"], true);

    let students: Value = server.get("/api/students").await.json();
    let students = students.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["student_id"], "12345678");
    assert_eq!(students[0]["name"], "Ada Lovelace");
    assert!(students[0]["demo_time"].is_string());
}

/// The capacity scenario: slot of one; first entrant accepted, second
/// rejected without a write, re-submission by the first never blocked.
#[sqlx::test]
#[test_log::test]
async fn test_full_slot_rejects_new_entrants_but_not_resubmission(pool: PgPool) {
    let slot_id = create_test_slot(&pool, slot_time(13), 1).await;
    let server = create_test_app(pool.clone()).await;

    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Ada Lovelace", slot_id))
        .await;
    assert_eq!(response.status_code(), 201);

    let slots: Value = server.get("/api/demo-slots").await.json();
    assert_eq!(slots[0]["available"], false);

    let response = server
        .post("/api/students")
        .multipart(registration_form("22222222", "Grace Hopper", slot_id))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "This time slot is already full. Please choose another.");
    assert_eq!(slot_occupancy(&pool, slot_id).await, 1);

    // Same student, new project text, same slot: updated, occupancy unchanged
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("fullName", "Ada Lovelace")
        .add_text("email", "student11111111@example.com")
        .add_text("studentId", "11111111")
        .add_text("number", "555-123-4567")
        .add_text("projectDescription", "Revised project")
        .add_text("demoTime", slot_id.to_string());
    let response = server.post("/api/students").multipart(form).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Registration updated.");
    assert_eq!(slot_occupancy(&pool, slot_id).await, 1);
}

/// Submitting identical data twice yields one row; the second call reports
/// "updated".
#[sqlx::test]
#[test_log::test]
async fn test_resubmission_is_idempotent(pool: PgPool) {
    let slot_id = create_test_slot(&pool, slot_time(13), 6).await;
    let server = create_test_app(pool.clone()).await;

    let first = server
        .post("/api/students")
        .multipart(registration_form("12345678", "Ada Lovelace", slot_id))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = server
        .post("/api/students")
        .multipart(registration_form("12345678", "Ada Lovelace", slot_id))
        .await;
    assert_eq!(second.status_code(), 200);
    let body: Value = second.json();
    assert_eq!(body["message"], "Registration updated.");

    assert_eq!(student_count(&pool).await, 1);
}

/// Each validation rule rejects with its exact message.
#[sqlx::test]
#[test_log::test]
async fn test_validation_rejections(pool: PgPool) {
    let slot_id = create_test_slot(&pool, slot_time(13), 6).await;
    let server = create_test_app(pool.clone()).await;

    // Single-word name
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("fullName", "John")
        .add_text("email", "john@example.com")
        .add_text("studentId", "12345678")
        .add_text("number", "555-123-4567")
        .add_text("projectDescription", "Project")
        .add_text("demoTime", slot_id.to_string());
    let response = server.post("/api/students").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Name must include first and last name using letters only");

    // Short student id
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("fullName", "John Smith")
        .add_text("email", "john@example.com")
        .add_text("studentId", "1234")
        .add_text("number", "555-123-4567")
        .add_text("projectDescription", "Project")
        .add_text("demoTime", slot_id.to_string());
    let response = server.post("/api/students").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Student ID must be exactly 8 digits");

    // Malformed email
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("fullName", "John Smith")
        .add_text("email", "john-at-example")
        .add_text("studentId", "12345678")
        .add_text("number", "555-123-4567")
        .add_text("projectDescription", "Project")
        .add_text("demoTime", slot_id.to_string());
    let response = server.post("/api/students").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid email format");

    // Undashed phone
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("fullName", "John Smith")
        .add_text("email", "john@example.com")
        .add_text("studentId", "12345678")
        .add_text("number", "1234567890")
        .add_text("projectDescription", "Project")
        .add_text("demoTime", slot_id.to_string());
    let response = server.post("/api/students").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Phone number must be in the format 999-999-9999");

    // Missing project description
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("fullName", "John Smith")
        .add_text("email", "john@example.com")
        .add_text("studentId", "12345678")
        .add_text("number", "555-123-4567")
        .add_text("demoTime", slot_id.to_string());
    let response = server.post("/api/students").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Missing required fields");

    // Nothing was written
    assert_eq!(student_count(&pool).await, 0);
}

/// Repeated form fields keep their first value end to end.
#[sqlx::test]
#[test_log::test]
async fn test_repeated_fields_take_first_value(pool: PgPool) {
    let slot_id = create_test_slot(&pool, slot_time(13), 6).await;
    let server = create_test_app(pool.clone()).await;

    let form = registration_form("12345678", "Ada Lovelace", slot_id).add_text("fullName", "Grace Hopper");
    let response = server.post("/api/students").multipart(form).await;
    assert_eq!(response.status_code(), 201);

    let students: Value = server.get("/api/students").await.json();
    assert_eq!(students[0]["name"], "Ada Lovelace");
}

/// A slot id with no demo_slots row still accepts registrations, capped at
/// the configured fallback capacity.
#[sqlx::test]
#[test_log::test]
async fn test_missing_slot_falls_back_to_configured_capacity(pool: PgPool) {
    let mut config = create_test_config();
    config.registration.default_slot_capacity = 1;
    let server = create_test_app_with_config(pool.clone(), config).await;

    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Ada Lovelace", 424242))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = server
        .post("/api/students")
        .multipart(registration_form("22222222", "Grace Hopper", 424242))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "This time slot is already full. Please choose another.");
}

/// The available flag flips exactly at capacity.
#[sqlx::test]
#[test_log::test]
async fn test_available_flag_at_capacity_boundary(pool: PgPool) {
    let slot_id = create_test_slot(&pool, slot_time(13), 6).await;
    let server = create_test_app(pool.clone()).await;

    for i in 0..5 {
        let student_id = format!("1000000{i}");
        let response = server
            .post("/api/students")
            .multipart(registration_form(&student_id, "Test Student", slot_id))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let slots: Value = server.get("/api/demo-slots").await.json();
    assert_eq!(slots[0]["current_count"], 5);
    assert_eq!(slots[0]["available"], true);

    let response = server
        .post("/api/students")
        .multipart(registration_form("10000005", "Test Student", slot_id))
        .await;
    assert_eq!(response.status_code(), 201);

    let slots: Value = server.get("/api/demo-slots").await.json();
    assert_eq!(slots[0]["current_count"], 6);
    assert_eq!(slots[0]["available"], false);
}

/// Students list in slot-time order regardless of registration order.
#[sqlx::test]
#[test_log::test]
async fn test_students_listing_ordered_by_slot_time(pool: PgPool) {
    let late = create_test_slot(&pool, slot_time(15), 6).await;
    let early = create_test_slot(&pool, slot_time(13), 6).await;
    let server = create_test_app(pool.clone()).await;

    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Late Presenter", late))
        .await;
    assert_eq!(response.status_code(), 201);
    let response = server
        .post("/api/students")
        .multipart(registration_form("22222222", "Early Presenter", early))
        .await;
    assert_eq!(response.status_code(), 201);

    let students: Value = server.get("/api/students").await.json();
    let students = students.as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["student_id"], "22222222");
    assert_eq!(students[1]["student_id"], "11111111");
}

/// Re-submission moves a student between slots; occupancy follows.
#[sqlx::test]
#[test_log::test]
async fn test_resubmission_moves_between_slots(pool: PgPool) {
    let first = create_test_slot(&pool, slot_time(13), 6).await;
    let second = create_test_slot(&pool, slot_time(14), 6).await;
    let server = create_test_app(pool.clone()).await;

    let response = server
        .post("/api/students")
        .multipart(registration_form("12345678", "Ada Lovelace", first))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = server
        .post("/api/students")
        .multipart(registration_form("12345678", "Ada Lovelace", second))
        .await;
    assert_eq!(response.status_code(), 200);

    assert_eq!(slot_occupancy(&pool, first).await, 0);
    assert_eq!(slot_occupancy(&pool, second).await, 1);
}

/// Observed contract: an existing registrant may move into a full slot,
/// transiently exceeding capacity.
#[sqlx::test]
#[test_log::test]
async fn test_move_into_full_slot_allowed_by_default(pool: PgPool) {
    let origin = create_test_slot(&pool, slot_time(13), 6).await;
    let full = create_test_slot(&pool, slot_time(14), 1).await;
    let server = create_test_app(pool.clone()).await;

    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Ada Lovelace", origin))
        .await;
    assert_eq!(response.status_code(), 201);
    let response = server
        .post("/api/students")
        .multipart(registration_form("22222222", "Grace Hopper", full))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Ada Lovelace", full))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(slot_occupancy(&pool, full).await, 2);
}

/// With the policy flag on, cross-slot moves into a full slot are rejected,
/// but re-submitting into one's own full slot still succeeds.
#[sqlx::test]
#[test_log::test]
async fn test_policy_blocks_moves_into_full_slots(pool: PgPool) {
    let origin = create_test_slot(&pool, slot_time(13), 1).await;
    let full = create_test_slot(&pool, slot_time(14), 1).await;

    let mut config = create_test_config();
    config.registration.block_moves_to_full_slot = true;
    let server = create_test_app_with_config(pool.clone(), config).await;

    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Ada Lovelace", origin))
        .await;
    assert_eq!(response.status_code(), 201);
    let response = server
        .post("/api/students")
        .multipart(registration_form("22222222", "Grace Hopper", full))
        .await;
    assert_eq!(response.status_code(), 201);

    // Cross-slot move into the full slot is now a capacity conflict
    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Ada Lovelace", full))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(slot_occupancy(&pool, full).await, 1);

    // Own slot is full (capacity 1, occupied by the registrant) but a
    // re-submission there still updates
    let response = server
        .post("/api/students")
        .multipart(registration_form("11111111", "Ada Lovelace", origin))
        .await;
    assert_eq!(response.status_code(), 200);
}

/// A body that is not multipart at all is a generic form parsing error.
#[sqlx::test]
#[test_log::test]
async fn test_malformed_body_is_a_form_parsing_error(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;

    let response = server.post("/api/students").text("not a form").await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Form parsing error");
}

/// Unsupported methods on the students endpoint report 405.
#[sqlx::test]
#[test_log::test]
async fn test_unsupported_method_is_405(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;

    let response = server.delete("/api/students").await;
    assert_eq!(response.status_code(), 405);
}

#[sqlx::test]
#[test_log::test]
async fn test_healthz(pool: PgPool) {
    let server = create_test_app(pool.clone()).await;

    let response = server.get("/healthz").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "OK");
}
