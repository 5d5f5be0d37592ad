//! OpenAPI documentation for the registration API, rendered at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "demoday",
        description = "Demo-day slot registration service: slot listing, student listing, and capacity-enforced registration."
    ),
    paths(
        crate::api::handlers::slots::list_demo_slots,
        crate::api::handlers::students::list_students,
        crate::api::handlers::students::register_student,
    ),
    components(schemas(
        crate::api::models::slots::SlotResponse,
        crate::api::models::students::StudentResponse,
        crate::api::models::students::RegistrationMessage,
        crate::api::models::students::ErrorBody,
    )),
    tags(
        (name = "slots", description = "Demo slot availability"),
        (name = "students", description = "Student registrations"),
    )
)]
pub struct ApiDoc;
