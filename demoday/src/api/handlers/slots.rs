use crate::AppState;
use crate::api::models::slots::SlotResponse;
use crate::db::handlers::Slots;
use crate::errors::{Error, Result};
use axum::{Json, extract::State};

/// GET /api/demo-slots - List slots with occupancy and availability
#[utoipa::path(
    get,
    path = "/api/demo-slots",
    tag = "slots",
    responses(
        (status = 200, description = "Slots ordered by start time", body = Vec<SlotResponse>),
        (status = 500, description = "Store failure", body = crate::api::models::students::ErrorBody),
    )
)]
pub async fn list_demo_slots(State(state): State<AppState>) -> Result<Json<Vec<SlotResponse>>> {
    let mut conn = state
        .db
        .acquire()
        .await
        .map_err(|e| Error::db("Error fetching demo slots")(e.into()))?;

    let slots = Slots::new(&mut conn)
        .list_with_occupancy()
        .await
        .map_err(Error::db("Error fetching demo slots"))?;

    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}
