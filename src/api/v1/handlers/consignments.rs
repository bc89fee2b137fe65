/*
 * Responsibility
 * - /consignments handlers
 * - create: find an available vessel, stamp it on the consignment, persist
 * - list: most recent consignments
 * - Auth has already happened in the middleware by the time these run
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::dto::consignments::{ConsignmentResponse, CreateConsignmentRequest},
    error::AppError,
    repos::consignment_repo,
    services::vessel::VesselSpec,
    state::AppState,
};

const LIST_LIMIT: i64 = 50;

fn row_to_response(row: consignment_repo::ConsignmentRow) -> ConsignmentResponse {
    ConsignmentResponse {
        id: row.consignment_id,
        description: row.description,
        weight: row.weight,
        container_count: row.container_count,
        vessel_id: row.vessel_id,
        created_at: row.created_at,
    }
}

pub async fn create_consignment(
    State(state): State<AppState>,
    Json(req): Json<CreateConsignmentRequest>,
) -> Result<(StatusCode, Json<ConsignmentResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_CONSIGNMENT", msg))?;

    let spec = VesselSpec {
        capacity: req.containers.len() as i32,
        max_weight: req.weight,
    };
    let vessel = state.vessels.find_available(&spec).await?;

    tracing::info!(
        vessel_id = %vessel.id,
        vessel_name = %vessel.name,
        capacity = vessel.capacity,
        max_weight = vessel.max_weight,
        "vessel assigned"
    );

    let row = consignment_repo::create(
        &state.db,
        &req.description,
        req.weight,
        req.containers.len() as i32,
        &vessel.id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row_to_response(row))))
}

pub async fn list_consignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ConsignmentResponse>>, AppError> {
    let rows = consignment_repo::list(&state.db, LIST_LIMIT, 0).await?;

    Ok(Json(rows.into_iter().map(row_to_response).collect()))
}
