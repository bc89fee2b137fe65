/*
 * Responsibility
 * - v1 URL structure
 * - Everything in here sits behind the token middleware (applied in app.rs)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::consignments::{create_consignment, list_consignments};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/consignments",
        get(list_consignments).post(create_consignment),
    )
}
