/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - db: PgPool, vessels: vessel service client, auth: token validator
 * - Clone per request (all fields are cheap-clone handles)
 * - No call path closes or replaces anything in here; the pool is closed
 *   once, by app::run, at shutdown
 */
use sqlx::PgPool;

use crate::services::auth::SharedValidator;
use crate::services::vessel::SharedVesselClient;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub vessels: SharedVesselClient,
    pub auth: SharedValidator,
}

impl AppState {
    pub fn new(db: PgPool, vessels: SharedVesselClient, auth: SharedValidator) -> Self {
        Self { db, vessels, auth }
    }
}
