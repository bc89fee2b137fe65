/*
 * Responsibility
 * - SQLx operations for the consignments table
 * - Takes a &PgPool and returns rows; DB errors surface as RepoError
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct ConsignmentRow {
    pub consignment_id: Uuid,
    pub description: String,
    pub weight: i32,
    pub container_count: i32,
    pub vessel_id: String,
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    db: &PgPool,
    description: &str,
    weight: i32,
    container_count: i32,
    vessel_id: &str,
) -> Result<ConsignmentRow, RepoError> {
    let row = sqlx::query_as::<_, ConsignmentRow>(
        r#"
        INSERT INTO consignments (description, weight, container_count, vessel_id)
        VALUES ($1, $2, $3, $4)
        RETURNING consignment_id, description, weight, container_count, vessel_id, created_at
        "#,
    )
    .bind(description)
    .bind(weight)
    .bind(container_count)
    .bind(vessel_id)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<ConsignmentRow>, RepoError> {
    let rows = sqlx::query_as::<_, ConsignmentRow>(
        r#"
        SELECT consignment_id, description, weight, container_count, vessel_id, created_at
        FROM consignments
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;

    Ok(rows)
}
