/*
 * Responsibility
 * - Consignment request/response DTOs
 * - validate() for shape checks before anything remote happens
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ContainerRequest {
    pub customer_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateConsignmentRequest {
    pub description: String,
    pub weight: i32,
    pub containers: Vec<ContainerRequest>,
}

impl CreateConsignmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.description.trim().is_empty() {
            return Err("description is required");
        }
        if self.weight <= 0 {
            return Err("weight must be positive");
        }
        if self.containers.is_empty() {
            return Err("at least one container is required");
        }
        if self
            .containers
            .iter()
            .any(|c| c.customer_id.trim().is_empty())
        {
            return Err("container customer_id is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ConsignmentResponse {
    pub id: Uuid,
    pub description: String,
    pub weight: i32,
    pub container_count: i32,
    pub vessel_id: String,
    pub created_at: DateTime<Utc>,
}
