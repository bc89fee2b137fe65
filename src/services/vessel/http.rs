use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::services::vessel::client::{Vessel, VesselError, VesselFinder, VesselSpec};

const FIND_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-backed vessel service client.
///
/// `POST {base}/api/v1/vessels/available` with the consignment's capacity
/// and weight requirements; the service replies with the chosen vessel, or
/// 404 when nothing in the fleet fits.
#[derive(Clone, Debug)]
pub struct HttpVesselClient {
    http: reqwest::Client,
    find_url: String,
}

impl HttpVesselClient {
    pub fn new(base_url: &str) -> Result<Self, VesselError> {
        let http = reqwest::Client::builder()
            .timeout(FIND_TIMEOUT)
            .build()
            .map_err(|e| VesselError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            find_url: format!(
                "{}/api/v1/vessels/available",
                base_url.trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl VesselFinder for HttpVesselClient {
    async fn find_available(&self, spec: &VesselSpec) -> Result<Vessel, VesselError> {
        let resp = self
            .http
            .post(&self.find_url)
            .json(spec)
            .send()
            .await
            .map_err(|e| VesselError::Transport(e.to_string()))?;

        match resp.status() {
            status if status.is_success() => resp
                .json::<Vessel>()
                .await
                .map_err(|e| VesselError::InvalidResponse(e.to_string())),
            StatusCode::NOT_FOUND => Err(VesselError::NoneAvailable),
            status => {
                let detail = resp.text().await.unwrap_or_default();
                Err(VesselError::Upstream {
                    status: status.as_u16(),
                    detail: detail.trim().to_string(),
                })
            }
        }
    }
}
