//! HTTP client for the map server
//!
//! Spawned by the main loop when the reducer returns
//! [`Effect::FetchMapData`](crate::effect::Effect); the outcome comes back
//! as `DataDidLoad` / `DataDidError`.

use meteo_core::{MapPayload, PayloadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// URLs of the server resources
///
/// The terminal view only fetches `data_url`: it draws subzone outlines
/// and text labels, so `svg_url` and `picto_url` are exported for image
/// capable view adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/{path}/data`
    pub fn data_url(&self, path: &str) -> String {
        format!("{}/{}/data", self.base_url, encode_path(path))
    }

    /// `{base}/{path}/svg`, the static map background
    pub fn svg_url(&self, path: &str) -> String {
        format!("{}/{}/svg", self.base_url, encode_path(path))
    }

    /// `{base}/pictos/{icon}`
    pub fn picto_url(&self, icon: &str) -> String {
        format!("{}/pictos/{}", self.base_url, urlencoding::encode(icon))
    }
}

/// Percent-encode each segment of a map path, dropping empty ones
fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub async fn fetch_map_data(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    path: &str,
) -> Result<MapPayload, FetchError> {
    let url = endpoints.data_url(path);
    tracing::info!(%url, "Fetching map data");

    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, %status, "Map data request failed");
        return Err(FetchError::Status { url, status });
    }

    let body = response.bytes().await?;
    let payload = MapPayload::from_json(&body)?;
    tracing::debug!(
        path = %payload.path,
        days = payload.prevs.len(),
        pois = payload.poi_count(),
        "Map data decoded"
    );
    Ok(payload)
}
