use super::{ParcelId, ParcelStore};
use crate::parcel::PolygonSet;
use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use std::time::Duration;

const USER_AGENT: &str = concat!("parcelgrid/", env!("CARGO_PKG_VERSION"));

/// Land record REST API client
///
/// Loads with `GET {base}/api/land/{id}` and reads the record's `polygons`
/// field; saves with `PUT {base}/api/land/{id}` and body `{"polygons": [...]}`.
/// A bearer token is sent when configured.
#[derive(Debug)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    token: Option<String>,
    max_retries: u32,
}

impl HttpStore {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            max_retries: 3,
        })
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn land_url(&self, parcel: ParcelId) -> String {
        format!("{}/api/land/{}", self.base_url, parcel)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request, retrying while the server reports it is overloaded
    fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut last_status = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let wait_secs = 2 * attempt as u64;
                log::warn!(
                    "land API busy, retrying in {} seconds (attempt {}/{})",
                    wait_secs,
                    attempt + 1,
                    self.max_retries
                );
                std::thread::sleep(Duration::from_secs(wait_secs));
            }

            let response = self
                .authorize(build())
                .send()
                .context("Failed to send request to land API")?;

            let status = response.status();
            match status.as_u16() {
                // 429 Too Many Requests, 503 Service Unavailable, 504 Gateway Timeout
                429 | 503 | 504 => {
                    last_status = Some(status);
                    continue;
                }
                _ if status.is_success() => return Ok(response),
                _ => bail!("Land API returned error status: {}", status),
            }
        }

        bail!(
            "Land API failed after {} attempts (last status: {})",
            self.max_retries,
            last_status.map_or_else(|| "none".to_string(), |s| s.to_string())
        )
    }
}

/// Extract the polygon set from a land record response body
pub fn parse_land_record(body: &str) -> Result<PolygonSet> {
    let record: Value = serde_json::from_str(body).context("Failed to parse land record JSON")?;
    let set = PolygonSet::from_land_record(&record).context("Invalid polygons in land record")?;
    Ok(set)
}

/// Request body for saving a parcel's polygons
pub fn save_body(polygons: &PolygonSet) -> Result<Value> {
    let polygons = polygons
        .to_json_value()
        .context("Failed to encode parcel polygons")?;
    Ok(json!({ "polygons": polygons }))
}

impl ParcelStore for HttpStore {
    fn load(&self, parcel: ParcelId) -> Result<PolygonSet> {
        let url = self.land_url(parcel);
        log::debug!("GET {}", url);

        let body = self
            .send(|| self.client.get(&url))?
            .text()
            .context("Failed to read land record response")?;
        parse_land_record(&body)
    }

    fn save(&self, parcel: ParcelId, polygons: &PolygonSet) -> Result<()> {
        let url = self.land_url(parcel);
        let body = save_body(polygons)?;
        log::debug!("PUT {} ({} polygons)", url, polygons.len());

        self.send(|| self.client.put(&url).json(&body))?;
        Ok(())
    }
}
