//! Client for the airport meteo visualisation API.

use log::{info, warn};
use reqwest::blocking::{Client, Response};
use serde_json::Value;

use crate::error::FetchError;
use crate::reading::Reading;

const PAGE_URL: &str = "https://www.batc.be/en/meteo/meteo-readings";
const API_URL: &str = "https://www.batc.be/en/api/visualisation/meteo";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:144.0) Gecko/20100101 Firefox/144.0";

pub struct BatcApi {
    client: Client,
}

impl BatcApi {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }

    /// Hit the public readings page once so the session carries the cookies
    /// the API endpoint expects from a browser.
    pub fn prime_cookies(&self) -> Result<(), FetchError> {
        let response = self.get(PAGE_URL)?;
        info!("cookie priming request got {}", response.status());
        Ok(())
    }

    /// Fetch and decode the whole visualisation document.
    pub fn fetch_document(&self) -> Result<Value, FetchError> {
        let response = self.get(API_URL)?;
        if !response.status().is_success() {
            warn!("bad response from api: {}", response.status());
            return Err(FetchError::BadStatus(response.status()));
        }
        Ok(response.json()?)
    }

    /// Fetch, select the current timepoint, and validate it into a snapshot.
    pub fn latest_reading(&self) -> Result<Reading, FetchError> {
        let document = self.fetch_document()?;
        Self::reading_from_document(&document)
    }

    /// Select `data.timepoints[data.currentLabel]` and parse it. Split from
    /// [`Self::latest_reading`] so it is testable without a network.
    pub fn reading_from_document(document: &Value) -> Result<Reading, FetchError> {
        let data = document
            .get("data")
            .ok_or_else(|| FetchError::MalformedDocument("data".to_string()))?;
        let label = data
            .get("currentLabel")
            .and_then(Value::as_str)
            .ok_or_else(|| FetchError::MalformedDocument("data.currentLabel".to_string()))?;
        let latest = data
            .get("timepoints")
            .and_then(|timepoints| timepoints.get(label))
            .ok_or_else(|| FetchError::MalformedDocument(format!("data.timepoints.{label}")))?;
        Ok(Reading::parse(latest)?)
    }

    fn get(&self, url: &str) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("DNT", "1")
            .send()?;
        Ok(response)
    }
}
