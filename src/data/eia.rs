//! EIA API v2 integration for the weekly petroleum datasets.
//!
//! Fetching is the only I/O in the crate and is kept out of the series
//! pipeline on purpose: the pipeline consumes a list of raw records, so
//! tests and offline callers can feed it decoded payloads directly via
//! [`records_from_payload`].

use reqwest::blocking::Client;
use serde_json::Value;

use crate::domain::Dataset;
use crate::error::AppError;

const BASE_URL: &str = "https://api.eia.gov/v2";

/// Maximum rows per request; the EIA v2 page cap.
const PAGE_LENGTH: usize = 5000;

/// One raw record as returned by the API: an open-ended field map,
/// untyped and untrusted. The record parser decides what survives.
pub type RawRecord = serde_json::Map<String, Value>;

pub struct EiaClient {
    client: Client,
    api_key: String,
}

impl EiaClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("EIA_API_KEY")
            .map_err(|_| AppError::new(2, "Missing EIA_API_KEY in environment (.env)."))?;
        Ok(Self::with_key(api_key))
    }

    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the raw weekly records for one dataset.
    ///
    /// A well-formed response with no usable `response.data` yields an empty
    /// list, not an error; only transport/HTTP/decoding failures error out.
    pub fn fetch_records(&self, dataset: Dataset) -> Result<Vec<RawRecord>, AppError> {
        let url = format!("{BASE_URL}/{}", dataset.route());

        let mut req = self.client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("frequency", "weekly"),
            ("data[0]", "value"),
            ("sort[0][column]", "period"),
            ("sort[0][direction]", "asc"),
            ("offset", "0"),
            ("length", &PAGE_LENGTH.to_string()),
        ]);

        if let Some(series) = dataset.series_facet() {
            req = req.query(&[("facets[series][]", series)]);
        }

        let resp = req.send().map_err(|e| {
            AppError::new(
                4,
                format!("EIA request for {} failed: {e}", dataset.display_name()),
            )
        })?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!(
                    "EIA request for {} failed with status {}.",
                    dataset.display_name(),
                    resp.status()
                ),
            ));
        }

        let body: Value = resp.json().map_err(|e| {
            AppError::new(
                4,
                format!("Failed to decode EIA response for {}: {e}", dataset.display_name()),
            )
        })?;

        Ok(records_from_payload(&body))
    }
}

/// Extract `response.data` records from a decoded payload.
///
/// Absent or malformed top-level keys mean "no data", never a crash: the
/// caller branches on emptiness. Array entries that are not objects are
/// skipped the same way malformed rows are dropped later.
pub fn records_from_payload(payload: &Value) -> Vec<RawRecord> {
    payload
        .get("response")
        .and_then(|r| r.get("data"))
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_records_from_well_formed_payload() {
        let payload = json!({
            "response": {
                "total": 2,
                "data": [
                    {"period": "2012-01-06", "value": "100"},
                    {"period": "2012-01-13", "value": "200"},
                ],
            }
        });

        let records = records_from_payload(&payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["period"], json!("2012-01-06"));
    }

    #[test]
    fn missing_top_level_keys_mean_no_data() {
        assert!(records_from_payload(&json!({})).is_empty());
        assert!(records_from_payload(&json!({"response": {}})).is_empty());
        assert!(records_from_payload(&json!({"error": "bad key"})).is_empty());
    }

    #[test]
    fn malformed_top_level_keys_mean_no_data() {
        assert!(records_from_payload(&json!({"response": "oops"})).is_empty());
        assert!(records_from_payload(&json!({"response": {"data": "oops"}})).is_empty());
        assert!(records_from_payload(&json!(null)).is_empty());
    }

    #[test]
    fn non_object_rows_are_skipped() {
        let payload = json!({
            "response": {"data": [{"period": "2012-01-06", "value": 1}, 42, "x"]}
        });
        assert_eq!(records_from_payload(&payload).len(), 1);
    }
}
