//! Data conversion utilities for API responses.

use crate::error::{Error, Result};
use crate::state::MarketData;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Business status code the backend uses for success.
const SUCCESS_CODE: i64 = 200;

/// One row of the server-side history list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteHistoryEntry {
    /// Server id; numeric on the wire, kept as text.
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub sector: String,
}

/// A server-side history entry with its stored result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteHistoryDetail {
    #[serde(default)]
    pub sector: String,
    pub data: MarketData,
}

/// The `{ code, message, data }` envelope used by the backend.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: Option<i64>,
    message: Option<String>,
    data: Option<T>,
}

/// Converts API response bodies to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Parse an `/api/analyze` body.
    ///
    /// Accepts either a bare result or one wrapped in an envelope. An envelope
    /// whose `code` is not 200 is a business failure carrying the server
    /// message.
    pub fn convert_analysis(body: &str) -> Result<MarketData> {
        let value: Value = serde_json::from_str(body)?;
        Self::check_code(&value)?;

        let is_wrapped = value.get("summary").is_none() && value.get("data").is_some();
        if is_wrapped {
            let envelope: Envelope<MarketData> = serde_json::from_value(value)?;
            envelope
                .data
                .ok_or_else(|| Error::business(envelope.message))
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    /// Parse a `GET /api/history` body.
    pub fn convert_history_page(body: &str) -> Result<Vec<RemoteHistoryEntry>> {
        Ok(Self::unwrap_envelope::<Vec<RemoteHistoryEntry>>(body)?.unwrap_or_default())
    }

    /// Parse a `GET /api/history/{id}` body.
    pub fn convert_history_detail(body: &str) -> Result<RemoteHistoryDetail> {
        let value: Value = serde_json::from_str(body)?;
        Self::check_code(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Validate the body of a mutation such as `DELETE /api/history`.
    ///
    /// Empty bodies and bodies without a status code are accepted.
    pub fn convert_acknowledgement(body: &str) -> Result<()> {
        if body.trim().is_empty() {
            return Ok(());
        }
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::check_code(&value),
            Err(_) => Ok(()),
        }
    }

    fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<Option<T>> {
        let envelope: Envelope<T> = serde_json::from_str(body)?;
        match envelope.code {
            Some(code) if code != SUCCESS_CODE => Err(Error::business(envelope.message)),
            _ => Ok(envelope.data),
        }
    }

    fn check_code(value: &Value) -> Result<()> {
        match value.get("code").and_then(Value::as_i64) {
            Some(code) if code != SUCCESS_CODE => {
                let message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Err(Error::business(message))
            }
            _ => Ok(()),
        }
    }
}

fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
