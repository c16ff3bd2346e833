use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;

/// Why an inbound webhook body could not be decoded.
#[derive(Debug)]
pub enum PayloadError {
    /// Neither a JSON document nor a `payload=` form body.
    UnknownEncoding,
    Form(serde_urlencoded::de::Error),
    MissingPayloadField,
    Json(serde_json::Error),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::UnknownEncoding => write!(f, "Body is neither JSON nor form data"),
            PayloadError::Form(e) => write!(f, "Malformed form body: {}", e),
            PayloadError::MissingPayloadField => write!(f, "Form body has no payload field"),
            PayloadError::Json(e) => write!(f, "Malformed JSON in payload field: {}", e),
        }
    }
}

impl std::error::Error for PayloadError {}

impl From<serde_urlencoded::de::Error> for PayloadError {
    fn from(error: serde_urlencoded::de::Error) -> Self {
        PayloadError::Form(error)
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(error: serde_json::Error) -> Self {
        PayloadError::Json(error)
    }
}

/// Decode a webhook body sent either as `application/json` or as
/// `application/x-www-form-urlencoded` with a `payload` field.
pub fn parse_webhook_payload<T>(body: &[u8]) -> Result<T, PayloadError>
where
    T: DeserializeOwned,
{
    if let Ok(event) = serde_json::from_slice(body) {
        return Ok(event);
    }

    if !body.starts_with(b"payload=") {
        return Err(PayloadError::UnknownEncoding);
    }

    let mut fields: HashMap<String, String> = serde_urlencoded::from_bytes(body)?;
    let payload = fields
        .remove("payload")
        .ok_or(PayloadError::MissingPayloadField)?;

    Ok(serde_json::from_str(&payload)?)
}
