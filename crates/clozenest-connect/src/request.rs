//! Wire format of the AnkiConnect protocol (version 6).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Protocol version sent with every request.
pub(crate) const API_VERSION: u8 = 6;

/// The request body expected by AnkiConnect.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a, T> {
    pub action: &'a str,
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<T>,
}

impl<'a, T> AnkiRequest<'a, T> {
    /// A request carrying `params`.
    pub fn new(action: &'a str, params: T, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: API_VERSION,
            key,
            params: Some(params),
        }
    }
}

impl<'a> AnkiRequest<'a, ()> {
    /// A request without a `params` object.
    pub fn without_params(action: &'a str, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: API_VERSION,
            key,
            params: None,
        }
    }
}

/// The response envelope returned by AnkiConnect.
#[derive(Debug, Deserialize)]
pub(crate) struct AnkiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> AnkiResponse<T> {
    /// Turn the envelope into a result, treating a null result as an error.
    pub fn into_result(self) -> Result<T> {
        match (self.result, self.error) {
            (_, Some(err)) => Err(classify(err)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(Error::EmptyResponse),
        }
    }

    /// Only check for an error; a null result is success.
    pub fn into_unit(self) -> Result<()> {
        match self.error {
            Some(err) => Err(classify(err)),
            None => Ok(()),
        }
    }
}

fn classify(message: String) -> Error {
    if message.contains("permission") {
        Error::PermissionDenied
    } else {
        Error::AnkiConnect(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let with = serde_json::to_value(AnkiRequest::new("findNotes", [1, 2], Some("k"))).unwrap();
        assert_eq!(
            with,
            serde_json::json!({"action": "findNotes", "version": 6, "key": "k", "params": [1, 2]})
        );

        let without = serde_json::to_value(AnkiRequest::without_params("version", None)).unwrap();
        assert_eq!(without, serde_json::json!({"action": "version", "version": 6}));
    }

    #[test]
    fn test_response_classification() {
        let ok: AnkiResponse<i64> = serde_json::from_str(r#"{"result": 6, "error": null}"#).unwrap();
        assert_eq!(ok.into_result().unwrap(), 6);

        let empty: AnkiResponse<i64> =
            serde_json::from_str(r#"{"result": null, "error": null}"#).unwrap();
        assert!(matches!(empty.into_result(), Err(Error::EmptyResponse)));

        let denied: AnkiResponse<i64> =
            serde_json::from_str(r#"{"result": null, "error": "valid api key must be provided; permission denied"}"#)
                .unwrap();
        assert!(matches!(denied.into_result(), Err(Error::PermissionDenied)));

        let void: AnkiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"result": null, "error": null}"#).unwrap();
        assert!(void.into_unit().is_ok());
    }
}
