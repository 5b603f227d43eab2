use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ClientError, Result};

/// A fully read response.
#[derive(Debug, Clone)]
pub(crate) struct Response {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

impl Response {
    /// Maps the status to a domain error. `is_resource` marks calls that
    /// address a single entry, where 404 means the entry does not exist.
    pub fn check(&self, is_resource: bool) -> Result<()> {
        match self.status {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::NOT_FOUND if is_resource => Err(ClientError::EntryNotFound),
            StatusCode::NOT_FOUND => Err(ClientError::PathNotFound {
                path: self.url.clone(),
            }),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest {
                detail: self.body.clone(),
            }),
            status => {
                warn!(
                    status = status.as_u16(),
                    url = %self.url,
                    "unexpected status code from tiny url server"
                );
                Err(ClientError::UnexpectedStatus {
                    status,
                    detail: self.body.clone(),
                })
            }
        }
    }

    pub fn decode<T: DeserializeOwned + Default>(&self) -> Result<T> {
        decode(&self.body)
    }
}

/// Decodes a success body. Empty bodies and bare `{}`/`[]` yield the zero
/// value since the server sends them on some successful writes.
pub(crate) fn decode<T: DeserializeOwned + Default>(body: &str) -> Result<T> {
    let trimmed = body.trim();
    if matches!(trimmed, "" | "{}" | "[]") {
        return Ok(T::default());
    }
    serde_json::from_str(trimmed).map_err(|source| {
        warn!(error = %source, "failed to decode tiny url response body");
        ClientError::Decode {
            source,
            body: body.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_types::Entry;

    fn response(status: u16, body: &str) -> Response {
        Response {
            status: StatusCode::from_u16(status).unwrap(),
            url: "http://localhost/api/tiny".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn success_codes_pass() {
        assert!(response(200, "").check(true).is_ok());
        assert!(response(201, "").check(false).is_ok());
    }

    #[test]
    fn unauthorized_regardless_of_scope() {
        assert!(response(401, "").check(true).unwrap_err().is_unauthorized());
        assert!(response(401, "").check(false).unwrap_err().is_unauthorized());
    }

    #[test]
    fn not_found_depends_on_resource_flag() {
        assert!(matches!(
            response(404, "").check(true).unwrap_err(),
            ClientError::EntryNotFound
        ));
        match response(404, "").check(false).unwrap_err() {
            ClientError::PathNotFound { path } => assert_eq!(path, "http://localhost/api/tiny"),
            other => panic!("expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn bad_request_keeps_body() {
        match response(400, "id already taken").check(false).unwrap_err() {
            ClientError::BadRequest { detail } => assert_eq!(detail, "id already taken"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn other_codes_are_unexpected() {
        for code in [204, 301, 302, 403, 409, 500, 503] {
            match response(code, "boom").check(true).unwrap_err() {
                ClientError::UnexpectedStatus { status, detail } => {
                    assert_eq!(status.as_u16(), code);
                    assert_eq!(detail, "boom");
                }
                other => panic!("expected UnexpectedStatus for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_bodies_decode_to_zero_value() {
        for body in ["", "{}", "[]", "  \n"] {
            let entry: Entry = decode(body).unwrap();
            assert_eq!(entry, Entry::default());
            let entries: Vec<Entry> = decode(body).unwrap();
            assert!(entries.is_empty());
        }
    }

    #[test]
    fn decodes_entry_list_in_order() {
        let entries: Vec<Entry> = decode(
            r#"[{"id":"b","url":"http://b","created_at":"2023-01-02T00:00:00Z"},
                {"id":"a","url":"http://a","created_at":"2023-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn malformed_json_keeps_raw_body() {
        match decode::<Entry>("not json").unwrap_err() {
            ClientError::Decode { body, .. } => assert_eq!(body, "not json"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }
}
