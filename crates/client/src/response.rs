//! Response classification.
//!
//! - `200 OK`: the body is the rendered artifact, returned untouched.
//! - Anything else: a server error. The message comes from a JSON body of
//!   the form `{"error": "..."}` when present and non-empty, otherwise it is
//!   `HTTP <status>`.

use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::Error;
use crate::transport::HttpResponse;

/// Error body returned by the rendering server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Turn a completed exchange into output bytes or a server error.
pub(crate) fn classify(response: HttpResponse) -> Result<Bytes, Error> {
    if response.status == StatusCode::OK {
        return Ok(response.body);
    }

    let status = response.status.as_u16();
    Err(Error::Server { status, message: error_message(status, &response.body) })
}

fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static [u8]) -> HttpResponse {
        HttpResponse { status: StatusCode::from_u16(status).unwrap(), body: Bytes::from_static(body) }
    }

    #[test]
    fn test_ok_body_is_returned_untouched() {
        let body: &[u8] = b"%PDF-1.7\n\x00\xff binary";
        let bytes = classify(response(200, b"%PDF-1.7\n\x00\xff binary")).unwrap();
        assert_eq!(&bytes[..], body);
    }

    #[test]
    fn test_ok_json_body_is_not_decoded() {
        let bytes = classify(response(200, br#"{"error":"not an error"}"#)).unwrap();
        assert_eq!(&bytes[..], br#"{"error":"not an error"}"#);
    }

    #[test]
    fn test_error_message_from_json() {
        let err = classify(response(422, br#"{"error":"bad paper size"}"#)).unwrap_err();
        assert!(matches!(err, Error::Server { status: 422, ref message } if message == "bad paper size"));
    }

    #[test]
    fn test_unparsable_body_falls_back() {
        let err = classify(response(422, b"<html>oops</html>")).unwrap_err();
        assert!(matches!(err, Error::Server { status: 422, ref message } if message == "HTTP 422"));
    }

    #[test]
    fn test_empty_or_missing_error_field_falls_back() {
        for body in [&b""[..], br#"{"error":""}"#, br#"{"detail":"x"}"#, br#"{"error":42}"#, b"null"] {
            let err = classify(HttpResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: Bytes::copy_from_slice(body),
            })
            .unwrap_err();
            assert!(matches!(err, Error::Server { status: 500, ref message } if message == "HTTP 500"));
        }
    }

    #[test]
    fn test_non_ok_success_status_is_server_error() {
        let err = classify(response(204, b"")).unwrap_err();
        assert_eq!(err.status(), Some(204));
    }
}
