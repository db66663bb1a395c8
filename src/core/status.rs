//! Protocol status vocabulary.
//!
//! The closed set of result codes this server ever emits: the four
//! protocol-defined brew statuses (200, 406, 418, 503) plus the
//! request-level errors the façade maps for unknown pots, malformed
//! headers, unknown routes, and wrong methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A protocol result code.
///
/// Serializes as its numeric code.
///
/// # Example
///
/// ```rust
/// use percolate::core::StatusCode;
///
/// assert_eq!(u16::from(StatusCode::ImATeapot), 418);
/// assert_eq!(StatusCode::ImATeapot.reason(), "I'm a Teapot");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum StatusCode {
    /// The beverage is on its way.
    Ok,
    /// Malformed request shape (bad header, unparseable request).
    BadRequest,
    /// Unknown pot or unknown route.
    NotFound,
    /// Known route, wrong method.
    MethodNotAllowed,
    /// Addition set refused (decaf, out-of-vocabulary pairs).
    NotAcceptable,
    /// Appliance mismatch. RFC 2324 §2.3.2, non-negotiable.
    ImATeapot,
    /// Pot is empty.
    ServiceUnavailable,
}

impl StatusCode {
    /// The numeric wire code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::NotAcceptable => 406,
            Self::ImATeapot => 418,
            Self::ServiceUnavailable => 503,
        }
    }

    /// The status line reason phrase.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::NotAcceptable => "Not Acceptable",
            Self::ImATeapot => "I'm a Teapot",
            Self::ServiceUnavailable => "Service Unavailable",
        }
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> u16 {
        status.code()
    }
}

/// A numeric code outside the protocol vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status code {0}")]
pub struct UnknownStatusCode(pub u16);

impl TryFrom<u16> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(code: u16) -> Result<Self, UnknownStatusCode> {
        match code {
            200 => Ok(Self::Ok),
            400 => Ok(Self::BadRequest),
            404 => Ok(Self::NotFound),
            405 => Ok(Self::MethodNotAllowed),
            406 => Ok(Self::NotAcceptable),
            418 => Ok(Self::ImATeapot),
            503 => Ok(Self::ServiceUnavailable),
            other => Err(UnknownStatusCode(other)),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_reasons_are_paired() {
        assert_eq!(StatusCode::Ok.code(), 200);
        assert_eq!(StatusCode::NotAcceptable.code(), 406);
        assert_eq!(StatusCode::ImATeapot.code(), 418);
        assert_eq!(StatusCode::ServiceUnavailable.code(), 503);
        assert_eq!(StatusCode::ImATeapot.reason(), "I'm a Teapot");
    }

    #[test]
    fn serializes_as_the_numeric_code() {
        let json = serde_json::to_string(&StatusCode::ImATeapot).unwrap();
        assert_eq!(json, "418");
        let status: StatusCode = serde_json::from_str("503").unwrap();
        assert_eq!(status, StatusCode::ServiceUnavailable);
    }

    #[test]
    fn codes_outside_the_vocabulary_are_rejected() {
        let err = StatusCode::try_from(451).unwrap_err();
        assert_eq!(err, UnknownStatusCode(451));
    }

    #[test]
    fn display_matches_the_status_line() {
        assert_eq!(StatusCode::ImATeapot.to_string(), "418 I'm a Teapot");
    }
}
