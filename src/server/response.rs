//! HTTP response rendering.

use super::{PROTOCOL, RFCS};
use crate::core::StatusCode;
use serde_json::Value;

/// A response ready to frame onto the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Status for the response line.
    pub status: StatusCode,
    /// JSON body.
    pub body: Value,
}

impl Response {
    /// A response with an arbitrary JSON body.
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// A standard error-shaped body: `{error, message}`.
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(
            status,
            serde_json::json!({
                "error": status.reason(),
                "message": message,
            }),
        )
    }

    /// Frame the response as HTTP/1.1 bytes, protocol headers included.
    pub fn to_bytes(&self) -> Vec<u8> {
        // A Value with string keys always serializes.
        let body = serde_json::to_vec_pretty(&self.body)
            .expect("JSON value serialization cannot fail");

        let head = format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             X-Protocol: {}\r\n\
             X-RFC: {}\r\n\
             X-Powered-By: Coffee\r\n\
             Connection: close\r\n\
             \r\n",
            self.status.code(),
            self.status.reason(),
            body.len(),
            PROTOCOL,
            RFCS,
        );

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&body);
        bytes
    }
}
