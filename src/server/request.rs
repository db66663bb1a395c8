//! Minimal HTTP/1.1 request parsing.
//!
//! The protocol's methods (BREW, WHEN, PROPFIND) are valid RFC 7230 tokens
//! but not registered IANA methods, so requests are parsed here instead of
//! behind a framework's method allowlist.

use crate::core::{Additions, DECAF};
use std::collections::HashMap;
use thiserror::Error;

/// A parsed request head. Bodies are ignored; no operation reads one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// Request method, uppercased.
    pub method: String,
    /// Request target path.
    pub path: String,
    /// Headers with lowercased names.
    pub headers: HashMap<String, String>,
}

impl Request {
    /// A header value by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Parse a raw request. `None` when the request line is unusable.
pub fn parse_request(raw: &[u8]) -> Option<Request> {
    let head = match raw.windows(4).position(|w| w == b"\r\n\r\n") {
        Some(ix) => &raw[..ix],
        None => raw,
    };
    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_ascii_uppercase();
    let path = parts.next()?.to_string();
    if !is_token(&method) || !path.starts_with('/') {
        return None;
    }

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let _ = headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    Some(Request {
        method,
        path,
        headers,
    })
}

// RFC 7230 token characters.
fn is_token(method: &str) -> bool {
    !method.is_empty()
        && method
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

/// A malformed `Accept-Additions` entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed Accept-Additions entry: '{0}'")]
pub struct MalformedAdditions(pub String);

/// Parse an `Accept-Additions` header.
///
/// Format per RFC 2324 §2.1.1: semicolon-separated `key=value` pairs, e.g.
/// `milk-type=Whole-milk; alcohol-type=Whisky`. The decaf flag may appear
/// bare (`decaf`) or as `decaf=true`/`decaf=false`; every other entry must
/// be a `key=value` pair.
///
/// # Example
///
/// ```rust
/// use percolate::server::parse_additions;
///
/// let additions = parse_additions("milk-type=Whole-milk; alcohol-type=Whisky").unwrap();
/// assert_eq!(additions.get("alcohol-type"), Some("Whisky"));
/// assert!(parse_additions("milk-type").is_err());
/// ```
pub fn parse_additions(header: &str) -> Result<Additions, MalformedAdditions> {
    let mut additions = Additions::new();
    for part in header.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.split_once('=') {
            Some((key, value)) => {
                let (key, value) = (key.trim(), value.trim());
                if key.eq_ignore_ascii_case(DECAF) {
                    match value.to_ascii_lowercase().as_str() {
                        "true" => additions.set_decaf(true),
                        "false" => additions.set_decaf(false),
                        _ => return Err(MalformedAdditions(part.to_string())),
                    }
                } else if key.is_empty() || value.is_empty() {
                    return Err(MalformedAdditions(part.to_string()));
                } else {
                    additions.insert(key, value);
                }
            }
            None if part.eq_ignore_ascii_case(DECAF) => additions.set_decaf(true),
            None => return Err(MalformedAdditions(part.to_string())),
        }
    }
    Ok(additions)
}
