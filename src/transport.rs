//! The HTTP seam between [`crate::session::Session`] and whatever actually sends bytes.
//!
//! `Session` builds a fully-formed request (URL, body, headers including auth) and
//! hands it to a `Transport`. Production code wires [`ReqwestTransport`]; tests wire a
//! canned-response double that never touches the network.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// A single HTTP header as a plain (name, value) pair, so the trait stays decoupled
/// from any particular HTTP client's header types.
pub type Header = (String, String);

pub trait Transport: Send + Sync {
    fn post(&self, url: &str, body: Vec<u8>, headers: &[Header]) -> Result<Vec<u8>, TransportError>;
}

/// Production transport: a pooled blocking client with a fixed request timeout.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(60)).expect("default reqwest client builds")
    }
}

impl Transport for ReqwestTransport {
    fn post(&self, url: &str, body: Vec<u8>, headers: &[Header]) -> Result<Vec<u8>, TransportError> {
        let mut req = self.client.post(url).body(body);
        for (name, value) in headers {
            req = req.header(name.as_str(), value.as_str());
        }
        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(TransportError::Status { status: status.as_u16(), body });
        }
        Ok(resp.bytes()?.to_vec())
    }
}
