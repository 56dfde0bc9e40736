//! One credential set bound to one Exchange server. Builds the SOAP envelope every
//! operation shares, posts it through a [`Transport`], and decodes the response.

use std::sync::Arc;

use base64::Engine;
use log::debug;

use crate::error::Result;
use crate::errors_decode::decode_response_code;
use crate::namespaces::{SOAP_NS, TYPES_NS};
use crate::transport::{Header, Transport};
use crate::xml::{Element, Node};

pub struct Session {
    pub server: String,
    pub version: String,
    pub timezone: String,
    username: String,
    password: String,
    url: String,
    transport: Arc<dyn Transport>,
}

impl Session {
    pub fn new(
        server: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        version: impl Into<String>,
        timezone: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let server = server.into();
        let url = format!("https://{}/EWS/Exchange.asmx", server);
        Session {
            server,
            version: version.into(),
            timezone: timezone.into(),
            username: username.into(),
            password: password.into(),
            url,
            transport,
        }
    }

    fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(raw))
    }

    /// Wraps `request` in a SOAP envelope, posts it, parses the response, and runs
    /// the error decoder. `resolving` should be `true` only for `ResolveNames` and
    /// `ExpandDL`, where `ErrorNameResolutionNoResults` means "no such mailbox".
    pub fn send(&self, request: Element, impersonate: Option<&str>, resolving: bool) -> Result<Node> {
        let envelope = self.build_envelope(request, impersonate);
        let body = envelope.to_document()?;
        debug!("POST {} ({} bytes, impersonate={:?})", self.url, body.len(), impersonate);

        let mut headers: Vec<Header> = vec![
            ("Content-Type".to_string(), "text/xml; charset=utf-8".to_string()),
            ("Authorization".to_string(), self.basic_auth_header()),
        ];
        if let Some(address) = impersonate {
            headers.push(("X-AnchorMailbox".to_string(), address.to_string()));
        }

        let response_bytes = self.transport.post(&self.url, body, &headers)?;
        let response = crate::xml::parse(&response_bytes)?;
        decode_response_code(&response, resolving)?;
        Ok(response)
    }

    /// Convenience for the resolving call sites (`ResolveNames`, `ExpandDL`); never
    /// impersonates (both operations act on behalf of the session's own identity).
    pub fn send_resolving(&self, request: Element) -> Result<Node> {
        self.send(request, None, true)
    }

    fn build_envelope(&self, request: Element, impersonate: Option<&str>) -> Element {
        let mut header = Element::new(SOAP_NS, "Header").child(
            Element::new(TYPES_NS, "RequestServerVersion").attr("Version", self.version.clone()),
        );

        if let Some(address) = impersonate {
            let primary_smtp = Element::new(TYPES_NS, "PrimarySmtpAddress").text(address.to_string());
            let connecting_sid = Element::new(TYPES_NS, "ConnectingSID").child(primary_smtp);
            let exchange_impersonation = Element::new(TYPES_NS, "ExchangeImpersonation").child(connecting_sid);
            header = header.child(exchange_impersonation);
        }

        let timezone_definition = Element::new(TYPES_NS, "TimeZoneDefinition").attr("Id", self.timezone.clone());
        let timezone_context = Element::new(TYPES_NS, "TimeZoneContext").child(timezone_definition);
        header = header.child(timezone_context);

        let body = Element::new(SOAP_NS, "Body").child(request);

        Element::new(SOAP_NS, "Envelope").child(header).child(body)
    }
}
