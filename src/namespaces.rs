//! The four XML namespaces used by every EWS SOAP message.

pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const MESSAGES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";
pub const TYPES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/types";
pub const ERRORS_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/errors";

/// Fixed prefix each namespace is serialized under. EWS servers accept any prefix
/// bound to the right URI, but a fixed mapping keeps outgoing requests readable.
pub fn prefix_for(ns: &str) -> &'static str {
    match ns {
        SOAP_NS => "s",
        MESSAGES_NS => "m",
        TYPES_NS => "t",
        ERRORS_NS => "e",
        _ => "",
    }
}
