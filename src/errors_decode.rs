//! Maps an EWS `ResponseCode` to the error kinds this crate cares about.
//!
//! The `resolving` flag distinguishes the two call sites (`ResolveNames`, `ExpandDL`)
//! where `ErrorNameResolutionNoResults` means "no such mailbox" from every other call
//! site, where the same code is not fatal on its own.

use crate::error::Error;
use crate::namespaces::{ERRORS_NS, MESSAGES_NS};
use crate::xml::Node;

const NO_ERROR: &str = "NoError";
const NAME_RESOLUTION_NO_RESULTS: &str = "ErrorNameResolutionNoResults";
const NON_EXISTENT_MAILBOX: &str = "ErrorNonExistentMailbox";
const MAILBOX_NOT_FOUND: &str = "ErrorMailboxNotFound";
const ITEM_NOT_FOUND: &str = "ErrorItemNotFound";

/// Returns `Ok(())` if the response is non-fatal, `Err` with the decoded error kind
/// otherwise.
pub fn decode_response_code(root: &Node, resolving: bool) -> Result<(), Error> {
    let code = root
        .find_first(MESSAGES_NS, "ResponseCode")
        .or_else(|| root.find_first(ERRORS_NS, "ResponseCode"))
        .map(|n| n.text.trim().to_string());

    let code = match code {
        Some(code) => code,
        None => return Err(Error::MissingResponseCode),
    };

    match code.as_str() {
        NO_ERROR => Ok(()),
        NAME_RESOLUTION_NO_RESULTS if resolving => Err(Error::MailboxNotFound),
        NAME_RESOLUTION_NO_RESULTS => Ok(()),
        NON_EXISTENT_MAILBOX | MAILBOX_NOT_FOUND => Err(Error::MailboxNotFound),
        ITEM_NOT_FOUND => Err(Error::MessageNotFound),
        other => Err(Error::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with_response_code(code: &str) -> Node {
        let mut root = Node {
            ns: Some(MESSAGES_NS.to_string()),
            local_name: "FindItemResponseMessage".to_string(),
            ..Default::default()
        };
        root.children.push(Node {
            ns: Some(MESSAGES_NS.to_string()),
            local_name: "ResponseCode".to_string(),
            text: code.to_string(),
            ..Default::default()
        });
        root
    }

    #[test]
    fn missing_response_code_is_a_protocol_bug() {
        let root = Node::default();
        assert!(matches!(decode_response_code(&root, false), Err(Error::MissingResponseCode)));
    }

    #[test]
    fn no_error_is_never_fatal() {
        let root = node_with_response_code(NO_ERROR);
        assert!(decode_response_code(&root, false).is_ok());
        assert!(decode_response_code(&root, true).is_ok());
    }

    #[test]
    fn name_resolution_no_results_depends_on_context() {
        let root = node_with_response_code(NAME_RESOLUTION_NO_RESULTS);
        assert!(decode_response_code(&root, false).is_ok());
        assert!(matches!(decode_response_code(&root, true), Err(Error::MailboxNotFound)));
    }

    #[test]
    fn non_existent_mailbox_is_always_fatal() {
        let root = node_with_response_code(NON_EXISTENT_MAILBOX);
        assert!(matches!(decode_response_code(&root, false), Err(Error::MailboxNotFound)));
    }

    #[test]
    fn item_not_found_maps_to_message_not_found() {
        let root = node_with_response_code(ITEM_NOT_FOUND);
        assert!(matches!(decode_response_code(&root, false), Err(Error::MessageNotFound)));
    }

    #[test]
    fn anything_else_is_unknown() {
        let root = node_with_response_code("ErrorAccessDenied");
        match decode_response_code(&root, false) {
            Err(Error::Unknown(code)) => assert_eq!(code, "ErrorAccessDenied"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }
}
