//! Builds the one restriction shape this tool ever needs: an equality test on a
//! single field, used by both `FindFolder` (locating AllItems) and `FindItem`
//! (locating a message by its Internet Message Id).

use crate::namespaces::{MESSAGES_NS, TYPES_NS};
use crate::xml::Element;

/// `Restriction/IsEqualTo/FieldURI[@FieldURI]+FieldURIOrConstant/Constant[@Value]`.
pub fn is_equal_to(field_uri: &str, value: &str) -> Element {
    let constant = Element::new(TYPES_NS, "Constant").attr("Value", value);
    let field_uri_or_constant = Element::new(TYPES_NS, "FieldURIOrConstant").child(constant);
    let field_uri_el = Element::new(TYPES_NS, "FieldURI").attr("FieldURI", field_uri);
    let is_equal_to = Element::new(TYPES_NS, "IsEqualTo")
        .child(field_uri_el)
        .child(field_uri_or_constant);
    Element::new(MESSAGES_NS, "Restriction").child(is_equal_to)
}
