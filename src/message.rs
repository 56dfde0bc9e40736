//! An opaque `ItemId`/`ChangeKey` pair, carried verbatim between `FindItem` and the
//! subsequent `GetItem`/`DeleteItem`/`MoveItem` calls.

use crate::namespaces::TYPES_NS;
use crate::xml::{Element, Node};

#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub change_key: Option<String>,
}

impl Message {
    pub fn from_item_id_node(node: &Node) -> Self {
        Message {
            id: node.attr("Id").unwrap_or_default().to_string(),
            change_key: node.attr("ChangeKey").map(str::to_string),
        }
    }

    /// The `<t:ItemId Id="..." ChangeKey="..."/>` element used to reference this
    /// message in a later request.
    pub fn to_item_id_element(&self) -> Element {
        let mut el = Element::new(TYPES_NS, "ItemId").attr("Id", self.id.clone());
        if let Some(change_key) = &self.change_key {
            el = el.attr("ChangeKey", change_key.clone());
        }
        el
    }
}
