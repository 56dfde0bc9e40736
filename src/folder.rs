//! A server-side folder handle: either a well-known distinguished folder or the
//! opaque `FolderId` returned by `FindFolder` (used for `AllItems`, which Exchange
//! does not expose as a distinguished folder).

use crate::error::Result;
use crate::message::Message;
use crate::namespaces::{MESSAGES_NS, TYPES_NS};
use crate::restriction::is_equal_to;
use crate::session::Session;
use crate::xml::Element;

#[derive(Debug, Clone)]
pub enum Folder {
    Distinguished(&'static str),
    Explicit { id: String, change_key: Option<String> },
}

impl Folder {
    pub fn root() -> Self {
        Folder::Distinguished("root")
    }

    pub fn inbox() -> Self {
        Folder::Distinguished("inbox")
    }

    pub fn recoverable_items_deletions() -> Self {
        Folder::Distinguished("recoverableitemsdeletions")
    }

    fn to_element(&self) -> Element {
        match self {
            Folder::Distinguished(name) => {
                Element::new(TYPES_NS, "DistinguishedFolderId").attr("Id", *name)
            }
            Folder::Explicit { id, change_key } => {
                let mut el = Element::new(TYPES_NS, "FolderId").attr("Id", id.clone());
                if let Some(change_key) = change_key {
                    el = el.attr("ChangeKey", change_key.clone());
                }
                el
            }
        }
    }

    /// `FindItem(Traversal=Shallow, ItemShape/BaseShape=IdOnly, Restriction=IsEqualTo(message:InternetMessageId, message_id))`
    /// impersonating `impersonate`.
    pub fn find(&self, session: &Session, impersonate: &str, message_id: &str) -> Result<Vec<Message>> {
        let item_shape = Element::new(MESSAGES_NS, "ItemShape")
            .child(Element::new(TYPES_NS, "BaseShape").text("IdOnly"));
        let restriction = is_equal_to("message:InternetMessageId", message_id);
        let parent_folder_ids = Element::new(MESSAGES_NS, "ParentFolderIds").child(self.to_element());

        let find_item = Element::new(MESSAGES_NS, "FindItem")
            .attr("Traversal", "Shallow")
            .child(item_shape)
            .child(restriction)
            .child(parent_folder_ids);

        let response = session.send(find_item, Some(impersonate), false)?;

        let mut item_id_nodes = Vec::new();
        response.find_all(TYPES_NS, "ItemId", &mut item_id_nodes);
        Ok(item_id_nodes.into_iter().map(Message::from_item_id_node).collect())
    }
}
