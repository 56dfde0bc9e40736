//! The resolved identity of a recipient: an address, a classification, and (for
//! owners discovered behind a group mailbox) a back-reference to the group.

use std::sync::Arc;

use crate::error::Result;
use crate::folder::Folder;
use crate::namespaces::{MESSAGES_NS, TYPES_NS};
use crate::restriction::is_equal_to;
use crate::session::Session;
use crate::xml::{Element, Node};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailboxType {
    Mailbox,
    PublicDL,
    GroupMailbox,
    Other(String),
}

impl MailboxType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Mailbox" => MailboxType::Mailbox,
            "PublicDL" => MailboxType::PublicDL,
            "GroupMailbox" => MailboxType::GroupMailbox,
            other => MailboxType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            MailboxType::Mailbox => "Mailbox".to_string(),
            MailboxType::PublicDL => "PublicDL".to_string(),
            MailboxType::GroupMailbox => "GroupMailbox".to_string(),
            MailboxType::Other(raw) => raw.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Mailbox {
    pub session: Arc<Session>,
    pub address: String,
    pub mailbox_type: MailboxType,
    pub group: Option<Box<Mailbox>>,
}

impl Mailbox {
    /// Parses a `<t:Mailbox>` subtree (address + type) as returned by `ResolveNames`
    /// and `ExpandDL` alike.
    pub fn from_node(session: Arc<Session>, node: &Node, group: Option<Box<Mailbox>>) -> Self {
        let address = node
            .find_first(TYPES_NS, "EmailAddress")
            .map(|n| n.text.trim().to_string())
            .unwrap_or_default();
        let mailbox_type = node
            .find_first(TYPES_NS, "MailboxType")
            .map(|n| MailboxType::parse(n.text.trim()))
            .unwrap_or(MailboxType::Other(String::new()));
        Mailbox {
            session,
            address,
            mailbox_type,
            group,
        }
    }

    pub fn display_address(&self) -> &str {
        match &self.group {
            Some(group) => &group.address,
            None => &self.address,
        }
    }

    /// Issues `FindFolder` for the synthetic `AllItems` search folder, impersonating
    /// this mailbox's address. Exchange does not expose "everything the user
    /// received" as a distinguished folder, so it must be located by name.
    pub fn all_items(&self) -> Result<Folder> {
        let folder_shape = Element::new(MESSAGES_NS, "FolderShape")
            .child(Element::new(TYPES_NS, "BaseShape").text("IdOnly"));
        let restriction = is_equal_to("folder:DisplayName", "AllItems");
        let parent_folder_ids = Element::new(MESSAGES_NS, "ParentFolderIds")
            .child(Element::new(TYPES_NS, "DistinguishedFolderId").attr("Id", "root"));

        let find_folder = Element::new(MESSAGES_NS, "FindFolder")
            .attr("Traversal", "Shallow")
            .child(folder_shape)
            .child(restriction)
            .child(parent_folder_ids);

        let response = self.session.send(find_folder, Some(&self.address), false)?;
        let folder_id = response
            .find_first(TYPES_NS, "FolderId")
            .ok_or(crate::error::Error::MissingResponseCode)?;
        Ok(Folder::Explicit {
            id: folder_id.attr("Id").unwrap_or_default().to_string(),
            change_key: folder_id.attr("ChangeKey").map(str::to_string),
        })
    }

    pub fn recoverable_items(&self) -> Folder {
        Folder::recoverable_items_deletions()
    }

    fn expand_dl_request(&self) -> Element {
        let email_address = Element::new(TYPES_NS, "EmailAddress").text(self.address.clone());
        let mailbox = Element::new(MESSAGES_NS, "Mailbox").child(email_address);
        Element::new(MESSAGES_NS, "ExpandDL").child(mailbox)
    }

    /// All members of this distribution list, bound to the same session with no
    /// group back-reference.
    pub fn expand(&self) -> Result<Vec<Mailbox>> {
        let response = self.session.send_resolving(self.expand_dl_request())?;
        let mut nodes = Vec::new();
        response.find_all(TYPES_NS, "Mailbox", &mut nodes);
        Ok(nodes
            .into_iter()
            .map(|node| Mailbox::from_node(self.session.clone(), node, None))
            .collect())
    }

    /// The first `Mailbox`-typed member of this group, back-referencing `self` so
    /// the owner's remediation result is keyed on the group's address.
    pub fn get_owner(&self) -> Result<Option<Mailbox>> {
        let response = self.session.send_resolving(self.expand_dl_request())?;
        let mut nodes = Vec::new();
        response.find_all(TYPES_NS, "Mailbox", &mut nodes);
        for node in nodes {
            let candidate = Mailbox::from_node(self.session.clone(), node, Some(Box::new(self.clone())));
            if candidate.mailbox_type == MailboxType::Mailbox {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}
