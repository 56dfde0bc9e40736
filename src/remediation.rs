//! The recursive Delete/Restore traversal: starting from one mailbox, enumerate
//! every address the message actually reached, remediate each exactly once, and
//! tolerate partial failures along the way.
//!
//! `results`/`seen_message_ids` are threaded explicitly through the recursion rather
//! than carried as shared mutable state or mutable default arguments — each public
//! call allocates a fresh pair.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::info;

use crate::error::Result;
use crate::mailbox::{Mailbox, MailboxType};
use crate::message::Message;
use crate::namespaces::{MESSAGES_NS, TYPES_NS};
use crate::result::RemediationResult;
use crate::xml::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Delete,
    Restore,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Delete => "deleted",
            Action::Restore => "restored",
        }
    }
}

pub type Results = IndexMap<String, RemediationResult>;

fn record(results: &mut Results, display: &str, success: bool, message: impl Into<String>) {
    let message = message.into();
    info!("{}: {}", display, message);
    if let Some(entry) = results.get_mut(display) {
        if success {
            entry.record_success(message);
        } else {
            entry.record_failure(message);
        }
    }
}

impl Mailbox {
    pub fn delete(&self, message_id: &str) -> Results {
        self.remediate(Action::Delete, message_id)
    }

    pub fn restore(&self, message_id: &str) -> Results {
        self.remediate(Action::Restore, message_id)
    }

    pub fn remediate(&self, action: Action, message_id: &str) -> Results {
        let mut results = Results::new();
        let mut seen_message_ids = HashSet::new();
        self.remediate_into(action, message_id, &mut results, &mut seen_message_ids);
        results
    }

    fn remediate_into(
        &self,
        action: Action,
        message_id: &str,
        results: &mut Results,
        seen_message_ids: &mut HashSet<String>,
    ) {
        let display = self.display_address().to_string();

        if self.group.is_none() && results.contains_key(&display) {
            return;
        }
        results
            .entry(display.clone())
            .or_insert_with(|| RemediationResult::new(self.mailbox_type.label()));

        match &self.mailbox_type {
            MailboxType::GroupMailbox => self.remediate_group(action, message_id, results, seen_message_ids, &display),
            MailboxType::PublicDL => self.remediate_dl(action, message_id, results, seen_message_ids, &display),
            MailboxType::Mailbox => self.remediate_mailbox(action, message_id, results, seen_message_ids, &display),
            MailboxType::Other(_) => record(results, &display, false, "Mailbox not found"),
        }
    }

    fn remediate_group(
        &self,
        action: Action,
        message_id: &str,
        results: &mut Results,
        seen_message_ids: &mut HashSet<String>,
        display: &str,
    ) {
        match self.get_owner() {
            Ok(Some(owner)) => {
                if let Some(entry) = results.get_mut(display) {
                    entry.owner = Some(owner.address.clone());
                }
                owner.remediate_into(action, message_id, results, seen_message_ids);
            }
            Ok(None) => record(results, display, false, "Mailbox not found"),
            Err(err) => record(results, display, false, err.to_string()),
        }
    }

    fn remediate_dl(
        &self,
        action: Action,
        message_id: &str,
        results: &mut Results,
        seen_message_ids: &mut HashSet<String>,
        display: &str,
    ) {
        match self.expand() {
            Ok(members) => {
                if let Some(entry) = results.get_mut(display) {
                    entry.members = members.iter().map(|m| m.address.clone()).collect();
                }
                for member in members {
                    member.remediate_into(action, message_id, results, seen_message_ids);
                }
            }
            Err(err) => record(results, display, false, err.to_string()),
        }
    }

    fn remediate_mailbox(
        &self,
        action: Action,
        message_id: &str,
        results: &mut Results,
        seen_message_ids: &mut HashSet<String>,
        display: &str,
    ) {
        let folder = match action {
            Action::Delete => self.all_items(),
            Action::Restore => Ok(self.recoverable_items()),
        };
        let folder = match folder {
            Ok(folder) => folder,
            Err(err) => return record(results, display, false, err.to_string()),
        };

        let messages = match folder.find(&self.session, &self.address, message_id) {
            Ok(messages) => messages,
            Err(err) => return record(results, display, false, err.to_string()),
        };

        if messages.is_empty() {
            return match action {
                Action::Delete => record(results, display, true, "Message not found"),
                Action::Restore => record(results, display, false, "Message not found"),
            };
        }

        let forwards = match self.find_recipients(&messages, message_id, seen_message_ids) {
            Ok(forwards) => forwards,
            Err(err) => return record(results, display, false, err.to_string()),
        };

        let sent = match action {
            Action::Delete => self.send_delete(&messages),
            Action::Restore => self.send_restore(&messages),
        };
        if let Err(err) = sent {
            return record(results, display, false, err.to_string());
        }
        record(results, display, true, action.label());

        if !forwards.is_empty() {
            if let Some(entry) = results.get_mut(display) {
                entry.forwards = forwards.iter().map(|m| m.address.clone()).collect();
            }
        }

        for forward in forwards {
            forward.remediate_into(action, message_id, results, seen_message_ids);
        }
    }

    /// Issues a single `GetItem` for every message's recipients, unless this
    /// message-id has already been investigated in this run. Marks the message-id
    /// seen *before* issuing the request: a transport failure afterwards still
    /// leaves it marked, bounding worst-case work at the cost of possibly missing a
    /// forward chain if that particular call fails.
    fn find_recipients(
        &self,
        messages: &[Message],
        message_id: &str,
        seen_message_ids: &mut HashSet<String>,
    ) -> Result<Vec<Mailbox>> {
        if seen_message_ids.contains(message_id) {
            return Ok(Vec::new());
        }
        seen_message_ids.insert(message_id.to_string());

        let additional_properties = Element::new(TYPES_NS, "AdditionalProperties")
            .child(Element::new(TYPES_NS, "FieldURI").attr("FieldURI", "message:ToRecipients"))
            .child(Element::new(TYPES_NS, "FieldURI").attr("FieldURI", "message:CcRecipients"))
            .child(Element::new(TYPES_NS, "FieldURI").attr("FieldURI", "message:BccRecipients"));
        let item_shape = Element::new(MESSAGES_NS, "ItemShape")
            .child(Element::new(TYPES_NS, "BaseShape").text("IdOnly"))
            .child(additional_properties);
        let item_ids = messages
            .iter()
            .fold(Element::new(MESSAGES_NS, "ItemIds"), |el, m| el.child(m.to_item_id_element()));

        let get_item = Element::new(MESSAGES_NS, "GetItem").child(item_shape).child(item_ids);
        let response = self.session.send(get_item, Some(&self.address), false)?;

        let mut mailbox_nodes = Vec::new();
        response.find_all(TYPES_NS, "Mailbox", &mut mailbox_nodes);

        let mut distinct = IndexMap::new();
        for node in mailbox_nodes {
            let candidate = Mailbox::from_node(self.session.clone(), node, None);
            distinct.entry(candidate.address.clone()).or_insert(candidate);
        }
        Ok(distinct.into_values().collect())
    }

    fn send_delete(&self, messages: &[Message]) -> Result<()> {
        let item_ids = messages
            .iter()
            .fold(Element::new(MESSAGES_NS, "ItemIds"), |el, m| el.child(m.to_item_id_element()));
        let delete = Element::new(MESSAGES_NS, "DeleteItem")
            .attr("DeleteType", "SoftDelete")
            .child(item_ids);
        self.session.send(delete, Some(&self.address), false)?;
        Ok(())
    }

    fn send_restore(&self, messages: &[Message]) -> Result<()> {
        let to_folder_id = Element::new(MESSAGES_NS, "ToFolderId")
            .child(Element::new(TYPES_NS, "DistinguishedFolderId").attr("Id", "inbox"));
        let item_ids = messages
            .iter()
            .fold(Element::new(MESSAGES_NS, "ItemIds"), |el, m| el.child(m.to_item_id_element()));
        let restore = Element::new(MESSAGES_NS, "MoveItem").child(to_folder_id).child(item_ids);
        self.session.send(restore, Some(&self.address), false)?;
        Ok(())
    }
}
