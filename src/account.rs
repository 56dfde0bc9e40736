//! An ordered, non-empty sequence of sessions. Resolving an address tries each
//! session in turn, since a multi-tenant deployment may have the address live on
//! only one of them.

use std::sync::Arc;

use log::warn;

use crate::error::{Error, Result};
use crate::mailbox::{Mailbox, MailboxType};
use crate::namespaces::MESSAGES_NS;
use crate::session::Session;
use crate::xml::Element;

pub struct Account {
    pub sessions: Vec<Arc<Session>>,
}

impl Account {
    pub fn new(sessions: Vec<Arc<Session>>) -> Self {
        Account { sessions }
    }

    fn resolve_names_request(address: &str) -> Element {
        let unresolved_entry =
            Element::new(MESSAGES_NS, "UnresolvedEntry").text(format!("smtp:{}", address));
        Element::new(MESSAGES_NS, "ResolveNames")
            .attr("ReturnFullContactData", "false")
            .child(unresolved_entry)
    }

    /// Tries each session in order, returning the first successful resolution.
    /// `MailboxNotFound` from a session means the address isn't on that tenant;
    /// any other error aborts the lookup immediately.
    pub fn get_mailbox(&self, address: &str) -> Result<Mailbox> {
        for session in &self.sessions {
            let request = Self::resolve_names_request(address);
            match session.send_resolving(request) {
                Ok(response) => {
                    let mailbox_node = response
                        .find_first(crate::namespaces::TYPES_NS, "Mailbox")
                        .ok_or(Error::MailboxNotFound)?;
                    return Ok(Mailbox::from_node(session.clone(), mailbox_node, None));
                }
                Err(Error::MailboxNotFound) => {
                    warn!("address {} not found on {}, trying next session", address, session.server);
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
        Err(Error::MailboxNotFound)
    }

    /// Every mailbox `address` ultimately delivers to: a `PublicDL` flattens
    /// (de-duplicated by address) including nested lists; a `GroupMailbox` reports
    /// its owner; anything else reports itself. This is address resolution only —
    /// it never touches a message.
    pub fn resolve(&self, address: &str) -> Result<Vec<Mailbox>> {
        let mailbox = self.get_mailbox(address)?;
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        resolve_into(mailbox, &mut seen, &mut out)?;
        Ok(out)
    }
}

fn resolve_into(mailbox: Mailbox, seen: &mut std::collections::HashSet<String>, out: &mut Vec<Mailbox>) -> Result<()> {
    match &mailbox.mailbox_type {
        MailboxType::PublicDL => {
            if !seen.insert(mailbox.address.clone()) {
                return Ok(());
            }
            for member in mailbox.expand()? {
                resolve_into(member, seen, out)?;
            }
        }
        MailboxType::GroupMailbox => {
            if !seen.insert(mailbox.address.clone()) {
                return Ok(());
            }
            if let Some(owner) = mailbox.get_owner()? {
                out.push(owner);
            }
        }
        _ => {
            if seen.insert(mailbox.address.clone()) {
                out.push(mailbox);
            }
        }
    }
    Ok(())
}
