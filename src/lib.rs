pub mod account;
pub mod cli;
pub mod config;
pub mod error;
pub mod errors_decode;
pub mod folder;
pub mod mailbox;
pub mod message;
pub mod namespaces;
pub mod remediation;
pub mod restriction;
pub mod result;
pub mod session;
pub mod transport;
pub mod xml;

pub use error::{Error, Result};
