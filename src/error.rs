//! Crate-wide error type. One enum, built with `thiserror`, matching how the rest of
//! the traversal expects a single error type rather than `Box<dyn Error>` per layer.

use thiserror::Error;

use crate::transport::TransportError;
use crate::xml::XmlError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error("mailbox not found")]
    MailboxNotFound,

    #[error("message not found")]
    MessageNotFound,

    #[error("EWS response carried no ResponseCode")]
    MissingResponseCode,

    #[error("EWS error: {0}")]
    Unknown(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigLoad(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
