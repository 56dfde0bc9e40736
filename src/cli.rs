//! Command-line surface: one subcommand per operation the original `phishfry` script
//! offers, plus the global config path and verbosity flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "phishfry", about = "Remediate a phishing message across every mailbox it reached")]
pub struct Cli {
    /// Path to the INI config file listing the accounts to search.
    #[arg(short = 'c', long = "config", default_value = "config.ini", global = true)]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Soft-delete the message from every mailbox it reached.
    Delete {
        /// The address the message was originally reported from.
        recipient: String,
        /// The `Message-Id` of the reported message.
        message_id: String,
    },
    /// Move the message back to the inbox of every mailbox it reached.
    Restore {
        /// The address the message was originally reported from.
        recipient: String,
        /// The `Message-Id` of the reported message.
        message_id: String,
    },
    /// Resolve an address to the mailboxes it actually names, without touching any message.
    Resolve {
        /// The address to resolve (a user, a distribution list, or a group).
        recipient: String,
    },
}
