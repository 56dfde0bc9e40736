use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::error;

use phishfry::account::Account;
use phishfry::cli::{Cli, Command};
use phishfry::remediation::Results;
use phishfry::session::Session;
use phishfry::transport::{ReqwestTransport, Transport};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new().filter_level(level).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> phishfry::Result<()> {
    let config = phishfry::config::load(&cli.config)?;

    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::default());
    let sessions = config
        .accounts
        .iter()
        .map(|account| {
            Arc::new(Session::new(
                account.server.clone(),
                account.user.clone(),
                account.pass.clone(),
                account.version.clone(),
                config.timezone.clone(),
                transport.clone(),
            ))
        })
        .collect();
    let account = Account::new(sessions);

    match cli.command {
        Command::Delete { recipient, message_id } => {
            let mailbox = account.get_mailbox(&recipient)?;
            print_results(&mailbox.delete(&message_id));
        }
        Command::Restore { recipient, message_id } => {
            let mailbox = account.get_mailbox(&recipient)?;
            print_results(&mailbox.restore(&message_id));
        }
        Command::Resolve { recipient } => {
            for mailbox in account.resolve(&recipient)? {
                println!("{} [{}]", mailbox.address, mailbox.mailbox_type.label());
            }
        }
    }

    Ok(())
}

fn print_results(results: &Results) {
    for (address, result) in results {
        let status = if result.success { "OK" } else { "FAILED" };
        let message = result.message.as_deref().unwrap_or("");
        println!("{address} [{}] {status}: {message}", result.mailbox_type);
        if let Some(owner) = &result.owner {
            println!("  owner: {owner}");
        }
        for member in &result.members {
            println!("  member: {member}");
        }
        for forward in &result.forwards {
            println!("  forwarded to: {forward}");
        }
    }
}
