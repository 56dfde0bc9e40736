//! Loads the INI config file: a `DEFAULT` section for the shared timezone, and every
//! other section an account (`user`, `pass` required; `server`, `version` defaulted).
//!
//! Account discovery order is a tested, observable behavior (accounts are tried in
//! file order), so this does not rely on the `config` crate's internal map ordering —
//! it independently scans the raw file text for `[section]` headers and uses the
//! parsed `Config` only to look up values within each section.

use std::path::Path;

use crate::error::{Error, Result};

const DEFAULT_SERVER: &str = "outlook.office365.com";
const DEFAULT_VERSION: &str = "Exchange2016";
const DEFAULT_TIMEZONE: &str = "UTC";

#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub name: String,
    pub user: String,
    pub pass: String,
    pub server: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub timezone: String,
    pub accounts: Vec<AccountConfig>,
}

pub fn load(path: &Path) -> Result<AppConfig> {
    let raw = std::fs::read_to_string(path)?;
    let section_order = scan_section_order(&raw);

    let settings = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).format(config::FileFormat::Ini))
        .build()?;

    let timezone = settings
        .get_string("default.timezone")
        .unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());

    let mut accounts = Vec::new();
    for section in section_order {
        if section.eq_ignore_ascii_case("default") {
            continue;
        }
        let key = section.to_lowercase();

        let user = settings.get_string(&format!("{key}.user")).map_err(|_| {
            Error::Config(format!("section [{section}] is missing required key 'user'"))
        })?;
        let pass = settings.get_string(&format!("{key}.pass")).map_err(|_| {
            Error::Config(format!("section [{section}] is missing required key 'pass'"))
        })?;
        let server = settings
            .get_string(&format!("{key}.server"))
            .unwrap_or_else(|_| DEFAULT_SERVER.to_string());
        let version = settings
            .get_string(&format!("{key}.version"))
            .unwrap_or_else(|_| DEFAULT_VERSION.to_string());

        accounts.push(AccountConfig {
            name: section,
            user,
            pass,
            server,
            version,
        });
    }

    if accounts.is_empty() {
        return Err(Error::Config(format!(
            "{} defines no account sections",
            path.display()
        )));
    }

    Ok(AppConfig { timezone, accounts })
}

fn scan_section_order(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.len() > 2 && line.starts_with('[') && line.ends_with(']') {
                Some(line[1..line.len() - 1].trim().to_string())
            } else {
                None
            }
        })
        .collect()
}
