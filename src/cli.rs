// SPDX-License-Identifier: MPL-2.0
//! Command-line parsing and the `data` maintenance commands.
//!
//! The `data` commands work directly on `users.json`, without going through
//! the REST API, so they also work while the server is stopped.

use crate::application::port::UserStore;
use crate::domain::user::{top_email_domains, User, UserStats};
use crate::error::Result;
use crate::infrastructure::JsonFileStore;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

pub const USAGE: &str = "\
Usage: signup-desk [--config-dir DIR] [--data-dir DIR] [COMMAND]

Commands:
  (none)              Launch the desktop app
  serve [--bind ADDR] Run the REST API
  data list           Show all users
  data stats          Show registration statistics
  data backup         Back up the user data
  data clear          Delete all users
  help                Show this message";

/// Messages longer than this are cut in `data list`.
pub const LIST_MESSAGE_CHARS: usize = 50;

/// Number of email domains shown by `data stats`.
pub const TOP_DOMAINS: usize = 5;

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config_dir: Option<String>,
    pub data_dir: Option<String>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Gui,
    Serve { bind: Option<String> },
    Data(DataCommand),
    Help,
    /// Anything else; reported together with the usage text.
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCommand {
    List,
    Stats,
    Backup,
    Clear,
}

impl DataCommand {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "list" | "ls" => Some(Self::List),
            "stats" => Some(Self::Stats),
            "backup" => Some(Self::Backup),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// Parses the process arguments (without the program name).
pub fn parse(raw: Vec<OsString>) -> std::result::Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_vec(raw);

    if args.contains(["-h", "--help"]) {
        return Ok(Args {
            config_dir: None,
            data_dir: None,
            command: Command::Help,
        });
    }

    let config_dir: Option<String> = args.opt_value_from_str("--config-dir")?;
    let data_dir: Option<String> = args.opt_value_from_str("--data-dir")?;
    let subcommand: Option<String> = args.subcommand()?;

    let command = match subcommand.as_deref() {
        None => Command::Gui,
        Some("serve") => Command::Serve {
            bind: args.opt_value_from_str("--bind")?,
        },
        Some("data") => {
            let name: Option<String> = args.opt_free_from_str()?;
            match name.as_deref().and_then(DataCommand::parse) {
                Some(data) => Command::Data(data),
                None => Command::Unknown(format!("data {}", name.unwrap_or_default())),
            }
        }
        Some("help") => Command::Help,
        Some(other) => Command::Unknown(other.to_string()),
    };

    let rest = args.finish();
    if !rest.is_empty() && !matches!(command, Command::Unknown(_)) {
        let extra = rest
            .iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        return Ok(Args {
            config_dir,
            data_dir,
            command: Command::Unknown(extra),
        });
    }

    Ok(Args {
        config_dir,
        data_dir,
        command,
    })
}

/// Runs a `data` command against `users.json` in `data_dir`.
pub fn run_data(command: DataCommand, data_dir: &Path, out: &mut impl Write) -> Result<()> {
    let store = JsonFileStore::in_dir(data_dir);
    match command {
        DataCommand::List => list_users(&store.find_all()?, out),
        DataCommand::Stats => show_stats(&store.find_all()?, &Local::now(), out),
        DataCommand::Backup => {
            let path = store.backup(Utc::now())?;
            writeln!(out, "Data backed up to: {}", path.display())?;
            Ok(())
        }
        DataCommand::Clear => {
            let removed = store.clear()?;
            tracing::info!(removed, "user data cleared");
            writeln!(out, "User data cleared ({removed} removed)")?;
            Ok(())
        }
    }
}

/// Prints every user with its registration time in local time.
pub fn list_users(users: &[User], out: &mut impl Write) -> Result<()> {
    if users.is_empty() {
        writeln!(out, "No users yet")?;
        return Ok(());
    }

    writeln!(out, "{} users:", users.len())?;
    writeln!(out, "{}", "-".repeat(80))?;
    for (index, user) in users.iter().enumerate() {
        writeln!(out, "{}. {} ({})", index + 1, user.name, user.email)?;
        writeln!(out, "   ID: {}", user.id)?;
        writeln!(out, "   Registered: {}", local_time(&user.created_at))?;
        if let Some(message) = user.message.as_deref() {
            writeln!(out, "   Message: {}", truncate(message, LIST_MESSAGE_CHARS))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Prints registration counts relative to `now` and the top email domains.
pub fn show_stats<Tz: TimeZone>(
    users: &[User],
    now: &DateTime<Tz>,
    out: &mut impl Write,
) -> Result<()> {
    if users.is_empty() {
        writeln!(out, "No statistics yet")?;
        return Ok(());
    }

    let stats = UserStats::compute(users, now);
    writeln!(out, "User statistics:")?;
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "Total users: {}", stats.total)?;
    writeln!(out, "Today: {}", stats.today_count)?;
    writeln!(out, "This week: {}", stats.week_count)?;
    writeln!(out, "This month: {}", stats.month_count)?;

    writeln!(out)?;
    writeln!(out, "Email domains:")?;
    for (domain, count) in top_email_domains(users, TOP_DOMAINS) {
        writeln!(out, "  {domain}: {count} users")?;
    }
    Ok(())
}

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// First `max` characters of `text`, with `...` appended when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
