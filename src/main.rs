// SPDX-License-Identifier: MPL-2.0
use signup_desk::app::{self, Flags};
use signup_desk::cli::{self, Command, USAGE};
use signup_desk::config::{self, paths, Config};
use signup_desk::error::{Error, Result};
use signup_desk::{logging, server};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match cli::parse(std::env::args_os().skip(1).collect()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(args.data_dir, args.config_dir);
    let (config, config_warning) = config::load();

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("{err}");
    }
    if let Some(warning) = &config_warning {
        tracing::warn!(warning = %warning, "using default settings");
    }

    let outcome = match args.command {
        Command::Gui => app::run(Flags {
            config,
            config_warning,
        })
        .map_err(|err| Error::Config(err.to_string())),
        Command::Serve { bind } => serve(&config, bind.as_deref()),
        Command::Data(command) => {
            data_dir().and_then(|dir| cli::run_data(command, &dir, &mut io::stdout().lock()))
        }
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Unknown(command) => {
            eprintln!("Unknown command: {command}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    paths::data_dir().ok_or_else(|| Error::Storage("could not determine the data directory".into()))
}

/// Runs the REST API on its own runtime until Ctrl+C.
fn serve(config: &Config, bind: Option<&str>) -> Result<()> {
    let addr: SocketAddr = match bind {
        Some(bind) => bind.parse()?,
        None => config.server.bind_addr()?,
    };
    let data_dir = data_dir()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::run(addr, &data_dir))
}
