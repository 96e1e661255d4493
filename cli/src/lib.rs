//! Assetscan command line shell
//!
//! This is the thin shell that parses arguments, sets up logging and state,
//! and dispatches to command handlers. Core logic lives in the `crates/`
//! directory.

pub mod commands;
pub mod error;
pub mod output;
pub mod recovery;
pub mod state;

use anyhow::Result;
use assetscan_api::SignupRequest;
use assetscan_core::Schedule;
use clap::{ArgAction, Args, Parser, Subcommand};
use commands::scan::{SubmitInput, TargetInput};
use state::AppState;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(name = "assetscan")]
#[command(version)]
#[command(about = "Submit network asset scans and track them to completion", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "ASSETSCAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        username: String,
        #[arg(long)]
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = "ASSETSCAN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Requested role, repeatable
        #[arg(long = "role")]
        roles: Vec<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Browse the asset inventory
    #[command(subcommand)]
    Assets(AssetsCommand),
    /// Estimate, submit and track scans
    #[command(subcommand)]
    Scan(ScanCommand),
}

#[derive(Subcommand, Debug)]
pub enum AssetsCommand {
    /// List all assets
    List,
    /// Show one asset
    Get { id: String },
    /// List assets of one type
    Type { asset_type: String },
    /// List assets by reachability
    Online {
        #[arg(action = ArgAction::Set)]
        online: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Comma-separated IP addresses
    #[arg(long, default_value = "")]
    pub addresses: String,

    /// Comma-separated CIDR blocks or ranges (e.g. 192.168.1.0/24,10.0.0.1-50)
    #[arg(long, default_value = "")]
    pub segments: String,

    /// Enable a scan setting by name, repeatable
    #[arg(long)]
    pub enable: Vec<String>,

    /// Disable a scan setting by name, repeatable
    #[arg(long)]
    pub disable: Vec<String>,
}

impl From<TargetArgs> for TargetInput {
    fn from(args: TargetArgs) -> Self {
        Self {
            addresses: args.addresses,
            segments: args.segments,
            enable: args.enable,
            disable: args.disable,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ScanCommand {
    /// Estimate duration and load without submitting
    Estimate(TargetArgs),
    /// Create and start a scan
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[command(flatten)]
        targets: TargetArgs,
        /// Repeat the scan: daily, weekly or monthly
        #[arg(long)]
        schedule: Option<Schedule>,
        /// Follow progress until the scan finishes
        #[arg(long)]
        watch: bool,
    },
    /// Start a stored scan
    Run {
        id: String,
        /// Follow progress until the scan finishes
        #[arg(long)]
        watch: bool,
    },
    /// List scan jobs
    List,
    /// Show one scan job
    Show { id: String },
    /// Follow a scan job until it finishes
    Watch { id: String },
    /// Show per-target results of a scan job
    Results { id: String },
    /// Delete a scan job
    Delete { id: String },
}

/// Initialize tracing subscriber for logging
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose {
        "info,assetscan=debug"
    } else {
        "warn,assetscan=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Execute one command against the given state.
pub async fn dispatch(state: &AppState, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let password = commands::auth::read_password(password)?;
            commands::auth::login(state, &username, &password, out).await
        }
        Command::Register {
            username,
            email,
            password,
            roles,
        } => {
            let password = commands::auth::read_password(password)?;
            let mut request = SignupRequest::new(username, email, password);
            request.role = roles;
            commands::auth::register(state, &request, out).await
        }
        Command::Logout => commands::auth::logout(state, out),
        Command::Whoami => commands::auth::whoami(state, out),
        Command::Assets(command) => match command {
            AssetsCommand::List => commands::assets::list(state, out).await,
            AssetsCommand::Get { id } => commands::assets::get(state, &id, out).await,
            AssetsCommand::Type { asset_type } => {
                commands::assets::by_type(state, &asset_type, out).await
            }
            AssetsCommand::Online { online } => commands::assets::by_online(state, online, out).await,
        },
        Command::Scan(command) => match command {
            ScanCommand::Estimate(targets) => commands::scan::estimate(&targets.into(), out),
            ScanCommand::Submit {
                name,
                description,
                targets,
                schedule,
                watch,
            } => {
                let input = SubmitInput {
                    name,
                    description,
                    schedule,
                    watch,
                };
                commands::scan::submit(state, &input, &targets.into(), out).await
            }
            ScanCommand::Run { id, watch } => commands::scan::run(state, &id, watch, out).await,
            ScanCommand::List => commands::scan::list(state, out).await,
            ScanCommand::Show { id } => commands::scan::show(state, &id, out).await,
            ScanCommand::Watch { id } => commands::scan::watch(state, &id, out).await,
            ScanCommand::Results { id } => commands::scan::results(state, &id, out).await,
            ScanCommand::Delete { id } => commands::scan::delete(state, &id, out).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "assetscan",
            "scan",
            "submit",
            "--name",
            "Office",
            "--segments",
            "192.168.1.0/24",
            "--disable",
            "OS detection",
            "--schedule",
            "weekly",
            "--watch",
        ])
        .expect("parse");

        match cli.command {
            Command::Scan(ScanCommand::Submit {
                name,
                targets,
                schedule,
                watch,
                ..
            }) => {
                assert_eq!(name, "Office");
                assert_eq!(targets.segments, "192.168.1.0/24");
                assert_eq!(targets.disable, vec!["OS detection"]);
                assert_eq!(schedule, Some(Schedule::Weekly));
                assert!(watch);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_assets_online_and_verbose() {
        let cli = Cli::try_parse_from(["assetscan", "assets", "online", "false", "-v"])
            .expect("parse");
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Assets(AssetsCommand::Online { online: false })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_schedule() {
        let result = Cli::try_parse_from([
            "assetscan", "scan", "submit", "--name", "x", "--schedule", "hourly",
        ]);
        assert!(result.is_err());
    }
}
