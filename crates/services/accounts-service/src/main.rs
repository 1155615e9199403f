//! Accounts Service - CLI for reading and converting users configurations.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppResult, ReaderConfig, ServiceConfig};
use domain::{Config, IssueList};

#[derive(Parser, Debug)]
#[command(name = "accounts-service")]
#[command(author, version, about = "Users configuration reader and converter", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory prepended to home directories when reading keys
    #[arg(long, global = true, env = "ACCOUNTS_ROOT")]
    root: Option<PathBuf>,

    /// Program used to query the passwd, group and shadow tables
    #[arg(long, global = true, env = "ACCOUNTS_GETENT")]
    getent: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read the users configuration of this system
    Read {
        /// Print the whole configuration as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report users and groups sharing an id
    Validate,
    /// Write the users of this system as a legacy store document
    ExportSimple {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Read a legacy store document and check it
    ImportSimple {
        #[arg(short, long)]
        input: PathBuf,
        /// Print the whole configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    let service = ServiceConfig::from_env();
    init_tracing(cli.verbose, &service);

    let mut config = ReaderConfig::from_env();
    if let Some(root) = cli.root {
        config.root_dir = root;
    }
    if let Some(getent) = cli.getent {
        config.getent_program = getent;
    }
    tracing::debug!("{} configuration loaded: {:?}", service.service_name, config);

    if let Err(e) = run(cli.command, &config) {
        tracing::error!("Command failed [{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &ReaderConfig) -> AppResult<()> {
    match command {
        Commands::Read { json } => {
            let accounts = accounts_service_lib::read_system(config)?;
            print_config(&accounts, json)?;
        }
        Commands::Validate => {
            let (_, issues) = accounts_service_lib::validate_system(config)?;
            print_issues(&issues);
        }
        Commands::ExportSimple { output } => {
            let document = accounts_service_lib::export_simple(config, &output)?;
            println!("{} users written to {}", document.users.len(), output.display());
        }
        Commands::ImportSimple { input, json } => {
            let (accounts, issues) = accounts_service_lib::import_simple(config, &input)?;
            print_config(&accounts, json)?;
            print_issues(&issues);
        }
    }

    Ok(())
}

fn print_config(config: &Config, json: bool) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    for user in config.users() {
        let group = user
            .primary_group(config)
            .map(|group| group.name.as_str())
            .unwrap_or("-");
        println!(
            "user  {:<16} uid={:<6} group={:<12} home={}",
            user.name,
            user.uid.as_deref().unwrap_or("-"),
            group,
            user.home.as_deref().unwrap_or("-")
        );
    }
    for group in config.groups() {
        println!(
            "group {:<16} gid={:<6} members={}",
            group.name,
            group.gid.as_deref().unwrap_or("-"),
            group.users_name.join(",")
        );
    }

    Ok(())
}

fn print_issues(issues: &IssueList) {
    if issues.is_empty() {
        println!("No issues found");
    }
    for issue in issues {
        println!("{}", issue);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool, service: &ServiceConfig) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        service.log_level.clone()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
