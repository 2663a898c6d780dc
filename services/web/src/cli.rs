use crate::server;
use clap::{Args, Parser, Subcommand};
use pioneer_site::config::{AppConfig, StorageConfig};
use pioneer_site::error::AppError;
use pioneer_site::intake::{CsvRecordStore, RecordKind, RecordStore};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Pioneer Site",
    about = "Serve the Pioneer cooperative website and manage its submission files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Create the data directory and submission files, then exit
    InitStore(InitStoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory holding applications.csv and contacts.csv
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct InitStoreArgs {
    /// Override the directory holding applications.csv and contacts.csv
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::InitStore(args) => run_init_store(args),
    }
}

fn run_init_store(args: InitStoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let storage = args
        .data_dir
        .map(StorageConfig::new)
        .unwrap_or(config.storage);

    let store = CsvRecordStore::new(storage);
    store.ensure_initialized()?;

    for kind in RecordKind::ALL {
        println!("{} -> {}", kind.label(), store.path_for(kind).display());
    }
    Ok(())
}
