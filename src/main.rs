use anyhow::Result;
use clap::Parser;
use std::fs::{self, OpenOptions};
use warden::{cli, ui, util};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.warden/logs/warden.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    ui::install_panic_hook();

    cli::run(cli.command).await
}
