//! csvsheet - CSV preview and XLSX conversion server
//!
//! CLI entry point

use clap::Parser;
use csvsheet::{exit_codes, Cli, WebServer};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    std::process::exit(match run_serve(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn run_serve(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.server_config();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let server = WebServer::with_config(config);
        server.run().await
    })
}
