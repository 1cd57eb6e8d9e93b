mod chapters;
mod cli;
mod commands;
mod error;
mod frontend;
mod mcp;
mod pdf;
mod selection;
mod splitter;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use frontend::{FrontEndKind, SplitArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries the report (or the MCP transport), so logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("chapsplit={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Split {
            path,
            output_dir,
            order,
            select,
        } => {
            let kind = FrontEndKind::probe_stdin(path.is_some())?;
            let mut front_end = frontend::build(
                kind,
                SplitArgs {
                    source: path,
                    output_dir,
                    order,
                    selection: select,
                },
            );
            commands::split::run(front_end.as_mut())?;
        }
        Commands::Chapters {
            path,
            order,
            select,
        } => {
            commands::chapters::run(&path, order, select)?;
        }
    }

    Ok(())
}
