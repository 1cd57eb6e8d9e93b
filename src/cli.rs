use crate::chapters::OutputOrder;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chapsplit")]
#[command(about = "Split a PDF into one file per bookmarked chapter")]
#[command(version)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one PDF per top-level bookmark
    Split {
        /// PDF file to split (asked for interactively when omitted)
        path: Option<PathBuf>,

        /// Output directory [default: <name>_chapters next to the input]
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Which chapter gets index 01
        #[arg(long, value_enum, default_value_t = OutputOrder::Ascending)]
        order: OutputOrder,

        /// Only write these chapters, numbered in output order (e.g., "1-3,5,7-end")
        #[arg(short, long)]
        select: Option<String>,
    },

    /// Show the chapter files a split would produce
    #[command(alias = "plan")]
    Chapters {
        /// PDF file to inspect
        path: PathBuf,

        /// Which chapter gets index 01
        #[arg(long, value_enum, default_value_t = OutputOrder::Ascending)]
        order: OutputOrder,

        /// Only list these chapters (e.g., "1-3,5,7-end")
        #[arg(short, long)]
        select: Option<String>,
    },

    /// Run as MCP server over stdio
    Mcp,
}
