use anyhow::Result;
use clap::ValueEnum;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{error, info};

use crate::chapters::OutputOrder;
use crate::splitter::{self, SplitConfig};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfChaptersRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "'ascending' (default) gives index 01 to the first chapter, 'descending' to the last")]
    #[serde(default)]
    pub order: Option<String>,
    #[schemars(description = "Chapters to keep, numbered in output order (e.g., '1-3,5,7-end')")]
    #[serde(default)]
    pub select: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitChaptersRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Directory to write the chapter files to (created if missing)")]
    pub output_dir: String,
    #[schemars(description = "'ascending' (default) gives index 01 to the first chapter, 'descending' to the last")]
    #[serde(default)]
    pub order: Option<String>,
    #[schemars(description = "Chapters to write, numbered in output order (e.g., '1-3,5,7-end')")]
    #[serde(default)]
    pub select: Option<String>,
}

fn parse_order(order: Option<&str>) -> std::result::Result<OutputOrder, String> {
    match order {
        None => Ok(OutputOrder::default()),
        Some(s) => OutputOrder::from_str(s, true)
            .map_err(|_| format!("Invalid order: {} (expected ascending or descending)", s)),
    }
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "List the chapter files a split would produce: output file name, 0-based half-open page span and title per chapter, plus skipped bookmarks")]
    async fn pdf_chapters(&self, Parameters(req): Parameters<PdfChaptersRequest>) -> String {
        let order = match parse_order(req.order.as_deref()) {
            Ok(o) => o,
            Err(e) => return format!("Error: {}", e),
        };

        let source = PathBuf::from(req.path);
        let config = SplitConfig {
            output_dir: splitter::default_output_dir(&source),
            source,
            order,
            selection: req.select,
        };

        // Loading parses the whole document
        let outcome =
            tokio::task::spawn_blocking(move || splitter::load_plan(&config).map(|(_, plan)| plan))
                .await;

        match outcome {
            Ok(Ok(plan)) => {
                serde_json::to_string_pretty(&plan).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Ok(Err(e)) => format!("Error: {}", e),
            Err(e) => {
                error!("plan task failed: {}", e);
                format!("Error: plan task failed: {}", e)
            }
        }
    }

    #[tool(description = "Split a PDF into one file per top-level bookmark, written as NN_Title.pdf into output_dir. Returns a summary of written, skipped and failed chapters.")]
    async fn pdf_split_chapters(
        &self,
        Parameters(req): Parameters<PdfSplitChaptersRequest>,
    ) -> String {
        let order = match parse_order(req.order.as_deref()) {
            Ok(o) => o,
            Err(e) => return format!("Error: {}", e),
        };

        let config = SplitConfig {
            source: req.path.into(),
            output_dir: req.output_dir.into(),
            order,
            selection: req.select,
        };

        // The split is blocking file I/O from start to finish
        let outcome = tokio::task::spawn_blocking(move || splitter::split(&config)).await;

        match outcome {
            Ok(Ok(summary)) => {
                serde_json::to_string_pretty(&summary).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Ok(Err(e)) => format!("Error: {}", e),
            Err(e) => {
                error!("split task failed: {}", e);
                format!("Error: split task failed: {}", e)
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Split PDFs by their bookmarks. Use pdf_chapters to preview which chapter files \
                 a PDF would produce, then pdf_split_chapters to write them."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();
    info!("starting MCP server on stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
