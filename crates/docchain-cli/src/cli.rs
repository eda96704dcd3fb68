use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docchain",
    about = "Document correction chains: inspect, render, and serve",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file; defaults apply when it does not exist.
    #[arg(long, global = true, default_value = "docchain.toml")]
    pub config: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List known document types
    Types,
    /// Show correction scenarios for a document type
    Guide(GuideArgs),
    /// Render a chain graph file as a timeline
    Render(RenderArgs),
    /// Classify a document status as posted or editable
    Classify(ClassifyArgs),
    /// Report structural anomalies in a chain graph file
    Inspect(InspectArgs),
    /// Simulate the correction history panel for a document
    Panel(PanelArgs),
    /// Start the correction chain server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct GuideArgs {
    /// Document type tag, e.g. `invoice` or `credit-note`
    pub doc_type: String,
}

#[derive(Args)]
pub struct RenderArgs {
    /// JSON file holding a chain graph
    #[arg(short, long)]
    pub file: PathBuf,
    /// Render as a live timeline with navigation targets
    #[arg(long)]
    pub live: bool,
    /// Override the configured currency code
    #[arg(long)]
    pub currency: Option<String>,
}

#[derive(Args)]
pub struct ClassifyArgs {
    pub status: String,
}

#[derive(Args)]
pub struct InspectArgs {
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct PanelArgs {
    /// JSON file holding a chain graph, or an array of them
    #[arg(long)]
    pub chains: Option<PathBuf>,
    #[arg(long = "type")]
    pub doc_type: String,
    #[arg(long = "id")]
    pub doc_id: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Toggle the panel once after mounting
    #[arg(long)]
    pub toggle: bool,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address
    #[arg(long)]
    pub bind: Option<String>,
    /// Start without the guide example chains
    #[arg(long)]
    pub no_seed: bool,
}
