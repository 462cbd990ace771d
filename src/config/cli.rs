//! Command-line argument definitions for storeflow.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use crate::catalog::Category;
use crate::export::ExportFormat;

/// Command-line interface for storeflow.
#[derive(Debug, Parser)]
#[command(name = "storeflow")]
#[command(
    author,
    version,
    about = "Campus bookstore process walkthrough, exports and order lookup"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Directory export artefacts are written into.
    #[arg(long, global = true)]
    pub output_dir: Option<Utf8PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the process steps in walkthrough order.
    Steps,

    /// Play the guided walkthrough.
    Walkthrough(WalkthroughArgs),

    /// Inspect one step outside the walkthrough.
    Inspect(InspectArgs),

    /// Export the flowchart.
    Export(ExportArgs),

    /// Look up an order.
    Order(OrderArgs),

    /// Send a message to the store.
    Contact(ContactArgs),

    /// Browse the shop catalogue.
    Catalog(CatalogArgs),

    /// Write the interactive scene, side panel included, as SVG.
    Render(RenderArgs),
}

/// Arguments for the `walkthrough` subcommand.
#[derive(Debug, Parser)]
pub struct WalkthroughArgs {
    /// Advance one step at a time instead of on a timer.
    #[arg(long)]
    pub manual: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Identifier of the step to select.
    #[arg(required = true)]
    pub step: String,
}

/// Arguments for the `export` subcommand.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Artefact format.
    #[arg(value_enum, required = true)]
    pub format: ExportFormat,
}

/// Arguments for the `order` subcommand.
#[derive(Debug, Parser)]
pub struct OrderArgs {
    /// Order number, e.g. ORD-2025-001.
    #[arg(long, required = true)]
    pub number: String,

    /// Email address used for the order.
    #[arg(long, required = true)]
    pub email: String,
}

/// Arguments for the `contact` subcommand.
#[derive(Debug, Parser)]
pub struct ContactArgs {
    /// Your name.
    #[arg(long, required = true)]
    pub name: String,

    /// Your email address.
    #[arg(long, required = true)]
    pub email: String,

    /// Subject line.
    #[arg(long, required = true)]
    pub subject: String,

    /// Message body.
    #[arg(long, required = true)]
    pub message: String,
}

/// Arguments for the `catalog` subcommand.
#[derive(Debug, Parser)]
pub struct CatalogArgs {
    /// Text matched against title, author and category.
    #[arg(long, default_value = "")]
    pub query: String,

    /// Restrict results to one category.
    #[arg(long, value_enum)]
    pub category: Option<Category>,
}

/// Arguments for the `render` subcommand.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Step to select before rendering.
    #[arg(long)]
    pub step: Option<String>,
}
