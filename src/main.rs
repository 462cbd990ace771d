//! `storeflow` application entry point.
//!
//! This binary drives the bookstore process walkthrough, exports the
//! flowchart, and exposes the catalogue, order lookup and contact form. It
//! uses `eyre` for opaque error handling at the application boundary,
//! converting domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/storeflow/config.toml` or path from `STOREFLOW_CONFIG_PATH`)
//! 3. Environment variables (`STOREFLOW_*`)
//! 4. Command-line arguments

use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;
use storeflow::catalog::{self, Product};
use storeflow::config::{
    AppConfig, CatalogArgs, Cli, Commands, ContactArgs, ExportArgs, InspectArgs, OrderArgs,
    RenderArgs, WalkthroughArgs, load_config,
};
use storeflow::contact::{self, CONTACT_DIRECTORY, ContactMessage, LoggingContactSink};
use storeflow::error::{ExportError, FlowError, Result as StoreflowResult};
use storeflow::export::{ArtefactSink, DirectorySink, ExportOutcome, Exporter, ResvgRasterizer};
use storeflow::flow::{
    FLOW_DESCRIPTION, FLOW_TITLE, InfoPanel, StepRegistry, WalkthroughController,
    WalkthroughSession,
};
use storeflow::logging;
use storeflow::orders::{self, FixtureOrders, Milestone, OrderLookup, OrderRecord};
use storeflow::render::FlowScene;

/// File name used by the `render` subcommand.
const SCENE_FILE_NAME: &str = "bookstore-process-flowchart-scene.svg";

/// Application entry point.
///
/// Loads configuration with layered precedence via `OrthoConfig`, installs the
/// log subscriber, then dispatches to the appropriate subcommand handler.
#[tokio::main(flavor = "current_thread")]
async fn main() -> EyreResult<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).map_err(Report::from)?;

    logging::init(&log_filter(&config))?;

    run(&cli, &config).await.map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`.
async fn run(cli: &Cli, config: &AppConfig) -> StoreflowResult<()> {
    match &cli.command {
        Commands::Steps => list_steps(),
        Commands::Walkthrough(args) => play_walkthrough(config, args).await,
        Commands::Inspect(args) => inspect_step(args),
        Commands::Export(args) => export_flowchart(config, args),
        Commands::Order(args) => {
            look_up_order(args);
            Ok(())
        }
        Commands::Contact(args) => send_contact_message(args),
        Commands::Catalog(args) => {
            list_products(args);
            Ok(())
        }
        Commands::Render(args) => render_scene(config, args),
    }
}

/// Filter directive from the process environment and configuration.
fn log_filter(config: &AppConfig) -> String {
    logging::resolve_filter(&DefaultEnv::new(), config.logging.filter.as_deref())
}

fn bookstore_controller() -> StoreflowResult<WalkthroughController> {
    Ok(WalkthroughController::new(Arc::new(
        StepRegistry::bookstore()?,
    )))
}

/// One line per step with its progress badge and description.
fn describe_active_step(controller: &WalkthroughController) -> Option<String> {
    let InfoPanel::Step { step, status } = controller.info_panel() else {
        return None;
    };
    let badge = controller.progress().map_or_else(String::new, |progress| {
        format!(
            "[Step {} of {} | {}% Complete] ",
            progress.position, progress.total, progress.percent
        )
    });
    let status_line = status.map_or_else(String::new, |playback| {
        format!("\n    {}", playback.message())
    });
    Some(format!(
        "{badge}{}\n    {}{status_line}",
        step.title, step.description
    ))
}

/// List the process steps in walkthrough order.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn list_steps() -> StoreflowResult<()> {
    let registry = StepRegistry::bookstore()?;
    println!("{FLOW_TITLE}");
    println!("{FLOW_DESCRIPTION}");
    for (index, step) in registry.steps().iter().enumerate() {
        println!(
            "{:>2}. {:<14} {} ({})",
            index + 1,
            step.id,
            step.title,
            step.category.as_str()
        );
    }
    Ok(())
}

/// Play the walkthrough on the autoplay timer, or step by step.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
async fn play_walkthrough(config: &AppConfig, args: &WalkthroughArgs) -> StoreflowResult<()> {
    let registry = Arc::new(StepRegistry::bookstore()?);

    if args.manual {
        let mut controller = WalkthroughController::new(registry);
        controller.start();
        controller.toggle_play_pause();
        while let Some(line) = describe_active_step(&controller) {
            println!("{line}");
            if !controller.advance() {
                break;
            }
        }
        return Ok(());
    }

    let mut session = WalkthroughSession::new(
        registry,
        config.autoplay_interval(),
        tokio::runtime::Handle::current(),
    );
    session.start();
    let mut updates = session.subscribe();
    if let Some(line) = session.with_controller(describe_active_step) {
        println!("{line}");
    }
    while session.snapshot().is_playing() {
        if updates.changed().await.is_err() {
            break;
        }
        if let Some(line) = session.with_controller(describe_active_step) {
            println!("{line}");
        }
    }
    println!("Walkthrough complete.");
    Ok(())
}

/// Select one step in inspection mode and show its panel and path.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn inspect_step(args: &InspectArgs) -> StoreflowResult<()> {
    let mut controller = bookstore_controller()?;
    if !controller.select_node(&args.step) {
        return Err(FlowError::UnknownStep {
            id: args.step.clone(),
        }
        .into());
    }

    if let Some(line) = describe_active_step(&controller) {
        println!("{line}");
    }
    let path: Vec<&str> = controller
        .registry()
        .steps()
        .iter()
        .filter(|step| controller.is_step_highlighted(&step.id))
        .map(|step| step.id.as_str())
        .collect();
    println!("Highlighted path: {}", path.join(" -> "));
    for link in controller.registry().links_from(&args.step) {
        let label = link.label.as_deref().unwrap_or("");
        println!("  -> {} {label}", link.to);
    }
    Ok(())
}

/// Export the idle flowchart in the requested format.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn export_flowchart(config: &AppConfig, args: &ExportArgs) -> StoreflowResult<()> {
    let controller = bookstore_controller()?;
    let mut scene = FlowScene::new(
        &controller,
        config.export.canvas_width,
        config.export.canvas_height,
    );
    let exporter = Exporter::new(
        ResvgRasterizer::new(),
        DirectorySink::new(config.output_dir().to_path_buf()),
        config.export.clone(),
    );

    match exporter.export(args.format, &mut scene, Utc::now()) {
        ExportOutcome::Completed(path) => {
            println!("Exported {} to {path}", args.format);
            Ok(())
        }
        ExportOutcome::Failed => Err(ExportError::Abandoned {
            format: args.format.to_string(),
        }
        .into()),
    }
}

/// Write the interactive scene, side panel included.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn render_scene(config: &AppConfig, args: &RenderArgs) -> StoreflowResult<()> {
    let mut controller = bookstore_controller()?;
    if let Some(ref step) = args.step
        && !controller.select_node(step)
    {
        return Err(FlowError::UnknownStep { id: step.clone() }.into());
    }
    let scene = FlowScene::new(
        &controller,
        config.export.canvas_width,
        config.export.canvas_height,
    );
    let sink = DirectorySink::new(config.output_dir().to_path_buf());
    let path = sink.write(SCENE_FILE_NAME, scene.to_svg().as_bytes())?;
    println!("Rendered scene to {path}");
    Ok(())
}

fn format_order(order: &OrderRecord) -> String {
    let mut out = format!(
        "Order {}\n  Status: {}\n  Order Date: {}\n  Total: {}\n  Estimated Delivery: {}\n",
        order.number, order.status, order.placed_on, order.total, order.estimated_delivery
    );
    let reached = order.status.milestones();
    for milestone in Milestone::ALL {
        let mark = if reached.contains(&milestone) { "x" } else { " " };
        out.push_str(&format!("  [{mark}] {}\n", milestone.label()));
    }
    if let Some(tracking) = order.tracking {
        out.push_str(&format!("  Tracking Number: {tracking}\n"));
    }
    out.push_str("  Items:\n");
    for item in order.items {
        out.push_str(&format!(
            "    {} x{}  {}\n",
            item.name,
            item.quantity,
            item.subtotal()
        ));
    }
    out
}

/// Look up an order and print it, or the not-found notice.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn look_up_order(args: &OrderArgs) {
    match orders::lookup(&FixtureOrders, &args.number, &args.email) {
        OrderLookup::Found(order) => print!("{}", format_order(order)),
        OrderLookup::NotFound => {
            println!("Order Not Found");
            println!(
                "We couldn't find an order with that number and email combination. Please check your information and try again."
            );
        }
    }
}

/// Submit a contact message and show the store directory.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn send_contact_message(args: &ContactArgs) -> StoreflowResult<()> {
    let message = ContactMessage {
        name: args.name.clone(),
        email: args.email.clone(),
        subject: args.subject.clone(),
        message: args.message.clone(),
    };
    contact::submit(&LoggingContactSink, &message)?;
    println!("Message sent. You can also reach us here:");
    for section in CONTACT_DIRECTORY {
        println!("{}", section.title);
        for line in section.lines {
            println!("  {line}");
        }
    }
    Ok(())
}

fn product_line(product: &Product) -> String {
    let saving = product
        .original_price
        .zip(product.discount_percent())
        .map_or_else(String::new, |(was, percent)| {
            format!(" (was {was}, save {percent}%)")
        });
    format!(
        "#{} {} by {} [{}] {}{saving} rated {}.{} {}",
        product.id,
        product.title,
        product.author,
        product.category,
        product.price,
        product.rating_tenths / 10,
        product.rating_tenths % 10,
        product.availability
    )
}

/// List catalogue products matching the filters.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn list_products(args: &CatalogArgs) {
    let matches: Vec<&Product> = catalog::search(&args.query, args.category).collect();
    println!("Showing {} products", matches.len());
    for product in matches {
        println!("{}", product_line(product));
    }
    if let Some(category) = args.category {
        tracing::debug!(%category, "catalogue filtered by category");
    }
}
