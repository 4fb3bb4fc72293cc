// In app/src/main.rs

use anyhow::{Context, Result};
use app_config::{Settings, ViewerSettings};
use clap::{Parser, Subcommand};
use projections::{HtmlCanvas, PageMode, ReportView, Table, render_page};
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Renders exported backtest reports as charts and tables.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Renders a report file into a self-contained HTML page.
    Render {
        /// Path to the exported report JSON.
        #[arg(short, long)]
        file: PathBuf,

        /// IANA time zone for dates (e.g., "America/New_York").
        #[arg(short, long)]
        time_zone: Option<String>,

        /// Where to write the page.
        #[arg(short, long, default_value = "report.html")]
        out: PathBuf,
    },

    /// Prints the statistics block and both tables to stdout.
    Summary {
        /// Path to the exported report JSON.
        #[arg(short, long)]
        file: PathBuf,

        /// IANA time zone for dates (e.g., "America/New_York").
        #[arg(short, long)]
        time_zone: Option<String>,
    },

    /// Serves the interactive viewer over HTTP.
    Serve,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings().context("Failed to load configuration")?;
    init_tracing(&settings);

    // Parse command-line arguments.
    let cli = Cli::parse();

    tracing::info!(environment = %settings.app.environment, "Starting report viewer");

    match cli.command {
        Commands::Render {
            file,
            time_zone,
            out,
        } => {
            handle_render(settings.viewer, &file, time_zone, &out).await?;
        }
        Commands::Summary { file, time_zone } => {
            handle_summary(settings.viewer, &file, time_zone).await?;
        }
        Commands::Serve => {
            web_server::run(settings.server, settings.viewer).await?;
        }
    }

    tracing::info!("Report viewer has finished successfully.");

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    // Request traces only show up when debugging.
    let http_level = if level >= tracing::Level::DEBUG {
        level
    } else {
        tracing::Level::WARN
    };
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("tower_http", http_level)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Loads and renders `file` into a fresh view drawn on an HTML canvas.
async fn rendered_view(
    mut viewer: ViewerSettings,
    file: &Path,
    time_zone: Option<String>,
) -> Result<(ReportView, HtmlCanvas, ViewerSettings)> {
    if time_zone.is_some() {
        viewer.default_time_zone = time_zone;
    }
    let canvas = HtmlCanvas::new();
    let mut view = ReportView::from_settings(&viewer, Box::new(canvas.clone()))?;

    let report = report_loader::read_report(file)
        .await
        .with_context(|| format!("Failed to load report from {}", file.display()))?;
    view.load_report(report);
    view.render()?;
    Ok((view, canvas, viewer))
}

/// Handles the logic for the `render` subcommand.
async fn handle_render(
    viewer: ViewerSettings,
    file: &Path,
    time_zone: Option<String>,
    out: &Path,
) -> Result<()> {
    let (view, canvas, viewer) = rendered_view(viewer, file, time_zone).await?;
    let page = render_page(&view, &canvas, &viewer, PageMode::Static)?;
    tokio::fs::write(out, page)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!(out = %out.display(), time_zone = %view.time_zone(), "Report page written.");
    Ok(())
}

/// Handles the logic for the `summary` subcommand.
async fn handle_summary(viewer: ViewerSettings, file: &Path, time_zone: Option<String>) -> Result<()> {
    let (view, _canvas, _) = rendered_view(viewer, file, time_zone).await?;

    println!("\n--- Key Statistics ({}) ---", view.time_zone());
    for line in view.statistics() {
        println!("  {}: {}", line.label, line.value);
    }
    print_table("Closed Trades", view.trades_table());
    print_table("Orders", view.orders_table());
    Ok(())
}

/// Prints a table with every column padded to its widest cell.
fn print_table(title: &str, table: &Table) {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in table.rows() {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("\n--- {} ({} rows) ---", title, table.len());
    println!("{}", line(table.columns.to_vec()));
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for row in table.rows() {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}
