mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::CatalogApp;

#[derive(Parser, Debug)]
#[command(name = "catalog_gui", about = "Catálogo Departamento")]
struct Args {
    /// Base URL of the catalog service, e.g. http://127.0.0.1:3000/api
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings()?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let toast_duration = settings.toast_auto_close();
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Catálogo Departamento")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Catálogo Departamento",
        options,
        Box::new(move |_cc| Ok(Box::new(CatalogApp::new(cmd_tx, ui_rx, toast_duration)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run catalog window: {err}"))
}
