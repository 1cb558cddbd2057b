mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, ClientSettings, EmptyPagePolicy};
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::ReviewType;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{DesktopGuiApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Desktop window for browsing college reviews")]
struct Cli {
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    review_source: Option<String>,
    /// Prefills the college id field.
    #[arg(long, default_value = "")]
    college_id: String,
    #[arg(long, default_value_t = ReviewType::Academics)]
    review_type: ReviewType,
    #[arg(long)]
    end_of_results: bool,
}

impl Cli {
    fn into_startup(self, mut settings: ClientSettings) -> StartupConfig {
        if let Some(endpoint) = self.endpoint {
            settings.scrape_endpoint = endpoint;
        }
        if let Some(source) = self.review_source {
            settings.review_source_url = source;
        }
        if self.end_of_results {
            settings.empty_page_policy = EmptyPagePolicy::EndOfResults;
        }
        StartupConfig {
            settings,
            college_id: self.college_id,
            review_type: self.review_type,
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let startup = Cli::parse().into_startup(load_settings());

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup.settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("College Reviews")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "College Reviews",
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, &startup)))),
    )
}
