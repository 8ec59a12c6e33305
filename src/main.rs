mod app;

use app::KnowledgeCardsApp;
use clap::Parser;
use knowledge_cards::config::{AppConfig, Cli};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::from(Cli::parse());
    log::info!(
        "Starting with catalog {:?}, locale {}",
        config.catalog_path,
        config.locale
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Knowledge Cards",
        options,
        Box::new(|_cc| Ok(Box::new(KnowledgeCardsApp::new(config)))),
    )
}
