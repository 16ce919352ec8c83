use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};

use clap::Parser;
use color_eyre::Result;
use quest_core::{load_quest_config, load_quest_config_from_env, GameSession};
use tracing::info;

mod app;
mod ui;

use app::InspectorApp;

#[derive(Clone)]
struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(text) = String::from_utf8(buf.to_vec()) {
            let _ = self.sender.send(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Roboticon Quest market and plot inspector", long_about = None)]
struct Cli {
    /// Quest configuration JSON. Falls back to QUEST_CONFIG_PATH, then the builtin catalogue.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let (log_tx, log_rx) = mpsc::channel::<String>();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .with_writer(move || ChannelWriter {
            sender: log_tx.clone(),
        })
        .init();

    let cli = Cli::parse();
    let (config, metadata) = match cli.config.as_deref() {
        Some(path) => load_quest_config(Some(path)),
        None => load_quest_config_from_env(),
    };
    let session = GameSession::with_metadata(config, metadata);
    info!(
        effects = session.effects().len(),
        funds = session.player().money(),
        "Inspector session ready"
    );

    let app = InspectorApp::new(session, log_rx)?;
    app.run()
}
