use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use quest_core::{load_quest_config, load_quest_config_from_env, GameSession, RoboticonShop};
use session_harness::{replay_script, script_art};

#[derive(Parser, Debug)]
#[command(author, version, about="Replays shop and plot effect commands against a headless session", long_about = None)]
struct Args {
    /// Path to a command script, one command per line
    #[arg(long)]
    script: PathBuf,

    /// Quest configuration JSON (defaults to QUEST_CONFIG_PATH, then the builtin catalogue)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop at the first rejected command instead of reporting it and continuing
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    let script_path = args
        .script
        .canonicalize()
        .with_context(|| "Unable to canonicalize script path")?;
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read script at {}", script_path.display()))?;

    let (config, metadata) = match args.config.as_deref() {
        Some(path) => load_quest_config(Some(path)),
        None => load_quest_config_from_env(),
    };
    let mut session = GameSession::with_metadata(config, metadata);
    let mut shop = RoboticonShop::new(&session, script_art());

    let mut stdout = io::stdout().lock();
    let summary = replay_script(&mut session, &mut shop, &script, args.strict, &mut stdout)?;
    drop(stdout);
    tracing::info!(
        script = %script_path.display(),
        commands = summary.executed,
        rejected = summary.rejected,
        "script.replayed"
    );

    println!("=== session ===");
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);

    Ok(())
}
