//! Replays a saved drawings file on a headless chart and prints the draw
//! commands each drawing produces, as JSON, on stdout.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chartmark::{init_logging, Config, DrawingsFile, HeadlessHost, ToolBox, VERSION};
use clap::Parser;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")");

#[derive(Parser, Debug)]
#[command(name = "chartmark")]
#[command(version = LONG_VERSION)]
#[command(about = "Replay a saved drawings file and print its draw commands", long_about = None)]
struct Args {
    /// Drawings file or bare JSON record array
    drawings: PathBuf,

    /// Config file path (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::load_or_default(&Config::default_path())?),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging()?;
    tracing::debug!("chartmark {}", VERSION);
    let config = load_config(args.config.as_deref())?;

    let mut toolbox = ToolBox::new(HeadlessHost::default(), config, Box::new(|_: String| {}));

    // Either a versioned drawings file or a bare record array.
    match DrawingsFile::load_from_file(&args.drawings) {
        Ok(file) => {
            tracing::info!("Drawings file {} saved at {}", file.version, file.saved_at);
            for drawing in file.drawings() {
                toolbox.tool_mut().add_new_drawing(drawing);
            }
        }
        Err(e) => {
            tracing::debug!("Not a drawings file ({:#}), reading as records", e);
            let json = std::fs::read_to_string(&args.drawings)
                .with_context(|| format!("Failed to read {}", args.drawings.display()))?;
            toolbox
                .load_drawings(&json)
                .context("Failed to parse drawing records")?;
        }
    }

    let frames: Vec<serde_json::Value> = toolbox
        .tool_mut()
        .render()
        .into_iter()
        .map(|(id, commands)| serde_json::json!({ "id": id, "commands": commands }))
        .collect();

    println!("{}", serde_json::to_string_pretty(&frames)?);
    Ok(())
}
