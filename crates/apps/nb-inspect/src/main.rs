use anyhow::{Context, Result};
use clap::Parser;
use nb_inspect::{summarize_frames, verify_stream, InspectConfig, Output};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "nb-inspect", about = "Inspect named binary archive streams", version)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    json: bool,

    #[arg(long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List every frame in a stream.
    Frames {
        path: PathBuf,
        /// Body bytes to preview per frame (overrides the config file).
        #[arg(long)]
        max_bytes: Option<usize>,
    },
    /// Check that a stream parses as a clean sequence of frames.
    Verify { path: PathBuf },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("nb-inspect error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => InspectConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => InspectConfig::default(),
    };
    log::debug!("decoder options: {:?}", config.decoder);
    let output = Output::new(cli.json, cli.quiet);

    match cli.command {
        Command::Frames { path, max_bytes } => {
            let preview = max_bytes.unwrap_or(config.preview_bytes);
            let frames = summarize_frames(open(&path)?, config.decoder, preview)
                .with_context(|| format!("invalid stream {}", path.display()))?;
            output.emit_frames(&frames)
        }
        Command::Verify { path } => {
            let report = verify_stream(open(&path)?, config.decoder)
                .with_context(|| format!("invalid stream {}", path.display()))?;
            output.emit_report(&report)
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
