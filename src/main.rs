use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_grid::Palette;
use pixel_portrait::models::AppConfig;
use pixel_portrait::rendering::{encode_png, Frame, PixelBuffer};
use pixel_portrait::services::{ArtPipeline, PngFileSource, SlideshowPlayer};

#[derive(Parser)]
#[command(name = "pixel-portrait")]
#[command(about = "Turn photos into re-themeable pixel art")]
struct Cli {
    /// Configuration file (overrides CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a PNG photo into a compact artifact
    Encode {
        /// Source PNG
        #[arg(short, long)]
        input: PathBuf,

        /// Artifact file to write (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Snap a PNG photo to the five theme colors at display size
    Posterize {
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Target width in pixels (defaults to display.width)
        #[arg(long)]
        width: Option<usize>,

        /// Target height in pixels (defaults to display.height)
        #[arg(long)]
        height: Option<usize>,
    },
    /// Render an artifact with the configured theme to a PNG file
    Render {
        /// Artifact file
        #[arg(short, long)]
        artifact: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        /// Target size in pixels (defaults to display.width)
        #[arg(long)]
        size: Option<usize>,
    },
    /// Cycle through artifacts, logging each transition
    Slideshow {
        /// Artifact files (defaults to slideshow.artifacts)
        artifacts: Vec<PathBuf>,

        /// Stop after this many seconds (runs until Ctrl-C if omitted)
        #[arg(long)]
        duration: Option<u64>,

        /// Write the last shown frame here on exit
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command(cli.config.as_deref());
        return Ok(());
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixel_portrait=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = config_path(cli.config);
    let config = AppConfig::load_from_path(config_path.as_deref());

    match command {
        Commands::Encode { input, output } => {
            run_encode_command(&config, &input, output.as_deref()).await
        }
        Commands::Posterize {
            input,
            output,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.display.width);
            let height = height.unwrap_or(config.display.height);
            run_posterize_command(&config, &input, &output, width, height).await
        }
        Commands::Render {
            artifact,
            output,
            size,
        } => {
            let size = size.unwrap_or(config.display.width);
            run_render_command(&config, &artifact, &output, size)
        }
        Commands::Slideshow {
            artifacts,
            duration,
            output,
        } => {
            let artifacts = if artifacts.is_empty() {
                config.slideshow.artifacts.clone()
            } else {
                artifacts
            };
            run_slideshow_command(&config, &artifacts, duration, output.as_deref()).await
        }
    }
}

fn config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
}

fn pipeline(config: &AppConfig) -> anyhow::Result<ArtPipeline> {
    Ok(ArtPipeline::new(config.grid.size, config.grid.levels)?)
}

async fn run_encode_command(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let pipeline = pipeline(config)?;
    let artifact = pipeline.create_artifact(&PngFileSource::new(input)).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &artifact)?;
            println!(
                "Encoded {} ({}x{} cells, {} chars)",
                path.display(),
                pipeline.grid_size(),
                pipeline.grid_size(),
                artifact.len()
            );
        }
        None => println!("{artifact}"),
    }
    Ok(())
}

async fn run_posterize_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    width: usize,
    height: usize,
) -> anyhow::Result<()> {
    let palette = config.theme.resolve();
    let image = pipeline(config)?
        .posterize(&PngFileSource::new(input), &palette, width, height)
        .await?;
    let png = encode_png(&image)?;
    std::fs::write(output, &png)?;
    println!("Posterized {} ({} bytes)", output.display(), png.len());
    Ok(())
}

fn run_render_command(
    config: &AppConfig,
    artifact: &Path,
    output: &Path,
    size: usize,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(artifact)?;
    let mut surface = PixelBuffer::new(size, size);
    pipeline(config)?.render_artifact(&mut surface, &text, &config.theme.resolve(), size)?;

    let png = encode_png(&surface.to_image())?;
    std::fs::write(output, &png)?;
    println!("Rendered {} ({} bytes)", output.display(), png.len());
    Ok(())
}

async fn run_slideshow_command(
    config: &AppConfig,
    artifacts: &[PathBuf],
    duration: Option<u64>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if artifacts.is_empty() {
        anyhow::bail!("No artifacts given and none configured under slideshow.artifacts");
    }
    let pipeline = pipeline(config)?;
    let frames = artifacts
        .iter()
        .map(|path| -> anyhow::Result<Frame> {
            let text = std::fs::read_to_string(path)?;
            Ok(Frame::Levels(pipeline.decode_artifact(&text)?))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let palette: Palette = config.theme.resolve();
    let (width, height) = (config.display.width, config.display.height);
    let player = SlideshowPlayer::spawn(PixelBuffer::new(width, height), palette, width, height);
    let mut events = player.subscribe();
    player.replace(frames, config.slideshow.transition_kind());
    tracing::info!(
        frames = artifacts.len(),
        transition = %config.slideshow.transition_kind(),
        "Slideshow started"
    );

    let stop = async {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    };
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => break,
            event = events.recv() => match event {
                Ok(change) => tracing::info!(
                    index = change.index,
                    artifact = %artifacts[change.index].display(),
                    "Slide changed"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed slide change events");
                }
                Err(RecvError::Closed) => {
                    tracing::warn!("Slideshow player stopped unexpectedly");
                    break;
                }
            },
        }
    }

    let surface = player.shutdown().await?;
    if let Some(path) = output {
        std::fs::write(path, encode_png(&surface.to_image())?)?;
        println!("Wrote last frame to {}", path.display());
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command(config_flag: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = config_path(config_flag.map(Path::to_path_buf));

    println!("Pixel Portrait v{VERSION}");
    println!("Photo to pixel-art pipeline\n");

    println!("Configuration:");
    let source = match config_file {
        Some(ref path) if path.exists() => path.display().to_string(),
        Some(ref path) => format!("{} (file not found, using defaults)", path.display()),
        None => "defaults (CONFIG_FILE not set)".to_string(),
    };
    println!("  Config:     {source}");

    let config = AppConfig::load_from_path(config_file.as_deref().filter(|p| p.exists()));
    println!(
        "  Grid:       {}x{} cells, {} levels",
        config.grid.size, config.grid.size, config.grid.levels
    );
    println!(
        "  Display:    {}x{} px",
        config.display.width, config.display.height
    );
    println!(
        "  Slideshow:  {} artifacts, transition '{}'",
        config.slideshow.artifacts.len(),
        config.slideshow.transition_kind()
    );

    println!("\nTheme:");
    let palette = config.theme.resolve();
    for (role, color) in palette.iter() {
        println!("  {:<11} {color}", format!("{role}:"));
    }

    println!("\nCommands:");
    println!("  pixel-portrait encode      Encode a photo into an artifact");
    println!("  pixel-portrait posterize   Snap a photo to the theme colors");
    println!("  pixel-portrait render      Render an artifact to PNG");
    println!("  pixel-portrait slideshow   Cycle through artifacts");
    println!("\nRun 'pixel-portrait --help' for more details.");
}
