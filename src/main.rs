use clap::{Parser, Subcommand};
use preview_gal::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "preview-gal")]
#[command(about = "Render a JSON media catalogue into a preview gallery")]
#[command(long_about = "\
Render a JSON media catalogue into a preview gallery

The content document lists media items and, optionally, the order of
categories and a subtitle for each section:

  {
    \"categories\": [\"Foxes\", \"Owls\"],
    \"items\": [
      {
        \"type\": \"video\",             # or \"image\" (default)
        \"src\": \"media/fox.mp4\",
        \"poster\": \"media/fox.jpg\",
        \"preview\": \"media/fox.gif\",   # legacy name: \"gif\"
        \"title\": \"Red Fox\",
        \"description\": \"Dusk, north field\",
        \"category\": \"Foxes\",
        \"identified\": true,
        \"rare\": false
      }
    ],
    \"sectionDescriptions\": { \"identified\": \"...\", \"rare\": \"...\", \"categories\": \"...\" }
  }

A bare array of items is also accepted.

Sections:
  Identified   items with \"identified\": true
  Rare         items with \"rare\": true that are not identified
  Categories   everything else, grouped by category; listed categories
               first, then any others alphabetically

Run 'preview-gal gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content document path or http(s) URL (overrides `content` in config)
    #[arg(long, global = true)]
    content: Option<String>,

    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the content and write the gallery page
    Build,
    /// Load and classify the content without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = resolve_config(&cli.config, cli.content)?;
            println!("==> Building from {}", site_config.content);
            let generated = generate::generate(&site_config, &cli.output)?;
            output::print_summary(&generated.summary, &site_config.sections);
            output::print_generate_output(&generated.summary, &generated.index_path);
        }
        Command::Check => {
            let site_config = resolve_config(&cli.config, cli.content)?;
            println!("==> Checking {}", site_config.content);
            let summary = generate::summarize(&site_config)?;
            output::print_summary(&summary, &site_config.sections);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and apply the `--content` override.
fn resolve_config(
    path: &std::path::Path,
    content: Option<String>,
) -> Result<config::GalleryConfig, config::ConfigError> {
    let mut site_config = config::load_config(path)?;
    if let Some(content) = content {
        site_config.content = content;
    }
    Ok(site_config)
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
