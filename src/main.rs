//! sbom-combiner: merge CycloneDX SBOMs into one document
//!
//! Takes SBOMs produced by independent sub-builds and writes a single combined
//! inventory with deduplicated components, tools and dependency nodes.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_combiner::{
    cli,
    config::{CombineConfig, CombinerConfig, ConfigOverrides},
    identity::IdentityStrategy,
    pipeline::exit_codes,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported SBOM Formats:",
        "\n  CycloneDX: 1.2, 1.3, 1.4, 1.5, 1.6 (JSON, XML input; JSON output)",
        "\n\nIdentity Strategies:",
        "\n  name-group-version (default), purl"
    )
}

#[derive(Parser)]
#[command(name = "sbom-combiner")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Combine multiple CycloneDX SBOMs into one", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    3  Error occurred

EXAMPLES:
    # Combine sub-build SBOMs into one file
    sbom-combiner combine core/bom.json web/bom.xml -o combined.json

    # Match components by Package URL and print merge statistics
    sbom-combiner combine --identity purl --stats build/*/bom.json > combined.json

    # Read one SBOM from standard input
    cat extra.json | sbom-combiner combine base.json -")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `combine` subcommand
#[derive(Parser)]
struct CombineArgs {
    /// SBOM files to combine, in merge order (`-` reads standard input)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Component identity strategy
    #[arg(long, value_enum)]
    identity: Option<IdentityStrategy>,

    /// Drop repeated inner refs when unioning dependency nodes
    #[arg(long)]
    dedupe_inner_refs: bool,

    /// CycloneDX spec version of the combined document
    #[arg(long, env = "SBOM_COMBINER_SPEC_VERSION")]
    spec_version: Option<String>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Print merge statistics as JSON to stderr
    #[arg(long)]
    stats: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine SBOMs into one document
    Combine(CombineArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-combiner.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the combined document
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Combine(args) => {
            let overrides = ConfigOverrides {
                output_file: args.output_file,
                identity: args.identity,
                dedupe_inner_refs: args.dedupe_inner_refs,
                spec_version: args.spec_version,
                compact: args.compact,
                quiet: cli.quiet,
            };
            let (config, loaded_from) =
                CombinerConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }

            let run_config = CombineConfig::new(args.inputs, &config).with_stats(args.stats);
            cli::run_combine(run_config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-combiner", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = sbom_combiner::config::generate_json_schema()
                .context("failed to generate config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    sbom_combiner::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 2] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    sbom_combiner::config::user_config_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in &[
                    ".sbom-combiner.yaml",
                    ".sbom-combiner.yml",
                    "sbom-combiner.yaml",
                    "sbom-combiner.yml",
                ] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match sbom_combiner::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".sbom-combiner.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = sbom_combiner::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
