use std::io::Read;
use std::path::{Path, PathBuf};

use annotext_config::Config;
use anyhow::{Context, Result};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "annotext")]
#[command(version)]
#[command(about = "Convert between editor leaf trees and annotated text blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of ~/.config/annotext/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Convert a leaf tree (JSON) into a block with annotations (JSON)
    Serialize {
        /// Input file, or `-` for stdin
        file: Option<PathBuf>,
    },
    /// Convert a block with annotations (JSON) into a leaf tree (JSON)
    Deserialize {
        /// Input file, or `-` for stdin
        file: Option<PathBuf>,
    },
    /// Render a block with annotations (JSON) as an HTML fragment
    Render {
        /// Input file, or `-` for stdin
        file: Option<PathBuf>,
    },
    /// List a block's annotation spans with code-point and UTF-16 offsets
    Inspect {
        /// Input file, or `-` for stdin
        file: Option<PathBuf>,
    },
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.command {
        Commands::InitConfig { .. } => Config::default(),
        _ => load_config(cli.config.as_deref())?,
    };
    let pretty = config.output.pretty && !cli.compact;

    let output = match &cli.command {
        Commands::Serialize { file } => commands::serialize(&read_input(file.as_deref())?, pretty)?,
        Commands::Deserialize { file } => {
            commands::deserialize(&read_input(file.as_deref())?, &config.codec, pretty)?
        }
        Commands::Render { file } => {
            commands::render(&read_input(file.as_deref())?, &config.codec)?
        }
        Commands::Inspect { file } => commands::inspect(&read_input(file.as_deref())?)?,
        Commands::InitConfig { force } => init_config(cli.config.as_deref(), *force)?,
    };

    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}

/// Loads the explicit config file, which must exist, or the default one,
/// which may be absent.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let path = Config::expand_path(path);
            log::debug!("Config path: {}", path.display());
            Config::load_from_path(&path)?
                .with_context(|| format!("config file {} not found", path.display()))
        }
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Ok(Config::load()?.unwrap_or_default())
        }
    }
}

/// Writes the default settings to the explicit config path, or to the
/// default location. Refuses to replace an existing file unless `force`.
fn init_config(path: Option<&Path>, force: bool) -> Result<String> {
    let target = match path {
        Some(path) => Config::expand_path(path),
        None => Config::config_path(),
    };
    if target.exists() && !force {
        anyhow::bail!(
            "config file {} already exists; use --force to overwrite",
            target.display()
        );
    }
    let config = Config::default();
    match path {
        Some(_) => config.save_to_path(&target)?,
        None => config.save()?,
    }
    log::info!("Wrote default config to {}", target.display());
    Ok(format!("wrote {}", target.display()))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}
