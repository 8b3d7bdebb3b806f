//! wixgen CLI - WiX source generator

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use wixgen::{generate, GenConfig, GenError};

#[derive(Parser)]
#[command(name = "wixgen")]
#[command(about = "WiX source generator - bundle a directory into an installable, upgradeable WXS")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Product name, required
    #[arg(long)]
    name: Option<String>,

    /// Product version, must be x.y.z (default: 1.0.0)
    #[arg(long)]
    version: Option<String>,

    /// Product manufacturer, required
    #[arg(long)]
    manufacturer: Option<String>,

    /// Package comments (default: "[name] installer")
    #[arg(long)]
    comments: Option<String>,

    /// Directory with files to bundle, required
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Main executable in directory, required
    #[arg(long)]
    exec: Option<String>,

    /// Icon for the start menu shortcut (default: no icon)
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON file with default settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "wxs")]
    format: OutputFormat,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Wxs,
    Json,
}

impl Cli {
    fn overrides(&self) -> GenConfig {
        GenConfig {
            name: self.name.clone(),
            version: self.version.clone(),
            manufacturer: self.manufacturer.clone(),
            comments: self.comments.clone(),
            input_dir: self.dir.clone(),
            exec: self.exec.clone(),
            icon: self.icon.clone(),
            output: self.out.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{:#}", e).red());
            let gen_error = e.downcast_ref::<GenError>();
            if gen_error.is_some_and(GenError::wants_usage) {
                eprintln!("Run 'wixgen --help' for usage");
            }
            ExitCode::from(gen_error.map_or(1, GenError::exit_code))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let base = match &cli.config {
        Some(path) => GenConfig::from_json_file(path)?,
        None => GenConfig::default(),
    };
    let config = base.merge(cli.overrides()).validate()?;

    let generation = generate(&config)?;

    let document = match cli.format {
        OutputFormat::Wxs => generation.wix.to_wxs(),
        OutputFormat::Json => generation.wix.to_json().map_err(GenError::from)?,
    };

    config
        .output
        .write(&document)
        .with_context(|| format!("failed to write output to {}", config.output))?;
    info!("wrote {} to {}", config.name, config.output);

    Ok(())
}
