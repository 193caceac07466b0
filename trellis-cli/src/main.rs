//! trellis CLI tool

#![forbid(unsafe_code)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ListCommand, RenderCommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(version)]
#[command(about = "Inspect and render trellis template directories", long_about = None)]
struct Cli {
    /// Load options from this file instead of ./trellis.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every template name found in the directory
    List {
        /// Template directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Template file extension (repeatable)
        #[arg(short, long = "ext")]
        extensions: Vec<String>,
    },
    /// Render one template to stdout
    Render {
        /// Template name without format, e.g. `sessions/new`
        name: String,
        /// Output format
        #[arg(short, long, default_value = "html")]
        format: String,
        /// Template directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// Layout wrapped around HTML output; an empty value disables it
        #[arg(short, long)]
        layout: Option<String>,
        /// JSON object used as the template binding
        #[arg(long)]
        data: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = commands::load_options(cli.config.as_deref())?;

    match cli.command {
        Commands::List { dir, extensions } => {
            ListCommand::new(options, dir, extensions).execute()?;
        }
        Commands::Render {
            name,
            format,
            dir,
            layout,
            data,
        } => {
            let cmd = RenderCommand {
                name,
                format,
                dir,
                layout,
                data,
            };
            cmd.execute(options)?;
        }
    }

    Ok(())
}
