use anyhow::Result;
use clap::{Parser, Subcommand};
use skupack_core::config;
use std::path::PathBuf;

mod commands;

use commands::{run_compose, run_parse, run_pipeline, run_resolve, RunArgs};

/// Top-level CLI for skupack.
#[derive(Debug, Parser)]
#[command(name = "skupack")]
#[command(
    about = "skupack: download product images from catalog sheets, frame them, and zip them per folder",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Parse catalog text files and preview the folders they produce.
    Parse {
        /// Tab-delimited catalog text files (merged in order).
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print the normalised catalog text instead of the preview.
        #[arg(long)]
        render: bool,
    },

    /// Resolve one URL (Drive file, Drive folder or direct link) and report what it yields.
    Resolve {
        /// URL to resolve.
        url: String,
    },

    /// Download every catalog file, apply the frame, and write the zip archive.
    Run {
        /// Tab-delimited catalog text files (merged in order).
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// PNG frame composited over every downloaded image.
        #[arg(long)]
        frame: Option<PathBuf>,

        /// Directory the archive is written to (default: current directory).
        #[arg(long)]
        out: Option<PathBuf>,

        /// User name used as the archive file name prefix.
        #[arg(long, default_value = "user")]
        user: String,

        /// Extra passes over the failed downloads.
        #[arg(long, default_value_t = 0)]
        retries: u32,

        /// Write still-failed items here as catalog text for a later run.
        #[arg(long)]
        failed_out: Option<PathBuf>,
    },

    /// Apply a frame to one local image and write the PNG result.
    Compose {
        /// Base image.
        base: PathBuf,
        /// Frame image (stretched to the base size).
        frame: PathBuf,
        /// Output PNG path.
        out: PathBuf,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!(
            api_key = cfg.drive_api_key.is_some(),
            default_root = %cfg.default_root,
            "loaded config"
        );

        match cli.command {
            CliCommand::Parse { inputs, render } => run_parse(&cfg, &inputs, render)?,
            CliCommand::Resolve { url } => run_resolve(&cfg, url).await?,
            CliCommand::Run {
                inputs,
                frame,
                out,
                user,
                retries,
                failed_out,
            } => {
                let out = match out {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                let args = RunArgs {
                    inputs,
                    frame,
                    out,
                    user,
                    retries,
                    failed_out,
                };
                run_pipeline(&cfg, args).await?;
            }
            CliCommand::Compose { base, frame, out } => run_compose(&base, &frame, &out)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
