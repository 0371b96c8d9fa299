// CLI configuration
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use icystream::IcyConfig;

/// icystream - ICY/Shoutcast metadata inspection tool
#[derive(Parser, Debug)]
#[command(name = "icystream")]
#[command(about = "Inspect and strip ICY metadata in captured Shoutcast/Icecast streams", long_about = None)]
#[command(version)]
#[command(author = "xwsjjctz <xwsjjctz@icloud.com>")]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "warn")]
    pub log_level: log::LevelFilter,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per entry
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the metadata entries found in captured stream(s)
    Dump {
        /// Captured stream file(s); glob patterns are expanded
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Write the audio payload of a captured stream without metadata
    Strip {
        /// Captured stream file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Destination for the audio payload
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        stream: StreamArgs,
    },
}

/// Stream parameters shared by all subcommands
#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Metadata interval in bytes (the `icy-metaint` header value)
    #[arg(short, long)]
    pub metaint: Option<usize>,

    /// Character encoding of the metadata text
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// JSON file with `metaint` and `encoding`; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl StreamArgs {
    /// Merge the config file (if any) with the command-line flags
    pub fn to_icy_config(&self) -> anyhow::Result<IcyConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                IcyConfig::from_json(&json)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => {
                let metaint = self
                    .metaint
                    .ok_or_else(|| anyhow!("--metaint is required without --config"))?;
                IcyConfig::new(metaint)
            }
        };

        if let Some(metaint) = self.metaint {
            config.metaint = metaint;
        }
        if let Some(encoding) = &self.encoding {
            config.encoding = Some(encoding.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
