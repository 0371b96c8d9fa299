// Output formatting for CLI

use std::io::Write;

use serde::Serialize;

use crate::cli::config::OutputFormat;

/// A metadata entry as reported by the `dump` command
#[derive(Debug, Clone, Serialize)]
pub struct MetadataEvent<'a> {
    pub file: &'a str,
    /// Audio bytes delivered before the block carrying this entry
    pub offset: u64,
    pub received_at: String,
    pub key: &'a str,
    pub value: &'a str,
}

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output a single metadata event
    pub fn output_event(&self, event: &MetadataEvent<'_>, writer: &mut impl Write) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(
                    writer,
                    "{} @{:>10}  {} = {}",
                    event.file, event.offset, event.key, event.value
                )?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(event)?)?;
            }
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            eprintln!("  {}", message);
        }
    }
}
