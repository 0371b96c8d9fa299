// CLI module for icystream
//
// This module provides the command-line interface on top of the library:
// reading captured Shoutcast/Icecast streams from disk and reporting or
// removing their metadata. It is only compiled into the binary.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::{command_dump, command_strip};
pub use config::{Commands, Config};
pub use output::OutputFormatter;
