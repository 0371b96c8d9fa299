// CLI binary entry point for icystream
//
// This is the main entry point for the icystream command-line tool.

mod cli;

use clap::Parser;
use std::process;

use cli::{command_dump, command_strip, Commands, Config, OutputFormatter};

fn main() {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_millis()
        .init();

    log::debug!("icystream v{}", env!("CARGO_PKG_VERSION"));

    let formatter = OutputFormatter::new(config.format, config.quiet);

    let result = match &config.command {
        Commands::Dump { files, stream } => command_dump(files, stream, &formatter),
        Commands::Strip {
            file,
            output,
            stream,
        } => command_strip(file, output, stream, &formatter),
    };

    if let Err(e) = result {
        formatter.print_error(&format!("{:#}", e));
        process::exit(1);
    }
}
