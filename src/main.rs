use clap::Parser;
use flexi_logger::Logger;

use taskflow::cli::{self, Cli};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; RUST_LOG overrides the default level.
    let _logger = Logger::try_with_env_or_str("warn")?.start()?;

    cli::run(cli)?;
    Ok(())
}
