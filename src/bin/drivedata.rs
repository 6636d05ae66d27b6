use clap::Parser;
use colored::Colorize;
use drivedata_core::cli::{self, Cli};
use drivedata_core::exit::DriveDataExit;
use drivedata_core::logging;

fn main() -> DriveDataExit {
    let cli = Cli::parse();
    logging::init(cli.verbose, &cli.debug);

    match cli::dispatch::execute(&cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            DriveDataExit::Error
        }
    }
}
