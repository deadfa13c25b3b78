use ncp_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    logging::init();

    if let Err(err) = Cli::run_from_args() {
        eprintln!("ncp error: {:#}", err);
        std::process::exit(1);
    }
}
