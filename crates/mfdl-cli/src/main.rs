use mfdl_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the
    // state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Every failure is reported here and the process still exits normally.
    if let Err(err) = Cli::run_from_args() {
        tracing::error!("{:#}", err);
        println!("Unexpected error: {:#}", err);
    }
}
