use vsixdl_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; a broken state dir must not stop the CLI.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", e);
    }

    let args = cli::parse_args();
    if let Err(err) = args.run() {
        tracing::debug!("run failed: {:?}", err);
        let (message, code) = cli::report(&err);
        eprintln!("{}", message);
        std::process::exit(code);
    }
}
