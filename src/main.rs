use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;
use tsort::cli::Cli;
use tsort::cli_handlers;

fn main() {
    // Logs go to stderr so they never mix with the ordering on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli_handlers::handle_sort(cli.input_path()) {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            match e.downcast_ref::<tsort::Error>() {
                Some(err) if err.is_fault() => eprintln!("tsort: internal error: {e:#}"),
                _ => eprintln!("tsort: {e:#}"),
            }
            process::exit(1);
        }
    }
}
