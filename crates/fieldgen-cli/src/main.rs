// FieldGen CLI entry point

use clap::Parser;
use fieldgen_cli::cli::Cli;

fn main() {
    let args = Cli::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else if args.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    std::process::exit(fieldgen_cli::execute(args));
}
