mod cli;
mod commands;
mod formatting;
mod pipeline;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_paint, run_pick};

fn main() -> ExitCode {
    let args = cli::parse();
    settings::init_logging(args.verbose);

    match args.command {
        Commands::Paint {
            dom,
            root,
            depth,
            disable,
            include_dom,
            format,
            output,
        } => run_paint(
            args.config,
            dom,
            root,
            depth,
            disable,
            include_dom,
            format,
            output,
        ),
        Commands::Pick {
            dom,
            events,
            root,
            depth,
            format,
            output,
        } => run_pick(args.config, dom, events, root, depth, format, output),
    }
}
