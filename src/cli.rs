use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ruio")]
#[command(
    version,
    about = "Ruio - highlight nested DOM elements and pick one interactively",
    long_about = "Ruio DOM inspection overlay\n\nModes:\n- paint: apply (or clear) the depth-limited border marker over a DOM snapshot.\n- pick: mount the overlay on a snapshot, replay a scripted pointer/keyboard session and report the picked element.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) for depth bounds, exclusion class and marker styles; falls back to $RUIO_CONFIG"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Paint (or clear) borders over a DOM snapshot
    Paint {
        #[arg(long, value_name = "PATH", help = "DOM snapshot (JSON)")]
        dom: PathBuf,

        #[arg(long, help = "Node id to paint from (document root if omitted)")]
        root: Option<String>,

        #[arg(
            long,
            allow_negative_numbers = true,
            help = "Generations below the root to border; clamped to the configured bounds"
        )]
        depth: Option<i64>,

        #[arg(long, help = "Clear borders instead of applying them")]
        disable: bool,

        #[arg(long, help = "Include the annotated snapshot in the output")]
        include_dom: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Replay a scripted picking session over a DOM snapshot
    Pick {
        #[arg(long, value_name = "PATH", help = "DOM snapshot (JSON)")]
        dom: PathBuf,

        #[arg(
            long,
            value_name = "PATH",
            help = "Event script: a JSON or YAML array of pointerMove/click/keyDown events"
        )]
        events: PathBuf,

        #[arg(long, help = "Node id to mount the overlay on (document root if omitted)")]
        root: Option<String>,

        #[arg(long, allow_negative_numbers = true, help = "Border depth while picking")]
        depth: Option<i64>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
