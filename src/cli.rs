//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rockonfmt",
    version,
    about = "Validate and canonically format Rock-on definition files",
    long_about = "rockonfmt — validate Rock-on definition files against the schema, \
rewrite them into canonical form, and keep the root.json name index in step.\n\n\
Modes combine freely. Configuration precedence: CLI > rockonfmt.toml > defaults.",
    after_help = "Examples:\n  \
rockonfmt --check rockons/*.json\n  \
rockonfmt --diff --root rockons/root.json rockons/plex.json\n  \
rockonfmt --write rockons/*.json",
    arg_required_else_help = true
)]
/// Top-level CLI options.
pub struct Cli {
    /// Validate only; the exit status reports divergence.
    #[arg(short = 'c', long, action = clap::ArgAction::SetTrue)]
    pub check: bool,

    /// Print a unified diff for every file that is not canonical.
    #[arg(short = 'd', long, action = clap::ArgAction::SetTrue)]
    pub diff: bool,

    /// Rewrite divergent files in place with their canonical form.
    #[arg(short = 'w', long, action = clap::ArgAction::SetTrue)]
    pub write: bool,

    /// Index file mapping names to filenames (default: root.json next to
    /// the first document).
    #[arg(short = 'r', long, value_name = "FILE")]
    pub root: Option<String>,

    /// Output mode: human|json (default: human).
    #[arg(long, value_name = "MODE")]
    pub output: Option<String>,

    /// Enable informational logging.
    #[arg(short = 'v', long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Enable debug logging.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub debug: bool,

    /// Definition files or glob patterns.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<String>,
}
