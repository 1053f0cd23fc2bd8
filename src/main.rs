//! rockonfmt CLI binary entry point.
//! Resolves configuration, drives the batch run, prints results, and maps
//! outcomes onto the stable exit-status taxonomy.

use clap::Parser;
use rockonfmt::cli::Cli;
use rockonfmt::output::{self, Reporter, Verbosity};
use rockonfmt::{config, run};

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        Verbosity::Debug
    } else if cli.verbose {
        Verbosity::Info
    } else {
        Verbosity::Warn
    };
    let reporter = Reporter::new(level);

    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let repo_root = config::detect_repo_root(&cwd);
    let eff = config::resolve_effective(
        &repo_root,
        cli.root.as_deref(),
        cli.output.as_deref(),
        if cli.check { Some(true) } else { None },
        if cli.diff { Some(true) } else { None },
        if cli.write { Some(true) } else { None },
    );

    match run::run(&eff, &cli.files, &reporter) {
        Ok(outcome) => {
            output::print_run(&outcome, &eff.output, eff.check);
            // Divergence exits 1 unless a diff was requested; --diff
            // emitting its diffs successfully is the success case.
            if outcome.divergent > 0 && !eff.diff {
                std::process::exit(1);
            }
        }
        Err(fatal) => {
            reporter.error(&fatal.to_string());
            std::process::exit(fatal.exit_code());
        }
    }
}
