//! Output rendering and the leveled stderr reporter.
//!
//! Stdout carries only machine-consumable content: unified diff blocks in
//! diff mode and the JSON envelope under `--output json`. Everything else
//! (progress, advisories, the human summary) goes to stderr so diff output
//! can be piped as-is.

use crate::models::RunSummary;
use crate::run::RunOutcome;
use crate::utils;
use serde_json::json;
use serde_json::Value as JsonVal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// Stderr verbosity. `Warn` is the default; `--verbose` raises to `Info`,
/// `--debug` to `Debug`.
pub enum Verbosity {
    Warn,
    Info,
    Debug,
}

#[derive(Debug, Clone, Copy)]
/// Explicit logging handle passed into the orchestrator; there is no
/// global logger state.
pub struct Reporter {
    level: Verbosity,
}

impl Reporter {
    pub fn new(level: Verbosity) -> Self {
        Reporter { level }
    }

    pub fn error(&self, msg: &str) {
        eprintln!("{} {}", utils::error_prefix(), msg);
    }

    pub fn warn(&self, msg: &str) {
        eprintln!("{} {}", utils::warn_prefix(), msg);
    }

    pub fn info(&self, msg: &str) {
        if self.level >= Verbosity::Info {
            eprintln!("{} {}", utils::info_prefix(), msg);
        }
    }

    pub fn debug(&self, msg: &str) {
        if self.level >= Verbosity::Debug {
            eprintln!("{} {}", utils::debug_prefix(), msg);
        }
    }
}

/// Print the run outcome in the requested format.
///
/// In human mode, diff blocks go to stdout and per-file/summary lines to
/// stderr; `check` suppresses the summary entirely.
pub fn print_run(outcome: &RunOutcome, output: &str, check: bool) {
    match output {
        "json" => {
            let envelope = compose_run_json(outcome);
            println!(
                "{}",
                serde_json::to_string_pretty(&envelope).expect("report structs serialize")
            );
        }
        _ => {
            let color = output != "json" && utils::color_enabled();
            for r in &outcome.files {
                if let Some(d) = &r.diff {
                    print!("{}", d);
                }
                if r.wrote {
                    if color {
                        use owo_colors::OwoColorize;
                        eprintln!("{} {}", "formatted:".green().bold(), r.file);
                    } else {
                        eprintln!("formatted: {}", r.file);
                    }
                }
            }
            if let Some(ix) = &outcome.index {
                if let Some(d) = &ix.diff {
                    print!("{}", d);
                }
                if ix.wrote {
                    if color {
                        use owo_colors::OwoColorize;
                        eprintln!("{} {}", "formatted:".green().bold(), ix.file);
                    } else {
                        eprintln!("formatted: {}", ix.file);
                    }
                }
            }
            if !check {
                let s = summary_of(outcome);
                let line = format!(
                    "— Summary — divergent={} files={} skipped={} wrote={}",
                    s.divergent, s.files, s.skipped, s.wrote
                );
                if color {
                    use owo_colors::OwoColorize;
                    eprintln!("{}", line.bold());
                } else {
                    eprintln!("{}", line);
                }
            }
        }
    }
}

fn summary_of(outcome: &RunOutcome) -> RunSummary {
    let skipped = outcome.files.iter().filter(|r| r.skipped).count();
    let wrote = outcome.files.iter().filter(|r| r.wrote).count()
        + outcome.index.as_ref().map_or(0, |ix| usize::from(ix.wrote));
    RunSummary {
        files: outcome.files.len(),
        skipped,
        divergent: outcome.divergent,
        wrote,
    }
}

/// Compose the JSON envelope (pure) for testing/snapshot purposes.
pub fn compose_run_json(outcome: &RunOutcome) -> JsonVal {
    json!({
        "results": &outcome.files,
        "index": &outcome.index,
        "summary": summary_of(outcome),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileReport, IndexReport};

    #[test]
    fn test_compose_run_json_shape() {
        let outcome = RunOutcome {
            files: vec![
                FileReport {
                    file: "a.json".into(),
                    changed: true,
                    skipped: false,
                    wrote: true,
                    diff: Some("--- a/a.json\n".into()),
                },
                FileReport {
                    file: "notes.txt".into(),
                    changed: false,
                    skipped: true,
                    wrote: false,
                    diff: None,
                },
            ],
            index: Some(IndexReport {
                file: "root.json".into(),
                changed: true,
                wrote: false,
                diff: None,
            }),
            divergent: 2,
        };
        let out = compose_run_json(&outcome);
        assert_eq!(out["summary"]["divergent"], 2);
        assert_eq!(out["summary"]["files"], 2);
        assert_eq!(out["summary"]["skipped"], 1);
        assert_eq!(out["summary"]["wrote"], 1);
        assert_eq!(out["results"][0]["file"], "a.json");
        assert!(out["results"][0]["diff"].is_string());
        assert!(out["results"][1]["diff"].is_null());
        assert_eq!(out["index"]["changed"], true);
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Debug > Verbosity::Info);
        assert!(Verbosity::Info > Verbosity::Warn);
    }
}
