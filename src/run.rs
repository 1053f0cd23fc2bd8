//! Sequential batch driver: glob expansion, lazy index load, and the
//! per-document pass: validate, reconcile, canonicalize, compare, write.
//!
//! Documents are processed strictly in caller-supplied order. The index is
//! loaded once, when the first document is reached, and carried as a single
//! mutable accumulator across the whole batch; later documents see earlier
//! documents' corrections. Fatal errors abort immediately with their exit
//! code; advisories are logged through the reporter and processing goes on.

use crate::config::Effective;
use crate::diff;
use crate::error::FatalError;
use crate::format;
use crate::models::index::Index;
use crate::models::{FileReport, IndexReport};
use crate::output::Reporter;
use crate::reconcile::{reconcile, Reconciliation};
use crate::utils;
use serde_json::Value as Json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Everything one invocation produced, for printers and the exit policy.
#[derive(Debug)]
pub struct RunOutcome {
    pub files: Vec<FileReport>,
    pub index: Option<IndexReport>,
    /// Documents plus index that are not byte-identical to canonical form.
    pub divergent: usize,
}

struct IndexState {
    path: PathBuf,
    original: String,
    entries: Index,
}

/// Expand CLI file arguments. Every pattern must match at least one path;
/// a malformed pattern matches nothing, like a nonexistent file.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, FatalError> {
    let mut out = Vec::new();
    for pat in patterns {
        let mut matched = false;
        if let Ok(entries) = glob::glob(pat) {
            for path in entries.flatten() {
                matched = true;
                out.push(path);
            }
        }
        if !matched {
            return Err(FatalError::NoMatches);
        }
    }
    Ok(out)
}

/// Process the whole batch.
pub fn run(
    eff: &Effective,
    patterns: &[String],
    reporter: &Reporter,
) -> Result<RunOutcome, FatalError> {
    let paths = expand_patterns(patterns)?;

    let mut reports: Vec<FileReport> = Vec::new();
    let mut divergent = 0usize;
    let mut index_state: Option<IndexState> = None;
    let mut last_doc_perms: Option<fs::Permissions> = None;

    for path in &paths {
        reporter.info(&format!("checking {}", path.display()));
        let raw = fs::read_to_string(path).map_err(|e| FatalError::ReadInput {
            file: path.clone(),
            source: e,
        })?;
        // Syntax gate before anything else; a file that is not JSON at all
        // is fatal even when the index has problems of its own.
        let value: Json =
            serde_json::from_str(&raw).map_err(|e| FatalError::DocumentSyntax {
                file: path.clone(),
                source: e,
            })?;

        if index_state.is_none() {
            index_state = Some(load_index(eff, path, reporter)?);
        }
        let ix = index_state.as_mut().expect("index loaded above");

        // The index itself may appear among the inputs; it was validated on
        // load and is not a definition document.
        if utils::clean_path(path) == utils::clean_path(&ix.path) {
            reporter.warn(&format!(
                "skipped definition validation for index {}",
                path.display()
            ));
            reports.push(FileReport {
                file: utils::rel_to_wd(path),
                changed: false,
                skipped: true,
                wrote: false,
                diff: None,
            });
            continue;
        }

        let doc = match format::from_value(value) {
            Ok(doc) => doc,
            Err(err) => {
                let json_name = path.extension().map_or(false, |e| e == "json");
                if json_name {
                    return Err(FatalError::DocumentSchema {
                        file: path.clone(),
                        reason: err.to_string(),
                    });
                }
                reporter.warn(&format!(
                    "{} is not named *.json and does not parse as a definition, skipping",
                    path.display()
                ));
                reports.push(FileReport {
                    file: utils::rel_to_wd(path),
                    changed: false,
                    skipped: true,
                    wrote: false,
                    diff: None,
                });
                continue;
            }
        };

        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();
        let expected_key = doc.name().to_lowercase();
        match reconcile(&mut ix.entries, &filename, doc.name()) {
            Reconciliation::Unchanged => {}
            Reconciliation::Added => {
                reporter.warn(&format!("no index entry for {}", filename));
                reporter.info(&format!(
                    "added index entry {:?} -> {:?} in memory; use --write to persist",
                    expected_key, filename
                ));
            }
            Reconciliation::Renamed { stale } => {
                reporter.warn(&format!(
                    "index name mismatch for {}: have {:?}, expected {:?}",
                    filename, stale, expected_key
                ));
                reporter.info("index entry corrected in memory; use --write to persist");
            }
        }
        reporter.debug(&format!("index entries: {:?}", ix.entries));

        let canonical = format::canonical_json(&doc).map_err(|e| FatalError::Serialize {
            file: path.clone(),
            source: e,
        })?;
        let changed = canonical != raw;
        if changed {
            divergent += 1;
        }
        let diff_text = if eff.diff && changed {
            diff::unified(
                &format!("a/{}", diff_label(path)),
                &format!("b/{}", diff_label(path)),
                &raw,
                &canonical,
            )
        } else {
            None
        };

        // Kept for the index fallback: a freshly created index inherits the
        // permission bits of the last-processed document.
        last_doc_perms = fs::metadata(path).ok().map(|m| m.permissions());

        let mut wrote = false;
        if eff.write && changed {
            reporter.debug(&format!("overwriting {}", path.display()));
            let perms = last_doc_perms.clone();
            write_with_mode(path, &canonical, perms).map_err(|e| FatalError::WriteDocument {
                file: path.clone(),
                source: e,
            })?;
            wrote = true;
        }

        reports.push(FileReport {
            file: utils::rel_to_wd(path),
            changed,
            skipped: false,
            wrote,
            diff: diff_text,
        });
    }

    let mut index_report = None;
    if let Some(ix) = index_state {
        let canonical = format::canonical_json(&ix.entries).map_err(|e| FatalError::Serialize {
            file: ix.path.clone(),
            source: e,
        })?;
        let changed = canonical != ix.original;
        if changed {
            divergent += 1;
        }
        let diff_text = if eff.diff && changed {
            diff::unified(
                &format!("a/{}", diff_label(&ix.path)),
                &format!("b/{}", diff_label(&ix.path)),
                &ix.original,
                &canonical,
            )
        } else {
            None
        };
        let mut wrote = false;
        if eff.write && changed {
            reporter.debug(&format!("overwriting index {}", ix.path.display()));
            let perms = fs::metadata(&ix.path)
                .ok()
                .map(|m| m.permissions())
                .or(last_doc_perms);
            write_with_mode(&ix.path, &canonical, perms).map_err(|e| FatalError::WriteIndex {
                file: ix.path.clone(),
                source: e,
            })?;
            wrote = true;
        }
        index_report = Some(IndexReport {
            file: utils::rel_to_wd(&ix.path),
            changed,
            wrote,
            diff: diff_text,
        });
    }

    Ok(RunOutcome {
        files: reports,
        index: index_report,
        divergent,
    })
}

fn load_index(
    eff: &Effective,
    first_doc: &Path,
    reporter: &Reporter,
) -> Result<IndexState, FatalError> {
    let path = match &eff.index {
        Some(p) => {
            reporter.info(&format!("using passed index {}", p));
            PathBuf::from(p)
        }
        None => {
            let p = first_doc
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("root.json");
            reporter.info(&format!("using same-path index {}", p.display()));
            p
        }
    };
    let original = fs::read_to_string(&path).map_err(|e| FatalError::ReadIndex {
        file: path.clone(),
        source: e,
    })?;
    let value: Json = serde_json::from_str(&original).map_err(|e| FatalError::IndexSyntax {
        file: path.clone(),
        source: e,
    })?;
    let entries = format::index_from_value(value).map_err(|e| FatalError::IndexSchema {
        file: path.clone(),
        reason: e.to_string(),
    })?;
    Ok(IndexState {
        path,
        original,
        entries,
    })
}

/// The `a/`-`b/` label body: the path as given, without a leading slash.
fn diff_label(path: &Path) -> String {
    path.to_string_lossy().trim_start_matches('/').to_string()
}

fn write_with_mode(path: &Path, contents: &str, perms: Option<fs::Permissions>) -> io::Result<()> {
    fs::write(path, contents)?;
    if let Some(p) = perms {
        fs::set_permissions(path, p)?;
    }
    Ok(())
}
