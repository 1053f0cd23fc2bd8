//! Index reconciliation between a definition file and the name index.
//!
//! The index entry for a file must be keyed by the lower-cased display name
//! of the Rock-on inside it. Reconciliation searches by filename value and
//! insert-or-corrects the entry, always mutating the in-memory index; only
//! `--write` persists the result. Running it twice for the same document is
//! a no-op the second time.

use crate::models::index::Index;

/// What reconciling one document did to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The entry was already present under the expected key.
    Unchanged,
    /// No entry pointed at this file; a fresh one was inserted.
    Added,
    /// An entry pointed at this file under the wrong key; it was replaced.
    Renamed { stale: String },
}

/// Insert-or-correct the index entry for one definition file.
pub fn reconcile(index: &mut Index, filename: &str, display_name: &str) -> Reconciliation {
    let expected = display_name.to_lowercase();
    let found = index.key_for_file(filename).map(str::to_owned);
    let outcome = match found {
        Some(key) if key == expected => Reconciliation::Unchanged,
        Some(key) => {
            index.0.remove(&key);
            Reconciliation::Renamed { stale: key }
        }
        None => Reconciliation::Added,
    };
    index.0.insert(expected, filename.to_owned());
    outcome
}
