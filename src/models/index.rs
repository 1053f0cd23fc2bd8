//! Name index: maps lower-cased display names to definition filenames.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `root.json` content. `BTreeMap` keeps entries in natural string
/// order, which is also the canonical serialization order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index(pub BTreeMap<String, String>);

impl Index {
    /// Key of the entry pointing at `filename`, if any.
    pub fn key_for_file(&self, filename: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, v)| v.as_str() == filename)
            .map(|(k, _)| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_file_searches_by_value() {
        let mut ix = Index::default();
        ix.0.insert("plex".into(), "plex.json".into());
        ix.0.insert("syncthing".into(), "syncthing.json".into());
        assert_eq!(ix.key_for_file("plex.json"), Some("plex"));
        assert_eq!(ix.key_for_file("missing.json"), None);
    }
}
