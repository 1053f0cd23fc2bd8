//! Configuration discovery and effective settings resolution.
//!
//! An optional `rockonfmt.toml` (or `.yaml`/`.yml`) is discovered by
//! walking up from the working directory, stopping at the config file or a
//! `.git` directory. It can default the index path, the output mode, and
//! the `[format]` mode flags. Precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Mode defaults under `[format]`.
pub struct FormatCfg {
    pub check: Option<bool>,
    pub diff: Option<bool>,
    pub write: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `rockonfmt.toml|yaml|yml`.
pub struct Config {
    /// Default index path, relative to the working directory.
    pub index: Option<String>,
    /// Output mode: human|json.
    pub output: Option<String>,
    pub format: Option<FormatCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the orchestrator.
pub struct Effective {
    /// Index path override; `None` means "root.json next to the first
    /// processed document".
    pub index: Option<String>,
    pub output: String,
    pub check: bool,
    pub diff: bool,
    pub write: bool,
}

/// Walk upward from `start` until a config file or `.git` is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("rockonfmt.toml").exists()
            || cur.join("rockonfmt.yaml").exists()
            || cur.join("rockonfmt.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `Config` from `rockonfmt.toml` or `rockonfmt.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<Config> {
    let toml_path = root.join("rockonfmt.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: Config = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["rockonfmt.yaml", "rockonfmt.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: Config = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and
/// defaults.
pub fn resolve_effective(
    root: &Path,
    cli_index: Option<&str>,
    cli_output: Option<&str>,
    cli_check: Option<bool>,
    cli_diff: Option<bool>,
    cli_write: Option<bool>,
) -> Effective {
    let cfg = load_config(root).unwrap_or_default();

    let index = cli_index.map(|s| s.to_string()).or(cfg.index);
    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let check = cli_check
        .or_else(|| cfg.format.as_ref().and_then(|f| f.check))
        .unwrap_or(false);
    let diff = cli_diff
        .or_else(|| cfg.format.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let write = cli_write
        .or_else(|| cfg.format.as_ref().and_then(|f| f.write))
        .unwrap_or(false);

    Effective {
        index,
        output,
        check,
        diff,
        write,
    }
}
