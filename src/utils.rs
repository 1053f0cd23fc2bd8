//! Supporting helpers: colored message prefixes and path display.

use owo_colors::OwoColorize;
use std::path::{Component, Path, PathBuf};

/// Colors are used unless `NO_COLOR` is set.
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if color_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if color_enabled() {
        "warning:".yellow().bold().to_string()
    } else {
        "warning:".to_string()
    }
}

pub fn info_prefix() -> String {
    if color_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

pub fn debug_prefix() -> String {
    if color_enabled() {
        "debug:".bright_black().to_string()
    } else {
        "debug:".to_string()
    }
}

/// Path relative to the working directory when possible, for display.
pub fn rel_to_wd(path: &Path) -> String {
    let cwd = std::env::current_dir().unwrap_or_default();
    pathdiff::diff_paths(path, &cwd)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Lexically normalize a path (drop `.` components, fold `..` where
/// possible) so equal paths spelled differently compare equal.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_drops_dot_and_folds_dotdot() {
        assert_eq!(clean_path(Path::new("./a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(clean_path(Path::new("a/./b")), PathBuf::from("a/b"));
        assert_eq!(clean_path(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(clean_path(Path::new(".")), PathBuf::from("."));
    }

    #[test]
    fn test_clean_path_makes_spellings_comparable() {
        assert_eq!(
            clean_path(Path::new("dir/./root.json")),
            clean_path(Path::new("dir/root.json"))
        );
    }
}
