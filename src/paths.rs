use crate::error::HistoryError;
use std::fs;
use std::path::{Component, Path, PathBuf};

fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("xawp")
}

pub fn default_history_file() -> PathBuf {
    cache_dir().join("history")
}

pub fn default_log_file() -> PathBuf {
    cache_dir().join("xawp.log")
}

/// Turn a user supplied path into an absolute, lexically clean one and make
/// sure its parent directory exists.
pub fn normalize(raw: &Path) -> Result<PathBuf, HistoryError> {
    if raw.as_os_str().is_empty() {
        return Err(HistoryError::InvalidArgument("empty path".into()));
    }

    let expanded = expand_home(raw);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = std::env::current_dir().map_err(|e| HistoryError::io(&expanded, e))?;
        cwd.join(expanded)
    };
    let canonical = clean(&absolute);

    if let Some(parent) = canonical.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| HistoryError::io(parent, e))?;
            log::debug!("created directory {}", parent.display());
        }
    }

    Ok(canonical)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

// Resolves `.` and `..` without touching the filesystem.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_drops_dot_segments() {
        assert_eq!(
            clean(Path::new("/a/./b/../c//d")),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(clean(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn normalize_creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("nested/./deeper/../cache/history");

        let path = normalize(&raw).unwrap();

        assert_eq!(path, dir.path().join("nested/cache/history"));
        assert!(dir.path().join("nested/cache").is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn normalize_makes_relative_paths_absolute() {
        let path = normalize(Path::new("relative-history-file")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("relative-history-file"));
    }

    #[test]
    fn normalize_rejects_empty_path() {
        assert!(matches!(
            normalize(Path::new("")),
            Err(HistoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/x/y")), home.join("x/y"));
        }
        assert_eq!(expand_home(Path::new("~user/x")), PathBuf::from("~user/x"));
    }
}
