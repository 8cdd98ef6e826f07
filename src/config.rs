use crate::error::ConfError;
use crate::paths;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub history_file: PathBuf,
    pub vim_motion: bool,
    pub enable_mouse_support: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            history_file: paths::default_history_file(),
            vim_motion: false,
            enable_mouse_support: false,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfError> {
        // XDG config path
        let xdg_config = env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
            });

        Self::from_file(&xdg_config.join("xawp/settings.toml"))
    }

    /// Settings from a TOML file; a missing file gives the defaults.
    pub fn from_file(settings_file: &Path) -> Result<Self, ConfError> {
        let mut settings = Settings::default();
        if !settings_file.exists() {
            return Ok(settings);
        }

        let contents = fs::read_to_string(settings_file).map_err(|source| ConfError::Io {
            path: settings_file.to_path_buf(),
            source,
        })?;
        let value: toml::Value = toml::from_str(&contents).map_err(|source| ConfError::Parse {
            path: settings_file.to_path_buf(),
            source,
        })?;

        if let Some(path_str) = value.get("history_file").and_then(|v| v.as_str()) {
            settings.history_file = PathBuf::from(path_str);
        }

        if let Some(v) = value.get("vim_motion").and_then(|v| v.as_bool()) {
            settings.vim_motion = v;
        }

        if let Some(v) = value.get("enable_mouse_support").and_then(|v| v.as_bool()) {
            settings.enable_mouse_support = v;
        }

        log::debug!("loaded settings from {}", settings_file.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.history_file.ends_with("xawp/history"));
    }

    #[test]
    fn file_overrides_known_keys() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.toml");
        fs::write(
            &file,
            "history_file = \"~/xawp-history\"\nvim_motion = true\nunknown = 1\n",
        )
        .unwrap();

        let settings = Settings::from_file(&file).unwrap();

        assert_eq!(settings.history_file, PathBuf::from("~/xawp-history"));
        assert!(settings.vim_motion);
        assert!(!settings.enable_mouse_support);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.toml");
        fs::write(&file, "vim_motion = = true").unwrap();
        assert!(matches!(
            Settings::from_file(&file),
            Err(ConfError::Parse { .. })
        ));
    }
}
