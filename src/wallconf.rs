use crate::error::ConfError;
use crate::frames;
use std::fs;
use std::path::Path;

const WIKI_URL: &str = "https://github.com/TheRealOne78/OAWP/wiki";

/// Values of one wallpaper configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct WallConf {
    /// Minimal compatible version string.
    pub version: String,
    /// Directory holding every frame to display.
    pub path: String,
    /// Seconds between two frames, `-1.0` when unset.
    pub time: f64,
    pub debug: Option<bool>,
    /// When set, this image is applied once and the animation is skipped.
    pub static_wallpaper: String,
}

impl Default for WallConf {
    fn default() -> Self {
        WallConf {
            version: String::new(),
            path: String::new(),
            time: -1.0,
            debug: None,
            static_wallpaper: String::new(),
        }
    }
}

impl WallConf {
    pub fn clear(&mut self) {
        *self = WallConf::default();
    }

    /// Human readable lines describing this configuration.
    pub fn summary(&self) -> Vec<String> {
        let or_unset = |s: &str| {
            if s.is_empty() {
                "(unset)".to_string()
            } else {
                s.to_string()
            }
        };
        let frames = if self.path.is_empty() {
            0
        } else {
            frames::load_frames(Path::new(&self.path)).len()
        };

        vec![
            format!("Version: {}", or_unset(&self.version)),
            format!("Images: {}", or_unset(&self.path)),
            format!("Frames: {frames}"),
            if self.time < 0.0 {
                "Time: (unset)".to_string()
            } else {
                format!("Time: {}s", self.time)
            },
            match self.debug {
                Some(debug) => format!("Debug: {debug}"),
                None => "Debug: (unset)".to_string(),
            },
            format!("Static wallpaper: {}", or_unset(&self.static_wallpaper)),
        ]
    }
}

pub fn read_config(path: &Path) -> Result<WallConf, ConfError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&contents).map_err(|source| ConfError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let string = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_default()
    };

    let time = value
        .get("time")
        .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
        .unwrap_or(-1.0);

    Ok(WallConf {
        version: string("version"),
        path: string("path"),
        time,
        debug: value.get("debug").and_then(|v| v.as_bool()),
        static_wallpaper: string("static-wallpaper"),
    })
}

pub fn write_config(conf: &WallConf, path: &Path) -> Result<(), ConfError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let quoted = |s: &str| toml::Value::String(s.to_string()).to_string();

    let debug = match conf.debug {
        Some(debug) => format!("debug = {debug}"),
        None => "#debug = false".to_string(),
    };
    let static_comment = if conf.static_wallpaper.is_empty() { "#" } else { "" };

    let out = format!(
        "### {file_name} - generated with xawp\n\
         # v{pkg_version}\n\
         #\n\
         # See wiki page for more info:\n\
         # {WIKI_URL}\n\
         \n\
         ### Version\n\
         # Minimal compatible version string\n\
         version = {version}\n\
         \n\
         ### Path to images directory\n\
         # It needs to contain every frame to display\n\
         path = {images}\n\
         \n\
         ### Time\n\
         # Set time to pause between 2 frames\n\
         time = {time}\n\
         \n\
         ### Debug\n\
         # If true, debug info will start display\n\
         {debug}\n\
         \n\
         ### Static Image Wallpaper\n\
         # If uncommented, the wallpaper is set once and the program exits\n\
         {static_comment}static-wallpaper = {static_wallpaper}\n",
        pkg_version = env!("CARGO_PKG_VERSION"),
        version = quoted(&conf.version),
        images = quoted(&conf.path),
        time = toml::Value::Float(conf.time),
        static_wallpaper = quoted(&conf.static_wallpaper),
    );

    fs::write(path, out).map_err(|source| ConfError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WallConf {
        WallConf {
            version: "1.2".into(),
            path: "/home/me/frames \"night\"".into(),
            time: 0.25,
            debug: Some(true),
            static_wallpaper: "/home/me/still.png".into(),
        }
    }

    #[test]
    fn written_config_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("night.conf");

        write_config(&sample(), &path).unwrap();

        assert_eq!(read_config(&path).unwrap(), sample());
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("### night.conf - generated with xawp\n"));
    }

    #[test]
    fn unset_fields_are_commented_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.conf");

        write_config(&WallConf::default(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n\n### Version\n# Minimal compatible version string\nversion = \"\"\n\n"));
        assert!(text.contains("#debug = false\n"));
        assert!(text.contains("#static-wallpaper = \"\"\n"));
        assert_eq!(read_config(&path).unwrap(), WallConf::default());
    }

    #[test]
    fn missing_or_mistyped_keys_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.conf");
        fs::write(&path, "path = \"/frames\"\ntime = 2\ndebug = \"yes\"\nversion = 3\n").unwrap();

        let conf = read_config(&path).unwrap();

        assert_eq!(conf.path, "/frames");
        assert_eq!(conf.time, 2.0);
        assert_eq!(conf.debug, None);
        assert_eq!(conf.version, "");
        assert_eq!(conf.static_wallpaper, "");
    }

    #[test]
    fn read_errors_are_typed() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.conf");
        assert!(matches!(read_config(&missing), Err(ConfError::Io { .. })));

        let broken = dir.path().join("broken.conf");
        fs::write(&broken, "path = \n").unwrap();
        assert!(matches!(read_config(&broken), Err(ConfError::Parse { .. })));
    }

    #[test]
    fn summary_counts_frames() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("001.png"), b"").unwrap();
        fs::write(dir.path().join("002.png"), b"").unwrap();
        let conf = WallConf {
            path: dir.path().to_string_lossy().into_owned(),
            time: 0.5,
            ..WallConf::default()
        };

        let lines = conf.summary();

        assert_eq!(lines[0], "Version: (unset)");
        assert_eq!(lines[2], "Frames: 2");
        assert_eq!(lines[3], "Time: 0.5s");
        assert_eq!(lines[4], "Debug: (unset)");
    }

    #[test]
    fn clear_resets_to_defaults() {
        let mut conf = sample();
        conf.clear();
        assert_eq!(conf, WallConf::default());
        assert_eq!(conf.time, -1.0);
    }
}
