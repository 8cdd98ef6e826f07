use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FRAME_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Image frames below `dir`, ordered by file name.
pub fn load_frames(dir: &Path) -> Vec<PathBuf> {
    let mut frames: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect();

    frames.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn keeps_images_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("more")).unwrap();
        for name in ["b.PNG", "a.jpg", "more/c.gif", "notes.txt", "d"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let names: Vec<String> = load_frames(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["a.jpg", "b.PNG", "c.gif"]);
    }

    #[test]
    fn missing_directory_has_no_frames() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_frames(&dir.path().join("nope")).is_empty());
    }
}
