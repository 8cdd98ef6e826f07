use crate::console::{self, Severity};
use crate::error::HistoryError;
use crate::paths;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, HistoryError>;

/// Most entries kept when loading the cache file.
pub const CAPACITY: usize = 50;

/// Longest path accepted by `set`.
pub const PATH_MAX: usize = 4096;

/// Outcome of removing a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(String),
    /// Nothing to remove; the cache and its file are untouched.
    EmptyList,
}

/// Recently used configuration paths, newest first, mirrored to a flat cache
/// file with one path per line.
///
/// Positions are 1-based at this API. A single process and thread is assumed
/// to own the cache file; nothing locks it.
///
/// The capacity is only enforced while loading: `set` never evicts, so a
/// long session can grow past [`CAPACITY`] until the next load trims it.
#[derive(Debug, Default)]
pub struct HistoryCache {
    cache_file_path: PathBuf,
    entries: VecDeque<String>,
}

impl HistoryCache {
    /// Open the cache at `cache_file`, creating the file (and its directory)
    /// when it does not exist yet.
    ///
    /// Lines are pushed to the front as they are read, so the last line of the
    /// file becomes entry 1.
    pub fn init(cache_file: &Path) -> Result<Self> {
        let mut cache = HistoryCache {
            cache_file_path: paths::normalize(cache_file)?,
            entries: VecDeque::new(),
        };
        cache.load()?;
        Ok(cache)
    }

    fn load(&mut self) -> Result<()> {
        self.entries.clear();

        let file = match File::open(&self.cache_file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                File::create(&self.cache_file_path).map_err(|e| self.io_failure("creating", e))?;
                log::debug!("created empty cache {}", self.cache_file_path.display());
                return Ok(());
            }
            Err(e) => return Err(self.io_failure("opening", e)),
        };

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut overflow = false;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| self.io_failure("reading", e))?;
            if read == 0 {
                break;
            }

            // Entries are handed out as strings; a path that is not UTF-8 is
            // dropped here and disappears from the file on the next write.
            let Ok(line) = std::str::from_utf8(&buf) else {
                log::warn!(
                    "skipping non UTF-8 line in {}: {:?}",
                    self.cache_file_path.display(),
                    String::from_utf8_lossy(&buf).trim_end()
                );
                continue;
            };
            let line = line.strip_suffix('\n').unwrap_or(line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            if self.entries.len() == CAPACITY {
                overflow = true;
                break;
            }
            self.entries.push_front(line.to_string());
        }

        log::debug!(
            "loaded {} entries from {}",
            self.entries.len(),
            self.cache_file_path.display()
        );

        if overflow {
            log::warn!(
                "{} holds more than {CAPACITY} entries, truncating",
                self.cache_file_path.display()
            );
            self.persist()?;
        }
        Ok(())
    }

    // Rewrites the whole file from memory, entry 1 first.
    fn persist(&self) -> Result<()> {
        let file =
            File::create(&self.cache_file_path).map_err(|e| self.io_failure("opening", e))?;
        let mut writer = BufWriter::new(file);
        for entry in &self.entries {
            writeln!(writer, "{entry}").map_err(|e| self.io_failure("writing", e))?;
        }
        let file = writer
            .into_inner()
            .map_err(|e| self.io_failure("flushing", e.into_error()))?;
        file.sync_all().map_err(|e| self.io_failure("closing", e))?;
        Ok(())
    }

    fn io_failure(&self, action: &str, source: io::Error) -> HistoryError {
        console::emit(
            Severity::Error,
            &format!(
                "Error {action} the file {}: {source}",
                self.cache_file_path.display()
            ),
        );
        let err = HistoryError::io(&self.cache_file_path, source);
        log::debug!("{action} failed, os error code {:?}", err.os_code());
        err
    }

    /// Put `config_path` in front of every other entry and rewrite the file.
    /// Duplicates are kept.
    pub fn set(&mut self, config_path: &str) -> Result<()> {
        if config_path.is_empty() {
            return Err(HistoryError::InvalidArgument("empty path".into()));
        }
        if config_path.contains(['\n', '\r']) {
            return Err(HistoryError::InvalidArgument(format!(
                "path contains a line break: {config_path:?}"
            )));
        }
        if config_path.len() > PATH_MAX {
            return Err(HistoryError::InvalidArgument(format!(
                "path is longer than {PATH_MAX} bytes"
            )));
        }

        self.entries.push_front(config_path.to_string());
        self.persist()
    }

    /// Entry at 1-based `index`. An empty cache yields `Ok(None)`.
    pub fn get(&self, index: usize) -> Result<Option<String>> {
        if index == 0 {
            return Err(HistoryError::InvalidArgument("index starts at 1".into()));
        }
        if self.entries.is_empty() {
            return Ok(None);
        }
        self.entries
            .get(index - 1)
            .cloned()
            .map(Some)
            .ok_or(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Remove the entry at 1-based `index` and rewrite the file.
    pub fn clear_element(&mut self, index: usize) -> Result<Removal> {
        if index == 0 {
            return Err(HistoryError::InvalidArgument("index starts at 1".into()));
        }
        if self.entries.is_empty() {
            console::emit(Severity::Info, "History is empty, nothing to clear");
            return Ok(Removal::EmptyList);
        }

        let len = self.entries.len();
        let removed = self
            .entries
            .remove(index - 1)
            .ok_or(HistoryError::IndexOutOfRange { index, len })?;
        self.persist()?;
        Ok(Removal::Removed(removed))
    }

    /// Drop every entry and truncate the cache file.
    pub fn clear_all(&mut self) -> Result<()> {
        self.entries.clear();
        File::create(&self.cache_file_path).map_err(|e| self.io_failure("truncating", e))?;
        Ok(())
    }

    /// Throw away memory and load the cache file again, picking up changes
    /// made behind our back.
    pub fn refresh(&mut self) -> Result<()> {
        let path = self.cache_file_path.clone();
        self.unref();
        self.cache_file_path = path;

        // The directory may have been removed since init.
        paths::normalize(&self.cache_file_path)?;
        self.load()
    }

    /// Release all entries and forget the cache file.
    pub fn unref(&mut self) {
        self.entries.clear();
        self.cache_file_path = PathBuf::new();
    }

    pub fn cache_file_path(&self) -> &Path {
        &self.cache_file_path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
