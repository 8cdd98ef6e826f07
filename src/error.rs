use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the history cache and the path helpers it relies on.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl HistoryError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HistoryError::Io {
            path: path.into(),
            source,
        }
    }

    /// Raw OS error code of an I/O failure, if the OS reported one.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            HistoryError::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Failures while reading or writing settings and wallpaper configurations.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_code_only_for_io_errors() {
        let err = HistoryError::io("/nope", io::Error::from_raw_os_error(2));
        assert_eq!(err.os_code(), Some(2));

        let err = HistoryError::IndexOutOfRange { index: 4, len: 3 };
        assert_eq!(err.os_code(), None);
        assert_eq!(err.to_string(), "index 4 is out of range for 3 entries");
    }
}
