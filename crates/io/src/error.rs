//! Error types for syncat-io.

use std::path::PathBuf;

use syncat_catalog::CatalogError;

/// Error type for all fallible operations in the syncat-io crate.
///
/// Covers missing files, malformed catalog rows, unreadable parameter
/// files and the underlying CSV and filesystem failures.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a catalog or forecast row cannot be parsed.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        /// File being read.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// Returned when a parameter file has an unparsable value.
    #[error("invalid parameter file {}: {reason}", path.display())]
    Params {
        /// Parameter file.
        path: PathBuf,
        /// Description of the problem, including the line when known.
        reason: String,
    },

    /// Wraps an error originating from the csv crate.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Forecast labels inconsistent with the requested catalog count.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_parse() {
        let err = IoError::Parse {
            path: PathBuf::from("cat.csv"),
            line: 12,
            reason: "invalid magnitude \"x\"".to_string(),
        };
        assert_eq!(err.to_string(), "cat.csv:12: invalid magnitude \"x\"");
    }

    #[test]
    fn display_params() {
        let err = IoError::Params {
            path: PathBuf::from("args.txt"),
            reason: "line 3: invalid mag_min \"four\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter file args.txt: line 3: invalid mag_min \"four\""
        );
    }

    #[test]
    fn from_catalog_error() {
        let err: IoError = CatalogError::CatalogIdOutOfRange {
            catalog_id: 7,
            n_catalogs: 5,
        }
        .into();
        assert!(matches!(err, IoError::Catalog(_)));
    }

    #[test]
    fn from_io_error() {
        let err: IoError = std::io::Error::other("disk full").into();
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<IoError>();
    }
}
