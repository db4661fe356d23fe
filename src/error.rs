use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while auditing a source tree.
///
/// `Fatal` aborts the whole run. `PerFile` only affects the file it names:
/// the caller logs it, drops the row and keeps going.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("{message}")]
    Fatal {
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("could not read {}: {source}", .path.display())]
    PerFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AuditError {
    pub fn root_not_found(root: &std::path::Path, source: io::Error) -> Self {
        AuditError::Fatal {
            message: format!("root directory {} not found or inaccessible", root.display()),
            source: Some(source),
        }
    }

    pub fn not_a_directory(root: &std::path::Path) -> Self {
        AuditError::Fatal {
            message: format!("root path {} is not a directory", root.display()),
            source: None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, AuditError::Fatal { .. })
    }
}

pub type Result<T, E = AuditError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn per_file_error_names_the_path() {
        let err = AuditError::PerFile {
            path: PathBuf::from("src/broken.cpp"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("src/broken.cpp"));
        assert!(err.to_string().contains("valid UTF-8"));
    }

    #[test]
    fn root_errors_are_fatal() {
        let err = AuditError::root_not_found(
            Path::new("/no/such/dir"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(err.is_fatal());
        assert!(err.to_string().contains("/no/such/dir"));
        assert!(AuditError::not_a_directory(Path::new("main.cpp")).is_fatal());
    }
}
