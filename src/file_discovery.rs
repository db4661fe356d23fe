use crate::config::Config;
use crate::error::{AuditError, Result};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A discovered source file and the identity shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub folder_name: String,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        // "./main.cpp" has "." as parent, which has no file_name of its own
        let folder_name = match path.parent() {
            Some(parent) => parent
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| parent.to_string_lossy().into_owned()),
            None => String::new(),
        };

        Self {
            path: path.to_path_buf(),
            file_name,
            folder_name,
        }
    }
}

pub struct FileDiscovery {
    config: Config,
}

impl FileDiscovery {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walk `target_directory` and return every file with a tracked extension.
    ///
    /// A missing or unreadable root is fatal. Unreadable entries below the
    /// root are logged and skipped.
    pub fn discover_files(&self) -> Result<Vec<SourceFile>> {
        let root = &self.config.target_directory;
        let metadata = fs::metadata(root).map_err(|e| AuditError::root_not_found(root, e))?;
        if !metadata.is_dir() {
            return Err(AuditError::not_a_directory(root));
        }
        fs::read_dir(root).map_err(|e| AuditError::root_not_found(root, e))?;

        let mut walker_builder = WalkBuilder::new(root);
        if self.config.respect_gitignore {
            walker_builder
                .standard_filters(true)
                .hidden(false)
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true);
        } else {
            walker_builder.standard_filters(false);
        }

        let mut files = Vec::new();
        for result in walker_builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if e.depth() == Some(0) => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::from(std::io::ErrorKind::PermissionDenied));
                    return Err(AuditError::root_not_found(root, source));
                }
                Err(e) => {
                    log::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if self.should_ignore_file(path) || !self.has_tracked_extension(path) {
                continue;
            }

            log::debug!("discovered {}", path.display());
            files.push(SourceFile::from_path(path));
        }

        log::info!("discovered {} source files under {}", files.len(), root.display());
        Ok(files)
    }

    fn has_tracked_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.config.file_extensions.iter().any(|tracked| *tracked == ext)
            })
            .unwrap_or(false)
    }

    fn should_ignore_file(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.ignore_patterns {
            if let Some(ext) = pattern.strip_prefix("*.") {
                if let Some(filename) = path.file_name() {
                    if filename.to_string_lossy().ends_with(&format!(".{}", ext)) {
                        return true;
                    }
                }
            } else if pattern.contains('*') {
                let regex_pattern = format!("^{}$", regex::escape(pattern).replace(r"\*", ".*"));
                if let Ok(re) = regex::Regex::new(&regex_pattern) {
                    if re.is_match(&path_str) {
                        return true;
                    }
                    if let Some(filename) = path.file_name() {
                        if re.is_match(&filename.to_string_lossy()) {
                            return true;
                        }
                    }
                }
            } else if path
                .components()
                .any(|component| component.as_os_str().to_string_lossy() == *pattern)
            {
                return true;
            }
        }

        false
    }
}
