use crate::{
    config::Config,
    error::{AuditError, Result},
    file_discovery::{FileDiscovery, SourceFile},
    include_parser::IncludeParser,
    trust::{TrustClassifier, TrustReference},
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Shown in the libraries column when a file includes nothing untrusted.
pub const NO_UNTRUSTED: &str = "N/A";

/// One file's line in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub file_name: String,
    pub folder_name: String,
    pub untrusted_libraries: String,
}

impl ReportRow {
    /// The libraries cell is never empty: either the names joined by ", " or [`NO_UNTRUSTED`].
    pub fn new(file: &SourceFile, untrusted: &[String]) -> Self {
        let untrusted_libraries = if untrusted.is_empty() {
            NO_UNTRUSTED.to_string()
        } else {
            untrusted.join(", ")
        };

        Self {
            file_name: file.file_name.clone(),
            folder_name: file.folder_name.clone(),
            untrusted_libraries,
        }
    }
}

#[derive(Debug, Default)]
pub struct AuditOutcome {
    /// Rows in walk order.
    pub rows: Vec<ReportRow>,
    /// Files that could not be read and have no row.
    pub skipped: Vec<PathBuf>,
}

pub struct Analyzer {
    file_discovery: FileDiscovery,
    parser: IncludeParser,
    classifier: TrustClassifier,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        let trusted = TrustReference::new(config.trusted_names());
        Self::with_trust(config, trusted)
    }

    /// Build an analyzer whose trust set ignores the config's trusted lists.
    pub fn with_trust(config: Config, trusted: TrustReference) -> Self {
        log::debug!("trust reference holds {} names", trusted.len());
        Self {
            file_discovery: FileDiscovery::new(config),
            parser: IncludeParser::new(),
            classifier: TrustClassifier::new(trusted),
        }
    }

    /// Walk the tree and build a row for every readable file.
    ///
    /// Fails only when the walk itself fails. Unreadable files are logged,
    /// recorded in [`AuditOutcome::skipped`] and left out of the rows.
    pub fn audit_project(&self) -> Result<AuditOutcome> {
        let files = self.file_discovery.discover_files()?;

        // indexed collect keeps walk order
        let results: Vec<(&SourceFile, Result<ReportRow>)> = files
            .par_iter()
            .map(|file| (file, self.audit_file(file)))
            .collect();

        let mut outcome = AuditOutcome::default();
        for (file, result) in results {
            match result {
                Ok(row) => outcome.rows.push(row),
                Err(e @ AuditError::PerFile { .. }) => {
                    log::warn!("Error processing file {}: {}", file.path.display(), e);
                    outcome.skipped.push(file.path.clone());
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "audited {} files, skipped {}",
            outcome.rows.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    pub fn audit_file(&self, file: &SourceFile) -> Result<ReportRow> {
        let content = fs::read_to_string(&file.path).map_err(|source| AuditError::PerFile {
            path: file.path.clone(),
            source,
        })?;
        Ok(self.audit_source(file, &content))
    }

    /// Classify already-loaded source text. Never fails.
    pub fn audit_source(&self, file: &SourceFile, content: &str) -> ReportRow {
        let includes = self.parser.extract_includes(content);
        let untrusted = self.classifier.untrusted(&includes);
        log::debug!(
            "{}: {} includes, {} untrusted",
            file.path.display(),
            includes.len(),
            untrusted.len()
        );
        ReportRow::new(file, &untrusted)
    }
}
