pub mod config;
pub mod error;
pub mod file_discovery;
pub mod include_parser;
pub mod trust;
pub mod analyzer;
pub mod reporter;

pub use config::Config;
pub use error::AuditError;
pub use file_discovery::{FileDiscovery, SourceFile};
pub use include_parser::IncludeParser;
pub use trust::{TrustClassifier, TrustReference};
pub use analyzer::{Analyzer, AuditOutcome, ReportRow};
pub use reporter::{wrap, Reporter};

pub type Result<T> = anyhow::Result<T>;
