use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, path::{Path, PathBuf}};

/// Standard C++ library headers that are trusted unless the configuration says otherwise.
pub const DEFAULT_TRUSTED_LIBRARIES: &[&str] = &[
    "algorithm", "any", "array", "atomic", "barrier", "bitset",
    "bit", "charconv", "chrono", "codecvt", "compare", "complex",
    "concepts", "condition_variable", "coroutine", "deque",
    "exception", "execution", "filesystem", "format",
    "forward_list", "fstream", "functional", "future",
    "initializer_list", "iomanip", "ios", "iosfwd", "iostream",
    "istream", "iterator", "latch", "limits", "list", "locale",
    "map", "memory_resource", "memory", "mutex", "new",
    "numbers", "numeric", "optional", "ostream", "queue",
    "random", "ranges", "ratio", "regex", "scoped_allocator",
    "semaphore", "set", "shared_mutex", "span", "sstream",
    "stack", "stdexcept", "stop_token", "streambuf",
    "string_view", "string", "strstream", "syncstream",
    "system_error", "thread", "tuple", "type_traits",
    "typeindex", "typeinfo", "unordered_map", "unordered_set",
    "utility", "valarray", "variant", "vector", "version",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_directory: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub file_extensions: Vec<String>,
    pub respect_gitignore: bool,
    pub trusted_libraries: Vec<String>,
    pub extra_trusted: Vec<String>,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub name_width: usize,
    pub folder_width: usize,
    pub libraries_width: usize,
    pub banner_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_directory: PathBuf::from("."),
            ignore_patterns: Vec::new(),
            file_extensions: vec!["cpp".to_string()],
            respect_gitignore: false,
            trusted_libraries: DEFAULT_TRUSTED_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            extra_trusted: Vec::new(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name_width: 30,
            folder_width: 25,
            libraries_width: 30,
            banner_width: 100,
        }
    }
}

impl Config {
    /// Get the default config file path (~/.include-examer.toml)
    pub fn default_config_path() -> crate::Result<PathBuf> {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(PathBuf::from(home_dir).join(".include-examer.toml"))
    }

    /// Load config from the default location, falling back to defaults if the file doesn't exist
    pub fn load() -> crate::Result<Self> {
        let config_path = match Self::default_config_path() {
            Ok(path) => path,
            Err(e) => {
                log::debug!("{e}, using default configuration");
                return Ok(Self::default());
            }
        };

        if config_path.exists() {
            log::info!("Loading configuration from {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            log::debug!("No config file at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Load config from a specific file path
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Every trusted name: the base list followed by the extras.
    pub fn trusted_names(&self) -> impl Iterator<Item = &str> {
        self.trusted_libraries
            .iter()
            .chain(self.extra_trusted.iter())
            .map(String::as_str)
    }

    /// Create a config file with all available options documented
    pub fn create_documented_config() -> String {
        let trusted = DEFAULT_TRUSTED_LIBRARIES
            .chunks(6)
            .map(|chunk| {
                let names: Vec<String> = chunk.iter().map(|n| format!("\"{n}\"")).collect();
                format!("    {},", names.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(r#"# Include Examer Configuration File
# This file configures how include-examer audits your source tree

# Directory to audit (the positional PATH argument overrides this)
target_directory = "."

# Patterns to skip during file discovery ("*.ext", wildcards or path components)
ignore_patterns = []

# File extensions whose #include directives are audited
file_extensions = ["cpp"]

# Honour .gitignore, .ignore and hidden-file rules while walking
respect_gitignore = false

# Header names considered safe. Replacing this list replaces the defaults.
trusted_libraries = [
{trusted}
]

# Additional trusted names appended to trusted_libraries
extra_trusted = []

[report]
# Column widths (in characters) of the text table
name_width = 30
folder_width = 25
libraries_width = 30

# Width of the "=" and "-" rules framing the table
banner_width = 100
"#)
    }
}
