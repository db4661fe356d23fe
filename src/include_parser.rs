use once_cell::sync::Lazy;
use regex::Regex;

// `#include <name>` or `#include <name.ext>`. Quoted includes are local and never matched.
static INCLUDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#include\s*<([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)?)>").unwrap()
});

/// Extracts angle-bracket `#include` targets from raw source text.
///
/// This is a textual scan, not a preprocessor: directives inside comments,
/// string literals or `#if 0` blocks are reported like any other.
#[derive(Debug, Default, Clone, Copy)]
pub struct IncludeParser;

impl IncludeParser {
    pub fn new() -> Self {
        Self
    }

    /// Every included name in order of appearance, duplicates kept.
    pub fn extract_includes(&self, content: &str) -> Vec<String> {
        INCLUDE_REGEX
            .captures_iter(content)
            .filter_map(|captures| captures.get(1))
            .map(|name| name.as_str().to_string())
            .collect()
    }
}
