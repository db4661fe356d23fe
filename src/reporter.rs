use crate::{
    analyzer::{AuditOutcome, ReportRow},
    config::ReportConfig,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub root: String,
    pub files_audited: usize,
    pub files_skipped: usize,
    pub skipped: Vec<String>,
    pub version: String,
}

/// Splits `text` into lines of at most `width` characters.
///
/// A line ends just after the last space or comma inside the window, or is
/// cut at exactly `width` characters when the window has neither. Joining
/// the lines gives back `text` unchanged.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut remaining = text;

    loop {
        let Some((window_end, _)) = remaining.char_indices().nth(width) else {
            lines.push(remaining.to_string());
            break;
        };

        let window = &remaining[..window_end];
        let split = window
            .rfind(|c: char| c == ' ' || c == ',')
            .map(|boundary| boundary + 1)
            .unwrap_or(window_end);

        lines.push(remaining[..split].to_string());
        remaining = &remaining[split..];
    }

    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    FirstLine,
    Continuation,
}

pub struct Reporter {
    layout: ReportConfig,
}

impl Reporter {
    pub fn new(layout: ReportConfig) -> Self {
        Self { layout }
    }

    fn format_line(&self, name: &str, folder: &str, libraries: &str) -> String {
        format!(
            "| {:<nw$}| {:<fw$}| {:<lw$}|",
            name,
            folder,
            libraries,
            nw = self.layout.name_width,
            fw = self.layout.folder_width,
            lw = self.layout.libraries_width,
        )
    }

    pub fn header_line(&self) -> String {
        self.format_line("File Name", "Folder Name", "Untrusted Libraries")
    }

    /// Physical lines for one row. Continuation lines leave name and folder blank.
    pub fn render_row(&self, row: &ReportRow) -> Vec<String> {
        let mut state = LineState::FirstLine;
        let mut lines = Vec::new();

        for chunk in wrap(&row.untrusted_libraries, self.layout.libraries_width) {
            let (name, folder) = match state {
                LineState::FirstLine => (row.file_name.as_str(), row.folder_name.as_str()),
                LineState::Continuation => ("", ""),
            };
            lines.push(self.format_line(name, folder, &chunk));
            state = LineState::Continuation;
        }

        lines
    }

    pub fn write_table<W: Write>(&self, rows: &[ReportRow], out: &mut W) -> std::io::Result<()> {
        let banner = "=".repeat(self.layout.banner_width);

        writeln!(out, "{}", banner)?;
        writeln!(out, "{}", self.header_line())?;
        writeln!(out, "{}", "-".repeat(self.layout.banner_width))?;
        for row in rows {
            for line in self.render_row(row) {
                writeln!(out, "{}", line)?;
            }
        }
        writeln!(out, "{}", banner)?;
        Ok(())
    }

    pub fn render_table(&self, rows: &[ReportRow]) -> String {
        let mut buffer = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_table(rows, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    pub fn generate_report(&self, outcome: &AuditOutcome, root: &Path) -> Report {
        Report {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now().to_rfc3339(),
                root: root.display().to_string(),
                files_audited: outcome.rows.len(),
                files_skipped: outcome.skipped.len(),
                skipped: outcome
                    .skipped
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            rows: outcome.rows.clone(),
        }
    }

    pub fn write_json<W: Write>(&self, report: &Report, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn row(name: &str, folder: &str, libraries: &str) -> ReportRow {
        ReportRow {
            file_name: name.to_string(),
            folder_name: folder.to_string(),
            untrusted_libraries: libraries.to_string(),
        }
    }

    #[test]
    fn short_text_is_a_single_line() {
        assert_eq!(wrap("foo.h", 30), vec!["foo.h"]);
        assert_eq!(wrap("exactly_ten", 11), vec!["exactly_ten"]);
        assert_eq!(wrap("", 30), vec![""]);
    }

    #[test]
    fn breaks_after_last_separator_in_window() {
        let lines = wrap("foo.h, bar.hpp, baz.h, qux.hpp, quux.h", 30);
        assert_eq!(lines, vec!["foo.h, bar.hpp, baz.h, ", "qux.hpp, quux.h"]);
    }

    #[test]
    fn comma_can_be_the_boundary() {
        assert_eq!(wrap("aaaa,bbbb", 6), vec!["aaaa,", "bbbb"]);
    }

    #[test]
    fn hard_breaks_without_separator() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrapped_lines_rebuild_the_input_within_width() {
        let samples = [
            "a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p",
            "really_long_header_name_without_breaks.hpp, x.h",
            ",,,,,,,,,,,,,,,,,,,",
            "          leading spaces",
            "ümlaut_héader.h, ñ.h, ß",
        ];
        for text in samples {
            for width in 1..=12 {
                let lines = wrap(text, width);
                assert_eq!(lines.concat(), text, "width {width}");
                assert!(lines.iter().all(|l| l.chars().count() <= width), "width {width}");
            }
        }
    }

    #[test]
    fn zero_width_still_terminates() {
        assert_eq!(wrap("abc", 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn header_and_rows_share_the_cell_layout() {
        let reporter = Reporter::new(ReportConfig::default());
        let header = reporter.header_line();
        assert!(header.starts_with("| File Name"));
        assert_eq!(header.chars().count(), 2 + 30 + 2 + 25 + 2 + 30 + 1);

        let lines = reporter.render_row(&row("main.cpp", "src", "foo.h"));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].chars().count(), header.chars().count());
        assert_eq!(
            lines[0],
            format!("| {:<30}| {:<25}| {:<30}|", "main.cpp", "src", "foo.h")
        );
    }

    #[test]
    fn long_cells_continue_with_blank_identity_columns() {
        let reporter = Reporter::new(ReportConfig::default());
        let lines = reporter.render_row(&row("main.cpp", "src", "foo.h, bar.hpp, baz.h, qux.hpp, quux.h"));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("| main.cpp"));
        assert_eq!(
            lines[1],
            format!("| {:<30}| {:<25}| {:<30}|", "", "", "qux.hpp, quux.h")
        );
    }

    #[test]
    fn table_is_framed_by_banners() {
        let reporter = Reporter::new(ReportConfig::default());
        let table = reporter.render_table(&[row("a.cpp", "x", "N/A"), row("b.cpp", "y", "z.h")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "=".repeat(100));
        assert!(lines[1].starts_with("| File Name"));
        assert!(lines[1].contains("| Folder Name"));
        assert!(lines[1].contains("| Untrusted Libraries"));
        assert_eq!(lines[2], "-".repeat(100));
        assert!(lines[3].contains("N/A"));
        assert!(lines[4].contains("z.h"));
        assert_eq!(lines[5], "=".repeat(100));
    }

    #[test]
    fn empty_report_still_has_frame() {
        let reporter = Reporter::new(ReportConfig::default());
        assert_eq!(reporter.render_table(&[]).lines().count(), 4);
    }

    #[test]
    fn json_report_carries_rows_and_skips() {
        let reporter = Reporter::new(ReportConfig::default());
        let outcome = AuditOutcome {
            rows: vec![row("a.cpp", "x", "foo.h")],
            skipped: vec![PathBuf::from("x/bad.cpp")],
        };
        let report = reporter.generate_report(&outcome, Path::new("x"));

        let mut out = Vec::new();
        reporter.write_json(&report, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["metadata"]["files_audited"], 1);
        assert_eq!(value["metadata"]["files_skipped"], 1);
        assert_eq!(value["metadata"]["skipped"][0], "x/bad.cpp");
        assert_eq!(value["rows"][0]["untrusted_libraries"], "foo.h");
    }
}
