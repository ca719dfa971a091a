//! Report export.
//!
//! Turning a result into Markdown is pure; handing it to the clipboard or
//! the filesystem is best effort and lives in [`sink`].

mod markdown;
pub mod sink;

pub use markdown::to_markdown;
pub use sink::{copy_to_clipboard, write_report};

use crate::state::MarketData;

/// MIME type of exported reports.
pub const REPORT_MIME_TYPE: &str = "text/markdown";

/// File extension of exported reports.
pub const REPORT_EXTENSION: &str = "md";

/// Prefix of exported report file names.
const FILENAME_PREFIX: &str = "market-intelligence";

/// Lower-case `sector` and collapse whitespace runs to single hyphens.
pub fn slugify(sector: &str) -> String {
    sector
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// File name for a report on `sector`, e.g. `market-intelligence-fintech.md`.
pub fn export_filename(sector: &str) -> String {
    format!("{FILENAME_PREFIX}-{}.{REPORT_EXTENSION}", slugify(sector))
}

/// A rendered report ready to hand to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub sector: String,
    pub filename: String,
    pub markdown: String,
}

impl Report {
    /// Render the report for one result.
    pub fn new(sector: &str, data: &MarketData) -> Self {
        Self {
            sector: sector.to_string(),
            filename: export_filename(sector),
            markdown: to_markdown(sector, data),
        }
    }
}
