//! Error types for the naming and grouping engine.
//!
//! Every fallible step of a grouping operation maps to one variant here:
//! table I/O, header parsing, row parsing, and the two template failure
//! modes (pattern syntax vs. evaluation against a group's context).
//! Sanitization is total and has no error path.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while grouping members and rendering repository names.
///
/// Any single failure aborts the whole grouping operation; callers never
/// receive a partial result mapping.
#[derive(Debug, Error)]
pub enum NamingError {
    /// The table file could not be opened.
    #[error("error opening table file at {}", path.display())]
    TableOpen {
        /// Path that was attempted.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header row could not be read from the table file.
    #[error("error reading header from table file {}", path.display())]
    TableHeader {
        /// Path of the table being read.
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row could not be read from the table file.
    #[error("error reading record from table file {}", path.display())]
    TableRecord {
        /// Path of the table being read.
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The naming pattern is not valid template syntax.
    #[error("template parsing failed for naming pattern `{pattern}`")]
    PatternParse {
        /// The offending pattern, verbatim.
        pattern: String,
        #[source]
        source: tera::Error,
    },

    /// The naming pattern references data absent from the group's context,
    /// or a registered function rejected its arguments.
    #[error("template execution failed for naming pattern")]
    PatternRender {
        #[source]
        source: tera::Error,
    },
}
