//! PDF summaries of ROI scenarios.
//!
//! [`report_lines`] lays out the document text; [`ReportRenderer`] turns it
//! into PDF bytes through a transient file that is removed before returning.

pub mod content;
pub mod renderer;

pub use content::{ReportLine, report_filename, report_lines};
pub use renderer::{ReportError, ReportRenderer};
