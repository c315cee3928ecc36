use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::content::{REPORT_TITLE, ReportLine, report_lines};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_MM: f32 = 20.0;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const TITLE_HEIGHT_MM: f32 = 10.0;
const PT_TO_MM: f32 = 0.3528;
// Average Helvetica glyph width relative to the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Email required")]
    MissingEmail,

    #[error("Failed to render report: {0}")]
    Render(String),

    #[error("Report file error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// True for errors caused by the request rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingEmail)
    }
}

/// Renders reports into a transient `ROI_Report_*.pdf` file and returns its
/// bytes. The file is always removed before `generate_report` returns.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    temp_dir: Option<PathBuf>,
}

impl ReportRenderer {
    /// Write transient files to the system temp directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write transient files to `dir`, which must exist.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: Some(dir.into()),
        }
    }

    /// Build the PDF for `email` and an arbitrary scenario payload.
    ///
    /// A missing or blank email is rejected before anything is rendered.
    pub fn generate_report(
        &self,
        email: Option<&str>,
        scenario: &Value,
    ) -> Result<Vec<u8>, ReportError> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(ReportError::MissingEmail)?;

        let lines = report_lines(email, scenario);
        let mut builder = tempfile::Builder::new();
        builder.prefix("ROI_Report_").suffix(".pdf");
        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        debug!(path = %file.path().display(), "writing report");

        {
            let mut writer = BufWriter::new(file.as_file());
            render(&lines, &mut writer)?;
            writer.flush()?;
        }

        let bytes = fs::read(file.path())?;
        file.close()?;

        info!(size = bytes.len(), "report generated");
        Ok(bytes)
    }
}

struct Cursor {
    layer: PdfLayerReference,
    y: f32,
}

fn render<W: Write>(
    lines: &[ReportLine],
    writer: &mut BufWriter<W>,
) -> Result<(), ReportError> {
    let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(e.to_string()))?;

    let mut cursor = Cursor {
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT.0 - MARGIN_MM,
    };
    let mut pages = 1;

    for line in lines {
        let height = match line {
            ReportLine::Title(_) => TITLE_HEIGHT_MM,
            ReportLine::Text(_) | ReportLine::Blank => LINE_HEIGHT_MM,
        };
        if cursor.y - height < MARGIN_MM {
            let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME);
            cursor = Cursor {
                layer: doc.get_page(page).get_layer(layer),
                y: PAGE_HEIGHT.0 - MARGIN_MM,
            };
            pages += 1;
        }
        cursor.y -= height;

        match line {
            ReportLine::Title(text) => {
                let x = centered_x(text, TITLE_SIZE);
                cursor.layer.use_text(text.as_str(), TITLE_SIZE, Mm(x), Mm(cursor.y), &bold);
            }
            ReportLine::Text(text) => {
                draw_body(&cursor, text, &font);
            }
            ReportLine::Blank => {}
        }
    }

    debug!(pages, lines = lines.len(), "report laid out");
    doc.save(writer)
        .map_err(|e| ReportError::Render(e.to_string()))
}

fn draw_body(
    cursor: &Cursor,
    text: &str,
    font: &IndirectFontRef,
) {
    cursor
        .layer
        .use_text(text, BODY_SIZE, Mm(MARGIN_MM), Mm(cursor.y), font);
}

fn centered_x(
    text: &str,
    size: f32,
) -> f32 {
    let width = text.chars().count() as f32 * size * AVG_GLYPH_WIDTH * PT_TO_MM;
    ((PAGE_WIDTH.0 - width) / 2.0).max(MARGIN_MM)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn scenario() -> Value {
        json!({
            "scenario_name": "Q4 pilot",
            "monthly_savings": 27489.0,
            "payback_months": 1.8,
            "roi_percentage": 559.7
        })
    }

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).expect("read temp dir").count()
    }

    #[test]
    fn generates_pdf_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = ReportRenderer::with_dir(dir.path());

        let bytes = renderer
            .generate_report(Some("ap@example.com"), &scenario())
            .expect("report");

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn removes_transient_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = ReportRenderer::with_dir(dir.path());

        renderer
            .generate_report(Some("ap@example.com"), &scenario())
            .expect("report");

        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn missing_email_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = ReportRenderer::with_dir(dir.path());

        let err = renderer.generate_report(None, &scenario()).unwrap_err();

        assert!(matches!(err, ReportError::MissingEmail));
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Email required");
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn blank_email_is_rejected() {
        let err = ReportRenderer::new()
            .generate_report(Some("   "), &scenario())
            .unwrap_err();

        assert!(matches!(err, ReportError::MissingEmail));
    }

    #[test]
    fn long_payload_spans_pages() {
        let dir = tempfile::tempdir().expect("tempdir");
        let renderer = ReportRenderer::with_dir(dir.path());
        let items: Vec<Value> = (0..200).map(|i| json!({ "row": i })).collect();

        let long = renderer
            .generate_report(Some("ap@example.com"), &Value::Array(items))
            .expect("report");
        let short = renderer
            .generate_report(Some("ap@example.com"), &json!({}))
            .expect("report");

        assert!(long.len() > short.len());
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn missing_temp_dir_is_io_error() {
        let renderer = ReportRenderer::with_dir("/nonexistent-dir/roi-reports");

        let err = renderer
            .generate_report(Some("ap@example.com"), &scenario())
            .unwrap_err();

        assert!(matches!(err, ReportError::Io(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn title_is_centered_within_margins() {
        let x = centered_x(REPORT_TITLE, TITLE_SIZE);

        assert!(x > MARGIN_MM);
        assert!(x < PAGE_WIDTH.0 / 2.0);
    }
}
