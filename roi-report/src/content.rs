use chrono::{DateTime, Utc};
use serde_json::Value;

pub const REPORT_TITLE: &str = "Invoicing ROI Report";
pub const DETAILS_HEADING: &str = "Scenario Details:";

/// Body lines longer than this are wrapped onto continuation lines.
pub const MAX_LINE_CHARS: usize = 90;

/// One line of report text, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Title(String),
    Text(String),
    Blank,
}

/// Lay out the report: title, the requesting email, then the scenario
/// payload as pretty-printed JSON.
pub fn report_lines(
    email: &str,
    scenario: &Value,
) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::Title(REPORT_TITLE.to_string()),
        ReportLine::Blank,
        ReportLine::Text(format!("Email: {email}")),
        ReportLine::Blank,
        ReportLine::Text(DETAILS_HEADING.to_string()),
    ];

    // `to_string_pretty` on a `Value` cannot fail.
    let dump = serde_json::to_string_pretty(scenario).unwrap_or_else(|_| scenario.to_string());
    for line in dump.lines() {
        lines.extend(wrap(line).into_iter().map(ReportLine::Text));
    }
    lines
}

/// Download name for a report generated at `now`.
pub fn report_filename(now: DateTime<Utc>) -> String {
    format!("ROI_Report_{}.pdf", now.timestamp_millis())
}

fn wrap(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= MAX_LINE_CHARS {
        return vec![line.to_string()];
    }
    chars
        .chunks(MAX_LINE_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn lines_start_with_title_email_and_heading() {
        let lines = report_lines("ap@example.com", &json!({}));

        assert_eq!(
            lines,
            vec![
                ReportLine::Title("Invoicing ROI Report".to_string()),
                ReportLine::Blank,
                ReportLine::Text("Email: ap@example.com".to_string()),
                ReportLine::Blank,
                ReportLine::Text("Scenario Details:".to_string()),
                ReportLine::Text("{}".to_string()),
            ]
        );
    }

    #[test]
    fn scenario_is_dumped_as_indented_json() {
        let lines = report_lines("a@b.c", &json!({ "monthly_savings": 27489.0 }));

        assert_eq!(
            &lines[5..],
            &[
                ReportLine::Text("{".to_string()),
                ReportLine::Text("  \"monthly_savings\": 27489.0".to_string()),
                ReportLine::Text("}".to_string()),
            ]
        );
    }

    #[test]
    fn missing_scenario_renders_null() {
        let lines = report_lines("a@b.c", &Value::Null);

        assert_eq!(lines.last(), Some(&ReportLine::Text("null".to_string())));
    }

    #[test]
    fn long_lines_are_wrapped() {
        let long = "x".repeat(MAX_LINE_CHARS * 2 + 5);

        let wrapped = wrap(&long);

        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[0].len(), MAX_LINE_CHARS);
        assert_eq!(wrapped[2].len(), 5);
        assert_eq!(wrapped.concat(), long);
    }

    #[test]
    fn filename_uses_unix_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();

        assert_eq!(report_filename(now), "ROI_Report_1700000000123.pdf");
    }
}
