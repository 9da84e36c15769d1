use super::aggregate::{self, Summary};
use super::sauce::SessionSigner;
use super::types::TestRecord;
use crate::error::Result;

/// Steps shown inline for a failed test, counted from the end
const FAILED_STEPS_PREVIEW: usize = 3;

const TABLE_START: &str = concat!(
    r#"<table style="width: 100%">"#,
    "<colgroup>",
    r#"<col span="1" style="width: 20%;">"#,
    r#"<col span="1" style="width: 80%;">"#,
    "</colgroup>",
    "<tbody>",
);

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Escape test names, steps, error text and session links. Turning this
    /// off reproduces older reports: verbatim text, bare session anchors.
    pub escape_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { escape_html: true }
    }
}

/// Render the report fragment (title, summary, failed table, passed table).
///
/// Returns `None` when there are no records.
pub fn render(
    records: &[TestRecord],
    signer: &SessionSigner,
    options: RenderOptions,
) -> Result<Option<String>> {
    let Some(summary) = aggregate::summary(records) else {
        return Ok(None);
    };
    let renderer = Renderer { signer, options };

    let failed = aggregate::failed(records);
    let passed = aggregate::passed(records);

    let mut html = render_summary(&summary);
    if !failed.is_empty() {
        html.push_str(&renderer.failed_table(&failed)?);
    }
    if !passed.is_empty() {
        html.push_str(&renderer.passed_table(&passed)?);
    }
    Ok(Some(html))
}

/// Wrap a rendered fragment into a standalone page
pub fn render_page(fragment: &str, generated_at: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>End-to-end Test Report</title>
    <style>
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            line-height: 1.5;
            max-width: 1100px;
            margin: 0 auto;
            padding: 2rem 1rem;
        }}

        th {{
            text-align: left;
        }}

        td {{
            vertical-align: top;
            border-top: 1px solid #d1d5db;
            padding: 0.5rem;
        }}

        code {{
            display: block;
            white-space: pre-wrap;
            color: #b91c1c;
        }}

        .meta {{
            margin-top: 3rem;
            color: #6b7280;
            font-size: 0.875rem;
        }}
    </style>
</head>
<body>
{fragment}
<div class="meta">Generated: {generated_at}</div>
</body>
</html>"#
    )
}

fn render_summary(summary: &Summary) -> String {
    format!(
        "<h2>{}% of end-end tests have passed</h2><pre>Total executed tests: {}<br/>Failed tests: {}</pre>",
        summary.pass_percentage, summary.total, summary.failed
    )
}

struct Renderer<'a> {
    signer: &'a SessionSigner,
    options: RenderOptions,
}

impl Renderer<'_> {
    fn text(&self, s: &str) -> String {
        if self.options.escape_html {
            html_escape(s)
        } else {
            s.to_string()
        }
    }

    fn step_divs(&self, steps: &[String]) -> String {
        steps
            .iter()
            .map(|step| format!("<div>{}</div>", self.text(step)))
            .collect()
    }

    fn failed_table(&self, tests: &[&TestRecord]) -> Result<String> {
        let mut html = format!("<h3>Failed tests ({})</h3>", tests.len());
        html.push_str(TABLE_START);
        html.push_str("<tr><th>Test</th><th>Failure</th></tr>");
        for test in tests {
            html.push_str(&self.failed_row(test)?);
        }
        html.push_str("</tbody></table>");
        Ok(html)
    }

    fn passed_table(&self, tests: &[&TestRecord]) -> Result<String> {
        let mut html = format!("<h3>Passed tests ({})</h3>", tests.len());
        html.push_str("<details><summary>Click to expand</summary><br/>");
        html.push_str(TABLE_START);
        html.push_str("<tr><th>Test</th><th>Logs</th></tr>");
        for test in tests {
            html.push_str(&self.passed_row(test)?);
        }
        html.push_str("</tbody></table></details>");
        Ok(html)
    }

    fn passed_row(&self, test: &TestRecord) -> Result<String> {
        let mut row = format!("<tr><td>{}</td><td>", self.text(&test.name));
        row.push_str("<p><details><summary>Click to expand full logs</summary><br/>");
        if !test.steps.is_empty() {
            row.push_str("<p><ins>Test steps:</ins></p>");
            row.push_str(&format!("<blockquote>{}</blockquote>", self.step_divs(&test.steps)));
        }
        if !test.jobs.is_empty() {
            row.push_str("<hr/>");
            row.push_str(&self.device_sessions(&test.jobs)?);
        }
        row.push_str("</details></p></td></tr>");
        Ok(row)
    }

    fn failed_row(&self, test: &TestRecord) -> Result<String> {
        let has_steps = !test.steps.is_empty();
        let mut row = format!("<tr><td>{}</td><td>", self.text(&test.name));

        if has_steps {
            let preview_from = test.steps.len().saturating_sub(FAILED_STEPS_PREVIEW);
            row.push_str(&format!(
                "<p><blockquote>{}</blockquote></p>",
                self.step_divs(&test.steps[preview_from..])
            ));
            row.push_str("<p><details><summary>Click to expand full logs</summary><br/>");
            row.push_str("<p><ins>Test steps:</ins></p>");
            row.push_str(&format!("<blockquote>{}</blockquote>", self.step_divs(&test.steps)));
        }
        if let Some(error) = test.error.as_deref().filter(|e| !e.is_empty()) {
            row.push_str(&format!("<code>{}</code>", self.text(error)));
        }
        if !test.jobs.is_empty() {
            row.push_str("<hr/>");
            row.push_str(&self.device_sessions(&test.jobs)?);
        }
        if has_steps {
            row.push_str("</details></p>");
        }
        row.push_str("</td></tr>");
        Ok(row)
    }

    fn device_sessions(&self, jobs: &[String]) -> Result<String> {
        let mut html = String::from("<ins>Device sessions:</ins><p><ul>");
        for job_id in jobs {
            let url = self.signer.sign(job_id)?;
            if self.options.escape_html {
                html.push_str(&format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    html_escape(&url),
                    html_escape(job_id)
                ));
            } else {
                html.push_str(&format!(r#"<li><a href="{}"></a></li>"#, url));
            }
        }
        // raw mode keeps the markup of older reports, tags included
        html.push_str(if self.options.escape_html {
            "</ul></p>"
        } else {
            "</p></ul>"
        });
        Ok(html)
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
