use crate::core::types::StepRecord;
use crate::reporting::summary::{CandidateFilter, DashboardSummary, candidate_rows};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Bar colors for the pass/fail chart
    pub const PASSED_COLOR: &str = "lightgreen";
    pub const FAILED_COLOR: &str = "lightcoral";

    /// Page background
    pub const BACKGROUND_COLOR: &str = "#F6F0F0";
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Steps read back from the log
    pub steps: Vec<StepRecord>,
    /// Aggregates over every evaluation, absent when there are none
    pub summary: Option<DashboardSummary>,
    /// Log file the steps came from
    pub source: String,
    /// Timestamp when the dashboard was generated
    pub timestamp: String,
}

impl DashboardData {
    pub fn new(steps: Vec<StepRecord>, source: &Path, timestamp: String) -> Self {
        let summary = DashboardSummary::from_steps(&steps);
        Self {
            steps,
            summary,
            source: source.display().to_string(),
            timestamp,
        }
    }
}

/// Error type for dashboard generation
#[derive(Debug)]
pub enum DashboardError {
    FileWrite(io::Error),
    Serialization(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::FileWrite(e) => write!(f, "Failed to write dashboard file: {}", e),
            DashboardError::Serialization(e) => write!(f, "Failed to serialize data: {}", e),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::FileWrite(e) => Some(e),
            DashboardError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for DashboardError {
    fn from(e: io::Error) -> Self {
        DashboardError::FileWrite(e)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Serialization(e.to_string())
    }
}

/// HTML dashboard generator for a recorded step log
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard(data: &DashboardData, output_path: &Path) -> Result<(), DashboardError> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    pub fn generate_html_content(data: &DashboardData) -> Result<String, DashboardError> {
        let css_styles = Self::generate_css();
        let js_scripts = Self::generate_javascript();
        let body_content = Self::generate_body_content(data)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>X-Ray Dashboard</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
    {}
    <script>{}</script>
</body>
</html>"#,
            dashboard_constants::CHART_JS_CDN,
            css_styles,
            body_content,
            js_scripts
        ))
    }

    fn generate_css() -> String {
        format!(
            r#"
        :root {{
            --bg-color: {};
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
            --passed-color: {};
            --failed-color: {};
            --selected-color: gold;
        }}

        * {{ margin: 0; padding: 0; box-sizing: border-box; }}

        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }}

        .container {{ max-width: 1400px; margin: 0 auto; padding: 2rem; }}

        .header {{ margin-bottom: 2rem; }}
        .header h1 {{ font-size: 2.25rem; font-weight: 700; }}
        .header p {{ color: var(--text-secondary); }}

        .stats-grid {{
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 1.5rem;
            margin-bottom: 2rem;
        }}

        .stat-card, .chart-container, .step {{
            background: var(--card-bg);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }}

        .stat-card {{ padding: 1.5rem; }}
        .stat-value {{ font-size: 2rem; font-weight: 700; }}
        .stat-label {{
            color: var(--text-secondary);
            font-size: 0.9rem;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }}

        .chart-container {{ padding: 2rem; margin-bottom: 2rem; }}
        .chart-title, .section-title {{ font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }}

        .step {{ margin-bottom: 1rem; }}
        .step summary {{ padding: 1rem 1.5rem; cursor: pointer; font-weight: 600; }}
        .step-body {{ padding: 0 1.5rem 1.5rem; }}
        .step-body h4 {{ margin: 1rem 0 0.5rem; }}

        .io-grid {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }}
        pre {{
            background: #f8fafc;
            border: 1px solid var(--border-color);
            border-radius: 8px;
            padding: 1rem;
            max-height: 400px;
            overflow: auto;
            font-size: 0.85rem;
        }}

        table {{ width: 100%; border-collapse: collapse; margin-top: 0.5rem; }}
        th, td {{ padding: 0.4rem 0.75rem; border-bottom: 1px solid var(--border-color); text-align: left; }}
        th {{ background: #f8fafc; }}
        .row-selected td {{ background-color: var(--selected-color); }}
        .row-passed td {{ background-color: var(--passed-color); }}
        .row-failed td {{ background-color: var(--failed-color); }}

        .filter-bar {{ margin-top: 1rem; }}
        .filter-bar select {{ padding: 0.25rem 0.5rem; border-radius: 6px; }}

        .footer {{ margin-top: 2rem; padding-top: 1rem; border-top: 1px solid var(--border-color); color: var(--text-secondary); }}

        @media (max-width: 768px) {{
            .container {{ padding: 1rem; }}
            .stats-grid, .io-grid {{ grid-template-columns: 1fr; }}
        }}
        "#,
            dashboard_constants::BACKGROUND_COLOR,
            dashboard_constants::PASSED_COLOR,
            dashboard_constants::FAILED_COLOR
        )
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(data: &DashboardData) -> Result<String, DashboardError> {
        let header_section = Self::generate_header_section(&data.timestamp, &data.source);
        let stats_section = Self::generate_stats_section(data);
        let charts_section = Self::generate_charts_section(data)?;
        let steps_section = Self::generate_steps_section(data)?;

        Ok(format!(
            r#"
            <div class="container">
                {}
                {}
                {}
                {}
                <div class="footer">Dashboard powered by <strong>X-Ray SDK</strong></div>
            </div>
            "#,
            header_section, stats_section, charts_section, steps_section
        ))
    }

    /// Generate the dashboard header section
    fn generate_header_section(timestamp: &str, source: &str) -> String {
        format!(
            r#"
            <div class="header">
                <h1>🚀 X-Ray Decision Dashboard</h1>
                <p>Visualize multi-step decision-making and candidate evaluations</p>
                <p>Generated on {} from {}</p>
            </div>
            "#,
            escape_html(timestamp),
            escape_html(source)
        )
    }

    /// Generate the summary metric cards, empty when nothing was evaluated
    fn generate_stats_section(data: &DashboardData) -> String {
        let Some(summary) = &data.summary else {
            return String::new();
        };

        format!(
            r#"
            <h3 class="section-title">📊 Summary Metrics</h3>
            <div class="stats-grid">
                {}
                {}
                {}
            </div>
            "#,
            Self::generate_stat_card(&summary.total_candidates.to_string(), "Total Candidates"),
            Self::generate_stat_card(&summary.passed.to_string(), "Passed Filters"),
            Self::generate_stat_card(&escape_html(&summary.top_candidate_label()), "Top Candidate"),
        )
    }

    /// Generate a single statistics card
    fn generate_stat_card(value: &str, label: &str) -> String {
        format!(
            r#"
            <div class="stat-card">
                <div class="stat-value">{}</div>
                <div class="stat-label">{}</div>
            </div>
            "#,
            value, label
        )
    }

    /// Generate the pass/fail bar chart
    fn generate_charts_section(data: &DashboardData) -> Result<String, DashboardError> {
        let Some(summary) = &data.summary else {
            return Ok(String::new());
        };

        let chart_data = serde_json::json!({
            "labels": ["Passed", "Failed"],
            "counts": [summary.passed, summary.failed()],
            "colors": [dashboard_constants::PASSED_COLOR, dashboard_constants::FAILED_COLOR],
        });
        let chart_data_json = serde_json::to_string(&chart_data)?;

        Ok(format!(
            r#"
            <div class="chart-container">
                <h3 class="chart-title">Passed vs Failed</h3>
                <canvas id="statusChart" width="400" height="160"></canvas>
            </div>

            <script>
                window.chartData = {};
            </script>
            "#,
            chart_data_json
        ))
    }

    /// Generate one collapsible section per recorded step
    fn generate_steps_section(data: &DashboardData) -> Result<String, DashboardError> {
        let steps_html = data
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| Self::generate_step(index, step))
            .collect::<Result<Vec<_>, _>>()?
            .join("");

        Ok(format!(
            r#"
            <div class="steps">
                {}
            </div>
            "#,
            steps_html
        ))
    }

    fn generate_step(index: usize, step: &StepRecord) -> Result<String, DashboardError> {
        let input_json = pretty_json(&step.input)?;
        let output_json = pretty_json(&step.output)?;
        let evaluations_html = Self::generate_evaluations_table(index, step);

        Ok(format!(
            r#"
            <details class="step">
                <summary>{} ({})</summary>
                <div class="step-body">
                    <div class="io-grid">
                        <div>
                            <h4>Input</h4>
                            <pre>{}</pre>
                        </div>
                        <div>
                            <h4>Output</h4>
                            <pre>{}</pre>
                        </div>
                    </div>
                    <h4>Reasoning</h4>
                    <p>{}</p>
                    {}
                </div>
            </details>
            "#,
            escape_html(&step.step),
            escape_html(&step.timestamp),
            escape_html(&input_json),
            escape_html(&output_json),
            escape_html(&step.reasoning),
            evaluations_html
        ))
    }

    /// Candidate table with a pass/fail filter, empty when the step has no evaluations
    fn generate_evaluations_table(index: usize, step: &StepRecord) -> String {
        let rows = candidate_rows(step, CandidateFilter::All);
        if rows.is_empty() {
            return String::new();
        }

        let rows_html = rows
            .iter()
            .map(|row| {
                let status = if row.qualified { "passed" } else { "failed" };
                format!(
                    r#"
                    <tr class="{}" data-status="{}">
                        <td>{}</td>
                        <td>{:.2}</td>
                        <td>{:.1}</td>
                        <td>{}</td>
                        <td>{:.2}</td>
                        <td>{}</td>
                        <td>{}</td>
                        <td>{}</td>
                    </tr>
                    "#,
                    row.status.css_class(),
                    status,
                    escape_html(&row.title),
                    row.price,
                    row.rating,
                    row.reviews,
                    row.relevance,
                    row.qualified_mark(),
                    row.top_mark(),
                    escape_html(&row.fail_reasons.join("; "))
                )
            })
            .collect::<Vec<_>>()
            .join("");

        let options_html = [
            CandidateFilter::All,
            CandidateFilter::Passed,
            CandidateFilter::Failed,
        ]
        .iter()
        .map(|filter| {
            format!(
                r#"<option value="{}">{}</option>"#,
                filter.label().to_lowercase(),
                filter.label()
            )
        })
        .collect::<Vec<_>>()
        .join("");

        format!(
            r#"
            <h4>Candidate Evaluations</h4>
            <div class="filter-bar">
                <label for="filter-{index}">Show candidates:</label>
                <select id="filter-{index}" class="candidate-filter" data-table="candidates-{index}">{options_html}</select>
            </div>
            <table id="candidates-{index}">
                <thead>
                    <tr>
                        <th>Title</th><th>Price</th><th>Rating</th><th>Reviews</th>
                        <th>Relevance</th><th>Qualified</th><th>Top Candidate</th><th>Fail Reasons</th>
                    </tr>
                </thead>
                <tbody>{rows_html}</tbody>
            </table>
            "#
        )
    }

    fn generate_javascript() -> &'static str {
        r#"
        document.addEventListener('DOMContentLoaded', function() {
            if (typeof Chart !== 'undefined' && window.chartData) {
                const ctx = document.getElementById('statusChart');
                if (ctx) {
                    new Chart(ctx, {
                        type: 'bar',
                        data: {
                            labels: window.chartData.labels,
                            datasets: [{
                                label: 'Count',
                                data: window.chartData.counts,
                                backgroundColor: window.chartData.colors
                            }]
                        },
                        options: {
                            responsive: true,
                            plugins: { legend: { display: false } },
                            scales: { y: { beginAtZero: true, ticks: { precision: 0 } } }
                        }
                    });
                }
            }

            document.querySelectorAll('.candidate-filter').forEach(function(select) {
                select.addEventListener('change', function() {
                    const table = document.getElementById(select.dataset.table);
                    if (!table) {
                        return;
                    }
                    table.querySelectorAll('tbody tr').forEach(function(row) {
                        const show = select.value === 'all' || row.dataset.status === select.value;
                        row.style.display = show ? '' : 'none';
                    });
                });
            });
        });
        "#
    }
}

fn pretty_json(value: &Value) -> Result<String, DashboardError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Escape text for use inside HTML element content and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
