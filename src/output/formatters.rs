//! Output formatting functionality
//!
//! Text, CSV and HTML renderings of analyses, batch runs and comparisons.

use crate::batch::export_to_csv;
use crate::error::{RepoPilotError, Result};
use crate::models::analysis::{format_size, AnalysisResult, IssueSeverity};
use crate::models::batch::{BatchResults, ComparisonReport};
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;

const HOT_SPOTS_SHOWN: usize = 10;

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        Blue.bold().paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn dimmed(text: &str, use_colors: bool) -> String {
    if use_colors {
        Style::new().dimmed().paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn severity_label(severity: IssueSeverity, use_colors: bool) -> String {
    let label = severity.to_string().to_uppercase();
    if !use_colors {
        return label;
    }
    match severity {
        IssueSeverity::Warning => Yellow.paint(label).to_string(),
        IssueSeverity::Error => Red.paint(label).to_string(),
        IssueSeverity::Critical => Red.bold().paint(label).to_string(),
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}\n", prefix, line))
        .collect()
}

/// One-line summary used in quiet mode
pub fn format_analysis_quiet(result: &AnalysisResult) -> String {
    format!(
        "{}: {} files, {} directories, {} dependency edges, primary language {}\n",
        result.metadata.repository,
        result.structure.total_files,
        result.structure.total_directories,
        result.dependencies.metrics.total_edges,
        result.structure.primary_language.as_deref().unwrap_or("unknown"),
    )
}

/// Format one analysis as human-readable text
pub fn format_analysis_text(result: &AnalysisResult, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();
    let structure = &result.structure;
    let metrics = &result.dependencies.metrics;

    output.push_str(&format!(
        "{}\n",
        heading(&format!("Repository Analysis: {}", result.metadata.repository), use_colors)
    ));
    output.push_str(&format!("  Source: {}\n", result.metadata.source));
    output.push_str(&format!("  Path: {}\n", dimmed(&result.metadata.path, use_colors)));
    output.push_str(&format!(
        "  Analyzed: {}\n\n",
        result.metadata.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output.push_str(&format!("{}\n", heading("Structure", use_colors)));
    output.push_str(&format!("  Files: {}\n", structure.total_files));
    output.push_str(&format!("  Directories: {}\n", structure.total_directories));
    output.push_str(&format!(
        "  Primary language: {}\n",
        structure.primary_language.as_deref().unwrap_or("unknown")
    ));
    if !structure.languages.is_empty() {
        output.push_str("  Languages:\n");
        for (language, count) in structure.languages_by_count() {
            output.push_str(&format!("    {:<12} {}\n", language, count));
        }
    }
    if !structure.key_files.is_empty() {
        output.push_str("  Key files:\n");
        for key_file in &structure.key_files {
            let name = if use_colors {
                Cyan.paint(key_file.as_str()).to_string()
            } else {
                key_file.clone()
            };
            output.push_str(&format!("    {}\n", name));
        }
    }
    if verbose {
        let total_size: u64 = structure.file_entries().map(|f| f.size).sum();
        output.push_str(&format!("  Total size: {}\n", format_size(total_size)));
    }
    output.push('\n');

    output.push_str(&format!("{}\n", heading("Dependencies", use_colors)));
    output.push_str(&format!("  Nodes: {}\n", metrics.total_nodes));
    output.push_str(&format!("  Edges: {}\n", metrics.total_edges));
    output.push_str(&format!("  Density: {:.4}\n", metrics.density));
    if !metrics.most_connected.is_empty() {
        output.push_str("  Most connected:\n");
        for (rank, path) in metrics.most_connected.iter().take(HOT_SPOTS_SHOWN).enumerate() {
            output.push_str(&format!("    {}. {}\n", rank + 1, path));
        }
    }
    if verbose && !result.dependencies.edges.is_empty() {
        output.push_str("  Edges:\n");
        for edge in &result.dependencies.edges {
            output.push_str(&format!("    {} -> {}\n", edge.source, edge.target));
        }
    }
    output.push('\n');

    if let Some(clustering) = &result.clustering {
        output.push_str(&format!(
            "{}\n",
            heading(&format!("Architecture ({})", clustering.method), use_colors)
        ));
        output.push_str(&indent(&clustering.architecture_summary(), "  "));
        output.push('\n');
    }

    output.push_str(&format!("{}\n", heading("Summary", use_colors)));
    output.push_str(&indent(&result.summaries.overview, "  "));
    if !result.summaries.files.is_empty() {
        output.push_str("\n  File summaries:\n");
        for (path, summary) in &result.summaries.files {
            output.push_str(&format!("    {}\n      {}\n", path, summary));
        }
    }

    if !result.errors.is_empty() {
        let count = format!("Issues encountered: {}", result.errors.len());
        let count = if use_colors {
            Yellow.bold().paint(count).to_string()
        } else {
            count
        };
        output.push_str(&format!("\n{}\n", count));
        if verbose {
            for issue in &result.errors {
                output.push_str(&format!(
                    "  [{}] {}: {}\n",
                    severity_label(issue.severity, use_colors),
                    issue.path,
                    issue.message
                ));
            }
        }
    }

    output
}

/// Format a batch run as text
pub fn format_batch_text(results: &BatchResults, use_colors: bool) -> String {
    let mut output = format!("{}\n", heading("Batch Analysis", use_colors));
    output.push_str(&format!(
        "  Repositories: {}  Successful: {}  Failed: {}\n\n",
        results.total_repos, results.successful, results.failed
    ));

    for report in &results.analyses {
        let status = match (report.success, use_colors) {
            (true, true) => Green.paint("OK").to_string(),
            (true, false) => "OK".to_string(),
            (false, true) => Red.paint("FAILED").to_string(),
            (false, false) => "FAILED".to_string(),
        };
        match &report.metadata {
            Some(metadata) if report.success => output.push_str(&format!(
                "  [{}] {}/{}: {} files, {}\n",
                status,
                report.owner,
                report.repo,
                metadata.total_files,
                metadata.primary_language.as_deref().unwrap_or("unknown"),
            )),
            _ => output.push_str(&format!(
                "  [{}] {}: {}\n",
                status,
                report.url,
                report.error.as_deref().unwrap_or("unknown error")
            )),
        }
    }
    output
}

/// Format a comparison as text
pub fn format_comparison_text(report: &ComparisonReport, use_colors: bool) -> String {
    let (left, right, delta) = (&report.left, &report.right, &report.delta);
    let mut output = format!(
        "{}\n\n",
        heading(&format!("Comparison: {} vs {}", left.repository, right.repository), use_colors)
    );

    output.push_str(&format!("  {:<18} {:>12} {:>12} {:>10}\n", "Metric", "Left", "Right", "Delta"));
    output.push_str(&format!(
        "  {:<18} {:>12} {:>12} {:>+10}\n",
        "Files", left.total_files, right.total_files, delta.files
    ));
    output.push_str(&format!(
        "  {:<18} {:>12} {:>12} {:>+10}\n",
        "Directories", left.total_directories, right.total_directories, delta.directories
    ));
    output.push_str(&format!(
        "  {:<18} {:>12} {:>12} {:>+10}\n",
        "Dependency edges", left.total_edges, right.total_edges, delta.edges
    ));
    output.push_str(&format!(
        "  {:<18} {:>12.4} {:>12.4} {:>+10.4}\n",
        "Density", left.density, right.density, delta.density
    ));
    output.push_str(&format!(
        "  {:<18} {:>12} {:>12}\n\n",
        "Primary language",
        left.primary_language.as_deref().unwrap_or("unknown"),
        right.primary_language.as_deref().unwrap_or("unknown"),
    ));

    output.push_str(&format!("  Shared languages: {}\n", join_or_none(&report.shared_languages)));
    output.push_str(&format!("  Only in {}: {}\n", left.repository, join_or_none(&report.only_left)));
    output.push_str(&format!("  Only in {}: {}\n", right.repository, join_or_none(&report.only_right)));
    output
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner()?;
    String::from_utf8(bytes).map_err(|source| RepoPilotError::CsvSerialize { source })
}

/// Format the file list of an analysis as CSV
pub fn format_analysis_csv(result: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Path", "Type", "Language", "Size (bytes)", "Key File", "Dependencies"])?;

    for entry in &result.structure.files {
        let dependencies = result
            .dependencies
            .dependencies
            .get(&entry.path)
            .map(|deps| deps.len().to_string())
            .unwrap_or_default();
        let language = entry.language.map(|l| l.as_str()).unwrap_or("");
        writer.write_record([
            entry.path.as_str(),
            if entry.is_file() { "file" } else { "directory" },
            language,
            entry.size.to_string().as_str(),
            if entry.is_key_file { "true" } else { "false" },
            dependencies.as_str(),
        ])?;
    }

    finish_csv(writer)
}

/// Format a batch run using the flattened batch export
pub fn format_batch_csv(results: &BatchResults) -> Result<String> {
    export_to_csv(results)
}

/// Format a comparison as CSV
pub fn format_comparison_csv(report: &ComparisonReport) -> Result<String> {
    let (left, right, delta) = (&report.left, &report.right, &report.delta);
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Metric", left.repository.as_str(), right.repository.as_str(), "Delta"])?;
    writer.write_record([
        "Files".to_string(),
        left.total_files.to_string(),
        right.total_files.to_string(),
        delta.files.to_string(),
    ])?;
    writer.write_record([
        "Directories".to_string(),
        left.total_directories.to_string(),
        right.total_directories.to_string(),
        delta.directories.to_string(),
    ])?;
    writer.write_record([
        "Dependency Edges".to_string(),
        left.total_edges.to_string(),
        right.total_edges.to_string(),
        delta.edges.to_string(),
    ])?;
    writer.write_record([
        "Density".to_string(),
        format!("{:.4}", left.density),
        format!("{:.4}", right.density),
        format!("{:.4}", delta.density),
    ])?;
    finish_csv(writer)
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const HTML_STYLE: &str = "body { font-family: Arial, sans-serif; margin: 20px; }
h1 { color: #2c3e50; }
.stat { display: inline-block; margin: 10px 20px 10px 0; }
.stat-value { font-size: 24px; font-weight: bold; color: #3498db; }
table { border-collapse: collapse; width: 100%; margin-top: 20px; }
th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }
th { background-color: #3498db; color: white; }
pre { background: #f6f8fa; padding: 12px; }";

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        HTML_STYLE,
        body
    )
}

fn html_stat(label: &str, value: &str) -> String {
    format!(
        "<div class=\"stat\"><div>{}</div><div class=\"stat-value\">{}</div></div>\n",
        escape_html(label),
        escape_html(value)
    )
}

fn html_table(headers: &[&str], rows: impl IntoIterator<Item = Vec<String>>) -> String {
    let mut table = String::from("<table>\n<tr>");
    for header in headers {
        table.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    table.push_str("</tr>\n");
    for row in rows {
        table.push_str("<tr>");
        for cell in row {
            table.push_str(&format!("<td>{}</td>", escape_html(&cell)));
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</table>\n");
    table
}

/// Format one analysis as a standalone HTML report
pub fn format_analysis_html(result: &AnalysisResult) -> String {
    let structure = &result.structure;
    let metrics = &result.dependencies.metrics;
    let mut body = format!(
        "<h1>RepoPilot Analysis Report: {}</h1>\n",
        escape_html(&result.metadata.repository)
    );

    body.push_str(&html_stat("Total Files", &structure.total_files.to_string()));
    body.push_str(&html_stat("Directories", &structure.total_directories.to_string()));
    body.push_str(&html_stat(
        "Primary Language",
        structure.primary_language.as_deref().unwrap_or("Unknown"),
    ));
    body.push_str(&html_stat("Dependencies", &metrics.total_edges.to_string()));
    body.push_str(&html_stat("Density", &format!("{:.4}", metrics.density)));

    body.push_str("<h2>Languages Used</h2>\n");
    body.push_str(&html_table(
        &["Language", "Files"],
        structure
            .languages_by_count()
            .into_iter()
            .map(|(language, count)| vec![language.to_string(), count.to_string()]),
    ));

    if !metrics.most_connected.is_empty() {
        body.push_str("<h2>Most Connected Files</h2>\n");
        body.push_str(&html_table(
            &["Rank", "File", "Summary"],
            metrics.most_connected.iter().enumerate().map(|(rank, path)| {
                vec![
                    (rank + 1).to_string(),
                    path.clone(),
                    result.summaries.files.get(path).cloned().unwrap_or_default(),
                ]
            }),
        ));
    }

    if let Some(clustering) = &result.clustering {
        body.push_str(&format!("<h2>Architecture ({})</h2>\n", clustering.method));
        body.push_str(&html_table(
            &["Group", "Pattern", "Files"],
            clustering.ordered_ids().into_iter().map(|id| {
                vec![
                    id.to_string(),
                    clustering.patterns.get(id).cloned().unwrap_or_default(),
                    clustering.clusters.get(id).map_or(0, Vec::len).to_string(),
                ]
            }),
        ));
    }

    body.push_str("<h2>Overview</h2>\n");
    body.push_str(&format!("<pre>{}</pre>\n", escape_html(&result.summaries.overview)));

    html_page("RepoPilot Analysis Report", &body)
}

/// Format a batch run as an HTML table
pub fn format_batch_html(results: &BatchResults) -> String {
    let mut body = String::from("<h1>RepoPilot Batch Analysis</h1>\n");
    body.push_str(&html_stat("Repositories", &results.total_repos.to_string()));
    body.push_str(&html_stat("Successful", &results.successful.to_string()));
    body.push_str(&html_stat("Failed", &results.failed.to_string()));
    body.push_str(&html_table(
        &["Repository", "Status", "Total Files", "Primary Language", "Dependencies"],
        results.analyses.iter().map(|report| match (&report.metadata, &report.dependencies) {
            (Some(metadata), Some(dependencies)) if report.success => vec![
                format!("{}/{}", report.owner, report.repo),
                "Success".to_string(),
                metadata.total_files.to_string(),
                metadata.primary_language.clone().unwrap_or_else(|| "Unknown".to_string()),
                dependencies.total_edges.to_string(),
            ],
            _ => vec![
                report.url.clone(),
                format!("Failed: {}", report.error.as_deref().unwrap_or("unknown error")),
                "N/A".to_string(),
                "N/A".to_string(),
                "N/A".to_string(),
            ],
        }),
    ));
    html_page("RepoPilot Batch Analysis", &body)
}

/// Format a comparison as an HTML table
pub fn format_comparison_html(report: &ComparisonReport) -> String {
    let (left, right, delta) = (&report.left, &report.right, &report.delta);
    let mut body = format!(
        "<h1>Comparison: {} vs {}</h1>\n",
        escape_html(&left.repository),
        escape_html(&right.repository)
    );
    body.push_str(&html_table(
        &["Metric", left.repository.as_str(), right.repository.as_str(), "Delta"],
        vec![
            vec![
                "Files".to_string(),
                left.total_files.to_string(),
                right.total_files.to_string(),
                format!("{:+}", delta.files),
            ],
            vec![
                "Directories".to_string(),
                left.total_directories.to_string(),
                right.total_directories.to_string(),
                format!("{:+}", delta.directories),
            ],
            vec![
                "Dependency Edges".to_string(),
                left.total_edges.to_string(),
                right.total_edges.to_string(),
                format!("{:+}", delta.edges),
            ],
            vec![
                "Density".to_string(),
                format!("{:.4}", left.density),
                format!("{:.4}", right.density),
                format!("{:+.4}", delta.density),
            ],
        ],
    ));
    body.push_str(&format!(
        "<p>Shared languages: {}</p>\n",
        escape_html(&join_or_none(&report.shared_languages))
    ));
    html_page("RepoPilot Comparison", &body)
}
