//! GitHub Actions workflow templates
//!
//! Static YAML that runs `repopilot` in CI. Nothing here executes a workflow.

use crate::error::{RepoPilotError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const PR_ANALYSIS_WORKFLOW: &str = r#"name: RepoPilot PR Analysis

on:
  pull_request:
    types: [opened, synchronize, reopened]

jobs:
  analyze:
    runs-on: ubuntu-latest

    steps:
    - name: Checkout code
      uses: actions/checkout@v4
      with:
        fetch-depth: 0

    - name: Install Rust
      uses: dtolnay/rust-toolchain@stable

    - name: Install RepoPilot
      run: cargo install repopilot --locked

    - name: Run repository analysis
      run: |
        repopilot --output json --output-file pr-analysis.json --no-progress analyze .

    - name: Comment results on PR
      if: always()
      uses: actions/github-script@v7
      with:
        script: |
          const fs = require('fs');
          let comment = '## RepoPilot Analysis Results\n\n';

          try {
            const analysis = JSON.parse(fs.readFileSync('pr-analysis.json', 'utf8'));
            const structure = analysis.structure;
            const metrics = analysis.dependencies.metrics;

            comment += `**Repository Statistics:**\n`;
            comment += `- Total Files: ${structure.total_files}\n`;
            comment += `- Total Directories: ${structure.total_directories}\n`;
            comment += `- Primary Language: ${structure.primary_language || 'Unknown'}\n`;
            comment += `- Dependency Edges: ${metrics.total_edges}\n\n`;

            const languages = Object.entries(structure.languages || {});
            if (languages.length > 0) {
              comment += `**Language Distribution:**\n`;
              languages.forEach(([lang, count]) => {
                comment += `- ${lang}: ${count} files\n`;
              });
              comment += '\n';
            }

            if (structure.key_files && structure.key_files.length > 0) {
              comment += `**Key Files Identified:**\n`;
              structure.key_files.slice(0, 5).forEach(file => {
                comment += `- \`${file}\`\n`;
              });
            }
          } catch (error) {
            comment += `Analysis encountered an error: ${error.message}`;
          }

          github.rest.issues.createComment({
            issue_number: context.issue.number,
            owner: context.repo.owner,
            repo: context.repo.repo,
            body: comment
          });"#;

const SCHEDULED_ANALYSIS_WORKFLOW: &str = r#"name: RepoPilot Scheduled Analysis

on:
  schedule:
    # daily at 02:00 UTC
    - cron: '0 2 * * *'
  workflow_dispatch:

jobs:
  analyze:
    runs-on: ubuntu-latest

    steps:
    - name: Checkout code
      uses: actions/checkout@v4
      with:
        fetch-depth: 0

    - name: Install Rust
      uses: dtolnay/rust-toolchain@stable

    - name: Install RepoPilot
      run: cargo install repopilot --locked

    - name: Run full repository analysis
      run: |
        repopilot --output json --output-file analysis-report.json --no-progress analyze .

    - name: Generate HTML report
      run: |
        repopilot --output html --output-file analysis-report.html --no-progress analyze .

    - name: Upload analysis as artifact
      uses: actions/upload-artifact@v4
      with:
        name: repopilot-analysis
        path: |
          analysis-report.json
          analysis-report.html"#;

/// A downloadable workflow file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowTemplate {
    pub file_name: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

/// Workflow that analyzes each pull request and comments the results
pub fn pr_analysis_workflow() -> &'static str {
    PR_ANALYSIS_WORKFLOW
}

/// Workflow that analyzes the repository daily and uploads a report
pub fn scheduled_analysis_workflow() -> &'static str {
    SCHEDULED_ANALYSIS_WORKFLOW
}

/// All available workflow templates
pub fn workflow_templates() -> Vec<WorkflowTemplate> {
    vec![
        WorkflowTemplate {
            file_name: "pr-analysis.yml",
            name: "PR Analysis (Comments results on PRs)",
            description: "Analyzes the repository on every pull request and comments the results",
            content: pr_analysis_workflow(),
        },
        WorkflowTemplate {
            file_name: "scheduled-analysis.yml",
            name: "Scheduled Analysis (Daily report)",
            description: "Analyzes the entire repository daily and uploads JSON and HTML reports",
            content: scheduled_analysis_workflow(),
        },
    ]
}

/// Write every template into `dir`, returning the written paths
pub fn write_workflows(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RepoPilotError::OutputDirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut written = Vec::new();
    for template in workflow_templates() {
        let path = dir.join(template.file_name);
        fs::write(&path, format!("{}\n", template.content)).map_err(|source| RepoPilotError::OutputWrite {
            path: path.clone(),
            source,
        })?;
        tracing::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
