use crate::error::{AnalysisError, Result};
use crate::types::{DatasetProfile, WhatIfResult};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Markdown rendering
// ============================================================================

/// Pure presentation layer: renders profiles and what-if results as
/// fixed-structure markdown. No numeric computation happens here.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Render a what-if result: scenario details, before/after/delta table,
    /// and the impact bullet list.
    pub fn what_if_markdown(result: &WhatIfResult) -> String {
        let target = &result.modification.column;
        let mut out = String::new();

        out.push_str("## What-If Scenario Analysis\n\n");
        out.push_str("### Scenario Details\n");
        let _ = writeln!(
            out,
            "**Modification Applied:** {}\n",
            result.modification.describe()
        );

        let _ = writeln!(out, "### Direct Impact on {target}\n");
        out.push_str("| Statistic | Original | New | Change | % Change |\n");
        out.push_str("|-----------|----------|-----|--------|----------|\n");
        let baseline = result.baseline.fields();
        let modified = result.modified.fields();
        let changes = result.percent_changes.fields();
        for ((label, old), ((_, new), (_, change))) in baseline
            .into_iter()
            .zip(modified.into_iter().zip(changes.into_iter()))
        {
            let _ = writeln!(
                out,
                "| **{}** | {:.2} | {:.2} | {:.2} | {:.1}% |",
                label,
                old,
                new,
                new - old,
                change
            );
        }

        out.push_str("\n### Estimated Impact on Related Variables\n");
        if result.impacts.is_empty() {
            out.push_str("\nNo significant correlations found with other numerical variables.\n");
        } else {
            for impact in &result.impacts {
                let _ = writeln!(
                    out,
                    "\n**{}:**\n- Correlation with {}: {:.3} ({} {})\n- Estimated impact: {:.1}% change",
                    impact.column,
                    target,
                    impact.correlation,
                    impact.strength_label(),
                    impact.direction_label(),
                    impact.estimated_impact
                );
            }
        }

        out.push_str("\n### Narrative Analysis\n\n");
        match &result.narrative {
            Some(narrative) => out.push_str(narrative),
            None => out.push_str("*Narrative analysis unavailable.*"),
        }
        out.push('\n');

        out
    }

    /// Render a dataset profile as markdown tables.
    pub fn profile_markdown(profile: &DatasetProfile) -> String {
        let mut out = String::new();

        out.push_str("## Dataset Profile\n\n");
        let _ = writeln!(
            out,
            "{} rows x {} columns\n",
            profile.shape.0, profile.shape.1
        );

        if !profile.numeric.is_empty() {
            out.push_str("### Numeric Columns\n\n");
            out.push_str(
                "| Column | Count | Mean | Std Dev | Min | 25% | Median | 75% | Max | Outliers |\n",
            );
            out.push_str(
                "|--------|-------|------|---------|-----|-----|--------|-----|-----|----------|\n",
            );
            for (name, summary) in &profile.numeric {
                let _ = writeln!(
                    out,
                    "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {} |",
                    name,
                    summary.count,
                    summary.mean,
                    summary.std,
                    summary.min,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.max,
                    summary.outlier_count
                );
            }
            out.push('\n');
        }

        if !profile.categorical.is_empty() {
            out.push_str("### Categorical Columns\n\n");
            out.push_str("| Column | Distinct | Top Values |\n");
            out.push_str("|--------|----------|------------|\n");
            for (name, summary) in &profile.categorical {
                let mut entries: Vec<(&String, &usize)> = summary.value_counts.iter().collect();
                entries.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
                let top: Vec<String> = entries
                    .iter()
                    .take(3)
                    .map(|(value, count)| format!("{value} ({count})"))
                    .collect();
                let _ = writeln!(
                    out,
                    "| {} | {} | {} |",
                    name,
                    summary.distinct_count,
                    top.join(", ")
                );
            }
        }

        out
    }
}

// ============================================================================
// JSON report envelope
// ============================================================================

/// The full JSON-serializable analysis report handed to frontends and
/// narrative consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    /// Name of the analyzed input.
    pub input_file: String,
    /// (rows, columns) of the profiled dataset.
    pub shape: (usize, usize),
    /// Imputation actions performed at ingest.
    pub cleaning_actions: Vec<String>,
    /// Full dataset profile.
    pub profile: DatasetProfile,
    /// What-if result, when the report covers a scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_if: Option<WhatIfResult>,
    /// Narrative from the external provider; None when unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl AnalysisReport {
    /// Assemble a report with the current local timestamp.
    pub fn new(
        input_file: impl Into<String>,
        cleaning_actions: Vec<String>,
        profile: DatasetProfile,
        what_if: Option<WhatIfResult>,
        narrative: Option<String>,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            shape: profile.shape,
            cleaning_actions,
            profile,
            what_if,
            narrative,
        }
    }
}

/// Writes [`AnalysisReport`]s as pretty-printed JSON files.
pub struct ReportWriter {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
            output_name: None,
        }
    }
}

impl ReportWriter {
    /// Create a writer with custom output settings.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Write the report as `<stem>_report.json` (or the configured
    /// output_name) inside the output directory, creating it if needed.
    pub fn write(&self, report: &AnalysisReport, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            AnalysisError::ReportGenerationFailed(format!(
                "cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let file_name = match &self.output_name {
            Some(name) => format!("{name}.json"),
            None => format!("{stem}_report.json"),
        };
        let path = self.output_dir.join(file_name);

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)?;
        info!("Report written to {}", path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImpactEstimate, Modification, TargetStats};
    use std::collections::BTreeMap;

    fn sample_profile() -> DatasetProfile {
        let mut numeric = BTreeMap::new();
        numeric.insert(
            "salary".to_string(),
            crate::types::NumericSummary {
                count: 5,
                mean: 225200.0,
                std: 433132.0,
                min: 30000.0,
                q1: 31000.0,
                median: 32000.0,
                q3: 33000.0,
                max: 1_000_000.0,
                outlier_count: 1,
            },
        );
        let mut categorical = BTreeMap::new();
        let mut counts = BTreeMap::new();
        counts.insert("NY".to_string(), 3);
        counts.insert("Boston".to_string(), 1);
        categorical.insert(
            "city".to_string(),
            crate::types::CategoricalSummary {
                value_counts: counts,
                distinct_count: 2,
            },
        );

        DatasetProfile {
            shape: (5, 2),
            numeric,
            categorical,
        }
    }

    fn sample_what_if() -> WhatIfResult {
        WhatIfResult {
            modification: Modification::percent_increase("salary", 10.0),
            baseline: TargetStats {
                mean: 50.0,
                median: 50.0,
                std: 5.0,
                min: 40.0,
                max: 60.0,
            },
            modified: TargetStats {
                mean: 55.0,
                median: 55.0,
                std: 5.5,
                min: 44.0,
                max: 66.0,
            },
            percent_changes: TargetStats {
                mean: 10.0,
                median: 10.0,
                std: 10.0,
                min: 10.0,
                max: 10.0,
            },
            impacts: vec![ImpactEstimate {
                column: "bonus".to_string(),
                correlation: 0.95,
                estimated_impact: 9.5,
            }],
            modified_profile: sample_profile(),
            narrative: None,
        }
    }

    // ==================== what_if_markdown tests ====================

    #[test]
    fn test_what_if_table_rows() {
        let md = ReportFormatter::what_if_markdown(&sample_what_if());

        assert!(md.contains("| Statistic | Original | New | Change | % Change |"));
        assert!(md.contains("| **Mean** | 50.00 | 55.00 | 5.00 | 10.0% |"));
        assert!(md.contains("### Direct Impact on salary"));
    }

    #[test]
    fn test_what_if_impact_bullets() {
        let md = ReportFormatter::what_if_markdown(&sample_what_if());

        assert!(md.contains("**bonus:**"));
        assert!(md.contains("Correlation with salary: 0.950 (Strong positive)"));
        assert!(md.contains("Estimated impact: 9.5% change"));
    }

    #[test]
    fn test_what_if_no_impacts_message() {
        let mut result = sample_what_if();
        result.impacts.clear();
        let md = ReportFormatter::what_if_markdown(&result);

        assert!(md.contains("No significant correlations found"));
    }

    #[test]
    fn test_what_if_narrative_degraded_marker() {
        let mut result = sample_what_if();
        let md = ReportFormatter::what_if_markdown(&result);
        assert!(md.contains("*Narrative analysis unavailable.*"));

        result.narrative = Some("The change is material.".to_string());
        let md = ReportFormatter::what_if_markdown(&result);
        assert!(md.contains("The change is material."));
    }

    // ==================== profile_markdown tests ====================

    #[test]
    fn test_profile_markdown_sections() {
        let md = ReportFormatter::profile_markdown(&sample_profile());

        assert!(md.contains("5 rows x 2 columns"));
        assert!(md.contains("### Numeric Columns"));
        assert!(md.contains("### Categorical Columns"));
        assert!(md.contains("| salary | 5 |"));
        assert!(md.contains("NY (3), Boston (1)"));
    }

    #[test]
    fn test_profile_markdown_omits_empty_sections() {
        let profile = DatasetProfile {
            shape: (3, 1),
            numeric: BTreeMap::new(),
            categorical: sample_profile().categorical,
        };
        let md = ReportFormatter::profile_markdown(&profile);

        assert!(!md.contains("### Numeric Columns"));
        assert!(md.contains("### Categorical Columns"));
    }

    // ==================== ReportWriter tests ====================

    #[test]
    fn test_report_writer_roundtrip() {
        let dir = std::env::temp_dir().join("tabula_report_writer_test");
        let writer = ReportWriter::new(dir.clone(), None);
        let report = AnalysisReport::new(
            "employees.csv",
            vec!["Filled 2 missing values in 'age' with median 28.00".to_string()],
            sample_profile(),
            None,
            None,
        );

        let path = writer.write(&report, "employees").unwrap();
        assert!(path.ends_with("employees_report.json"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let back: AnalysisReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(back.input_file, "employees.csv");
        assert_eq!(back.shape, (5, 2));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_report_writer_custom_name() {
        let dir = std::env::temp_dir().join("tabula_report_name_test");
        let writer = ReportWriter::new(dir.clone(), Some("quarterly".to_string()));
        let report = AnalysisReport::new("q.csv", vec![], sample_profile(), None, None);

        let path = writer.write(&report, "ignored").unwrap();
        assert!(path.ends_with("quarterly.json"));

        std::fs::remove_dir_all(dir).ok();
    }
}
