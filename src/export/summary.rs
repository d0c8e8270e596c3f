//! Markdown run summary

use crate::pipeline::AnalysisOutput;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Markdown builder for per-run summary reports.
pub struct SummaryBuilder {
    /// Buffer for building markdown
    buffer: String,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(4096),
        }
    }

    /// Build a summary report from a completed run.
    pub fn build(&mut self, output: &AnalysisOutput) -> String {
        self.buffer.clear();

        // Writing to a String is infallible, so these cannot fail
        self.write_header(output).expect("write to String");
        self.write_counters(output).expect("write to String");
        self.write_matrix(output).expect("write to String");

        std::mem::take(&mut self.buffer)
    }

    fn write_header(&mut self, output: &AnalysisOutput) -> std::fmt::Result {
        writeln!(self.buffer, "# Gaze Analysis Run")?;
        writeln!(self.buffer)?;
        writeln!(self.buffer, "- Run: `{}`", output.run_id)?;
        writeln!(
            self.buffer,
            "- Generated: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.buffer)?;
        Ok(())
    }

    fn write_counters(&mut self, output: &AnalysisOutput) -> std::fmt::Result {
        let stats = &output.stats;
        writeln!(self.buffer, "## Counters")?;
        writeln!(self.buffer)?;
        writeln!(self.buffer, "| Stage | Count |")?;
        writeln!(self.buffer, "|-------|-------|")?;
        writeln!(self.buffer, "| Frames | {} |", stats.frames)?;
        writeln!(self.buffer, "| Groups | {} |", stats.groups)?;
        writeln!(self.buffer, "| Unmapped frames | {} |", stats.frames_unmapped)?;
        writeln!(self.buffer, "| Discarded runs | {} |", stats.runs_discarded)?;
        writeln!(self.buffer, "| Fixations | {} |", stats.fixations)?;
        writeln!(self.buffer, "| Transitions | {} |", stats.transitions)?;
        writeln!(self.buffer)?;
        Ok(())
    }

    fn write_matrix(&mut self, output: &AnalysisOutput) -> std::fmt::Result {
        writeln!(self.buffer, "## Cohort Transition Matrix")?;
        writeln!(self.buffer)?;

        if output.matrix.is_empty() {
            writeln!(self.buffer, "No transitions available for this run.")?;
            writeln!(self.buffer)?;
            return Ok(());
        }

        // One table per cohort, preserving the matrix's cohort order.
        let mut by_cohort: BTreeMap<&str, Vec<&crate::model::MatrixRow>> = BTreeMap::new();
        let mut cohort_order: Vec<&str> = Vec::new();
        for row in &output.matrix {
            if !by_cohort.contains_key(row.cohort.as_str()) {
                cohort_order.push(row.cohort.as_str());
            }
            by_cohort.entry(row.cohort.as_str()).or_default().push(row);
        }

        for cohort in cohort_order {
            writeln!(self.buffer, "### {cohort}")?;
            writeln!(self.buffer)?;
            writeln!(self.buffer, "| From | To | Mean count |")?;
            writeln!(self.buffer, "|------|----|------------|")?;
            for row in &by_cohort[cohort] {
                writeln!(
                    self.buffer,
                    "| {} | {} | {:.3} |",
                    row.from_aoi, row.to_aoi, row.mean_count
                )?;
            }
            writeln!(self.buffer)?;
        }
        Ok(())
    }
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AoiCategory, MatrixRow};
    use crate::pipeline::PipelineStats;
    use uuid::Uuid;

    fn output_with_matrix(matrix: Vec<MatrixRow>) -> AnalysisOutput {
        AnalysisOutput {
            run_id: Uuid::new_v4(),
            fixations: Vec::new(),
            transitions: Vec::new(),
            counts: Vec::new(),
            matrix,
            stats: PipelineStats {
                frames: 9,
                groups: 1,
                frames_unmapped: 0,
                runs_discarded: 0,
                fixations: 3,
                transitions: 2,
            },
        }
    }

    fn row(cohort: &str, from: &str, to: &str, mean: f64) -> MatrixRow {
        MatrixRow {
            cohort: cohort.to_string(),
            from_aoi: AoiCategory::from(from),
            to_aoi: AoiCategory::from(to),
            mean_count: mean,
        }
    }

    #[test]
    fn test_summary_contains_counters() {
        let report = SummaryBuilder::new().build(&output_with_matrix(Vec::new()));
        assert!(report.contains("# Gaze Analysis Run"));
        assert!(report.contains("| Frames | 9 |"));
        assert!(report.contains("| Transitions | 2 |"));
    }

    #[test]
    fn test_empty_matrix_notice() {
        let report = SummaryBuilder::new().build(&output_with_matrix(Vec::new()));
        assert!(report.contains("No transitions available"));
    }

    #[test]
    fn test_matrix_tables_grouped_by_cohort() {
        let matrix = vec![
            row("9mo", "man_face", "toy_present", 1.5),
            row("9mo", "toy_present", "man_face", 0.0),
            row("12mo", "man_face", "toy_present", 2.0),
        ];
        let report = SummaryBuilder::new().build(&output_with_matrix(matrix));
        assert!(report.contains("### 9mo"));
        assert!(report.contains("### 12mo"));
        assert!(report.contains("| man_face | toy_present | 1.500 |"));
        // Cohort sections keep matrix order, not alphabetical order
        let pos_9 = report.find("### 9mo").unwrap();
        let pos_12 = report.find("### 12mo").unwrap();
        assert!(pos_9 < pos_12);
    }

    #[test]
    fn test_builder_reusable() {
        let mut builder = SummaryBuilder::new();
        let a = builder.build(&output_with_matrix(Vec::new()));
        let b = builder.build(&output_with_matrix(Vec::new()));
        assert!(a.contains("# Gaze Analysis Run"));
        assert!(b.contains("# Gaze Analysis Run"));
    }
}
