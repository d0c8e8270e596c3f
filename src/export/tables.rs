//! JSON table export

use crate::pipeline::AnalysisOutput;
use crate::Result;
use std::path::Path;

/// Writes the pipeline's output tables as JSON files.
///
/// Each table is written independently so downstream tooling can consume
/// the fixation table without waiting for the matrix, and a combined
/// document carries the whole run. Output is pretty-printed; table ordering
/// comes from the pipeline and is already deterministic.
pub struct TableWriter;

impl TableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the full run to a JSON string.
    pub fn to_json(&self, output: &AnalysisOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(output)?)
    }

    /// Serialize only the fixation table.
    pub fn fixations_json(&self, output: &AnalysisOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(&output.fixations)?)
    }

    /// Serialize only the transition table.
    pub fn transitions_json(&self, output: &AnalysisOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(&output.transitions)?)
    }

    /// Serialize only the dense cohort matrix.
    pub fn matrix_json(&self, output: &AnalysisOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(&output.matrix)?)
    }

    /// Write the combined run document to a file, creating parent
    /// directories as needed.
    pub fn write_json(&self, output: &AnalysisOutput, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json(output)?)?;
        Ok(())
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}
