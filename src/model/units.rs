//! Derived behavioral units
//!
//! Fixations are emitted by the detector, transitions by the extractor, and
//! matrix rows by the aggregator. All are plain values; transitions are
//! recomputed whenever their source fixations change and are never persisted
//! independently.

use super::frame::ParticipantKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A semantic Area-of-Interest label, e.g. `man_face` or `toy_present`.
///
/// Computed per frame by the AOI mapper; not an independent entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AoiCategory(String);

impl AoiCategory {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AoiCategory {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

/// A maximal run of consecutive same-AOI frames of at least the configured
/// minimum length.
///
/// Invariants: `start_frame <= end_frame` and `duration_frames` equals the
/// number of frames in the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixation {
    pub participant: String,
    pub participant_kind: ParticipantKind,
    pub age_months: f64,
    /// Cohort label, filled by the pipeline once cohort bands are known
    pub age_band: Option<String>,
    pub trial: u32,
    pub condition: String,
    pub segment: String,
    pub aoi: AoiCategory,
    pub start_frame: u32,
    pub end_frame: u32,
    pub duration_frames: u32,
    /// `(last.offset - first.onset) * 1000`
    pub duration_ms: f64,
    pub onset: f64,
    pub offset: f64,
}

/// A directed move between two adjacent, distinct-AOI fixations in a trial.
///
/// Invariant: `from_aoi != to_aoi`. Context fields are taken from the
/// leading fixation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub participant: String,
    pub trial: u32,
    pub condition: String,
    pub age_months: f64,
    pub age_band: Option<String>,
    pub from_aoi: AoiCategory,
    pub to_aoi: AoiCategory,
}

/// Per participant×trial observation of how often one AOI pair occurred.
///
/// This is the aggregator's input row; the count metric is supplied by the
/// caller, not recomputed during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionCount {
    pub participant: String,
    pub trial: u32,
    pub age_months: f64,
    pub from_aoi: AoiCategory,
    pub to_aoi: AoiCategory,
    pub count: f64,
}

/// A labeled, inclusive age band in months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    pub label: String,
    pub min_months: f64,
    pub max_months: f64,
}

impl Cohort {
    pub fn new(label: impl Into<String>, min_months: f64, max_months: f64) -> Self {
        Self {
            label: label.into(),
            min_months,
            max_months,
        }
    }

    /// Inclusive band membership test.
    pub fn contains(&self, age_months: f64) -> bool {
        age_months >= self.min_months && age_months <= self.max_months
    }
}

/// One row of the dense cohort transition matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub cohort: String,
    pub from_aoi: AoiCategory,
    pub to_aoi: AoiCategory,
    pub mean_count: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aoi_category_display() {
        let aoi = AoiCategory::new("man_face");
        assert_eq!(aoi.to_string(), "man_face");
        assert_eq!(aoi.as_str(), "man_face");
    }

    #[test]
    fn test_aoi_category_equality() {
        assert_eq!(AoiCategory::from("toy_present"), AoiCategory::new("toy_present"));
        assert_ne!(AoiCategory::from("toy_present"), AoiCategory::from("toy_absent"));
    }

    #[test]
    fn test_cohort_contains_inclusive_bounds() {
        let cohort = Cohort::new("12mo", 11.0, 13.0);
        assert!(cohort.contains(11.0));
        assert!(cohort.contains(12.5));
        assert!(cohort.contains(13.0));
        assert!(!cohort.contains(10.9));
        assert!(!cohort.contains(13.1));
    }

    #[test]
    fn test_aoi_serde_transparent() {
        let aoi = AoiCategory::new("woman_face");
        let json = serde_json::to_string(&aoi).unwrap();
        assert_eq!(json, "\"woman_face\"");
        let back: AoiCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, aoi);
    }
}
