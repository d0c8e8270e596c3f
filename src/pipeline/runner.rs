//! Sort → group → detect → extract → aggregate

use crate::aggregate::{CohortAggregator, CohortAssigner};
use crate::aoi::AoiMap;
use crate::app::Config;
use crate::detect::FixationDetector;
use crate::model::{
    AoiCategory, Fixation, FrameRecord, GroupKey, MatrixRow, Transition, TransitionCount,
    TrialIdSource,
};
use crate::transition::TransitionExtractor;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Input frames consumed
    pub frames: usize,
    /// Participant × trial × segment groups detected over
    pub groups: usize,
    /// Frames skipped because their AOI pair was unmapped
    pub frames_unmapped: usize,
    /// Runs that closed below the minimum-frame threshold
    pub runs_discarded: usize,
    /// Fixations emitted across all groups
    pub fixations: usize,
    /// Transitions extracted across all trials
    pub transitions: usize,
}

/// Complete output of one batch run.
///
/// All tables are ordered deterministically; running the same input twice
/// yields byte-identical tables (the `run_id` differs per run).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Unique identifier for this run
    pub run_id: Uuid,
    /// Fixation table, ordered by participant, trial, segment, start frame
    pub fixations: Vec<Fixation>,
    /// Transition table, ordered by participant, trial, sequence position
    pub transitions: Vec<Transition>,
    /// Per participant×trial AOI-pair counts feeding the matrix
    pub counts: Vec<TransitionCount>,
    /// Dense cohort × AOI-pair matrix
    pub matrix: Vec<MatrixRow>,
    /// Run counters
    pub stats: PipelineStats,
}

/// Stateless batch runner wiring the detection, extraction, and aggregation
/// stages together under one configuration.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    aoi_map: AoiMap,
    min_frames: u32,
    trial_id_source: TrialIdSource,
    extractor: TransitionExtractor,
    assigner: CohortAssigner,
    aggregator: CohortAggregator,
}

impl AnalysisPipeline {
    /// Build a pipeline from a validated configuration.
    ///
    /// Fails when the configuration is invalid or its AOI overrides are
    /// malformed.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let aoi_map = AoiMap::with_overrides(&config.aoi.overrides)?;
        Ok(Self {
            aoi_map,
            min_frames: config.detection.min_frames,
            trial_id_source: config.detection.trial_id_source,
            extractor: TransitionExtractor::new(),
            assigner: CohortAssigner::new(config.cohorts.clone()),
            aggregator: CohortAggregator::new(config.cohorts),
        })
    }

    /// The merged AOI mapping this pipeline detects against.
    pub fn aoi_map(&self) -> &AoiMap {
        &self.aoi_map
    }

    /// Run the full batch analysis over a frame table.
    ///
    /// Frames may arrive in any order; the pipeline sorts them itself. Empty
    /// input yields an empty output, not an error. Aggregation is skipped
    /// when no transitions exist, so [`crate::Error::EmptyAggregation`] only
    /// fires when transitions were extracted but every one fell outside the
    /// configured cohort bands.
    pub fn run(&self, frames: &[FrameRecord]) -> Result<AnalysisOutput> {
        info!(frames = frames.len(), "starting batch analysis");
        let mut stats = PipelineStats {
            frames: frames.len(),
            ..PipelineStats::default()
        };

        // Group frames; BTreeMap ordering gives deterministic group order.
        let mut groups: BTreeMap<GroupKey, Vec<FrameRecord>> = BTreeMap::new();
        for frame in frames {
            groups
                .entry(frame.group_key(self.trial_id_source))
                .or_default()
                .push(frame.clone());
        }
        stats.groups = groups.len();

        // Detect per group; state never crosses a group boundary.
        let detector = FixationDetector::new(self.aoi_map.clone(), self.min_frames);
        let mut fixations: Vec<Fixation> = Vec::new();
        for (key, mut group_frames) in groups {
            group_frames.sort_by_key(|f| f.frame_index);
            let mut detection = detector.detect_group(&group_frames);
            // Fixations carry the resolved trial id, not the raw per-block one.
            for fix in &mut detection.fixations {
                fix.trial = key.trial;
            }
            debug!(
                participant = %key.participant,
                trial = key.trial,
                segment = %key.segment,
                frames = detection.stats.frames_seen,
                fixations = detection.stats.fixations,
                "group detected"
            );
            stats.frames_unmapped += detection.stats.frames_unmapped;
            stats.runs_discarded += detection.stats.runs_discarded;
            fixations.extend(detection.fixations);
        }

        // Label cohort bands before extraction so transitions inherit them.
        for fix in &mut fixations {
            fix.age_band = self.assigner.assign(fix.age_months).map(str::to_string);
        }
        stats.fixations = fixations.len();

        // Extract transitions per participant × trial, segments in order.
        let mut by_trial: BTreeMap<(String, u32), Vec<Fixation>> = BTreeMap::new();
        for fix in &fixations {
            by_trial
                .entry((fix.participant.clone(), fix.trial))
                .or_default()
                .push(fix.clone());
        }
        let mut transitions: Vec<Transition> = Vec::new();
        for trial_fixations in by_trial.values() {
            transitions.extend(self.extractor.extract(trial_fixations));
        }
        stats.transitions = transitions.len();

        let counts = Self::count_pairs(&transitions);

        let matrix = if transitions.is_empty() {
            Vec::new()
        } else {
            self.aggregator
                .aggregate(&counts, &self.aoi_map.categories())?
        };

        info!(
            groups = stats.groups,
            fixations = stats.fixations,
            transitions = stats.transitions,
            matrix_rows = matrix.len(),
            "batch analysis complete"
        );

        Ok(AnalysisOutput {
            run_id: Uuid::new_v4(),
            fixations,
            transitions,
            counts,
            matrix,
            stats,
        })
    }

    /// Collapse a transition table into per participant×trial AOI-pair counts.
    fn count_pairs(transitions: &[Transition]) -> Vec<TransitionCount> {
        let mut counts: BTreeMap<(String, u32, AoiCategory, AoiCategory), (f64, f64)> =
            BTreeMap::new();
        for t in transitions {
            let entry = counts
                .entry((
                    t.participant.clone(),
                    t.trial,
                    t.from_aoi.clone(),
                    t.to_aoi.clone(),
                ))
                .or_insert((t.age_months, 0.0));
            entry.1 += 1.0;
        }
        counts
            .into_iter()
            .map(
                |((participant, trial, from_aoi, to_aoi), (age_months, count))| TransitionCount {
                    participant,
                    trial,
                    age_months,
                    from_aoi,
                    to_aoi,
                    count,
                },
            )
            .collect()
    }
}
