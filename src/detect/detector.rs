//! Per-group fixation detection

use super::run_state::RunTracker;
use crate::aoi::AoiMap;
use crate::model::{Fixation, FrameRecord};
use tracing::debug;

/// Counters for one group's detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionStats {
    /// Frames consumed from the group
    pub frames_seen: usize,
    /// Frames skipped because their (target-type, region) pair was unmapped
    pub frames_unmapped: usize,
    /// Runs that closed below the minimum-frame threshold
    pub runs_discarded: usize,
    /// Fixations emitted
    pub fixations: usize,
}

/// Result of detecting fixations over one group.
#[derive(Debug, Clone)]
pub struct GroupDetection {
    pub fixations: Vec<Fixation>,
    pub stats: DetectionStats,
}

/// Detects fixations over ordered frames of one participant × trial ×
/// segment group.
///
/// Frames must be pre-sorted by frame index within the group. An unmapped
/// frame ends the current run without failing the batch; empty input yields
/// empty output.
pub struct FixationDetector {
    aoi_map: AoiMap,
    min_frames: u32,
}

impl FixationDetector {
    /// Create a detector. `min_frames` must be positive; configuration
    /// validation enforces this before a pipeline is built.
    pub fn new(aoi_map: AoiMap, min_frames: u32) -> Self {
        debug_assert!(min_frames >= 1, "min_frames must be positive");
        Self { aoi_map, min_frames }
    }

    /// Minimum run length in frames.
    pub fn min_frames(&self) -> u32 {
        self.min_frames
    }

    /// Detect fixations over one group's ordered frames.
    pub fn detect(&self, frames: &[FrameRecord]) -> Vec<Fixation> {
        self.detect_group(frames).fixations
    }

    /// Detect fixations and report per-group counters.
    pub fn detect_group(&self, frames: &[FrameRecord]) -> GroupDetection {
        let mut tracker = RunTracker::new(self.min_frames);
        let mut stats = DetectionStats::default();
        let mut fixations = Vec::new();

        for frame in frames {
            stats.frames_seen += 1;
            match self.aoi_map.map(&frame.target_type, &frame.region) {
                Ok(aoi) => {
                    let open_before = tracker.buffered();
                    if let Some(fix) = tracker.observe(aoi, frame) {
                        fixations.push(fix);
                    } else if open_before > 0 && tracker.buffered() == 1 {
                        // Run closed on AOI change but was too short to emit
                        stats.runs_discarded += 1;
                    }
                }
                Err(err) => {
                    debug!(
                        frame = frame.frame_index,
                        participant = %frame.participant,
                        "skipping unmapped frame: {err}"
                    );
                    stats.frames_unmapped += 1;
                    let open = tracker.buffered();
                    if let Some(fix) = tracker.observe_unmapped() {
                        fixations.push(fix);
                    } else if open > 0 {
                        stats.runs_discarded += 1;
                    }
                }
            }
        }

        let open = tracker.buffered();
        if let Some(fix) = tracker.finish() {
            fixations.push(fix);
        } else if open > 0 {
            stats.runs_discarded += 1;
        }

        stats.fixations = fixations.len();
        GroupDetection { fixations, stats }
    }
}
