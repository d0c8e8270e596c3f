//! Run-length state machine
//!
//! Two states: `Idle` (no open run) and `Accumulating` (an AOI plus the
//! frames buffered so far). The reset/finalize contract lives here so it can
//! be tested without building a full frame table.

use crate::model::{AoiCategory, Fixation, FrameRecord};

/// Current state of one detection run.
#[derive(Debug, Clone)]
enum RunState {
    /// No open run.
    Idle,
    /// Buffering consecutive frames that share `aoi`.
    Accumulating {
        aoi: AoiCategory,
        frames: Vec<FrameRecord>,
    },
}

/// Tracks a single group's run state and emits fixations as runs close.
///
/// A run closes when the mapped AOI changes, when a frame fails to map, or
/// at end of group. A frame-counter discontinuity alone never closes a run;
/// callers pre-split frames into segments when the counter restarts.
#[derive(Debug)]
pub struct RunTracker {
    state: RunState,
    min_frames: u32,
}

impl RunTracker {
    pub fn new(min_frames: u32) -> Self {
        Self {
            state: RunState::Idle,
            min_frames,
        }
    }

    /// Feed one successfully mapped frame.
    ///
    /// Returns a finalized fixation when the AOI changed and the closed run
    /// met the minimum-frame threshold.
    pub fn observe(&mut self, aoi: AoiCategory, frame: &FrameRecord) -> Option<Fixation> {
        match &mut self.state {
            RunState::Idle => {
                self.state = RunState::Accumulating {
                    aoi,
                    frames: vec![frame.clone()],
                };
                None
            }
            RunState::Accumulating { aoi: current, frames } => {
                if *current == aoi {
                    frames.push(frame.clone());
                    None
                } else {
                    let closed = self.finish();
                    self.state = RunState::Accumulating {
                        aoi,
                        frames: vec![frame.clone()],
                    };
                    closed
                }
            }
        }
    }

    /// Feed a frame whose (target-type, region) pair failed to map.
    ///
    /// Finalizes any open run; the failing frame itself contributes nothing.
    pub fn observe_unmapped(&mut self) -> Option<Fixation> {
        self.finish()
    }

    /// Close the current run, emitting a fixation if it was long enough.
    pub fn finish(&mut self) -> Option<Fixation> {
        let state = std::mem::replace(&mut self.state, RunState::Idle);
        match state {
            RunState::Idle => None,
            RunState::Accumulating { aoi, frames } => {
                if (frames.len() as u32) < self.min_frames {
                    return None;
                }
                Some(Self::finalize(aoi, &frames))
            }
        }
    }

    /// Number of frames buffered in the open run.
    pub fn buffered(&self) -> usize {
        match &self.state {
            RunState::Idle => 0,
            RunState::Accumulating { frames, .. } => frames.len(),
        }
    }

    fn finalize(aoi: AoiCategory, frames: &[FrameRecord]) -> Fixation {
        let first = &frames[0];
        let last = frames.last().expect("finalize requires a non-empty run");
        Fixation {
            participant: first.participant.clone(),
            participant_kind: first.participant_kind,
            age_months: first.age_months,
            age_band: None,
            trial: first.trial,
            condition: first.condition.clone(),
            segment: first.segment.clone(),
            aoi,
            start_frame: first.frame_index,
            end_frame: last.frame_index,
            duration_frames: frames.len() as u32,
            duration_ms: (last.offset - first.onset) * 1000.0,
            onset: first.onset,
            offset: last.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParticipantKind;

    fn frame(index: u32, onset: f64) -> FrameRecord {
        FrameRecord {
            participant: "p01".to_string(),
            participant_kind: ParticipantKind::Infant,
            age_months: 12.0,
            trial: 1,
            global_trial: None,
            segment: "a".to_string(),
            condition: "demo".to_string(),
            target_type: "face".to_string(),
            region: "man".to_string(),
            onset,
            offset: onset + 0.04,
            frame_index: index,
        }
    }

    fn aoi(label: &str) -> AoiCategory {
        AoiCategory::from(label)
    }

    #[test]
    fn test_idle_start_buffers_without_emitting() {
        let mut tracker = RunTracker::new(3);
        assert!(tracker.observe(aoi("man_face"), &frame(1, 0.0)).is_none());
        assert_eq!(tracker.buffered(), 1);
    }

    #[test]
    fn test_same_aoi_extends_run() {
        let mut tracker = RunTracker::new(3);
        tracker.observe(aoi("man_face"), &frame(1, 0.0));
        tracker.observe(aoi("man_face"), &frame(2, 0.04));
        assert_eq!(tracker.buffered(), 2);
    }

    #[test]
    fn test_aoi_change_emits_when_long_enough() {
        let mut tracker = RunTracker::new(2);
        tracker.observe(aoi("man_face"), &frame(1, 0.0));
        tracker.observe(aoi("man_face"), &frame(2, 0.04));
        let closed = tracker.observe(aoi("toy_present"), &frame(3, 0.08));
        let fix = closed.expect("run of 2 should finalize at min_frames=2");
        assert_eq!(fix.aoi, aoi("man_face"));
        assert_eq!(fix.start_frame, 1);
        assert_eq!(fix.end_frame, 2);
        assert_eq!(fix.duration_frames, 2);
        // New run already holds the changing frame
        assert_eq!(tracker.buffered(), 1);
    }

    #[test]
    fn test_aoi_change_discards_short_run() {
        let mut tracker = RunTracker::new(3);
        tracker.observe(aoi("man_face"), &frame(1, 0.0));
        assert!(tracker.observe(aoi("toy_present"), &frame(2, 0.04)).is_none());
        assert_eq!(tracker.buffered(), 1);
    }

    #[test]
    fn test_unmapped_frame_resets_to_idle() {
        let mut tracker = RunTracker::new(2);
        tracker.observe(aoi("man_face"), &frame(1, 0.0));
        tracker.observe(aoi("man_face"), &frame(2, 0.04));
        let closed = tracker.observe_unmapped();
        assert!(closed.is_some());
        assert_eq!(tracker.buffered(), 0);
    }

    #[test]
    fn test_finish_on_empty_tracker() {
        let mut tracker = RunTracker::new(3);
        assert!(tracker.finish().is_none());
    }

    #[test]
    fn test_duration_ms_spans_first_onset_to_last_offset() {
        let mut tracker = RunTracker::new(3);
        tracker.observe(aoi("man_face"), &frame(1, 1.00));
        tracker.observe(aoi("man_face"), &frame(2, 1.04));
        tracker.observe(aoi("man_face"), &frame(3, 1.08));
        let fix = tracker.finish().unwrap();
        assert!((fix.duration_ms - 120.0).abs() < 1e-9);
        assert_eq!(fix.onset, 1.00);
        assert_eq!(fix.offset, 1.12);
    }

    #[test]
    fn test_counter_discontinuity_does_not_break_run() {
        // Counter restarts mid-run: AOI continuity is the only run breaker.
        let mut tracker = RunTracker::new(3);
        tracker.observe(aoi("man_face"), &frame(139, 0.0));
        tracker.observe(aoi("man_face"), &frame(140, 0.04));
        tracker.observe(aoi("man_face"), &frame(1, 0.08));
        tracker.observe(aoi("man_face"), &frame(2, 0.12));
        let fix = tracker.finish().unwrap();
        assert_eq!(fix.duration_frames, 4);
    }
}
