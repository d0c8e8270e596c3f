//! Collapse and adjacent-pair extraction

use crate::model::{Fixation, Transition};
use tracing::warn;

/// Extracts fixation-to-fixation transitions for one trial.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionExtractor;

impl TransitionExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Merge immediately-adjacent fixations that share an AOI.
    ///
    /// The merged fixation keeps the first fixation's start and the last
    /// fixation's end; frame durations are summed and the millisecond
    /// duration is recomputed from the merged onset/offset. Detector boundary
    /// splits (segment borders, recovered runs) otherwise show up as spurious
    /// same-AOI "transitions".
    pub fn collapse(&self, fixations: &[Fixation]) -> Vec<Fixation> {
        let mut collapsed: Vec<Fixation> = Vec::with_capacity(fixations.len());
        for fix in fixations {
            match collapsed.last_mut() {
                Some(prev) if prev.aoi == fix.aoi => {
                    prev.end_frame = fix.end_frame;
                    prev.offset = fix.offset;
                    prev.duration_frames += fix.duration_frames;
                    prev.duration_ms = (prev.offset - prev.onset) * 1000.0;
                }
                _ => collapsed.push(fix.clone()),
            }
        }
        collapsed
    }

    /// Extract transitions from one trial's ordered fixation sequence.
    ///
    /// Fewer than two collapsed fixations yield no transitions. Context
    /// fields are taken from the leading fixation of each pair.
    pub fn extract(&self, fixations: &[Fixation]) -> Vec<Transition> {
        let collapsed = self.collapse(fixations);
        let mut transitions = Vec::new();

        for pair in collapsed.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            // Unreachable after collapsing; a self-loop here is a logic error.
            debug_assert_ne!(from.aoi, to.aoi, "self-loop survived collapsing");
            if from.aoi == to.aoi {
                warn!(aoi = %from.aoi, "skipping self-loop transition after collapse");
                continue;
            }
            transitions.push(Transition {
                participant: from.participant.clone(),
                trial: from.trial,
                condition: from.condition.clone(),
                age_months: from.age_months,
                age_band: from.age_band.clone(),
                from_aoi: from.aoi.clone(),
                to_aoi: to.aoi.clone(),
            });
        }

        transitions
    }
}
