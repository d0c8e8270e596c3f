//! Frame-level input records
//!
//! One `FrameRecord` per captured eye-tracking sample. Records are produced
//! by an external loader that has already validated the column contract;
//! the engine only re-checks AOI-mapping validity.

use serde::{Deserialize, Serialize};

/// Participant category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    #[default]
    Infant,
    Adult,
}

/// Which trial-identifier column a run should use.
///
/// Some recording sessions carry a per-block trial number alongside a
/// session-global one. The choice is made once per run through configuration
/// rather than probed per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrialIdSource {
    /// Use the per-block `trial` field.
    #[default]
    Trial,
    /// Use the session-global `global_trial` field, falling back to `trial`
    /// for records that do not carry one.
    GlobalTrial,
}

/// One eye-tracking sample
///
/// The frame counter increases monotonically within a trial segment; a
/// counter restart marks a new segment, and the loader labels segments so
/// the pipeline can group by them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Participant identifier
    pub participant: String,
    /// Infant or adult
    pub participant_kind: ParticipantKind,
    /// Participant age in months at time of recording
    pub age_months: f64,
    /// Per-block trial number
    pub trial: u32,
    /// Session-global trial number, if the session carries one
    pub global_trial: Option<u32>,
    /// Segment label within the trial (counter restarts begin a new segment)
    pub segment: String,
    /// Condition code for this trial
    pub condition: String,
    /// Raw target-type label from the coder
    pub target_type: String,
    /// Raw region label from the coder
    pub region: String,
    /// Sample onset in seconds
    pub onset: f64,
    /// Sample offset in seconds
    pub offset: f64,
    /// Within-trial frame counter
    pub frame_index: u32,
}

impl FrameRecord {
    /// Resolve the trial identifier according to the configured source.
    pub fn trial_id(&self, source: TrialIdSource) -> u32 {
        match source {
            TrialIdSource::Trial => self.trial,
            TrialIdSource::GlobalTrial => self.global_trial.unwrap_or(self.trial),
        }
    }

    /// The grouping key for fixation detection.
    pub fn group_key(&self, source: TrialIdSource) -> GroupKey {
        GroupKey {
            participant: self.participant.clone(),
            trial: self.trial_id(source),
            segment: self.segment.clone(),
        }
    }
}

/// Identifies one participant × trial × segment group.
///
/// Detection state never crosses a group boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub participant: String,
    pub trial: u32,
    pub segment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_trials(trial: u32, global: Option<u32>) -> FrameRecord {
        FrameRecord {
            participant: "p01".to_string(),
            participant_kind: ParticipantKind::Infant,
            age_months: 12.0,
            trial,
            global_trial: global,
            segment: "a".to_string(),
            condition: "demo".to_string(),
            target_type: "face".to_string(),
            region: "man".to_string(),
            onset: 0.0,
            offset: 0.04,
            frame_index: 1,
        }
    }

    #[test]
    fn test_trial_id_per_block() {
        let frame = frame_with_trials(3, Some(17));
        assert_eq!(frame.trial_id(TrialIdSource::Trial), 3);
    }

    #[test]
    fn test_trial_id_global() {
        let frame = frame_with_trials(3, Some(17));
        assert_eq!(frame.trial_id(TrialIdSource::GlobalTrial), 17);
    }

    #[test]
    fn test_trial_id_global_falls_back() {
        let frame = frame_with_trials(3, None);
        assert_eq!(frame.trial_id(TrialIdSource::GlobalTrial), 3);
    }

    #[test]
    fn test_group_key_uses_resolved_trial() {
        let frame = frame_with_trials(3, Some(17));
        let key = frame.group_key(TrialIdSource::GlobalTrial);
        assert_eq!(key.trial, 17);
        assert_eq!(key.participant, "p01");
        assert_eq!(key.segment, "a");
    }
}
