//! Fixation detection
//!
//! Segments an ordered sequence of per-frame gaze labels into discrete
//! fixation events using a run-length state machine and a minimum-duration
//! rule. Detection is always scoped to one participant × trial × segment
//! group; the pipeline constructs fresh state per group.

pub mod run_state;
pub mod detector;

pub use detector::{DetectionStats, FixationDetector, GroupDetection};
pub use run_state::RunTracker;
