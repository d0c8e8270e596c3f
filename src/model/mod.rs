//! Core data model
//!
//! Value objects shared across the engine: frame records from the external
//! loader, the behavioral units derived from them, and the cohort/matrix
//! types used by aggregation. Everything here is immutable once constructed
//! and carries no back-references.

pub mod frame;
pub mod units;

pub use frame::{FrameRecord, GroupKey, ParticipantKind, TrialIdSource};
pub use units::{AoiCategory, Cohort, Fixation, MatrixRow, Transition, TransitionCount};
