//! # Gaze Engine
//!
//! A batch engine that converts frame-by-frame eye-tracking samples from
//! developmental-psychology experiments into higher-level behavioral units:
//! fixations, fixation-to-fixation transitions, and cohort-aggregated
//! transition matrices.
//!
//! ## Overview
//!
//! The engine consumes already-labeled frame records (one per captured
//! sample, produced by an external loader) and hands dense output tables to
//! external statistics and reporting layers. It performs no I/O during
//! computation and holds no shared mutable state across groups.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gaze_engine::app::Config;
//! use gaze_engine::pipeline::AnalysisPipeline;
//! use gaze_engine::model::FrameRecord;
//!
//! let frames: Vec<FrameRecord> = Vec::new(); // from an external loader
//! let pipeline = AnalysisPipeline::with_config(Config::default()).expect("bad config");
//! let output = pipeline.run(&frames).expect("analysis failed");
//! println!("{} fixations", output.fixations.len());
//! ```
//!
//! ## Architecture
//!
//! - [`model`]: frame records, fixations, transitions, cohorts
//! - [`aoi`]: deterministic (target-type, region) → AOI category mapping
//! - [`detect`]: run-length fixation detection state machine
//! - [`transition`]: same-AOI collapsing and adjacent-pair extraction
//! - [`aggregate`]: cohort assignment and dense matrix construction
//! - [`pipeline`]: sort/group/detect/extract/aggregate batch runner
//! - [`app`]: configuration management
//! - [`export`]: JSON tables and markdown run summaries
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ FrameRecord │───▶│  Fixation   │───▶│ Transition  │───▶│   Cohort    │
//! │   table     │    │  Detector   │    │  Extractor  │    │ Aggregator  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//!                                                  external stats / reports
//! ```

pub mod model;
pub mod aoi;
pub mod detect;
pub mod transition;
pub mod aggregate;
pub mod pipeline;
pub mod app;
pub mod export;

// Re-export commonly used types
pub use aoi::AoiMap;
pub use detect::FixationDetector;
pub use model::{AoiCategory, Cohort, Fixation, FrameRecord, Transition};
pub use pipeline::{AnalysisOutput, AnalysisPipeline};
pub use transition::TransitionExtractor;

/// Result type alias for the gaze engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the gaze engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A (target-type, region) pair with no entry in the merged AOI mapping.
    /// Recoverable inside detection (ends the current run); fatal when raised
    /// from a direct `AoiMap::map` call.
    #[error("unknown AOI pair: target_type={target_type:?}, region={region:?}")]
    UnknownAoi { target_type: String, region: String },

    /// Cohort assignment dropped every transition row. Signals a mismatch
    /// between configured cohort bands and the ages present in the data.
    #[error("cohort assignment dropped all {dropped} transition rows; check cohort band definitions")]
    EmptyAggregation { dropped: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
