//! Transition extraction
//!
//! Collapses immediately-adjacent same-AOI fixations within a trial, then
//! emits one transition per remaining adjacent distinct-AOI pair. Transitions
//! are derived values, recomputed whenever fixations change.

pub mod extractor;

pub use extractor::TransitionExtractor;
