//! AOI mapping
//!
//! Deterministic lookup from a raw (target-type, region) coder pair to a
//! semantic Area-of-Interest category. Built-in defaults are layered under a
//! user-supplied override table; the merged map is explicit immutable state
//! passed into the detector, never a module-level singleton.

pub mod mapper;

pub use mapper::AoiMap;
