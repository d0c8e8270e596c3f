//! (target-type, region) → AOI category lookup

use crate::model::AoiCategory;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Built-in mapping entries as `(target_type, region, category)` triples.
///
/// Covers the stimulus layout used by the standard gaze-following sessions:
/// two on-screen actors, a toy that is present or absent, and off-screen
/// looks.
const DEFAULT_ENTRIES: &[(&str, &str, &str)] = &[
    ("face", "man", "man_face"),
    ("face", "woman", "woman_face"),
    ("body", "man", "man_body"),
    ("body", "woman", "woman_body"),
    ("toy", "present", "toy_present"),
    ("toy", "absent", "toy_absent"),
    ("screen", "background", "background"),
    ("screen", "off", "off_screen"),
];

/// Merged AOI mapping queried once per frame by the fixation detector.
///
/// Keys are `"target_type,region"` strings with surrounding whitespace
/// trimmed from each half; matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct AoiMap {
    entries: BTreeMap<(String, String), AoiCategory>,
}

impl AoiMap {
    /// Create a map holding only the built-in default entries.
    pub fn with_defaults() -> Self {
        let entries = DEFAULT_ENTRIES
            .iter()
            .map(|(t, r, c)| (((*t).to_string(), (*r).to_string()), AoiCategory::from(*c)))
            .collect();
        Self { entries }
    }

    /// Create a map with user overrides layered on top of the defaults.
    ///
    /// Override keys are `"target_type,region"` strings; an override for an
    /// existing pair replaces the default, and new pairs extend the table.
    /// Keys without exactly one comma are rejected.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self> {
        let mut map = Self::with_defaults();
        for (key, category) in overrides {
            let (target_type, region) = Self::split_key(key)?;
            map.entries
                .insert((target_type, region), AoiCategory::new(category.clone()));
        }
        Ok(map)
    }

    fn split_key(key: &str) -> Result<(String, String)> {
        let mut parts = key.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(target_type), Some(region), None) => Ok((
                target_type.trim().to_string(),
                region.trim().to_string(),
            )),
            _ => Err(Error::Config(format!(
                "AOI override key must be \"target_type,region\", got {:?}",
                key
            ))),
        }
    }

    /// Look up the AOI category for a raw coder pair.
    ///
    /// Fails with [`Error::UnknownAoi`] when the trimmed pair has no entry.
    pub fn map(&self, target_type: &str, region: &str) -> Result<AoiCategory> {
        let key = (target_type.trim().to_string(), region.trim().to_string());
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::UnknownAoi {
                target_type: key.0,
                region: key.1,
            })
    }

    /// All distinct categories the map can produce, sorted.
    pub fn categories(&self) -> Vec<AoiCategory> {
        let mut cats: Vec<AoiCategory> = self.entries.values().cloned().collect();
        cats.sort();
        cats.dedup();
        cats
    }

    /// Number of mapped pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AoiMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
