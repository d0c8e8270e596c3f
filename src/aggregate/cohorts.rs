//! Age-band cohort assignment

use crate::model::Cohort;

/// Assigns ages to cohort bands.
///
/// Bands are tested in configured order and the first whose inclusive
/// `[min_months, max_months]` range contains the age wins. With overlapping
/// bands the result therefore depends on configuration ordering; this
/// matches the historical behavior and must not be changed to widest-band
/// or narrowest-band semantics without product sign-off.
#[derive(Debug, Clone)]
pub struct CohortAssigner {
    cohorts: Vec<Cohort>,
}

impl CohortAssigner {
    pub fn new(cohorts: Vec<Cohort>) -> Self {
        Self { cohorts }
    }

    /// First matching band's label, or `None` when no band contains the age.
    pub fn assign(&self, age_months: f64) -> Option<&str> {
        self.cohorts
            .iter()
            .find(|c| c.contains(age_months))
            .map(|c| c.label.as_str())
    }

    /// Band labels in configured order.
    pub fn labels(&self) -> Vec<&str> {
        self.cohorts.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}
