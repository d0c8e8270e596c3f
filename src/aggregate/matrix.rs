//! Dense cohort transition matrix

use super::cohorts::CohortAssigner;
use crate::model::{AoiCategory, Cohort, MatrixRow, TransitionCount};
use crate::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Builds dense `(cohort, from_aoi, to_aoi, mean_count)` matrices from
/// per participant×trial transition counts.
///
/// The aggregator owns nothing between runs; every call regenerates the
/// matrix from its inputs, so identical inputs produce identical output.
#[derive(Debug, Clone)]
pub struct CohortAggregator {
    assigner: CohortAssigner,
    cohort_order: Vec<String>,
}

impl CohortAggregator {
    pub fn new(cohorts: Vec<Cohort>) -> Self {
        let cohort_order = cohorts.iter().map(|c| c.label.clone()).collect();
        Self {
            assigner: CohortAssigner::new(cohorts),
            cohort_order,
        }
    }

    /// Aggregate transition counts into a dense cohort matrix.
    ///
    /// Rows whose age matches no cohort band are dropped; when every row is
    /// dropped the call fails with [`Error::EmptyAggregation`] because that
    /// indicates a cohort/age configuration mismatch rather than an absence
    /// of data. An empty input table yields an empty matrix and is fine.
    ///
    /// The dense output covers every cohort × ordered distinct AOI pair
    /// (`|cohorts| × |nodes| × (|nodes| - 1)` rows), zero-filled where the
    /// grouped data has no observations. Self-pairs are never emitted.
    pub fn aggregate(
        &self,
        rows: &[TransitionCount],
        aoi_nodes: &[AoiCategory],
    ) -> Result<Vec<MatrixRow>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // Per (cohort, from, to): sum of counts and number of
        // participant×trial observations contributing to it.
        let mut grouped: BTreeMap<(String, AoiCategory, AoiCategory), (f64, usize)> =
            BTreeMap::new();
        let mut dropped = 0usize;

        for row in rows {
            let Some(label) = self.assigner.assign(row.age_months) else {
                debug!(
                    participant = %row.participant,
                    age_months = row.age_months,
                    "transition row matches no cohort band, dropping"
                );
                dropped += 1;
                continue;
            };
            let entry = grouped
                .entry((label.to_string(), row.from_aoi.clone(), row.to_aoi.clone()))
                .or_insert((0.0, 0));
            entry.0 += row.count;
            entry.1 += 1;
        }

        if grouped.is_empty() {
            return Err(Error::EmptyAggregation { dropped });
        }

        let mut nodes = aoi_nodes.to_vec();
        nodes.sort();
        nodes.dedup();

        let mut matrix =
            Vec::with_capacity(self.cohort_order.len() * nodes.len() * nodes.len().saturating_sub(1));
        for cohort in &self.cohort_order {
            for from in &nodes {
                for to in &nodes {
                    if from == to {
                        continue;
                    }
                    let mean_count = grouped
                        .get(&(cohort.clone(), from.clone(), to.clone()))
                        .map(|(sum, n)| sum / *n as f64)
                        .unwrap_or(0.0);
                    matrix.push(MatrixRow {
                        cohort: cohort.clone(),
                        from_aoi: from.clone(),
                        to_aoi: to.clone(),
                        mean_count,
                    });
                }
            }
        }

        Ok(matrix)
    }
}
