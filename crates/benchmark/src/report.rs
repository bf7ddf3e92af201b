//! Ranking and summary reporting.
//!
//! Folds the record collection into a ranked report for the external
//! visualization layer. Rendering (tables, charts) happens outside; this
//! module only orders and summarizes.

use std::collections::BTreeMap;

use dqbench_core::{Confidence, Grade, Result, TrustScoreRecord};
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Sort records by final score descending; unscored records go last.
/// Ties keep their input order.
pub fn rank_records(records: &mut [TrustScoreRecord]) {
    records.sort_by_key(|r| std::cmp::Reverse(r.final_score.map(OrderedFloat)));
}

/// Aggregate view over one benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSummary {
    /// Exchanges attempted.
    pub exchanges_evaluated: usize,
    /// Records that produced a final score.
    pub scored: usize,
    /// Records marked low-confidence.
    pub degraded: usize,
    /// Mean final score over scored records.
    pub mean_score: Option<f64>,
    /// Highest-scoring exchange.
    pub best: Option<(String, f64)>,
    /// Lowest-scoring exchange.
    pub worst: Option<(String, f64)>,
    /// Count of records per grade.
    pub grade_counts: BTreeMap<&'static str, usize>,
}

impl BenchmarkSummary {
    /// Build a summary from a record collection.
    pub fn from_records(records: &[TrustScoreRecord]) -> Self {
        let mut scored = 0usize;
        let mut degraded = 0usize;
        let mut score_sum = 0.0;
        let mut best: Option<(String, f64)> = None;
        let mut worst: Option<(String, f64)> = None;
        let mut grade_counts: BTreeMap<&'static str, usize> = BTreeMap::new();

        for record in records {
            if record.confidence == Confidence::Low {
                degraded += 1;
            }
            if let Some(grade) = record.grade {
                *grade_counts.entry(grade.as_str()).or_insert(0) += 1;
            }
            let Some(score) = record.final_score else {
                continue;
            };
            scored += 1;
            score_sum += score;
            if best.as_ref().map_or(true, |(_, s)| score > *s) {
                best = Some((record.exchange_id.clone(), score));
            }
            if worst.as_ref().map_or(true, |(_, s)| score < *s) {
                worst = Some((record.exchange_id.clone(), score));
            }
        }

        Self {
            exchanges_evaluated: records.len(),
            scored,
            degraded,
            mean_score: (scored > 0).then(|| score_sum / scored as f64),
            best,
            worst,
            grade_counts,
        }
    }

    /// Count of records that received the given grade.
    pub fn grade_count(&self, grade: Grade) -> usize {
        self.grade_counts.get(grade.as_str()).copied().unwrap_or(0)
    }
}

/// Serialized report handed to the external reporting layer.
#[derive(Debug, Clone, Serialize)]
pub struct RankedReport<'a> {
    /// Run summary.
    pub summary: BenchmarkSummary,
    /// Records in rank order.
    pub records: &'a [TrustScoreRecord],
}

/// Render the ranked report as pretty-printed JSON.
pub fn to_json(records: &[TrustScoreRecord]) -> Result<String> {
    let report = RankedReport {
        summary: BenchmarkSummary::from_records(records),
        records,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
