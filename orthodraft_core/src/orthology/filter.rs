//! Multi-criteria selection of ortholog candidates from alignment results
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::orthology::record::AlignmentRecord;
use crate::orthology::results::AlignmentResultSet;

/// Map from reference-gene id to the subject ids that passed the filter
///
/// A gene with no passing record is absent from the map; the empty-list case
/// is never materialized.
pub type GeneMatchMap = IndexMap<String, Vec<String>>;

/// Thresholds applied to every alignment record
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Minimum percent identity
    pub identity_min: f64,
    /// Tolerated subject/query length difference, in percent of query length
    pub length_diff_pct: f64,
    /// Maximum e-value
    pub e_value_max: f64,
    /// Minimum alignment length, in percent of query length
    pub coverage_min_pct: f64,
    /// Minimum bit score
    pub bit_score_min: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            identity_min: 50.,
            length_diff_pct: 30.,
            e_value_max: 1e-100,
            coverage_min_pct: 20.,
            bit_score_min: 300.,
        }
    }
}

impl Thresholds {
    /// Thresholds that only constrain the bit score, used by the threshold
    /// sweep report
    pub fn bit_score_only(bit_score_min: f64) -> Thresholds {
        Thresholds {
            identity_min: 0.,
            length_diff_pct: 100.,
            e_value_max: 1.,
            coverage_min_pct: 0.,
            bit_score_min,
        }
    }
}

/// Select, per reference gene, the subject sequences whose alignment passes
/// every threshold
///
/// Both gene order and, within a gene, subject order follow the input result
/// set. Records with a non-numeric required field never pass.
pub fn select_matches(results: &AlignmentResultSet, thresholds: &Thresholds) -> GeneMatchMap {
    let mut matches = GeneMatchMap::new();
    for (gene_id, records) in results.iter() {
        let passing: Vec<String> = records
            .iter()
            .filter(|record| record_passes(record, thresholds))
            .map(|record| record.subject_id.clone())
            .collect();
        if !passing.is_empty() {
            matches.insert(gene_id.clone(), passing);
        }
    }
    matches
}

fn record_passes(record: &AlignmentRecord, thresholds: &Thresholds) -> bool {
    let (
        Some(query_len),
        Some(subject_len),
        Some(align_len),
        Some(pct_identity),
        Some(e_value),
        Some(bit_score),
    ) = (
        record.query_len(),
        record.subject_len(),
        record.align_len(),
        record.pct_identity(),
        record.e_value(),
        record.bit_score(),
    )
    else {
        return false;
    };

    let window_low = query_len * (100. - thresholds.length_diff_pct) / 100.;
    let window_high = query_len * (100. + thresholds.length_diff_pct) / 100.;
    let min_align_len = thresholds.coverage_min_pct / 100. * query_len;

    pct_identity >= thresholds.identity_min
        && subject_len >= window_low
        && subject_len <= window_high
        && align_len >= min_align_len
        && bit_score >= thresholds.bit_score_min
        && e_value <= thresholds.e_value_max
}
