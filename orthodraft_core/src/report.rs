//! Summary statistics over alignment results and CSV exports used to choose
//! thresholds and compare drafts
use std::path::Path;

use thiserror::Error;

use crate::metabolic_model::model::Model;
use crate::orthology::draft::build_draft;
use crate::orthology::filter::{select_matches, Thresholds};
use crate::orthology::results::AlignmentResultSet;

/// Number of alignment records at or above each identity threshold, for
/// thresholds 5, 10, .., 100
pub fn identity_profile(results: &AlignmentResultSet) -> Vec<(f64, usize)> {
    let mut profile = Vec::new();
    let mut threshold = 5.;
    while threshold <= 100. {
        let count = results
            .records()
            .filter(|r| r.pct_identity().is_some_and(|v| v >= threshold))
            .count();
        profile.push((threshold, count));
        threshold += 5.;
    }
    profile
}

/// All raw alignment scores, skipping non-numeric fields
pub fn scores(results: &AlignmentResultSet) -> Vec<f64> {
    results.records().filter_map(|r| r.score()).collect()
}

/// All e-values, skipping non-numeric fields
pub fn e_values(results: &AlignmentResultSet) -> Vec<f64> {
    results.records().filter_map(|r| r.e_value()).collect()
}

/// All bit scores, skipping non-numeric fields
pub fn bit_scores(results: &AlignmentResultSet) -> Vec<f64> {
    results.records().filter_map(|r| r.bit_score()).collect()
}

/// One row of the per-organism score table
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRow {
    pub organism: String,
    pub subject_id: String,
    pub identity: f64,
    pub score: f64,
    pub e_value: f64,
    pub bit_score: f64,
}

/// Gather every record's scores with the organism name attached, for use in
/// downstream regression plots
///
/// Records missing any of the four numeric fields are skipped.
pub fn score_table(organism: &str, results: &AlignmentResultSet) -> Vec<ScoreRow> {
    let mut rows = Vec::new();
    for record in results.records() {
        let (Some(identity), Some(score), Some(e_value), Some(bit_score)) = (
            record.pct_identity(),
            record.score(),
            record.e_value(),
            record.bit_score(),
        ) else {
            continue;
        };
        rows.push(ScoreRow {
            organism: organism.to_string(),
            subject_id: record.subject_id.clone(),
            identity,
            score,
            e_value,
            bit_score,
        });
    }
    rows
}

/// Write the score table as CSV with an `Organism,Gene,Identity,Score,
/// E_Value,Bit_Score` header
pub fn write_score_table<P: AsRef<Path>>(
    path: P,
    organism: &str,
    results: &AlignmentResultSet,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Organism", "Gene", "Identity", "Score", "E_Value", "Bit_Score"])?;
    for row in score_table(organism, results) {
        writer.write_record([
            row.organism,
            row.subject_id,
            row.identity.to_string(),
            row.score.to_string(),
            // Keep e-values in the scientific notation the alignment tool emits
            format!("{:e}", row.e_value),
            row.bit_score.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Draft size at one bit-score cutoff
#[derive(Clone, Debug, PartialEq)]
pub struct SweepPoint {
    pub bit_score_min: f64,
    pub genes: usize,
    pub reactions: usize,
}

/// Rebuild the draft at bit-score cutoffs 0, 10, .., 1000 with every other
/// threshold wide open, to help choose a bit-score value
pub fn threshold_sweep(reference: &Model, results: &AlignmentResultSet) -> Vec<SweepPoint> {
    (0..=100)
        .map(|i| {
            let bit_score_min = f64::from(10 * i);
            let matches = select_matches(results, &Thresholds::bit_score_only(bit_score_min));
            let draft = build_draft(reference, &matches, "sweep");
            SweepPoint {
                bit_score_min,
                genes: draft.genes.len(),
                reactions: draft.reactions.len(),
            }
        })
        .collect()
}

/// Write the bit-score sweep as CSV with a `Bit_Score,Nb genes,Nb reactions`
/// header
pub fn write_threshold_sweep<P: AsRef<Path>>(
    path: P,
    reference: &Model,
    results: &AlignmentResultSet,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Bit_Score", "Nb genes", "Nb reactions"])?;
    for point in threshold_sweep(reference, results) {
        writer.write_record([
            point.bit_score_min.to_string(),
            point.genes.to_string(),
            point.reactions.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a model's reaction ids as a one-column CSV, for set-overlap
/// comparisons between drafts
pub fn write_reaction_ids<P: AsRef<Path>>(path: P, model: &Model) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for reaction_id in model.reaction_ids() {
        writer.write_record([reaction_id])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error")]
    Csv(#[from] csv::Error),
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::gene::GeneRule;
    use crate::metabolic_model::reaction::ReactionBuilder;
    use crate::orthology::results::RawAlignmentOutput;
    use std::fs;

    fn result_set() -> AlignmentResultSet {
        let mut raw = RawAlignmentOutput::new();
        raw.insert(
            "g1".to_string(),
            vec![
                "g1,300,s1,290,280,154,55,200,1e-120,310".to_string(),
                "g1,300,s2,310,295,200,70,400,1e-150,500".to_string(),
            ],
        );
        raw.insert(
            "g2".to_string(),
            vec![
                "g2,200,s3,210,180,40,20,80,1e-10,90".to_string(),
                // Non-numeric score and identity, skipped by collectors
                "g2,200,s4,210,180,40,none,none,1e-10,90".to_string(),
            ],
        );
        AlignmentResultSet::from_raw(&raw)
    }

    #[test]
    fn identity_profile_counts() {
        let profile = identity_profile(&result_set());
        assert_eq!(profile.len(), 20);
        assert_eq!(profile[0], (5., 3));
        // At 25%: records with identity 55 and 70 remain
        let at_25 = profile.iter().find(|(t, _)| *t == 25.).unwrap();
        assert_eq!(at_25.1, 2);
        let at_100 = profile.iter().find(|(t, _)| *t == 100.).unwrap();
        assert_eq!(at_100.1, 0);
    }

    #[test]
    fn identity_profile_monotone_non_increasing() {
        let profile = identity_profile(&result_set());
        for window in profile.windows(2) {
            assert!(window[0].1 >= window[1].1);
        }
    }

    #[test]
    fn collectors_skip_non_numeric() {
        let results = result_set();
        assert_eq!(scores(&results), vec![200., 400., 80.]);
        assert_eq!(e_values(&results).len(), 4);
        assert_eq!(bit_scores(&results), vec![310., 500., 90., 90.]);
    }

    #[test]
    fn score_table_rows() {
        let rows = score_table("Tomato", &result_set());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].organism, "Tomato");
        assert_eq!(rows[0].subject_id, "s1");
        assert_eq!(rows[2].subject_id, "s3");
        assert_eq!(rows[1].bit_score, 500.);
    }

    #[test]
    fn write_score_table_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tomato_values.csv");
        write_score_table(&path, "Tomato", &result_set()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Organism,Gene,Identity,Score,E_Value,Bit_Score"
        );
        assert_eq!(lines.next().unwrap(), "Tomato,s1,55,200,1e-120,310");
    }

    fn sweep_reference() -> Model {
        let mut model = Model::new_empty();
        for (id, rule) in [("R1", "g1"), ("R2", "g2")] {
            model.add_reaction(
                ReactionBuilder::default()
                    .id(id.to_string())
                    .rule(GeneRule::parse(rule))
                    .build()
                    .unwrap(),
            );
        }
        model
    }

    #[test]
    fn sweep_counts_shrink_with_cutoff() {
        let points = threshold_sweep(&sweep_reference(), &result_set());
        assert_eq!(points.len(), 101);
        // Cutoff 0 keeps every subject: s1,s2 for R1 and s3 for R2
        assert_eq!(points[0].reactions, 2);
        assert_eq!(points[0].genes, 3);
        // Cutoff 100 drops g2's only hit (bit score 90)
        let at_100 = points.iter().find(|p| p.bit_score_min == 100.).unwrap();
        assert_eq!(at_100.reactions, 1);
        // Cutoff 1000 drops everything
        assert_eq!(points[100].reactions, 0);
        for window in points.windows(2) {
            assert!(window[0].reactions >= window[1].reactions);
            assert!(window[0].genes >= window[1].genes);
        }
    }

    #[test]
    fn write_sweep_csv_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threshold.csv");
        write_threshold_sweep(&path, &sweep_reference(), &result_set()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Bit_Score,Nb genes,Nb reactions\n0,3,2\n"));
    }

    #[test]
    fn reaction_id_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tomato_id_reac.csv");
        write_reaction_ids(&path, &sweep_reference()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "R1\nR2\n");
    }
}
