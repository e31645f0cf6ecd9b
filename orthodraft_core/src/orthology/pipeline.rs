//! End-to-end reconstruction: reference model in, draft model out
use log::info;
use thiserror::Error;

use crate::configuration::PipelineConfig;
use crate::io::json::JsonError;
use crate::metabolic_model::model::Model;
use crate::orthology::blast::{self, BlastError};
use crate::orthology::draft::build_draft;
use crate::orthology::filter::select_matches;
use crate::orthology::results::{self, AlignmentResultSet, CacheError, RawAlignmentOutput};

/// Run the reconstruction and return the draft model without persisting it
pub fn reconstruct(config: &PipelineConfig) -> Result<Model, PipelineError> {
    info!(
        "Loading reference model from {}",
        config.reference_model.display()
    );
    let reference = Model::read_json(&config.reference_model)?;
    info!(
        "Reference model: {} reactions, {} genes",
        reference.reactions.len(),
        reference.genes.len()
    );

    let raw = raw_alignment_output(config, &reference)?;
    let alignments = AlignmentResultSet::from_raw(&raw);
    let matches = select_matches(&alignments, &config.thresholds);
    info!(
        "{} reference genes with at least one selected ortholog",
        matches.len()
    );

    let draft = build_draft(&reference, &matches, &config.draft_name);
    info!(
        "Draft {}: {} reactions, {} genes",
        config.draft_name,
        draft.reactions.len(),
        draft.genes.len()
    );
    Ok(draft)
}

/// Run the reconstruction and write the draft as `<draft_name>.json` in the
/// working directory
pub fn run(config: &PipelineConfig) -> Result<(), PipelineError> {
    let draft = reconstruct(config)?;
    let out = config.work_dir.join(format!("{}.json", config.draft_name));
    draft.write_json(&out)?;
    info!("Draft model written to {}", out.display());
    Ok(())
}

/// Reuse the cached raw blast output when available, otherwise run blastp and
/// fill the cache
fn raw_alignment_output(
    config: &PipelineConfig,
    reference: &Model,
) -> Result<RawAlignmentOutput, PipelineError> {
    if let Some(cache) = &config.blast_cache {
        if cache.exists() {
            info!("Reusing cached blast output from {}", cache.display());
            return Ok(results::read_cache(cache)?);
        }
    }
    let raw = blast::blast_run(
        &config.work_dir,
        reference,
        &config.query_fasta,
        &config.subject_fasta,
    )?;
    if let Some(cache) = &config.blast_cache {
        results::write_cache(cache, &raw)?;
        info!("Blast output cached to {}", cache.display());
    }
    Ok(raw)
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Model(#[from] JsonError),
    #[error(transparent)]
    Blast(#[from] BlastError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}
