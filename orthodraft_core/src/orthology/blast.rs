//! Invocation of the external blastp tool, one run per reference gene
use std::fs;
use std::path::Path;
use std::process::Command;

use log::{info, warn};
use thiserror::Error;

use crate::metabolic_model::model::Model;
use crate::orthology::results::RawAlignmentOutput;

/// Output format handed to blastp; field order matches what
/// [`crate::orthology::record::AlignmentRecord::parse`] expects
pub const OUTFMT: &str =
    "10 delim=, qseqid qlen sseqid slen length nident pident score evalue bitscore";

/// Run blastp between the subject proteome and each protein of the query file
///
/// The query FASTA is split into one file per sequence under a temporary
/// directory inside `work_dir` (removed on return), then blastp is invoked
/// once per model gene against `subject_fasta`. Genes without a query
/// sequence are kept in the output with an empty record list.
pub fn blast_run(
    work_dir: &Path,
    model: &Model,
    query_fasta: &Path,
    subject_fasta: &Path,
) -> Result<RawAlignmentOutput, BlastError> {
    let split_dir = tempfile::Builder::new()
        .prefix("proteins_")
        .tempdir_in(work_dir)?;
    info!("Splitting the query FASTA into individual protein files...");
    let written = split_fasta(query_fasta, split_dir.path())?;
    info!("{} protein files written", written);

    let total = model.genes.len();
    info!("Launching blastp for {} genes", total);
    let mut raw = RawAlignmentOutput::new();
    for (i, gene_id) in model.genes.keys().enumerate() {
        if (i + 1) % 10 == 0 {
            info!("Protein {} out of {}", i + 1, total);
        }
        let query = split_dir.path().join(format!("{}.fa", gene_id));
        if !query.exists() {
            warn!("No query sequence found for gene {}", gene_id);
            raw.insert(gene_id.clone(), Vec::new());
            continue;
        }
        let output = Command::new("blastp")
            .arg("-subject")
            .arg(subject_fasta)
            .arg("-query")
            .arg(&query)
            .arg("-outfmt")
            .arg(OUTFMT)
            .output()
            .map_err(|err| BlastError::Launch(format!("{:?}", err)))?;
        if !output.status.success() {
            return Err(BlastError::Failed {
                gene: gene_id.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        raw.insert(
            gene_id.clone(),
            stdout.lines().map(str::to_string).collect(),
        );
    }
    info!("Blast done");
    Ok(raw)
}

/// Write each sequence of a FASTA file to `<first header token>.fa` under
/// `out_dir`, returning the number of files written
fn split_fasta(path: &Path, out_dir: &Path) -> Result<usize, BlastError> {
    let fasta = fs::read_to_string(path)?;
    let mut written = 0;
    for entry in fasta.split('>').skip(1) {
        let name = entry
            .lines()
            .next()
            .unwrap_or("")
            .split_whitespace()
            .next()
            .unwrap_or("");
        if name.is_empty() {
            continue;
        }
        fs::write(out_dir.join(format!("{}.fa", name)), format!(">{}", entry))?;
        written += 1;
    }
    Ok(written)
}

#[derive(Error, Debug)]
pub enum BlastError {
    #[error("IO error during blast preparation")]
    Io(#[from] std::io::Error),
    #[error("Unable to launch blastp (is it on the PATH?) due to {0}")]
    Launch(String),
    #[error("blastp failed for gene {gene}: {message}")]
    Failed { gene: String, message: String },
}
