//! Command-line front end for orthodraft: reconstruct draft genome-scale
//! metabolic models of a target organism from a reference model, using blastp
//! alignments between the two proteomes to select ortholog genes.

use anyhow::Context;
use clap::{self, Parser};
use log::{error, info, Level};
use simple_logger::init_with_level;

use orthodraft_core::configuration::PipelineConfig;
use orthodraft_core::metabolic_model::model::Model;
use orthodraft_core::orthology::pipeline;
use orthodraft_core::orthology::results::{self, AlignmentResultSet};
use orthodraft_core::report;

mod cli;

use cli::{Args, DraftArgs, ReactionsArgs, ScoresArgs, SubArgs, SweepArgs};

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();

    let args: Args = Args::parse();

    let result = match args.command {
        SubArgs::Draft { args } => run_draft(args),
        SubArgs::Sweep { args } => run_sweep(args),
        SubArgs::Scores { args } => run_scores(args),
        SubArgs::Reactions { args } => run_reactions(args),
    };
    if let Err(err) = result {
        error!("{:#}", err);
        std::process::exit(1);
    }

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}

fn run_draft(args: DraftArgs) -> anyhow::Result<()> {
    let config = PipelineConfig::from_file(&args.config)?;
    pipeline::run(&config)?;
    Ok(())
}

fn run_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let config = PipelineConfig::from_file(&args.config)?;
    let reference = Model::read_json(&config.reference_model)?;
    let results = cached_results(&config)?;
    report::write_threshold_sweep(&args.output, &reference, &results)?;
    info!("Sweep written to {}", args.output.display());
    Ok(())
}

fn run_scores(args: ScoresArgs) -> anyhow::Result<()> {
    let config = PipelineConfig::from_file(&args.config)?;
    let results = cached_results(&config)?;
    report::write_score_table(&args.output, &args.organism, &results)?;
    info!("Scores written to {}", args.output.display());
    Ok(())
}

fn run_reactions(args: ReactionsArgs) -> anyhow::Result<()> {
    let model = Model::read_json(&args.model)?;
    report::write_reaction_ids(&args.output, &model)?;
    info!("Reaction ids written to {}", args.output.display());
    Ok(())
}

fn cached_results(config: &PipelineConfig) -> anyhow::Result<AlignmentResultSet> {
    let cache = config
        .blast_cache
        .as_ref()
        .context("this command needs a blast_cache path in the configuration")?;
    let raw = results::read_cache(cache)?;
    Ok(AlignmentResultSet::from_raw(&raw))
}
