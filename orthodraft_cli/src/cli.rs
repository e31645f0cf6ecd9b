use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubArgs,
}

#[derive(Debug, Subcommand)]
pub enum SubArgs {
    /// Reconstruct a draft model from a reference model and blast results
    #[command(name = "draft")]
    Draft {
        #[command(flatten)]
        args: DraftArgs,
    },
    /// Sweep the bit-score cutoff and report draft sizes
    #[command(name = "sweep")]
    Sweep {
        #[command(flatten)]
        args: SweepArgs,
    },
    /// Export per-alignment scores for external plotting
    #[command(name = "scores")]
    Scores {
        #[command(flatten)]
        args: ScoresArgs,
    },
    /// Export a model's reaction ids for set-overlap comparisons
    #[command(name = "reactions")]
    Reactions {
        #[command(flatten)]
        args: ReactionsArgs,
    },
}

#[derive(Debug, Parser)]
pub struct DraftArgs {
    #[arg(
        short = 'c',
        long = "config",
        required = true,
        value_name = "PATH",
        help = "Path to the pipeline configuration (JSON)"
    )]
    pub config: PathBuf,
}

#[derive(Debug, Parser)]
pub struct SweepArgs {
    #[arg(
        short = 'c',
        long = "config",
        required = true,
        value_name = "PATH",
        help = "Path to the pipeline configuration (JSON); its blast cache must exist"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "threshold_sweep.csv",
        help = "Where to write the sweep CSV"
    )]
    pub output: PathBuf,
}

#[derive(Debug, Parser)]
pub struct ScoresArgs {
    #[arg(
        short = 'c',
        long = "config",
        required = true,
        value_name = "PATH",
        help = "Path to the pipeline configuration (JSON); its blast cache must exist"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'n',
        long = "organism",
        required = true,
        value_name = "NAME",
        help = "Organism name written in the first CSV column"
    )]
    pub organism: String,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "scores.csv",
        help = "Where to write the scores CSV"
    )]
    pub output: PathBuf,
}

#[derive(Debug, Parser)]
pub struct ReactionsArgs {
    #[arg(
        short = 'm',
        long = "model",
        required = true,
        value_name = "PATH",
        help = "Path to a model (JSON)"
    )]
    pub model: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        required = true,
        value_name = "PATH",
        help = "Where to write the one-column reaction id CSV"
    )]
    pub output: PathBuf,
}
