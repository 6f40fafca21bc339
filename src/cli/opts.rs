use clap::{value_parser, Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line options for the motif enrichment tool.
#[derive(Parser)]
#[command(
    name = "motifsketch",
    about = "Discover frequent k-element motifs with a Count-Min Sketch",
    long_about = "Discover frequent k-element motifs across combinatorial k-subsets of
variable-length feature sequences, using a probabilistic Count-Min Sketch.

EXAMPLES:
    // Ordinary case, auto batch sizing
    $ motifsketch -i sequences.tsv -o rows.tsv -k 3 --case ordinary

    // Convolution case, length-partitioned
    $ motifsketch -i sequences.tsv -o rows.tsv -k 3 --case convolution --filter-len 6 --partitioned --partition-width 10
    ",
    version = "0.0.1"
)]
pub struct Cli {
    /// Input sequence file (TSV) [path]
    #[clap(short = 'i', long, value_parser, required = true, help_heading = "Core")]
    pub input: PathBuf,

    /// Output row file (TSV) [path]
    #[clap(short = 'o', long, value_parser, required = true, help_heading = "Core")]
    pub output: PathBuf,

    /// Motif size (number of features per motif) [integer]
    #[clap(short = 'k', long, value_parser = value_parser!(usize).range(1..), help_heading = "Core")]
    pub k: usize,

    /// Which feature model the input file uses [ordinary|convolution]
    #[clap(long, value_enum, default_value_t = CaseArg::Ordinary, help_heading = "Core")]
    pub case: CaseArg,

    /// Filter length (required for `--case convolution`) [integer]
    #[clap(long, help_heading = "Core")]
    pub filter_len: Option<u32>,

    /// False-negative probability bound of the sketch [float in (0, 1)]
    #[clap(long, default_value = "0.0001", help_heading = "Sketch")]
    pub delta: f64,

    /// Relative error bound of the sketch [float in (0, 1)]
    #[clap(long, default_value = "0.00005", help_heading = "Sketch")]
    pub epsilon: f64,

    /// Minimum sketch-estimated count for a motif occurrence to be emitted [integer]
    #[clap(long, default_value = "1", help_heading = "Sketch")]
    pub min_count: u32,

    /// Fix the batch size instead of letting the memory planner choose one [integer]
    #[clap(long, help_heading = "Memory")]
    pub batch_size: Option<usize>,

    /// Fraction of the assumed device memory budget that may be used [float in (0, 1]]
    #[clap(long, default_value = "0.8", help_heading = "Memory")]
    pub safety_factor: f64,

    /// Minimum allowed batch size when auto-planning [integer]
    #[clap(long, default_value = "10", help_heading = "Memory")]
    pub min_batch: usize,

    /// Maximum allowed batch size when auto-planning [integer]
    #[clap(long, default_value = "10000", help_heading = "Memory")]
    pub max_batch: usize,

    /// Run the length-partitioned pipeline instead of a single pass [flag]
    #[clap(long, help_heading = "Partitioning")]
    pub partitioned: bool,

    /// Length-bucket width for the partitioned pipeline [integer]
    #[clap(long, default_value = "10", help_heading = "Partitioning")]
    pub partition_width: u32,

    /// Seed the hash-coefficient matrix deterministically [integer]
    #[clap(long, help_heading = "Core")]
    pub seed: Option<u64>,

    /// Number of threads to use (increases RAM usage) [integer]
    #[clap(short = 't', long, default_value = "1", help_heading = "Core")]
    pub n_threads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaseArg {
    Ordinary,
    Convolution,
}
