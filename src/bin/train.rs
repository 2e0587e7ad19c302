//! Thin CLI wiring `clap` over `TrainingConfig`, the tab-separated file
//! adapters in `hic_kmer_boost::io`, and `AdaBoost::train`.
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;

use hic_kmer_boost::prelude::*;

/// Train an AdaBoost ensemble of canonical k-mer-pair stumps on Hi-C contact
/// labels.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    verbose: Verbosity,

    /// Tab-separated per-bin k-mer-count file, one line per bin, `4^k`
    /// fields each, `*` for a bin skipped upstream.
    #[clap(short, long)]
    features: PathBuf,

    /// Tab-separated `h_i\th_j\tmij` Hi-C observation file.
    #[clap(short, long)]
    examples: PathBuf,

    /// k-mer length.
    #[clap(short, long)]
    k: u32,

    /// Number of boosting rounds.
    #[clap(short = 't', long = "rounds")]
    iteration_num: usize,

    /// Real cutoff for label binarization: `y = mij > threshold`.
    #[clap(long, default_value_t = 0.0)]
    threshold: f64,

    /// Number of worker threads used by the weak-learner evaluator.
    #[clap(short = 'j', long = "threads", default_value_t = 1)]
    exec_thread_num: usize,

    /// Use the baseline forbidden-motif filter (the single motif `GATC`).
    #[clap(long)]
    filter_gatc: bool,

    /// Where to write the per-iteration and final-model logs. Defaults to
    /// stderr when absent.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let features =
        hic_kmer_boost::io::load_feature_matrix(args.k, &args.features).context("loading feature matrix")?;
    let examples = hic_kmer_boost::io::load_training_examples(&args.examples, args.threshold)
        .context("loading training examples")?;
    let ckpi = CanonicalKmerPairIndex::build(args.k).map_err(TrainError::from)?;

    let forbidden_motifs = if args.filter_gatc { ForbiddenMotif::gatc_baseline() } else { Vec::new() };

    let config = TrainingConfig {
        k: args.k,
        iteration_num: args.iteration_num,
        threshold: args.threshold,
        exec_thread_num: args.exec_thread_num,
        forbidden_motifs,
        output_file: args.output,
    };

    let output_file = config
        .output_file
        .as_ref()
        .map(|path| File::create(path).with_context(|| format!("creating {}", path.display())))
        .transpose()?;

    let result: Result<Model, TrainError> = (|| {
        let adaboost = AdaBoost::init(&ckpi, &features, &examples, &config)?;
        match output_file {
            Some(file) => {
                let mut logger = IterationLogger::new(BufWriter::new(file));
                adaboost.train(&mut logger)
            }
            None => {
                let mut logger = IterationLogger::new(std::io::stderr());
                adaboost.train(&mut logger)
            }
        }
    })();

    match result {
        Ok(model) => {
            log::info!("training complete: {} rounds recorded", model.len());
            Ok(())
        }
        Err(err) => {
            // One diagnostic line naming the condition, then termination.
            // No partial model is emitted on failure.
            log::error!("training failed: {err}");
            std::process::exit(1);
        }
    }
}
