//! Error types for configuration and training.
use thiserror::Error;

/// Failures detected before round 0, from invalid run configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `k` must be a positive integer.
    #[error("k-mer length `k` must be positive, got {0}")]
    InvalidK(u32),

    /// `iteration_num` (`T`) must be at least 1.
    #[error("iteration_num must be at least 1, got {0}")]
    ZeroIterations(usize),

    /// `exec_thread_num` (`W`) must be at least 1.
    #[error("exec_thread_num must be at least 1, got {0}")]
    ZeroWorkers(usize),

    /// The canonical k-mer-pair index has no candidates.
    #[error("canonical k-mer-pair index is empty")]
    EmptyCkpi,
}

/// Failures that can terminate a training run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainError {
    /// The run configuration was invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The training set is degenerate: empty, or a single label class.
    #[error("degenerate training data: {0}")]
    DegenerateData(String),

    /// Every candidate stump was marked before `T` rounds completed.
    #[error(
        "all {total} candidate stumps were marked as used before round {round} \
         of training completed"
    )]
    AllCandidatesMarked {
        /// The round at which the exhaustion was detected.
        round: usize,
        /// The total number of candidates in the index.
        total: usize,
    },
}
