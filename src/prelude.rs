//! Re-exports the commonly used types for downstream crates.
pub use crate::booster::AdaBoost;
pub use crate::ckpi::CanonicalKmerPairIndex;
pub use crate::config::TrainingConfig;
pub use crate::error::{ConfigError, TrainError};
pub use crate::examples::TrainingExamples;
pub use crate::features::FeatureMatrix;
pub use crate::logger::IterationLogger;
pub use crate::model::Model;
pub use crate::motif::ForbiddenMotif;
