//! The AdaBoost training driver.
//!
//! Separates initialization from the boosting loop, but collapses both
//! into a single `train()` call: this crate implements exactly one
//! boosting algorithm rather than a family of boosters behind a shared
//! trait.
use std::io::Write;

use log::{debug, info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::ckpi::CanonicalKmerPairIndex;
use crate::config::TrainingConfig;
use crate::error::{ConfigError, TrainError};
use crate::examples::TrainingExamples;
use crate::features::FeatureMatrix;
use crate::logger::IterationLogger;
use crate::model::Model;
use crate::motif::mark_forbidden;
use crate::weak_learner::{evaluate_errors, predict_unsigned, select_stump};

/// Owns the per-run training state: unnormalized weights `w`, the transient
/// normalized distribution `p`, the `marked` bookkeeping array, and the
/// `err` scratch buffer, all allocated once for the lifetime of the run.
pub struct AdaBoost<'a> {
    ckpi: &'a CanonicalKmerPairIndex,
    features: &'a FeatureMatrix,
    examples: &'a TrainingExamples,
    config: &'a TrainingConfig,

    w: Vec<f64>,
    p: Vec<f64>,
    marked: Vec<bool>,
    err: Vec<f64>,

    pool: ThreadPool,
}

impl<'a> AdaBoost<'a> {
    /// Validates the configuration, checks for degenerate data, builds the
    /// worker pool, and applies the forbidden-motif filter before round 0.
    pub fn init(
        ckpi: &'a CanonicalKmerPairIndex,
        features: &'a FeatureMatrix,
        examples: &'a TrainingExamples,
        config: &'a TrainingConfig,
    ) -> Result<Self, TrainError> {
        config.validate()?;
        if ckpi.is_empty() {
            return Err(ConfigError::EmptyCkpi.into());
        }
        if examples.is_empty() {
            return Err(TrainError::DegenerateData("no training examples (N == 0)".into()));
        }
        if examples.single_label_class() {
            return Err(TrainError::DegenerateData(
                "every training example shares one label".into(),
            ));
        }

        let n = examples.len();
        let p_count = ckpi.len();

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.exec_thread_num)
            .build()
            .expect("thread pool construction should not fail for a positive thread count");

        let mut marked = vec![false; p_count];
        let newly_marked = mark_forbidden(ckpi, &config.forbidden_motifs, &mut marked);
        info!("k={}, P={p_count}, N={n}, {newly_marked} candidates pre-filtered", ckpi.k());

        Ok(Self {
            ckpi,
            features,
            examples,
            config,
            w: vec![1.0 / n as f64; n],
            p: vec![0.0; n],
            marked,
            err: vec![0.0; p_count],
            pool,
        })
    }

    /// Runs `config.iteration_num` rounds, logging through `logger`, and
    /// returns the trained [`Model`].
    pub fn train<W: Write>(mut self, logger: &mut IterationLogger<W>) -> Result<Model, TrainError> {
        let t_max = self.config.iteration_num;
        let n = self.examples.len();
        let total = self.ckpi.len();
        let mut model = Model::with_capacity(t_max);

        for t in 0..t_max {
            self.normalize_weights();

            evaluate_errors(
                &self.pool,
                self.config.exec_thread_num,
                self.ckpi,
                self.features,
                self.examples,
                &self.marked,
                &self.p,
                &mut self.err,
            );

            let selection = select_stump(&self.err, &self.marked).ok_or(TrainError::AllCandidatesMarked {
                round: t,
                total,
            })?;

            self.marked[selection.lm] = true;

            let beta = selection.epsilon / (1.0 - selection.epsilon);
            if selection.epsilon == 0.0 {
                debug!("round {t}: epsilon == 0, beta == 0 (correctly classified weights collapse to zero)");
            } else if (selection.epsilon - 0.5).abs() < f64::EPSILON {
                warn!("round {t}: epsilon == 1/2, this round carries no information");
            }

            for x in 0..n {
                let pred = predict_unsigned(self.ckpi, self.features, self.examples, selection.lm, x);
                let correct = if selection.sign == 0 {
                    pred == self.examples.y(x)
                } else {
                    pred != self.examples.y(x)
                };
                if correct {
                    self.w[x] *= beta;
                }
            }

            model.record(selection.lm, selection.sign, beta);
            logger
                .log_iteration(self.ckpi, t, selection.lm, selection.sign, beta)
                .map_err(|e| TrainError::DegenerateData(format!("failed to write iteration log: {e}")))?;
        }

        logger
            .log_model(self.ckpi, &model)
            .map_err(|e| TrainError::DegenerateData(format!("failed to write final model log: {e}")))?;

        Ok(model)
    }

    /// `p = w / sum(w)`, taken in natural (ascending-index) order.
    fn normalize_weights(&mut self) {
        let sum: f64 = self.w.iter().sum();
        debug_assert!(sum > 0.0, "weight sum must stay positive between rounds");
        for (p, &w) in self.p.iter_mut().zip(&self.w) {
            *p = w / sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motif::ForbiddenMotif;

    fn config(t: usize, w: usize) -> TrainingConfig {
        TrainingConfig {
            k: 1,
            iteration_num: t,
            threshold: 0.0,
            exec_thread_num: w,
            forbidden_motifs: Vec::new(),
            output_file: None,
        }
    }

    // Three single-nucleotide bins (A, C, G), k=1. The A-C product-sum
    // stump scores 100 for the (A,C) bin pair and 0 for the (A,G) bin
    // pair, so it separates the two examples below with zero error.
    fn separable_setup() -> (CanonicalKmerPairIndex, FeatureMatrix, TrainingExamples) {
        let ckpi = CanonicalKmerPairIndex::build(1).unwrap();
        let features =
            FeatureMatrix::from_rows(1, vec![vec![10, 0, 0, 0], vec![0, 10, 0, 0], vec![0, 0, 10, 0]]);
        let examples = TrainingExamples::new(vec![0, 0], vec![1, 2], vec![5.0, -5.0], 0.0);
        (ckpi, features, examples)
    }

    #[test]
    fn trivial_separability_round_zero_has_zero_error() {
        let (ckpi, features, examples) = separable_setup();
        let cfg = config(1, 2);
        let adaboost = AdaBoost::init(&ckpi, &features, &examples, &cfg).unwrap();
        let mut buf = Vec::new();
        let mut logger = IterationLogger::new(&mut buf);
        let model = adaboost.train(&mut logger).unwrap();

        assert_eq!(model.len(), 1);
        assert_eq!(model.beta[0], 0.0);
    }

    #[test]
    fn all_candidates_marked_is_fatal_before_t_rounds_complete() {
        let ckpi = CanonicalKmerPairIndex::build(1).unwrap(); // P = 10
        let features = FeatureMatrix::from_rows(1, vec![vec![1, 2, 3, 4], vec![4, 3, 2, 1]]);
        let examples = TrainingExamples::new(vec![0, 0], vec![1, 1], vec![5.0, -5.0], 0.0);
        let mut cfg = config(ckpi.len() + 1, 1);
        cfg.k = 1;
        let adaboost = AdaBoost::init(&ckpi, &features, &examples, &cfg).unwrap();
        let mut buf = Vec::new();
        let mut logger = IterationLogger::new(&mut buf);
        let err = adaboost.train(&mut logger).unwrap_err();
        match err {
            TrainError::AllCandidatesMarked { total, .. } => assert_eq!(total, ckpi.len()),
            other => panic!("expected AllCandidatesMarked, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_empty_data_is_rejected_at_init() {
        let ckpi = CanonicalKmerPairIndex::build(1).unwrap();
        let features = FeatureMatrix::from_rows(1, vec![vec![1, 2, 3, 4]]);
        let examples = TrainingExamples::new(vec![], vec![], vec![], 0.0);
        let cfg = config(1, 1);
        let err = AdaBoost::init(&ckpi, &features, &examples, &cfg).unwrap_err();
        assert!(matches!(err, TrainError::DegenerateData(_)));
    }

    #[test]
    fn degenerate_single_label_is_rejected_at_init() {
        let ckpi = CanonicalKmerPairIndex::build(1).unwrap();
        let features = FeatureMatrix::from_rows(1, vec![vec![1, 2, 3, 4], vec![4, 3, 2, 1]]);
        let examples = TrainingExamples::new(vec![0, 0], vec![1, 1], vec![5.0, 6.0], 0.0);
        let cfg = config(1, 1);
        let err = AdaBoost::init(&ckpi, &features, &examples, &cfg).unwrap_err();
        assert!(matches!(err, TrainError::DegenerateData(_)));
    }

    #[test]
    fn determinism_is_independent_of_worker_count() {
        let ckpi = CanonicalKmerPairIndex::build(2).unwrap();
        let rows: Vec<Vec<u64>> = (0..20)
            .map(|b| (0..16).map(|k| ((b * 7 + k * 3) % 11) as u64).collect())
            .collect();
        let features = FeatureMatrix::from_rows(2, rows);

        let mut h_i = Vec::new();
        let mut h_j = Vec::new();
        let mut mij = Vec::new();
        for x in 0..50usize {
            h_i.push(x % 20);
            h_j.push((x * 3 + 1) % 20);
            mij.push(((x * 13) % 7) as f64 - 3.0);
        }
        let examples = TrainingExamples::new(h_i, h_j, mij, 0.0);

        let mut motifs_cfg = config(8, 1);
        motifs_cfg.forbidden_motifs = ForbiddenMotif::gatc_baseline();

        let mut reference: Option<Model> = None;
        for w in [1, 2, 4] {
            let mut cfg = motifs_cfg.clone();
            cfg.exec_thread_num = w;
            let adaboost = AdaBoost::init(&ckpi, &features, &examples, &cfg).unwrap();
            let mut buf = Vec::new();
            let mut logger = IterationLogger::new(&mut buf);
            let model = adaboost.train(&mut logger).unwrap();

            if let Some(reference) = &reference {
                assert_eq!(model.axis, reference.axis, "axis mismatch at W={w}");
                assert_eq!(model.sign, reference.sign, "sign mismatch at W={w}");
                assert_eq!(model.beta, reference.beta, "beta mismatch at W={w}");
            } else {
                reference = Some(model);
            }
        }
    }
}
