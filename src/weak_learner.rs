//! Weak-learner evaluator and stump selector.
use rayon::ThreadPool;

use crate::ckpi::CanonicalKmerPairIndex;
use crate::examples::TrainingExamples;
use crate::features::FeatureMatrix;

/// Computes the product-sum score for candidate `lm` on example `x`:
/// `F[h_i][l1]*F[h_j][m1] + F[h_i][l2]*F[h_j][m2]`.
#[inline]
fn stump_score(
    ckpi: &CanonicalKmerPairIndex,
    features: &FeatureMatrix,
    lm: usize,
    h_i: usize,
    h_j: usize,
) -> f64 {
    let (l1, m1, l2, m2) = ckpi.codes(lm);
    features.get(h_i, l1) * features.get(h_j, m1) + features.get(h_i, l2) * features.get(h_j, m2)
}

/// `pred = 1 if score > 0 else 0`, for candidate `lm` on example `x`.
#[inline]
pub fn predict_unsigned(
    ckpi: &CanonicalKmerPairIndex,
    features: &FeatureMatrix,
    examples: &TrainingExamples,
    lm: usize,
    x: usize,
) -> u8 {
    let score = stump_score(ckpi, features, lm, examples.h_i(x), examples.h_j(x));
    if score > 0.0 {
        1
    } else {
        0
    }
}

/// Computes `err[lm]` for every unmarked candidate, fanned out across a
/// fixed-width partition of `[0, P)` into `num_workers` contiguous,
/// disjoint ranges. Entries with `marked[lm] == true` are left at whatever
/// `err` already held; the caller's selector skips them.
///
/// Each worker sums over `x in [0, N)` in a fixed ascending order, so the
/// result for a given `lm` does not depend on `num_workers`.
pub fn evaluate_errors(
    pool: &ThreadPool,
    num_workers: usize,
    ckpi: &CanonicalKmerPairIndex,
    features: &FeatureMatrix,
    examples: &TrainingExamples,
    marked: &[bool],
    p: &[f64],
    err: &mut [f64],
) {
    let total = ckpi.len();
    debug_assert_eq!(marked.len(), total);
    debug_assert_eq!(err.len(), total);
    debug_assert_eq!(p.len(), examples.len());

    pool.scope(|scope| {
        let mut rest = err;
        let mut start = 0usize;
        for worker in 0..num_workers {
            let end = if worker + 1 == num_workers {
                total
            } else {
                total * (worker + 1) / num_workers
            };
            let len = end - start;
            let (slice, remainder) = rest.split_at_mut(len);
            rest = remainder;
            let range_start = start;
            start = end;

            scope.spawn(move |_| {
                for (offset, slot) in slice.iter_mut().enumerate() {
                    let lm = range_start + offset;
                    if marked[lm] {
                        continue;
                    }
                    let mut acc = 0.0;
                    for x in 0..examples.len() {
                        let pred = predict_unsigned(ckpi, features, examples, lm, x);
                        if pred != examples.y(x) {
                            acc += p[x];
                        }
                    }
                    *slot = acc;
                }
            });
        }
    });
}

/// The outcome of scanning `err` over unmarked candidates: the chosen
/// candidate, its sign, and its weighted error `epsilon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub lm: usize,
    pub sign: u8,
    pub epsilon: f64,
}

/// Picks the candidate farthest from error 1/2 among unmarked candidates.
/// Ties broken first-seen: strictly `<` for the min, strictly `>` for the
/// max.
///
/// Returns `None` iff every candidate is marked.
pub fn select_stump(err: &[f64], marked: &[bool]) -> Option<Selection> {
    let mut argmin = None::<usize>;
    let mut argmax = None::<usize>;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for (lm, &e) in err.iter().enumerate() {
        if marked[lm] {
            continue;
        }
        if e < min {
            min = e;
            argmin = Some(lm);
        }
        if e > max {
            max = e;
            argmax = Some(lm);
        }
    }

    let (argmin, argmax) = (argmin?, argmax?);

    if min + max > 1.0 {
        Some(Selection {
            lm: argmax,
            sign: 1,
            epsilon: 1.0 - max,
        })
    } else {
        Some(Selection {
            lm: argmin,
            sign: 0,
            epsilon: min,
        })
    }
}
