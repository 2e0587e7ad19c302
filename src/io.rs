//! File-format adapters for the feature matrix and training-example inputs.
//! These are straightforward file-format glue, kept deliberately separate
//! from the boosting algorithm itself.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::examples::TrainingExamples;
use crate::features::FeatureMatrix;

/// Reads the tab-separated per-bin k-mer-count format written by a FASTA
/// preparer (one line per bin, `4^k` tab-separated counts; a line
/// containing only `*` marks a bin that was skipped upstream, e.g. because
/// it contained an ambiguous base).
///
/// Rows marked `*` are dropped from the returned matrix; callers must not
/// reference their original line number as a bin index afterward (the
/// preparer is expected to have already filtered any example referencing a
/// missing bin).
pub fn load_feature_matrix<P: AsRef<Path>>(k: u32, path: P) -> io::Result<FeatureMatrix> {
    let file = File::open(path)?;
    let mut rows = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim() == "*" {
            continue;
        }
        let row = line
            .split('\t')
            .map(|field| {
                field
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            })
            .collect::<io::Result<Vec<u64>>>()?;
        rows.push(row);
    }
    Ok(FeatureMatrix::from_rows(k, rows))
}

/// Reads the tab-separated `(h_i, h_j, mij)` format written by a Hi-C
/// normalizer/preparer, already KR-normalized and O/E-divided, with
/// NaN/Inf rows discarded upstream.
pub fn load_training_examples<P: AsRef<Path>>(path: P, threshold: f64) -> io::Result<TrainingExamples> {
    let file = File::open(path)?;
    let mut h_i = Vec::new();
    let mut h_j = Vec::new();
    let mut mij = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let bad = || io::Error::new(io::ErrorKind::InvalidData, "expected `h_i\\th_j\\tmij`");

        let i: usize = fields.next().ok_or_else(bad)?.trim().parse().map_err(|_| bad())?;
        let j: usize = fields.next().ok_or_else(bad)?.trim().parse().map_err(|_| bad())?;
        let m: f64 = fields.next().ok_or_else(bad)?.trim().parse().map_err(|_| bad())?;

        h_i.push(i);
        h_j.push(j);
        mij.push(m);
    }

    Ok(TrainingExamples::new(h_i, h_j, mij, threshold))
}
