//! Forbidden-motif filtering.
use log::info;

use crate::ckpi::CanonicalKmerPairIndex;
use crate::encoding::contains_motif;

/// A forbidden nucleotide subsequence: its `2*len`-bit code under
/// `A=0,C=1,G=2,T=3`, and its length in bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenMotif {
    pub code: u32,
    pub len: u32,
}

impl ForbiddenMotif {
    pub fn new(code: u32, len: u32) -> Self {
        Self { code, len }
    }

    /// The baseline motif set: the single motif `GATC` (code `141`, length 4).
    pub fn gatc_baseline() -> Vec<Self> {
        vec![Self::new(141, 4)]
    }
}

/// Marks every candidate `lm` whose any of the four k-mer codes contains a
/// configured forbidden motif. `marked[lm]` is set to `true` on first hit;
/// entries already `true` are left untouched (idempotent with prior calls
/// and with itself).
///
/// Returns the number of newly marked candidates.
pub fn mark_forbidden(
    ckpi: &CanonicalKmerPairIndex,
    motifs: &[ForbiddenMotif],
    marked: &mut [bool],
) -> usize {
    assert_eq!(marked.len(), ckpi.len());

    let k = ckpi.k();
    let mut newly_marked = 0usize;

    for lm in 0..ckpi.len() {
        if marked[lm] {
            continue;
        }

        let (l1, m1, l2, m2) = ckpi.codes(lm);
        let hit = motifs.iter().any(|motif| {
            contains_motif(l1, k, motif.code, motif.len)
                || contains_motif(m1, k, motif.code, motif.len)
                || contains_motif(l2, k, motif.code, motif.len)
                || contains_motif(m2, k, motif.code, motif.len)
        });

        if hit {
            marked[lm] = true;
            newly_marked += 1;
        }
    }

    info!(
        "forbidden-motif filter: {newly_marked} out of {} k-mer pairs newly filtered out \
         ({:.4} of the total)",
        ckpi.len(),
        newly_marked as f64 / ckpi.len() as f64
    );

    newly_marked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_pairs_whose_kmer_contains_gatc() {
        let k = 5;
        let ckpi = CanonicalKmerPairIndex::build(k).unwrap();
        let gatc = ForbiddenMotif::gatc_baseline();
        let mut marked = vec![false; ckpi.len()];
        let eliminated = mark_forbidden(&ckpi, &gatc, &mut marked);
        assert!(eliminated > 0);

        // GATCA (2 0 3 1 0) as l1 must be marked.
        let gatca = (2 << 8) | (0 << 6) | (3 << 4) | (1 << 2) | 0;
        let lm = (0..ckpi.len()).find(|&lm| ckpi.l1(lm) == gatca).unwrap();
        assert!(marked[lm]);

        // AAAAA (code 0) as l1 must not be marked by this motif alone.
        let lm_aaaaa = (0..ckpi.len()).find(|&lm| ckpi.l1(lm) == 0).unwrap();
        assert!(!marked[lm_aaaaa]);
    }

    #[test]
    fn running_the_filter_twice_is_idempotent() {
        let k = 5;
        let ckpi = CanonicalKmerPairIndex::build(k).unwrap();
        let gatc = ForbiddenMotif::gatc_baseline();

        let mut once = vec![false; ckpi.len()];
        mark_forbidden(&ckpi, &gatc, &mut once);

        let mut twice = once.clone();
        let second_pass_new = mark_forbidden(&ckpi, &gatc, &mut twice);

        assert_eq!(second_pass_new, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn already_marked_entries_are_left_alone() {
        let k = 4;
        let ckpi = CanonicalKmerPairIndex::build(k).unwrap();
        let gatc = ForbiddenMotif::gatc_baseline();
        let mut marked = vec![false; ckpi.len()];
        marked[0] = true; // pretend a prior round already used candidate 0
        mark_forbidden(&ckpi, &gatc, &mut marked);
        assert!(marked[0]);
    }
}
