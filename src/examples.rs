//! Training examples and the label builder: converts a Hi-C observation
//! vector plus a threshold into binary labels.

/// The `N` training examples: bin-pair indices, observed Hi-C values, and
/// derived binary labels.
#[derive(Debug, Clone)]
pub struct TrainingExamples {
    h_i: Vec<usize>,
    h_j: Vec<usize>,
    mij: Vec<f64>,
    y: Vec<u8>,
}

impl TrainingExamples {
    /// Builds the example set, binarizing `mij` against `threshold`:
    /// `y[x] = 1 if mij[x] > threshold else 0`.
    ///
    /// Panics if `h_i`, `h_j`, and `mij` are not all the same length; this
    /// is an upstream-preparer invariant.
    pub fn new(h_i: Vec<usize>, h_j: Vec<usize>, mij: Vec<f64>, threshold: f64) -> Self {
        assert_eq!(h_i.len(), h_j.len());
        assert_eq!(h_i.len(), mij.len());

        let y = mij.iter().map(|&m| if m > threshold { 1 } else { 0 }).collect();

        Self { h_i, h_j, mij, y }
    }

    /// `N`, the number of training examples.
    pub fn len(&self) -> usize {
        self.h_i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h_i.is_empty()
    }

    #[inline]
    pub fn h_i(&self, x: usize) -> usize {
        self.h_i[x]
    }

    #[inline]
    pub fn h_j(&self, x: usize) -> usize {
        self.h_j[x]
    }

    #[inline]
    pub fn y(&self, x: usize) -> u8 {
        self.y[x]
    }

    /// `true` iff every example shares the same label, i.e. the boosting
    /// problem is degenerate.
    pub fn single_label_class(&self) -> bool {
        match self.y.first() {
            None => true,
            Some(&first) => self.y.iter().all(|&y| y == first),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binarizes_against_threshold_with_strict_greater_than() {
        let ex = TrainingExamples::new(vec![0, 0, 0], vec![1, 1, 1], vec![5.0, 2.0, 2.0], 2.0);
        assert_eq!(ex.y(0), 1);
        assert_eq!(ex.y(1), 0);
        assert_eq!(ex.y(2), 0);
    }

    #[test]
    fn detects_single_label_class() {
        let all_one = TrainingExamples::new(vec![0, 0], vec![1, 1], vec![5.0, 6.0], 0.0);
        assert!(all_one.single_label_class());

        let mixed = TrainingExamples::new(vec![0, 0], vec![1, 1], vec![5.0, -1.0], 0.0);
        assert!(!mixed.single_label_class());
    }

    #[test]
    fn empty_examples_counts_as_single_label_class() {
        let empty = TrainingExamples::new(vec![], vec![], vec![], 0.0);
        assert!(empty.single_label_class());
        assert!(empty.is_empty());
    }
}
