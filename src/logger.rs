//! Per-iteration and final-model logging (`spec.md` §4.6, §6).
//!
//! Modeled on `miniboosts::research::logger::Logger`: a thin wrapper around
//! a `Write` sink that the driver calls once per round, plus one call after
//! the loop to emit the full model.
use std::io::{self, Write};
use std::time::Instant;

use crate::ckpi::CanonicalKmerPairIndex;
use crate::encoding::kmer_to_string;
use crate::model::Model;

const ITERATION_HEADER: &str =
    "t\tbeta\tsign\taxis\tl1\tm1\tl2\tm2\telapsed_sec\tsec_per_iter\n";

/// Writes the per-round and final-model logs described in `spec.md` §6.
pub struct IterationLogger<W: Write> {
    sink: W,
    start: Instant,
    header_written: bool,
}

impl<W: Write> IterationLogger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            start: Instant::now(),
            header_written: false,
        }
    }

    /// Appends one tab-separated line for round `t`.
    pub fn log_iteration(
        &mut self,
        ckpi: &CanonicalKmerPairIndex,
        t: usize,
        axis: usize,
        sign: u8,
        beta: f64,
    ) -> io::Result<()> {
        if !self.header_written {
            self.sink.write_all(ITERATION_HEADER.as_bytes())?;
            self.header_written = true;
        }

        let k = ckpi.k();
        let (l1, m1, l2, m2) = ckpi.codes(axis);
        let elapsed = self.start.elapsed().as_secs_f64();
        let per_iter = elapsed / (t + 1) as f64;

        writeln!(
            self.sink,
            "{t}\t{beta:e}\t{sign}\t{axis}\t{}\t{}\t{}\t{}\t{elapsed:.6}\t{per_iter:.6}",
            kmer_to_string(l1, k),
            kmer_to_string(m1, k),
            kmer_to_string(l2, k),
            kmer_to_string(m2, k),
        )
    }

    /// Writes the full model, one line per round, without timing columns.
    pub fn log_model(&mut self, ckpi: &CanonicalKmerPairIndex, model: &Model) -> io::Result<()> {
        writeln!(self.sink, "t\tbeta\tsign\taxis\tl1\tm1\tl2\tm2")?;
        let k = ckpi.k();
        for t in 0..model.len() {
            let axis = model.axis[t];
            let (l1, m1, l2, m2) = ckpi.codes(axis);
            writeln!(
                self.sink,
                "{t}\t{:e}\t{}\t{axis}\t{}\t{}\t{}\t{}",
                model.beta[t],
                model.sign[t],
                kmer_to_string(l1, k),
                kmer_to_string(m1, k),
                kmer_to_string(l2, k),
                kmer_to_string(m2, k),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_iteration_writes_header_once_then_tab_separated_rows() {
        let ckpi = CanonicalKmerPairIndex::build(2).unwrap();
        let mut buf = Vec::new();
        {
            let mut logger = IterationLogger::new(&mut buf);
            logger.log_iteration(&ckpi, 0, 0, 0, 0.5).unwrap();
            logger.log_iteration(&ckpi, 1, 1, 1, 0.25).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], ITERATION_HEADER.trim_end_matches('\n'));
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0\t"));
        assert!(lines[2].starts_with("1\t"));
        assert_eq!(lines[1].split('\t').count(), 10);
    }

    #[test]
    fn log_model_emits_one_row_per_round() {
        let ckpi = CanonicalKmerPairIndex::build(2).unwrap();
        let mut model = crate::model::Model::with_capacity(2);
        model.record(0, 0, 0.5);
        model.record(1, 1, 0.1);

        let mut buf = Vec::new();
        IterationLogger::new(&mut buf).log_model(&ckpi, &model).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3); // header + 2 rounds
    }
}
