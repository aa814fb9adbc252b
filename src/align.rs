//! Greedy windowed alignment of two word sequences.
//!
//! Two cursors walk the Arabic and Hebrew sequences. At each step the
//! aligner looks for the first transliteration pair inside a bounded window
//! ahead of the cursors, commits to it and moves both cursors past it. When
//! the window holds no pair, both cursors advance by one. Commitments are
//! never revisited, so matched positions strictly increase on both sides.

use std::ops::RangeInclusive;

use crate::compare::{Comparator, Prepared};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::script::Script;
use crate::transliterate::CandidateWord;

/// Axis held at its cursor while the other one scans ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    ByArabic,
    ByHebrew,
}

impl Probe {
    const ORDER: [Probe; 2] = [Probe::ByArabic, Probe::ByHebrew];
}

/// Words of one sequence, cleaned and expanded on first use. A word is
/// prepared once per `align` call however many windows it falls into, so
/// its cleaning and expansion events are recorded once.
struct PreparedSeq<'a, T> {
    seq: &'a [T],
    script: Script,
    cache: Vec<Option<Prepared>>,
}

impl<'a, T: AsRef<str>> PreparedSeq<'a, T> {
    fn new(seq: &'a [T], script: Script) -> Self {
        Self {
            seq,
            script,
            cache: vec![None; seq.len()],
        }
    }

    fn len(&self) -> usize {
        self.seq.len()
    }

    fn get(&mut self, i: usize, comparator: &Comparator, diag: &mut Diagnostics) -> &Prepared {
        let seq = self.seq;
        let word = seq[i].as_ref();
        let script = self.script;
        self.cache[i].get_or_insert_with(|| match script {
            Script::Arabic => comparator.prepare_arabic(word, diag),
            Script::Hebrew => comparator.prepare_hebrew(word, diag),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WindowedAligner {
    comparator: Comparator,
    words_dist: usize,
}

impl WindowedAligner {
    pub fn new(comparator: Comparator, words_dist: usize) -> Self {
        Self {
            comparator,
            words_dist,
        }
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    pub fn words_dist(&self) -> usize {
        self.words_dist
    }

    /// Aligns the two sequences. Returned candidates carry their positions;
    /// unmatched words, trailing ones included, are simply absent.
    pub fn align<A, H>(
        &self,
        seq_ar: &[A],
        seq_he: &[H],
        diag: &mut Diagnostics,
    ) -> Vec<CandidateWord>
    where
        A: AsRef<str>,
        H: AsRef<str>,
    {
        let mut words = Vec::new();
        let mut prep_ar = PreparedSeq::new(seq_ar, Script::Arabic);
        let mut prep_he = PreparedSeq::new(seq_he, Script::Hebrew);
        let (mut i_ar, mut i_he) = (0, 0);

        while i_ar < seq_ar.len() && i_he < seq_he.len() {
            let found = Probe::ORDER.into_iter().find_map(|probe| {
                self.find_pair(&mut prep_ar, &mut prep_he, i_ar, i_he, probe, diag)
            });

            match found {
                Some((j_ar, j_he, word)) => {
                    words.push(word.with_positions(j_ar, j_he));
                    i_ar = j_ar + 1;
                    i_he = j_he + 1;
                }
                None => {
                    diag.record(Diagnostic::AlignmentSkip {
                        pos_ar: i_ar,
                        pos_he: i_he,
                    });
                    i_ar += 1;
                    i_he += 1;
                }
            }
        }

        words
    }

    fn window(&self, cursor: usize, len: usize, scans: bool) -> RangeInclusive<usize> {
        if scans {
            cursor..=(len - 1).min(cursor.saturating_add(self.words_dist))
        } else {
            cursor..=cursor
        }
    }

    fn find_pair<A, H>(
        &self,
        prep_ar: &mut PreparedSeq<'_, A>,
        prep_he: &mut PreparedSeq<'_, H>,
        i_ar: usize,
        i_he: usize,
        probe: Probe,
        diag: &mut Diagnostics,
    ) -> Option<(usize, usize, CandidateWord)>
    where
        A: AsRef<str>,
        H: AsRef<str>,
    {
        let ar_range = self.window(i_ar, prep_ar.len(), probe == Probe::ByHebrew);
        let he_range = self.window(i_he, prep_he.len(), probe == Probe::ByArabic);
        for j_ar in ar_range {
            let word_ar = prep_ar.get(j_ar, &self.comparator, diag);
            for j_he in he_range.clone() {
                let word_he = prep_he.get(j_he, &self.comparator, diag);
                if let Some(word) = self.comparator.best_match(word_ar, word_he) {
                    return Some((j_ar, j_he, word));
                }
            }
        }
        None
    }
}

impl Default for WindowedAligner {
    fn default() -> Self {
        Self::new(
            Comparator::default(),
            crate::config::AlignConfig::DEFAULT_WORDS_DIST,
        )
    }
}
