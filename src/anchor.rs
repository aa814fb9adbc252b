//! Rare-word anchors and document segmentation.
//!
//! Long documents drift too far for the windowed aligner to recover, so they
//! are first cut at "anchors": Arabic words that occur once, are long enough
//! to be distinctive, transliterate without insertions or deletions, and
//! land on exactly one Hebrew position whose surroundings also align.

use std::collections::HashMap;
use std::ops::Range;

use crate::align::WindowedAligner;
use crate::config::{AlignConfig, MonotonicityPolicy};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::AlignError;
use crate::script::Script;
use crate::transliterate::{CandidateWord, Positions};

/// A pair of index ranges, one into each sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub ar: Range<usize>,
    pub he: Range<usize>,
}

impl Segment {
    pub fn ar_slice<'a, T>(&self, seq: &'a [T]) -> &'a [T] {
        &seq[self.ar.clone()]
    }

    pub fn he_slice<'a, T>(&self, seq: &'a [T]) -> &'a [T] {
        &seq[self.he.clone()]
    }
}

/// An accepted anchor: the lossless candidate and where it sits in each sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub word: CandidateWord,
    pub pos: Positions,
}

#[derive(Debug, Clone, Copy)]
pub struct AnchorFinder {
    aligner: WindowedAligner,
    sub_match_range: usize,
    sub_match_pct: f64,
    policy: MonotonicityPolicy,
}

impl AnchorFinder {
    pub fn new(
        aligner: WindowedAligner,
        sub_match_range: usize,
        sub_match_pct: f64,
        policy: MonotonicityPolicy,
    ) -> Self {
        Self {
            aligner,
            sub_match_range,
            sub_match_pct,
            policy,
        }
    }

    pub fn from_config(aligner: WindowedAligner, config: &AlignConfig) -> Self {
        Self::new(
            aligner,
            config.sub_match_range,
            config.sub_match_pct,
            config.monotonicity,
        )
    }

    /// Finds anchors and cuts both sequences at them.
    pub fn segment<A, H>(
        &self,
        seq_ar: &[A],
        seq_he: &[H],
        diag: &mut Diagnostics,
    ) -> Result<Vec<Segment>, AlignError>
    where
        A: AsRef<str>,
        H: AsRef<str>,
    {
        let anchors = self.find_anchors(seq_ar, seq_he, diag)?;
        Ok(build_segments(&anchors, seq_ar.len(), seq_he.len()))
    }

    /// Accepted anchors sorted by Arabic position, with Hebrew positions
    /// strictly increasing.
    pub fn find_anchors<A, H>(
        &self,
        seq_ar: &[A],
        seq_he: &[H],
        diag: &mut Diagnostics,
    ) -> Result<Vec<Anchor>, AlignError>
    where
        A: AsRef<str>,
        H: AsRef<str>,
    {
        let mut he_index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, w) in seq_he.iter().enumerate() {
            he_index.entry(w.as_ref()).or_default().push(i);
        }

        let expander = self.aligner.comparator().expander();
        let mut anchors = Vec::new();
        for (pos_ar, word) in rare_words(seq_ar) {
            let mut accepted = Vec::new();
            let candidates = expander
                .expand(word, Script::Arabic, diag)
                .into_iter()
                .filter(|w| !w.has_empty());
            for candidate in candidates {
                let spelling = candidate.hebrew();
                let Some(occurrences) = he_index.get(spelling.as_str()) else {
                    continue;
                };
                for &pos_he in occurrences {
                    if self.context_aligns(seq_ar, seq_he, word, pos_ar, pos_he, diag) {
                        accepted.push(Anchor {
                            word: candidate.clone(),
                            pos: Positions {
                                ar: pos_ar,
                                he: pos_he,
                            },
                        });
                    }
                }
            }

            match accepted.len() {
                0 => {}
                1 => anchors.extend(accepted),
                n => diag.record(Diagnostic::AmbiguousAnchor {
                    word: word.to_string(),
                    occurrences: n,
                }),
            }
        }

        anchors.sort_by_key(|a| a.pos.ar);
        self.enforce_order(anchors, diag)
    }

    /// Aligns a small window around the candidate pair and requires most of
    /// it to match on both sides.
    fn context_aligns<A, H>(
        &self,
        seq_ar: &[A],
        seq_he: &[H],
        word: &str,
        pos_ar: usize,
        pos_he: usize,
        diag: &mut Diagnostics,
    ) -> bool
    where
        A: AsRef<str>,
        H: AsRef<str>,
    {
        let win_ar = local_window(pos_ar, seq_ar.len() - 1, self.sub_match_range);
        let win_he = local_window(pos_he, seq_he.len() - 1, self.sub_match_range);
        let sub_ar = &seq_ar[win_ar];
        let sub_he = &seq_he[win_he];

        // Skips inside the probe say nothing about the document itself.
        let mut scratch = Diagnostics::silent();
        let matched = self.aligner.align(sub_ar, sub_he, &mut scratch).len();

        let accepted = matched as f64 / sub_ar.len() as f64 > self.sub_match_pct
            && matched as f64 / sub_he.len() as f64 > self.sub_match_pct;
        diag.record(Diagnostic::AnchorProbe {
            word: word.to_string(),
            pos_ar,
            pos_he,
            matched,
            window_ar: sub_ar.len(),
            window_he: sub_he.len(),
            accepted,
        });
        accepted
    }

    fn enforce_order(
        &self,
        anchors: Vec<Anchor>,
        diag: &mut Diagnostics,
    ) -> Result<Vec<Anchor>, AlignError> {
        match self.policy {
            MonotonicityPolicy::Abort => {
                if let Some(pair) = anchors.windows(2).find(|p| p[0].pos.he >= p[1].pos.he) {
                    return Err(AlignError::AnchorOrder {
                        prev_word: pair[0].word.arabic(),
                        prev_ar: pair[0].pos.ar,
                        prev_he: pair[0].pos.he,
                        word: pair[1].word.arabic(),
                        pos_ar: pair[1].pos.ar,
                        pos_he: pair[1].pos.he,
                    });
                }
                Ok(anchors)
            }
            MonotonicityPolicy::DropOffending => {
                let keep = longest_increasing(&anchors);
                let mut kept = Vec::with_capacity(keep.len());
                for (i, anchor) in anchors.into_iter().enumerate() {
                    if keep.contains(&i) {
                        kept.push(anchor);
                    } else {
                        diag.record(Diagnostic::AnchorDropped {
                            word: anchor.word.arabic(),
                            pos_ar: anchor.pos.ar,
                            pos_he: anchor.pos.he,
                        });
                    }
                }
                Ok(kept)
            }
        }
    }
}

/// Words of `seq` that occur exactly once and are at least as long as the
/// floor of the mean rare-word length, in document order.
pub fn rare_words<A: AsRef<str>>(seq: &[A]) -> Vec<(usize, &str)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for w in seq {
        *counts.entry(w.as_ref()).or_insert(0) += 1;
    }

    let rare: Vec<(usize, &str)> = seq
        .iter()
        .enumerate()
        .map(|(i, w)| (i, w.as_ref()))
        .filter(|(_, w)| counts[w] == 1)
        .collect();
    if rare.is_empty() {
        return rare;
    }

    let total_len: usize = rare.iter().map(|(_, w)| w.chars().count()).sum();
    let min_len = (total_len as f64 / rare.len() as f64).floor() as usize;
    rare.into_iter()
        .filter(|(_, w)| w.chars().count() >= min_len)
        .collect()
}

/// Inclusive window of about `2 * range + 1` indices around `idx`, shifted
/// to stay inside `0..=max_idx`.
pub fn local_window(idx: usize, max_idx: usize, range: usize) -> std::ops::RangeInclusive<usize> {
    let span = range.saturating_mul(2);
    if max_idx < span {
        0..=max_idx
    } else if idx < range {
        0..=span
    } else if idx > max_idx - range {
        max_idx - span..=max_idx
    } else {
        idx - range..=idx + range
    }
}

/// Indices of the longest subsequence with strictly increasing Hebrew
/// positions. Ties resolve to the earliest ending anchor.
fn longest_increasing(anchors: &[Anchor]) -> Vec<usize> {
    let n = anchors.len();
    let mut len = vec![1usize; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        for j in 0..i {
            if anchors[j].pos.he < anchors[i].pos.he && len[j] + 1 > len[i] {
                len[i] = len[j] + 1;
                prev[i] = Some(j);
            }
        }
    }

    let mut best: Option<usize> = None;
    for i in 0..n {
        if best.is_none_or(|b| len[i] > len[b]) {
            best = Some(i);
        }
    }

    let mut chain = Vec::new();
    let mut cursor = best;
    while let Some(i) = cursor {
        chain.push(i);
        cursor = prev[i];
    }
    chain.reverse();
    chain
}

/// Cuts both sequences at the anchors. Each anchor opens the segment that
/// follows it; the segments tile both sequences exactly.
pub fn build_segments(anchors: &[Anchor], len_ar: usize, len_he: usize) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(anchors.len() + 1);
    let (mut start_ar, mut start_he) = (0, 0);
    for anchor in anchors {
        segments.push(Segment {
            ar: start_ar..anchor.pos.ar,
            he: start_he..anchor.pos.he,
        });
        start_ar = anchor.pos.ar;
        start_he = anchor.pos.he;
    }
    segments.push(Segment {
        ar: start_ar..len_ar,
        he: start_he..len_he,
    });
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Comparator;
    use proptest::prelude::*;

    fn finder(pct: f64, policy: MonotonicityPolicy) -> AnchorFinder {
        AnchorFinder::new(WindowedAligner::default(), 5, pct, policy)
    }

    fn positions(anchors: &[Anchor]) -> Vec<(usize, usize)> {
        anchors.iter().map(|a| (a.pos.ar, a.pos.he)).collect()
    }

    #[test]
    fn rare_words_keep_long_singletons() {
        let seq = ["من", "على", "مسلمين", "من", "باب", "شريعة", "على"];
        // rare: مسلمين (6), باب (3), شريعة (5); mean 4.67 -> floor 4
        assert_eq!(rare_words(&seq), vec![(2, "مسلمين"), (5, "شريعة")]);
    }

    #[test]
    fn rare_words_of_repetitive_text_is_empty() {
        let seq = ["من", "على", "من", "على"];
        assert!(rare_words(&seq).is_empty());
        let empty: [&str; 0] = [];
        assert!(rare_words(&empty).is_empty());
    }

    #[test]
    fn local_window_shapes() {
        // short sequence: everything
        assert_eq!(local_window(3, 8, 5), 0..=8);
        // near the start
        assert_eq!(local_window(2, 30, 5), 0..=10);
        // near the end
        assert_eq!(local_window(28, 30, 5), 20..=30);
        // middle
        assert_eq!(local_window(15, 30, 5), 10..=20);
        // boundaries
        assert_eq!(local_window(5, 30, 5), 0..=10);
        assert_eq!(local_window(25, 30, 5), 20..=30);
        // oversized range covers everything
        assert_eq!(local_window(3, 30, usize::MAX), 0..=30);
        assert_eq!(local_window(3, 30, usize::MAX / 2 + 1), 0..=30);
    }

    const COMMON_AR: [&str; 4] = ["من", "على", "باب", "قلم"];
    const COMMON_HE: [&str; 4] = ["מן", "עלי", "באב", "קלם"];

    fn document() -> (Vec<&'static str>, Vec<&'static str>) {
        let mut ar = Vec::new();
        let mut he = Vec::new();
        for i in 0..16 {
            let (a, h) = match i {
                5 => ("مسلمين", "מסלמין"),
                11 => ("شريعة", "שריעה"),
                _ => (COMMON_AR[i % 4], COMMON_HE[i % 4]),
            };
            ar.push(a);
            he.push(h);
        }
        (ar, he)
    }

    #[test]
    fn two_rare_words_make_three_segments() {
        let (ar, he) = document();
        let mut diag = Diagnostics::new();
        let f = finder(0.75, MonotonicityPolicy::Abort);
        let anchors = f.find_anchors(&ar, &he, &mut diag).unwrap();
        assert_eq!(positions(&anchors), vec![(5, 5), (11, 11)]);
        assert_eq!(anchors[0].word.hebrew(), "מסלמין");

        let segments = build_segments(&anchors, ar.len(), he.len());
        assert_eq!(
            segments,
            vec![
                Segment { ar: 0..5, he: 0..5 },
                Segment { ar: 5..11, he: 5..11 },
                Segment { ar: 11..16, he: 11..16 },
            ]
        );
        assert_eq!(segments[1].ar_slice(&ar)[0], "مسلمين");
        assert_eq!(segments[1].he_slice(&he)[0], "מסלמין");
    }

    #[test]
    fn ambiguous_anchor_is_discarded() {
        let ar = ["من", "على", "مسلمين", "باب", "من", "على", "باب"];
        let he = ["מן", "עלי", "מסלמין", "באב", "מן", "עלי", "מסלמין"];
        let mut diag = Diagnostics::new();
        let anchors = finder(0.75, MonotonicityPolicy::Abort)
            .find_anchors(&ar, &he, &mut diag)
            .unwrap();
        assert!(anchors.is_empty());
        assert!(diag.events().iter().any(|e| matches!(
            e,
            Diagnostic::AmbiguousAnchor { word, occurrences: 2 } if word == "مسلمين"
        )));
    }

    #[test]
    fn anchor_without_aligned_context_is_rejected() {
        let (ar, mut he) = document();
        // scramble the Hebrew context around the first rare word
        for w in he.iter_mut().take(5) {
            *w = "ספר";
        }
        let mut diag = Diagnostics::new();
        let anchors = finder(0.75, MonotonicityPolicy::Abort)
            .find_anchors(&ar, &he, &mut diag)
            .unwrap();
        assert_eq!(positions(&anchors), vec![(11, 11)]);
        assert!(diag.events().iter().any(|e| matches!(
            e,
            Diagnostic::AnchorProbe { pos_ar: 5, accepted: false, .. }
        )));
    }

    fn crossed() -> ([&'static str; 5], [&'static str; 5]) {
        (
            ["مسلمين", "من", "على", "باب", "شريعة"],
            ["שריעה", "מן", "עלי", "באב", "מסלמין"],
        )
    }

    #[test]
    fn crossed_anchors_abort() {
        let (ar, he) = crossed();
        let mut diag = Diagnostics::new();
        let err = finder(0.1, MonotonicityPolicy::Abort)
            .find_anchors(&ar, &he, &mut diag)
            .unwrap_err();
        assert!(matches!(
            err,
            AlignError::AnchorOrder { prev_ar: 0, prev_he: 4, pos_ar: 2, pos_he: 2, .. }
        ));
    }

    #[test]
    fn crossed_anchors_can_be_dropped() {
        let (ar, he) = crossed();
        let mut diag = Diagnostics::new();
        let anchors = finder(0.1, MonotonicityPolicy::DropOffending)
            .find_anchors(&ar, &he, &mut diag)
            .unwrap();
        assert_eq!(positions(&anchors), vec![(2, 2), (3, 3)]);
        let dropped: Vec<usize> = diag
            .events()
            .iter()
            .filter_map(|e| match e {
                Diagnostic::AnchorDropped { pos_ar, .. } => Some(*pos_ar),
                _ => None,
            })
            .collect();
        assert_eq!(dropped, vec![0, 4]);
        assert_eq!(
            build_segments(&anchors, ar.len(), he.len()),
            vec![
                Segment { ar: 0..2, he: 0..2 },
                Segment { ar: 2..3, he: 2..3 },
                Segment { ar: 3..5, he: 3..5 },
            ]
        );
    }

    #[test]
    fn no_anchors_yield_one_segment() {
        assert_eq!(
            build_segments(&[], 7, 9),
            vec![Segment { ar: 0..7, he: 0..9 }]
        );
    }

    #[test]
    fn segment_runs_the_whole_pass() {
        let (ar, he) = document();
        let mut diag = Diagnostics::new();
        let f = AnchorFinder::from_config(
            WindowedAligner::new(Comparator::default(), 10),
            &AlignConfig::default(),
        );
        let segments = f.segment(&ar, &he, &mut diag).unwrap();
        assert_eq!(segments.len(), 3);
    }

    fn anchor_at(ar: usize, he: usize) -> Anchor {
        Anchor {
            word: CandidateWord::new(Vec::new(), Script::Arabic),
            pos: Positions { ar, he },
        }
    }

    proptest! {
        #[test]
        fn prop_segments_tile_both_sequences(
            steps in proptest::collection::vec((1usize..6, 1usize..6), 0..8),
            tail_ar in 0usize..5,
            tail_he in 0usize..5,
        ) {
            let mut anchors = Vec::new();
            let (mut ar, mut he) = (0, 0);
            for (da, dh) in steps {
                ar += da;
                he += dh;
                anchors.push(anchor_at(ar, he));
            }
            let len_ar = ar + tail_ar;
            let len_he = he + tail_he;
            let segments = build_segments(&anchors, len_ar, len_he);

            prop_assert_eq!(segments.len(), anchors.len() + 1);
            prop_assert_eq!(segments[0].ar.start, 0);
            prop_assert_eq!(segments[0].he.start, 0);
            for pair in segments.windows(2) {
                prop_assert_eq!(pair[0].ar.end, pair[1].ar.start);
                prop_assert_eq!(pair[0].he.end, pair[1].he.start);
            }
            prop_assert_eq!(segments.iter().map(|s| s.ar.len()).sum::<usize>(), len_ar);
            prop_assert_eq!(segments.iter().map(|s| s.he.len()).sum::<usize>(), len_he);
        }

        #[test]
        fn prop_dropping_restores_order(he in proptest::collection::vec(0usize..50, 0..12)) {
            let anchors: Vec<Anchor> = he.iter().enumerate().map(|(i, &h)| anchor_at(i, h)).collect();
            let keep = longest_increasing(&anchors);
            for pair in keep.windows(2) {
                prop_assert!(pair[0] < pair[1]);
                prop_assert!(anchors[pair[0]].pos.he < anchors[pair[1]].pos.he);
            }
            prop_assert_eq!(keep.is_empty(), anchors.is_empty());
        }
    }
}
