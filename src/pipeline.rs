//! Segment, then align every segment independently.

use rayon::prelude::*;

use crate::align::WindowedAligner;
use crate::anchor::{AnchorFinder, Segment};
use crate::compare::Comparator;
use crate::config::AlignConfig;
use crate::diagnostics::Diagnostics;
use crate::error::AlignError;
use crate::script::HIDDEN;
use crate::split::{TokenKind, split_arabic, split_hebrew};
use crate::transliterate::{CandidateWord, Expander};

/// Output of a full run. Positions index the caller's sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub words: Vec<CandidateWord>,
    pub segments: Vec<Segment>,
    pub diagnostics: Diagnostics,
}

/// Word sequences produced from raw text, with their alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAlignment {
    pub words_ar: Vec<String>,
    pub words_he: Vec<String>,
    pub alignment: Alignment,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AlignConfig,
    aligner: WindowedAligner,
    anchors: AnchorFinder,
}

impl Pipeline {
    pub fn new(config: AlignConfig) -> Result<Self, AlignError> {
        config.validate()?;
        let comparator = Comparator::new(Expander::new(config.max_candidates));
        let aligner = WindowedAligner::new(comparator, config.words_dist);
        let anchors = AnchorFinder::from_config(aligner, &config);
        Ok(Self {
            config,
            aligner,
            anchors,
        })
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    pub fn run<A, H>(&self, seq_ar: &[A], seq_he: &[H]) -> Result<Alignment, AlignError>
    where
        A: AsRef<str> + Sync,
        H: AsRef<str> + Sync,
    {
        let mut diagnostics = Diagnostics::new();

        // Index map from the (possibly filtered) Hebrew view back to seq_he.
        let he_index: Vec<usize> = seq_he
            .iter()
            .enumerate()
            .filter(|&(_, w)| !(self.config.strip_hidden && w.as_ref() == HIDDEN))
            .map(|(i, _)| i)
            .collect();
        let he_view: Vec<&str> = he_index.iter().map(|&i| seq_he[i].as_ref()).collect();

        let mut anchor_diag = Diagnostics::silent();
        let segments = self
            .anchors
            .segment(seq_ar, &he_view, &mut anchor_diag)
            .map_err(|e| lift_anchor_error(e, &he_index))?;
        diagnostics.extend_mapped(anchor_diag, |a| a, |h| he_index[h]);
        tracing::debug!(
            words_ar = seq_ar.len(),
            words_he = he_view.len(),
            segments = segments.len(),
            "pipeline: document segmented"
        );

        let per_segment: Vec<(Vec<CandidateWord>, Diagnostics)> = segments
            .par_iter()
            .map(|segment| {
                let mut local = Diagnostics::silent();
                let words = self.aligner.align(
                    segment.ar_slice(seq_ar),
                    segment.he_slice(&he_view),
                    &mut local,
                );
                (words, local)
            })
            .collect();

        let mut words = Vec::new();
        for (segment, (segment_words, local)) in segments.iter().zip(per_segment) {
            let ar = |i: usize| segment.ar.start + i;
            let he = |i: usize| he_index[segment.he.start + i];
            words.extend(segment_words.into_iter().filter_map(|word| {
                let pos = word.positions()?;
                Some(word.with_positions(ar(pos.ar), he(pos.he)))
            }));
            diagnostics.extend_mapped(local, ar, he);
        }

        // A start at 0 covers leading hidden words; an end at the view length
        // covers trailing ones, even when the view is empty.
        let lift_start = |b: usize| {
            if b == 0 {
                0
            } else {
                he_index.get(b).copied().unwrap_or(seq_he.len())
            }
        };
        let lift_end = |b: usize| {
            if b == he_index.len() {
                seq_he.len()
            } else {
                lift_start(b)
            }
        };
        let segments = segments
            .into_iter()
            .map(|s| Segment {
                he: lift_start(s.he.start)..lift_end(s.he.end),
                ar: s.ar,
            })
            .collect();

        Ok(Alignment {
            words,
            segments,
            diagnostics,
        })
    }

    /// Splits raw Arabic text and tagged Hebrew tokens into words, then runs
    /// the alignment on them.
    pub fn run_texts(
        &self,
        text_ar: &str,
        tokens_he: &[(String, TokenKind)],
    ) -> Result<DocumentAlignment, AlignError> {
        let mut split_diag = Diagnostics::new();
        let words_ar = split_arabic(text_ar, false);
        let words_he = split_hebrew(tokens_he, false, &mut split_diag);

        let mut alignment = self.run(&words_ar, &words_he)?;
        split_diag.extend(alignment.diagnostics);
        alignment.diagnostics = split_diag;

        Ok(DocumentAlignment {
            words_ar,
            words_he,
            alignment,
        })
    }
}

/// Anchor positions are found on the view without hidden words; report
/// them against the caller's Hebrew sequence.
fn lift_anchor_error(err: AlignError, he_index: &[usize]) -> AlignError {
    match err {
        AlignError::AnchorOrder {
            prev_word,
            prev_ar,
            prev_he,
            word,
            pos_ar,
            pos_he,
        } => AlignError::AnchorOrder {
            prev_word,
            prev_ar,
            prev_he: he_index[prev_he],
            word,
            pos_ar,
            pos_he: he_index[pos_he],
        },
        other => other,
    }
}
