//! Combinatorial expansion of a word into every spelling the tables allow.

use std::cmp::Ordering;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::script::{APOSTROPHE, LetterPair, Script};
use crate::table;

/// Index of a matched word in each sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Positions {
    pub ar: usize,
    pub he: usize,
}

/// One possible letter-by-letter rendering of a word in the other script.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateWord {
    pairs: Vec<LetterPair>,
    source: Script,
    positions: Option<Positions>,
}

impl CandidateWord {
    pub fn new(pairs: Vec<LetterPair>, source: Script) -> Self {
        Self {
            pairs,
            source,
            positions: None,
        }
    }

    /// Script the word was expanded from.
    pub fn source(&self) -> Script {
        self.source
    }

    pub fn pairs(&self) -> &[LetterPair] {
        &self.pairs
    }

    pub fn spelling(&self, script: Script) -> String {
        self.pairs.iter().map(|p| p.get(script)).collect()
    }

    pub fn arabic(&self) -> String {
        self.spelling(Script::Arabic)
    }

    pub fn hebrew(&self) -> String {
        self.spelling(Script::Hebrew)
    }

    /// Sum of letter-pair scores scaled by the direction factor.
    pub fn score(&self) -> f64 {
        self.pairs.iter().map(LetterPair::score).sum::<f64>() * self.source.direction_factor()
    }

    /// True if any position is an insertion or a deletion.
    pub fn has_empty(&self) -> bool {
        self.pairs.iter().any(LetterPair::has_empty)
    }

    /// `(arabic, hebrew)` letter correspondences, either side possibly empty.
    pub fn letter_pairs(&self) -> Vec<(&'static str, &'static str)> {
        self.pairs
            .iter()
            .map(|p| (p.ar.grapheme, p.he.grapheme))
            .collect()
    }

    pub fn positions(&self) -> Option<Positions> {
        self.positions
    }

    pub fn set_positions(&mut self, ar: usize, he: usize) {
        self.positions = Some(Positions { ar, he });
    }

    pub fn with_positions(mut self, ar: usize, he: usize) -> Self {
        self.set_positions(ar, he);
        self
    }
}

/// Ranking key: higher score first. Use with a stable sort so equal scores
/// keep the order in which candidates were merged.
pub fn by_score_desc(a: &CandidateWord, b: &CandidateWord) -> Ordering {
    b.score().total_cmp(&a.score())
}

#[derive(Debug, Clone, Copy)]
pub struct Expander {
    max_candidates: usize,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new(crate::config::AlignConfig::DEFAULT_MAX_CANDIDATES)
    }
}

impl Expander {
    pub fn new(max_candidates: usize) -> Self {
        Self { max_candidates }
    }

    /// Expands `word`, written in `from`, into all candidate spellings in the
    /// other script. The first letter varies slowest, so candidates follow
    /// table order position by position.
    pub fn expand(&self, word: &str, from: Script, diag: &mut Diagnostics) -> Vec<CandidateWord> {
        let mut groups: Vec<Vec<LetterPair>> = Vec::new();
        let mut chars = word.chars().peekable();
        while let Some(c) = chars.next() {
            let Some(entry) = table::lookup(from, c) else {
                diag.record(Diagnostic::UnknownLetter {
                    word: word.to_string(),
                    letter: c,
                    script: from,
                });
                continue;
            };
            let mut source = entry.source;
            if from == Script::Hebrew && chars.peek() == Some(&APOSTROPHE) {
                chars.next();
                source = table::dotted(c).unwrap_or(source);
            }
            let group = entry
                .targets
                .iter()
                .map(|&target| match from {
                    Script::Arabic => LetterPair::new(source, target),
                    Script::Hebrew => LetterPair::new(target, source),
                })
                .collect();
            groups.push(group);
        }

        if groups.is_empty() {
            return Vec::new();
        }

        let total = groups
            .iter()
            .fold(1usize, |acc, g| acc.saturating_mul(g.len()));
        if total > self.max_candidates {
            diag.record(Diagnostic::ExpansionCapped {
                word: word.to_string(),
                script: from,
                candidates: total,
                limit: self.max_candidates,
            });
            return Vec::new();
        }

        let mut words: Vec<Vec<LetterPair>> = vec![Vec::with_capacity(groups.len())];
        for group in &groups {
            let mut next = Vec::with_capacity(words.len() * group.len());
            for prefix in &words {
                for pair in group {
                    let mut w = prefix.clone();
                    w.push(*pair);
                    next.push(w);
                }
            }
            words = next;
        }

        words
            .into_iter()
            .map(|pairs| CandidateWord::new(pairs, from))
            .collect()
    }
}
