//! Deciding whether an Arabic word and a Hebrew word are transliterations.

use crate::clean::{clean_arabic, clean_hebrew};
use crate::diagnostics::Diagnostics;
use crate::script::{HIDDEN, Script};
use crate::transliterate::{CandidateWord, Expander, by_score_desc};

#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    expander: Expander,
}

/// A cleaned word with its expansion into the other script. Comparing two
/// prepared words does no further cleaning or expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    word: String,
    candidates: Vec<CandidateWord>,
}

impl Prepared {
    pub fn word(&self) -> &str {
        &self.word
    }

    /// True if this word can never match anything.
    pub fn is_void(&self) -> bool {
        self.word.is_empty() || self.candidates.is_empty()
    }
}

impl Comparator {
    pub fn new(expander: Expander) -> Self {
        Self { expander }
    }

    pub fn expander(&self) -> &Expander {
        &self.expander
    }

    pub fn prepare_arabic(&self, word: &str, diag: &mut Diagnostics) -> Prepared {
        let word = clean_arabic(word, diag);
        let candidates = self.expander.expand(&word, Script::Arabic, diag);
        Prepared { word, candidates }
    }

    /// The hidden sentinel is prepared without candidates.
    pub fn prepare_hebrew(&self, word: &str, diag: &mut Diagnostics) -> Prepared {
        let word = clean_hebrew(word, true, diag);
        let candidates = if word == HIDDEN {
            Vec::new()
        } else {
            self.expander.expand(&word, Script::Hebrew, diag)
        };
        Prepared { word, candidates }
    }

    /// Best-scoring correspondence between two prepared words.
    ///
    /// Candidates expanded from Arabic are merged ahead of those expanded
    /// from Hebrew; the ranking sort is stable, so that order decides ties.
    pub fn best_match(&self, ar: &Prepared, he: &Prepared) -> Option<CandidateWord> {
        if ar.is_void() || he.is_void() {
            return None;
        }

        let mut candidates: Vec<&CandidateWord> = ar
            .candidates
            .iter()
            .filter(|w| w.hebrew() == he.word)
            .chain(he.candidates.iter().filter(|w| w.arabic() == ar.word))
            .collect();

        candidates.sort_by(|a, b| by_score_desc(a, b));
        candidates.first().map(|&w| w.clone())
    }

    /// Returns the best-scoring letter correspondence between `word_ar` and
    /// `word_he`, or `None` if no candidate spelling matches exactly.
    pub fn compare(
        &self,
        word_ar: &str,
        word_he: &str,
        diag: &mut Diagnostics,
    ) -> Option<CandidateWord> {
        let he = self.prepare_hebrew(word_he, diag);
        if he.is_void() {
            return None;
        }
        let ar = self.prepare_arabic(word_ar, diag);
        self.best_match(&ar, &he)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn compare(ar: &str, he: &str) -> Option<CandidateWord> {
        Comparator::default().compare(ar, he, &mut Diagnostics::new())
    }

    #[test]
    fn exact_transliteration_matches() {
        let best = compare("كتب", "כתב").unwrap();
        assert_eq!(best.arabic(), "كتب");
        assert_eq!(best.hebrew(), "כתב");
        assert_eq!(best.source(), Script::Arabic);
        assert_eq!(best.score(), 3.0);
    }

    #[test]
    fn unrelated_words_do_not_match() {
        assert!(compare("كتب", "ספר").is_none());
        assert!(compare("كتب", "כת").is_none());
    }

    #[test]
    fn geresh_prefers_arabic_expansion() {
        // ث -> ת׳ exists only in the Arabic table
        let best = compare("ثم", "ת'ם").unwrap();
        assert_eq!(best.hebrew(), "ת׳ם");
        assert_eq!(best.letter_pairs(), vec![("ث", "ת׳"), ("م", "ם")]);
        assert_eq!(best.score(), 3.0);
    }

    #[test]
    fn hebrew_expansion_finds_matches_the_arabic_table_lacks() {
        // ה -> ا only exists in the Hebrew table
        let best = compare("ما", "מה").unwrap();
        assert_eq!(best.source(), Script::Hebrew);
        assert_eq!(best.letter_pairs(), vec![("م", "מ"), ("ا", "ה")]);
        assert_eq!(best.score(), 1.0);
    }

    #[test]
    fn higher_score_wins_over_deletion() {
        // عما -> עמא (no deletion) beats any path dropping the alef
        let best = compare("عما", "עמא").unwrap();
        assert!(!best.has_empty());
        assert_eq!(best.source(), Script::Arabic);
    }

    #[test]
    fn deletions_match_when_nothing_better_exists() {
        // silent alef: قالوا -> קאלו
        let best = compare("قالوا", "קאלו").unwrap();
        assert!(best.has_empty());
        assert_eq!(best.arabic(), "قالوا");
        assert_eq!(best.hebrew(), "קאלו");
    }

    #[test]
    fn hidden_sentinel_never_matches() {
        assert!(compare("قققققققققق", HIDDEN).is_none());
    }

    #[test]
    fn prepared_words_compare_like_raw_ones() {
        let comparator = Comparator::default();
        let mut diag = Diagnostics::new();
        let ar = comparator.prepare_arabic("كَتَبَ", &mut diag);
        let he = comparator.prepare_hebrew("כתב", &mut diag);
        assert_eq!(ar.word(), "كتب");
        assert_eq!(
            comparator.best_match(&ar, &he),
            comparator.compare("كتب", "כתב", &mut diag)
        );
        assert!(comparator.prepare_hebrew(HIDDEN, &mut diag).is_void());
    }

    #[test]
    fn diacritics_are_cleaned_before_comparing() {
        assert!(compare("كَتَبَ", "כתב").is_some());
    }

    proptest! {
        #[test]
        fn prop_hidden_never_matches(word in "[ابتثجحخدذرزسشصضطظعغفقكلمنهويءةؤئى]{0,6}") {
            prop_assert!(compare(&word, HIDDEN).is_none());
        }

        #[test]
        fn prop_matches_are_exact(
            ar in "[ابتدرسعقكلمنهوي]{1,4}",
            he in "[אבדהוילמנסעקר]{1,4}",
        ) {
            if let Some(best) = compare(&ar, &he) {
                prop_assert_eq!(best.arabic(), ar);
                prop_assert_eq!(best.hebrew(), he);
            }
        }
    }
}
