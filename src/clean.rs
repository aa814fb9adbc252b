//! Script-specific word normalization.

use std::collections::HashSet;

use lazy_static::lazy_static;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::script::{APOSTROPHE, Script};

pub(crate) const ARABIC_LETTERS: &str = "ابتثجحخدذرزسشصضطظعغفقكلمنهويءةؤئى";
pub(crate) const HEBREW_LETTERS: &str = "אבגדהוזחטיכלמנסעפצקרשתךםןףץ";

/// Hebrew rafe; written over ה it marks ة, same as a geresh.
const RAFE: char = '\u{05BF}';

lazy_static! {
    static ref ARABIC_SET: HashSet<char> = ARABIC_LETTERS.chars().collect();
    static ref HEBREW_SET: HashSet<char> = HEBREW_LETTERS.chars().collect();
}

pub(crate) fn is_arabic_letter(c: char) -> bool {
    ARABIC_SET.contains(&c)
}

pub(crate) fn is_hebrew_letter(c: char) -> bool {
    HEBREW_SET.contains(&c)
}

/// Alef with madda or hamza folds to bare alef.
pub(crate) fn fold_alef(c: char) -> char {
    match c {
        'آ' | 'أ' | 'إ' => 'ا',
        other => other,
    }
}

/// Strips harakat, folds alef variants and drops anything outside the
/// Arabic letter set (reported).
pub fn clean_arabic(word: &str, diag: &mut Diagnostics) -> String {
    let folded: String = word
        .nfc()
        .map(fold_alef)
        .filter(|&c| !is_combining_mark(c))
        .collect();
    retain_letters(word, folded, Script::Arabic, is_arabic_letter, diag)
}

/// Normalizes apostrophes to geresh, optionally drops them, and removes
/// anything outside the Hebrew letter set (reported).
pub fn clean_hebrew(word: &str, keep_apostrophe: bool, diag: &mut Diagnostics) -> String {
    let mut normalized = String::with_capacity(word.len());
    let mut chars = word.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => normalized.push(APOSTROPHE),
            'ה' if chars.peek() == Some(&RAFE) => {
                chars.next();
                normalized.push('ה');
                normalized.push(APOSTROPHE);
            }
            other => normalized.push(other),
        }
    }
    if !keep_apostrophe {
        normalized.retain(|c| c != APOSTROPHE);
    }
    retain_letters(
        word,
        normalized,
        Script::Hebrew,
        |c| is_hebrew_letter(c) || (keep_apostrophe && c == APOSTROPHE),
        diag,
    )
}

fn retain_letters(
    original: &str,
    mut word: String,
    script: Script,
    legal: impl Fn(char) -> bool,
    diag: &mut Diagnostics,
) -> String {
    let removed: Vec<char> = word.chars().filter(|&c| !legal(c)).collect();
    if !removed.is_empty() {
        diag.record(Diagnostic::IllegalCharacters {
            word: original.to_string(),
            removed,
            script,
        });
        word.retain(|c| legal(c));
    }
    word
}
