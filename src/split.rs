//! Turning raw document text into word sequences.

use lazy_static::lazy_static;
use regex::Regex;

use crate::clean::{clean_hebrew, fold_alef, is_arabic_letter, is_hebrew_letter};
use crate::diagnostics::Diagnostics;
use crate::script::HIDDEN;

const PUNCTUATION: &str = ".,:;";

lazy_static! {
    // Letter runs, or a single punctuation mark
    static ref ARABIC_TOKEN: Regex =
        Regex::new(r"([ءآأؤإئابةتثجحخدذرزسشصضطظعغفقكلمنهوىي]+)|([.,:;])").unwrap();
}

/// Classification of a Hebrew-script token by the upstream language tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Judeo-Arabic text, expected to have an Arabic counterpart.
    Text,
    /// Hebrew or Aramaic; has no counterpart and becomes the hidden sentinel.
    Hidden,
    Punctuation,
}

/// Splits Arabic text into words. Anything that is not an Arabic letter,
/// whitespace or punctuation is discarded first, diacritics included.
pub fn split_arabic(text: &str, keep_punctuation: bool) -> Vec<String> {
    let filtered: String = text
        .chars()
        .filter(|&c| {
            is_arabic_letter(fold_alef(c)) || c.is_whitespace() || PUNCTUATION.contains(c)
        })
        .map(fold_alef)
        .collect();

    ARABIC_TOKEN
        .captures_iter(&filtered)
        .filter_map(|caps| {
            if let Some(word) = caps.get(1) {
                Some(word.as_str().to_string())
            } else if keep_punctuation {
                caps.get(2).map(|p| p.as_str().to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Builds the Hebrew-side word sequence from tagged tokens.
///
/// Tokens without any Hebrew letter are dropped, trailing punctuation is
/// split into its own token, and hidden tokens become [`HIDDEN`].
pub fn split_hebrew(
    tokens: &[(String, TokenKind)],
    keep_punctuation: bool,
    diag: &mut Diagnostics,
) -> Vec<String> {
    let mut words = Vec::with_capacity(tokens.len());
    for (token, kind) in tokens {
        if !token.chars().any(is_hebrew_letter) {
            continue;
        }
        let (body, trailing) = match token.chars().last() {
            Some(last) if PUNCTUATION.contains(last) => {
                (&token[..token.len() - last.len_utf8()], Some(last))
            }
            _ => (token.as_str(), None),
        };

        match kind {
            TokenKind::Text => words.push(clean_hebrew(body, true, diag)),
            TokenKind::Hidden => words.push(HIDDEN.to_string()),
            TokenKind::Punctuation if keep_punctuation => words.push(body.to_string()),
            TokenKind::Punctuation => {}
        }
        if let (Some(mark), true) = (trailing, keep_punctuation) {
            words.push(mark.to_string());
        }
    }
    words
}
