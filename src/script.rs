//! The two scripts, their letters and per-letter weights.

use serde::{Deserialize, Serialize};

/// Hebrew geresh; marks a dotted letter (ת׳ for ث, ג׳ for ج, ...).
pub const APOSTROPHE: char = '׳';

/// Placeholder for a Hebrew-side word that is known to be untranscribable.
pub const HIDDEN: &str = "קקקקקקקקקק";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Arabic,
    /// Judeo-Arabic, i.e. Arabic written in Hebrew letters.
    Hebrew,
}

impl Script {
    pub fn other(self) -> Self {
        match self {
            Script::Arabic => Script::Hebrew,
            Script::Hebrew => Script::Arabic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Script::Arabic => "ar",
            Script::Hebrew => "he",
        }
    }

    /// Confidence in candidates expanded from this script. The Arabic table
    /// is the more reliable one, so Hebrew-side expansions weigh half.
    pub fn direction_factor(self) -> f64 {
        match self {
            Script::Arabic => 1.0,
            Script::Hebrew => 0.5,
        }
    }
}

/// A single grapheme of one script. Empty means inserted/deleted position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub script: Script,
    pub grapheme: &'static str,
}

impl Letter {
    pub fn new(script: Script, grapheme: &'static str) -> Self {
        Self { script, grapheme }
    }

    pub fn is_empty(&self) -> bool {
        self.grapheme.is_empty()
    }

    pub fn has_apostrophe(&self) -> bool {
        let mut chars = self.grapheme.chars();
        matches!((chars.next(), chars.next(), chars.next()), (Some(_), Some(APOSTROPHE), None))
    }

    /// Empty letters are penalized, not forbidden. A Hebrew letter carrying a
    /// geresh is strong evidence and scores double.
    pub fn weight(&self) -> f64 {
        match self.script {
            Script::Arabic if self.is_empty() => 0.01,
            Script::Arabic => 1.0,
            Script::Hebrew if self.is_empty() => 0.1,
            Script::Hebrew if self.has_apostrophe() => 2.0,
            Script::Hebrew => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterPair {
    pub ar: Letter,
    pub he: Letter,
}

impl LetterPair {
    pub fn new(ar: &'static str, he: &'static str) -> Self {
        debug_assert!(
            !(ar.is_empty() && he.is_empty()),
            "letter pair with both sides empty"
        );
        Self {
            ar: Letter::new(Script::Arabic, ar),
            he: Letter::new(Script::Hebrew, he),
        }
    }

    pub fn get(&self, script: Script) -> &'static str {
        match script {
            Script::Arabic => self.ar.grapheme,
            Script::Hebrew => self.he.grapheme,
        }
    }

    pub fn has_empty(&self) -> bool {
        self.ar.is_empty() || self.he.is_empty()
    }

    pub fn score(&self) -> f64 {
        self.ar.weight() * self.he.weight()
    }
}
