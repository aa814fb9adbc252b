//! Word-level alignment of Arabic text with its Judeo-Arabic transcription.
//!
//! Words are matched through transliteration: each word is expanded into
//! every spelling the letter tables allow in the other script, and two words
//! match when one of those spellings is exactly the other word. Long
//! documents are first cut into segments at unique anchor words, then each
//! segment is aligned with a greedy windowed scan.

pub mod align;
pub mod anchor;
pub mod clean;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod script;
pub mod split;
pub mod table;
pub mod transliterate;

#[cfg(feature = "python")]
mod python;

pub use align::WindowedAligner;
pub use anchor::{Anchor, AnchorFinder, Segment};
pub use compare::Comparator;
pub use config::{AlignConfig, MonotonicityPolicy};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::AlignError;
pub use pipeline::{Alignment, DocumentAlignment, Pipeline};
pub use script::{APOSTROPHE, HIDDEN, Letter, LetterPair, Script};
pub use split::TokenKind;
pub use transliterate::{CandidateWord, Expander, Positions};
