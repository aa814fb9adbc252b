//! Structured record of recoverable events.
//!
//! Nothing in the aligner fails on ordinary data sparsity: unknown letters,
//! skipped windows and rejected anchors are collected here so callers (and
//! tests) can inspect them. Each event is also forwarded to `tracing`.

use serde::Serialize;

use crate::script::Script;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A character has no entry in the transliteration table; its position was dropped.
    UnknownLetter {
        word: String,
        letter: char,
        script: Script,
    },
    /// Cleaning removed characters outside the script's letter set.
    IllegalCharacters {
        word: String,
        removed: Vec<char>,
        script: Script,
    },
    /// The candidate cross product would exceed the configured cap; nothing was expanded.
    ExpansionCapped {
        word: String,
        script: Script,
        candidates: usize,
        limit: usize,
    },
    /// The aligner found no pair inside its window and advanced both cursors.
    AlignmentSkip { pos_ar: usize, pos_he: usize },
    /// Local-context check of one anchor occurrence.
    AnchorProbe {
        word: String,
        pos_ar: usize,
        pos_he: usize,
        matched: usize,
        window_ar: usize,
        window_he: usize,
        accepted: bool,
    },
    /// A rare word survived with more than one plausible Hebrew position.
    AmbiguousAnchor { word: String, occurrences: usize },
    /// An anchor removed to restore increasing Hebrew positions.
    AnchorDropped {
        word: String,
        pos_ar: usize,
        pos_he: usize,
    },
}

impl Diagnostic {
    /// Rewrites the sequence positions carried by the event. Events without
    /// positions are returned unchanged.
    pub fn map_positions(
        self,
        ar: impl Fn(usize) -> usize,
        he: impl Fn(usize) -> usize,
    ) -> Self {
        match self {
            Diagnostic::AlignmentSkip { pos_ar, pos_he } => Diagnostic::AlignmentSkip {
                pos_ar: ar(pos_ar),
                pos_he: he(pos_he),
            },
            Diagnostic::AnchorProbe {
                word,
                pos_ar,
                pos_he,
                matched,
                window_ar,
                window_he,
                accepted,
            } => Diagnostic::AnchorProbe {
                word,
                pos_ar: ar(pos_ar),
                pos_he: he(pos_he),
                matched,
                window_ar,
                window_he,
                accepted,
            },
            Diagnostic::AnchorDropped {
                word,
                pos_ar,
                pos_he,
            } => Diagnostic::AnchorDropped {
                word,
                pos_ar: ar(pos_ar),
                pos_he: he(pos_he),
            },
            other => other,
        }
    }

    fn trace(&self) {
        match self {
            Diagnostic::UnknownLetter {
                word,
                letter,
                script,
            } => tracing::debug!(
                word = word.as_str(),
                letter = %letter,
                script = script.as_str(),
                "transliterate: unknown letter dropped"
            ),
            Diagnostic::IllegalCharacters {
                word,
                removed,
                script,
            } => tracing::debug!(
                word = word.as_str(),
                removed = ?removed,
                script = script.as_str(),
                "clean: illegal characters removed"
            ),
            Diagnostic::ExpansionCapped {
                word,
                candidates,
                limit,
                ..
            } => tracing::warn!(
                word = word.as_str(),
                candidates,
                limit,
                "transliterate: expansion exceeds cap"
            ),
            Diagnostic::AlignmentSkip { pos_ar, pos_he } => tracing::warn!(
                pos_ar,
                pos_he,
                "align: no pair in window, skipping one word on each side"
            ),
            Diagnostic::AnchorProbe {
                word,
                pos_ar,
                pos_he,
                matched,
                accepted,
                ..
            } => tracing::debug!(
                word = word.as_str(),
                pos_ar,
                pos_he,
                matched,
                accepted,
                "anchor: local window probe"
            ),
            Diagnostic::AmbiguousAnchor { word, occurrences } => tracing::debug!(
                word = word.as_str(),
                occurrences,
                "anchor: ambiguous rare word discarded"
            ),
            Diagnostic::AnchorDropped {
                word,
                pos_ar,
                pos_he,
            } => tracing::warn!(
                word = word.as_str(),
                pos_ar,
                pos_he,
                "anchor: dropped out-of-order anchor"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
    /// Collect without emitting; events are traced when merged into a
    /// sink that emits.
    #[serde(skip)]
    silent: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink for intermediate results whose positions are not final yet.
    pub fn silent() -> Self {
        Self {
            events: Vec::new(),
            silent: true,
        }
    }

    pub fn record(&mut self, event: Diagnostic) {
        if !self.silent {
            event.trace();
        }
        self.events.push(event);
    }

    /// Appends another sink's events, preserving their order.
    pub fn extend(&mut self, other: Diagnostics) {
        if other.silent && !self.silent {
            other.events.iter().for_each(Diagnostic::trace);
        }
        self.events.extend(other.events);
    }

    /// Appends another sink's events with their positions rewritten.
    pub fn extend_mapped(
        &mut self,
        other: Diagnostics,
        ar: impl Fn(usize) -> usize,
        he: impl Fn(usize) -> usize,
    ) {
        for event in other.events {
            self.record(event.map_positions(&ar, &he));
        }
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn skips(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Diagnostic::AlignmentSkip { .. }))
            .count()
    }

    pub fn unknown_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.events.iter().filter_map(|e| match e {
            Diagnostic::UnknownLetter { letter, .. } => Some(*letter),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_skips_only() {
        let mut diag = Diagnostics::new();
        diag.record(Diagnostic::AlignmentSkip {
            pos_ar: 0,
            pos_he: 0,
        });
        diag.record(Diagnostic::UnknownLetter {
            word: "xب".to_string(),
            letter: 'x',
            script: Script::Arabic,
        });
        diag.record(Diagnostic::AlignmentSkip {
            pos_ar: 3,
            pos_he: 4,
        });
        assert_eq!(diag.len(), 3);
        assert_eq!(diag.skips(), 2);
        assert_eq!(diag.unknown_letters().collect::<Vec<_>>(), vec!['x']);
    }

    #[test]
    fn extend_keeps_order() {
        let mut first = Diagnostics::new();
        first.record(Diagnostic::AlignmentSkip {
            pos_ar: 1,
            pos_he: 1,
        });
        let mut second = Diagnostics::new();
        second.record(Diagnostic::AmbiguousAnchor {
            word: "كتاب".to_string(),
            occurrences: 2,
        });
        first.extend(second);
        assert!(matches!(first.events()[0], Diagnostic::AlignmentSkip { .. }));
        assert!(matches!(
            first.events()[1],
            Diagnostic::AmbiguousAnchor { occurrences: 2, .. }
        ));
    }

    #[test]
    fn mapped_events_get_document_positions() {
        let mut local = Diagnostics::silent();
        local.record(Diagnostic::AlignmentSkip {
            pos_ar: 1,
            pos_he: 2,
        });
        local.record(Diagnostic::AmbiguousAnchor {
            word: "كتاب".to_string(),
            occurrences: 3,
        });
        let mut doc = Diagnostics::new();
        doc.extend_mapped(local, |a| a + 10, |h| h * 2);
        assert_eq!(
            doc.events(),
            &[
                Diagnostic::AlignmentSkip {
                    pos_ar: 11,
                    pos_he: 4,
                },
                Diagnostic::AmbiguousAnchor {
                    word: "كتاب".to_string(),
                    occurrences: 3,
                },
            ]
        );
    }

    #[test]
    fn silent_sink_still_collects() {
        let mut diag = Diagnostics::silent();
        diag.record(Diagnostic::AlignmentSkip {
            pos_ar: 0,
            pos_he: 0,
        });
        assert_eq!(diag.skips(), 1);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let mut diag = Diagnostics::new();
        diag.record(Diagnostic::AlignmentSkip {
            pos_ar: 2,
            pos_he: 5,
        });
        let json = serde_json::to_string(diag.events()).unwrap();
        assert_eq!(json, r#"[{"kind":"alignment_skip","pos_ar":2,"pos_he":5}]"#);
    }
}
