//! Views over an alignment: gap reconciliation, lossy matches, letter
//! statistics and training-example export.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::AlignError;
use crate::transliterate::CandidateWord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapRow {
    Pair { ar: String, he: String },
    ArabicOnly(String),
    HebrewOnly(String),
}

/// Interleaves matched pairs with the words the aligner left unmatched on
/// either side, trailing words included.
pub fn gap_rows<A, H>(words: &[CandidateWord], seq_ar: &[A], seq_he: &[H]) -> Vec<GapRow>
where
    A: AsRef<str>,
    H: AsRef<str>,
{
    let mut rows = Vec::new();
    let (mut next_ar, mut next_he) = (0, 0);
    for word in words {
        let Some(pos) = word.positions() else {
            continue;
        };
        rows.extend(
            seq_ar[next_ar..pos.ar]
                .iter()
                .map(|w| GapRow::ArabicOnly(w.as_ref().to_string())),
        );
        rows.extend(
            seq_he[next_he..pos.he]
                .iter()
                .map(|w| GapRow::HebrewOnly(w.as_ref().to_string())),
        );
        rows.push(GapRow::Pair {
            ar: word.arabic(),
            he: word.hebrew(),
        });
        next_ar = pos.ar + 1;
        next_he = pos.he + 1;
    }
    rows.extend(
        seq_ar[next_ar.min(seq_ar.len())..]
            .iter()
            .map(|w| GapRow::ArabicOnly(w.as_ref().to_string())),
    );
    rows.extend(
        seq_he[next_he.min(seq_he.len())..]
            .iter()
            .map(|w| GapRow::HebrewOnly(w.as_ref().to_string())),
    );
    rows
}

/// Plain-text table with columns `pair`, `ar`, `he`.
pub fn render_table(rows: &[GapRow]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| match row {
            GapRow::Pair { ar, he } => [format!("{ar} = {he}"), String::new(), String::new()],
            GapRow::ArabicOnly(w) => [String::new(), w.clone(), String::new()],
            GapRow::HebrewOnly(w) => [String::new(), String::new(), w.clone()],
        })
        .collect();

    let header = ["pair", "ar", "he"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |cols: [&str; 3]| {
        let padded: Vec<String> = cols
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c}{}", " ".repeat(w - c.chars().count())))
            .collect();
        let _ = writeln!(out, "| {} |", padded.join(" | ").trim_end());
    };
    line(header);
    for row in &cells {
        line([row[0].as_str(), row[1].as_str(), row[2].as_str()]);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    /// A Hebrew letter with no Arabic counterpart.
    Insertion,
    /// An Arabic letter with no Hebrew counterpart.
    Deletion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LossyWord {
    pub ar: String,
    pub he: String,
    pub loss: Loss,
}

/// Matches that needed an insertion or deletion, classified by the first
/// empty letter in the word.
pub fn lossy_words(words: &[CandidateWord]) -> Vec<LossyWord> {
    words
        .iter()
        .filter_map(|word| {
            let loss = word.pairs().iter().find_map(|p| {
                if p.ar.is_empty() {
                    Some(Loss::Insertion)
                } else if p.he.is_empty() {
                    Some(Loss::Deletion)
                } else {
                    None
                }
            })?;
            Some(LossyWord {
                ar: word.arabic(),
                he: word.hebrew(),
                loss,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterFrequency {
    pub letter: String,
    pub count: usize,
    pub frequency: f64,
    /// Inverse frequency, normalized to sum to one across letters.
    pub inverse: f64,
}

/// Arabic letter statistics over matched words, most frequent first.
pub fn letter_frequencies(words: &[CandidateWord]) -> Vec<LetterFrequency> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for word in words {
        for pair in word.pairs() {
            if !pair.ar.is_empty() {
                *counts.entry(pair.ar.grapheme).or_insert(0) += 1;
            }
        }
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let inverse_sum: f64 = counts.values().map(|&c| total as f64 / c as f64).sum();

    let mut stats: Vec<LetterFrequency> = counts
        .into_iter()
        .map(|(letter, count)| LetterFrequency {
            letter: letter.to_string(),
            count,
            frequency: count as f64 / total as f64,
            inverse: (total as f64 / count as f64) / inverse_sum,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.letter.cmp(&b.letter)));
    stats
}

/// One matched word as letter-to-letter tagging data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingExample {
    pub ar: String,
    pub he: String,
    pub pos_ar: Option<usize>,
    pub pos_he: Option<usize>,
    pub letters: Vec<(String, String)>,
}

impl From<&CandidateWord> for TrainingExample {
    fn from(word: &CandidateWord) -> Self {
        let pos = word.positions();
        Self {
            ar: word.arabic(),
            he: word.hebrew(),
            pos_ar: pos.map(|p| p.ar),
            pos_he: pos.map(|p| p.he),
            letters: word
                .letter_pairs()
                .into_iter()
                .map(|(a, h)| (a.to_string(), h.to_string()))
                .collect(),
        }
    }
}

/// One JSON object per matched word, newline separated.
pub fn to_jsonl(words: &[CandidateWord]) -> Result<String, AlignError> {
    let mut out = String::new();
    for word in words {
        let line = serde_json::to_string(&TrainingExample::from(word))
            .map_err(|e| AlignError::json("serialize training example", e))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
