use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use std::path::Path;

use crate::compare::Comparator;
use crate::config::AlignConfig;
use crate::diagnostics::Diagnostics;
use crate::error::AlignError;
use crate::pipeline::Pipeline;
use crate::script::Script;
use crate::split::TokenKind;
use crate::transliterate::{CandidateWord, Expander};

fn to_py_err(e: AlignError) -> PyErr {
    match e {
        AlignError::Io { .. } => PyIOError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn parse_script(name: &str) -> PyResult<Script> {
    match name {
        "ar" => Ok(Script::Arabic),
        "he" => Ok(Script::Hebrew),
        other => Err(PyValueError::new_err(format!(
            "unknown script '{}', expected 'ar' or 'he'",
            other
        ))),
    }
}

fn parse_kind(name: &str) -> PyResult<TokenKind> {
    match name {
        "text" => Ok(TokenKind::Text),
        "hidden" => Ok(TokenKind::Hidden),
        "punct" => Ok(TokenKind::Punctuation),
        other => Err(PyValueError::new_err(format!(
            "unknown token kind '{}', expected 'text', 'hidden' or 'punct'",
            other
        ))),
    }
}

/// Config from an optional JSON file path; defaults otherwise.
fn pipeline(config_path: Option<String>) -> PyResult<Pipeline> {
    let config = match config_path {
        Some(path) => AlignConfig::load(Path::new(&path)).map_err(to_py_err)?,
        None => AlignConfig::default(),
    };
    Pipeline::new(config).map_err(to_py_err)
}

/// A matched word pair
#[pyclass]
#[derive(Clone)]
struct WordPair {
    #[pyo3(get)]
    ar: String,
    #[pyo3(get)]
    he: String,
    #[pyo3(get)]
    pos_ar: Option<usize>,
    #[pyo3(get)]
    pos_he: Option<usize>,
    #[pyo3(get)]
    score: f64,
    #[pyo3(get)]
    letters: Vec<(String, String)>,
}

impl From<&CandidateWord> for WordPair {
    fn from(word: &CandidateWord) -> Self {
        let pos = word.positions();
        WordPair {
            ar: word.arabic(),
            he: word.hebrew(),
            pos_ar: pos.map(|p| p.ar),
            pos_he: pos.map(|p| p.he),
            score: word.score(),
            letters: word
                .letter_pairs()
                .into_iter()
                .map(|(a, h)| (a.to_string(), h.to_string()))
                .collect(),
        }
    }
}

#[pymethods]
impl WordPair {
    fn __repr__(&self) -> String {
        format!("WordPair({} = {}, score={})", self.ar, self.he, self.score)
    }
}

/// All spellings of `word` in the other script.
/// Returns: list of (arabic, hebrew, score)
#[pyfunction]
fn transliterate(word: String, script: &str) -> PyResult<Vec<(String, String, f64)>> {
    let from = parse_script(script)?;
    let mut diag = Diagnostics::new();
    Ok(Expander::default()
        .expand(&word, from, &mut diag)
        .iter()
        .map(|w| (w.arabic(), w.hebrew(), w.score()))
        .collect())
}

/// Best transliteration pair for two raw words, or None
#[pyfunction]
fn compare_words(word_ar: String, word_he: String) -> Option<WordPair> {
    let mut diag = Diagnostics::new();
    Comparator::default()
        .compare(&word_ar, &word_he, &mut diag)
        .as_ref()
        .map(WordPair::from)
}

/// Align two word lists (anchors, segments, windowed alignment)
#[pyfunction]
#[pyo3(signature = (words_ar, words_he, config_path=None))]
fn align_words(
    words_ar: Vec<String>,
    words_he: Vec<String>,
    config_path: Option<String>,
) -> PyResult<Vec<WordPair>> {
    let alignment = pipeline(config_path)?
        .run(&words_ar, &words_he)
        .map_err(to_py_err)?;
    Ok(alignment.words.iter().map(WordPair::from).collect())
}

/// Segments between unique anchors
/// Returns: list of ((ar_start, ar_end), (he_start, he_end))
#[pyfunction]
#[pyo3(signature = (words_ar, words_he, config_path=None))]
fn find_segments(
    words_ar: Vec<String>,
    words_he: Vec<String>,
    config_path: Option<String>,
) -> PyResult<Vec<((usize, usize), (usize, usize))>> {
    let alignment = pipeline(config_path)?
        .run(&words_ar, &words_he)
        .map_err(to_py_err)?;
    Ok(alignment
        .segments
        .iter()
        .map(|s| ((s.ar.start, s.ar.end), (s.he.start, s.he.end)))
        .collect())
}

/// Split raw Arabic text and tagged Hebrew tokens, then align them.
/// Tokens are (text, kind) with kind one of 'text', 'hidden', 'punct'.
/// Returns: (arabic words, hebrew words, pairs)
#[pyfunction]
#[pyo3(signature = (text_ar, tokens_he, config_path=None))]
fn align_texts(
    text_ar: String,
    tokens_he: Vec<(String, String)>,
    config_path: Option<String>,
) -> PyResult<(Vec<String>, Vec<String>, Vec<WordPair>)> {
    let tokens = tokens_he
        .into_iter()
        .map(|(text, kind)| Ok((text, parse_kind(&kind)?)))
        .collect::<PyResult<Vec<_>>>()?;
    let doc = pipeline(config_path)?
        .run_texts(&text_ar, &tokens)
        .map_err(to_py_err)?;
    let pairs = doc.alignment.words.iter().map(WordPair::from).collect();
    Ok((doc.words_ar, doc.words_he, pairs))
}

#[pymodule]
fn ja_align(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transliterate, m)?)?;
    m.add_function(wrap_pyfunction!(compare_words, m)?)?;
    m.add_function(wrap_pyfunction!(align_words, m)?)?;
    m.add_function(wrap_pyfunction!(find_segments, m)?)?;
    m.add_function(wrap_pyfunction!(align_texts, m)?)?;
    m.add_class::<WordPair>()?;
    Ok(())
}
