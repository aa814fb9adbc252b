//! Per-letter transliteration candidates for both directions.
//!
//! Target order matters: it fixes candidate order during expansion, and with
//! it the tie-break among equally scored matches.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::script::Script;

const AR_TO_HE: &[(&str, &[&str])] = &[
    ("ا", &["א", ""]),
    ("ب", &["ב"]),
    ("ت", &["ת"]),
    ("ث", &["ת׳", "ת"]),
    ("ج", &["ג", "ג׳"]),
    ("ح", &["ח"]),
    ("خ", &["ח׳", "כ׳", "ך׳", "כ", "ח"]),
    ("د", &["ד"]),
    ("ذ", &["ד׳", "ד"]),
    ("ر", &["ר"]),
    ("ز", &["ז"]),
    ("س", &["ס"]),
    ("ش", &["ש"]),
    ("ص", &["צ", "ץ"]),
    ("ض", &["צ׳", "ד", "ץ׳"]),
    ("ط", &["ט"]),
    ("ظ", &["ט", "ד", "ז"]),
    ("ع", &["ע"]),
    ("غ", &["ג", "ע"]),
    ("ف", &["פ", "ף"]),
    ("ق", &["ק"]),
    ("ك", &["כ", "ך"]),
    ("ل", &["ל"]),
    ("م", &["מ", "ם"]),
    ("ن", &["נ", "ן"]),
    ("ه", &["ה", ""]),
    ("و", &["ו", ""]),
    ("ي", &["י"]),
    ("ء", &["א", "י", ""]),
    ("ة", &["ה", "ה׳"]),
    ("ؤ", &["ו", ""]),
    ("ئ", &["י", "א", ""]),
    ("ى", &["א", "י", ""]),
];

const HE_TO_AR: &[(&str, &[&str])] = &[
    ("א", &["ا", "ء", "آ", "أ", "إ", "ئ", "ى", "ؤ", "ٱ", "ه", "ة", ""]),
    ("ב", &["ب"]),
    ("ג", &["غ", "ج"]),
    ("ד", &["ظ", "ض", "ذ", "د"]),
    ("ה", &["ه", "ة", "ا"]),
    ("ו", &["ؤ", "و", ""]),
    ("ז", &["ز", "ظ"]),
    ("ח", &["ح", "خ"]),
    ("ט", &["ط", "ظ"]),
    ("י", &["ي", "ى", "ا", ""]),
    ("כ", &["خ", "ك"]),
    ("ל", &["ل"]),
    ("מ", &["م"]),
    ("נ", &["ن"]),
    ("ס", &["س"]),
    ("ע", &["ع", "غ"]),
    ("פ", &["ف"]),
    ("צ", &["ض", "ص"]),
    ("ק", &["ق"]),
    ("ר", &["ر"]),
    ("ש", &["ش"]),
    ("ת", &["ت", "ث"]),
    ("ך", &["خ", "ك"]),
    ("ם", &["م"]),
    ("ן", &["ن"]),
    ("ף", &["ف"]),
    ("ץ", &["ض", "ص"]),
];

/// Hebrew letters written with a geresh. The Arabic readings are those of the
/// bare letter; only the letter weight changes.
const HE_DOTTED: &[&str] = &[
    "א׳", "ב׳", "ג׳", "ד׳", "ה׳", "ו׳", "ז׳", "ח׳", "ט׳", "י׳", "כ׳", "ל׳", "מ׳", "נ׳", "ס׳",
    "ע׳", "פ׳", "צ׳", "ק׳", "ר׳", "ש׳", "ת׳", "ך׳", "ם׳", "ן׳", "ף׳", "ץ׳",
];

/// Source letter (as stored in letter pairs) and its ordered targets.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub source: &'static str,
    pub targets: &'static [&'static str],
}

fn index(rows: &'static [(&'static str, &'static [&'static str])]) -> HashMap<char, Entry> {
    rows.iter()
        .filter_map(|&(source, targets)| {
            source
                .chars()
                .next()
                .map(|c| (c, Entry { source, targets }))
        })
        .collect()
}

lazy_static! {
    static ref AR_TO_HE_MAP: HashMap<char, Entry> = index(AR_TO_HE);
    static ref HE_TO_AR_MAP: HashMap<char, Entry> = index(HE_TO_AR);
    static ref HE_DOTTED_MAP: HashMap<char, &'static str> = HE_DOTTED
        .iter()
        .filter_map(|&g| g.chars().next().map(|c| (c, g)))
        .collect();
}

/// Looks up a letter of `from` in the table that maps it into the other script.
pub fn lookup(from: Script, letter: char) -> Option<Entry> {
    let map = match from {
        Script::Arabic => &*AR_TO_HE_MAP,
        Script::Hebrew => &*HE_TO_AR_MAP,
    };
    map.get(&letter).copied()
}

/// Hebrew letter with a geresh attached, as a single grapheme.
pub fn dotted(letter: char) -> Option<&'static str> {
    HE_DOTTED_MAP.get(&letter).copied()
}
