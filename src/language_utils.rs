use std::cmp::Ordering;

use anyhow::{Result, anyhow};
use isolang::Language;

use crate::glossary::Glossary;

/// Language utilities for glossary language keys
///
/// Glossary language keys are usually ISO 639-1 (2-letter) or ISO 639-2
/// (3-letter) codes. Keys which are not are still usable, but get no
/// language-aware treatment.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// ISO 639-2/B codes differing from their ISO 639-2/T counterparts
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if part2b_to_part2t(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = part2b_to_part2t(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(n1), Ok(n2)) => n1 == n2,
        _ => false,
    }
}

/// Resolve a requested language key against the languages of a glossary.
///
/// An exact key match wins; otherwise a declared key denoting the same
/// ISO language is accepted (e.g. `sr` for `srp`).
pub fn resolve_language_key<'a>(gloss: &'a Glossary, requested: &str) -> Option<&'a str> {
    if let Some((key, _)) = gloss.languages.get_key_value(requested) {
        return Some(key.as_str());
    }
    gloss
        .languages
        .keys()
        .find(|key| language_codes_match(key, requested))
        .map(String::as_str)
}

/// Collation key of a string in the given language
pub fn collation_key(text: &str, lang: &str) -> String {
    let turkic = matches!(
        normalize_to_part2t(lang).as_deref(),
        Ok("tur") | Ok("aze") | Ok("crh") | Ok("tat")
    );
    if turkic {
        text.chars()
            .map(|c| match c {
                'I' => "ı".to_string(),
                'İ' => "i".to_string(),
                _ => c.to_lowercase().collect(),
            })
            .collect()
    } else {
        text.to_lowercase()
    }
}

/// Compare strings by their collation key in a language, then by themselves
pub fn lang_cmp(a: &str, b: &str, lang: &str) -> Ordering {
    collation_key(a, lang)
        .cmp(&collation_key(b, lang))
        .then_with(|| a.cmp(b))
}

/// Sort strings in place by the ordering of the given language
pub fn langsort<S: AsRef<str>>(items: &mut [S], lang: &str) {
    items.sort_by(|a, b| lang_cmp(a.as_ref(), b.as_ref(), lang));
}

/// Sort items in place by a string key, in the ordering of the given language
pub fn langsort_by_key<T, F>(items: &mut [T], lang: &str, key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| lang_cmp(key(a), key(b), lang));
}
