/*!
 * Tests for language code utilities and language-aware sorting
 */

use anyhow::Result;
use dgproc::language_utils::{
    LanguageCodeType, collation_key, langsort, langsort_by_key,
    language_codes_match, normalize_to_part2t, resolve_language_key, validate_language_code,
};
use crate::common;

/// Test language code validation with valid codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() -> Result<()> {
    assert_eq!(validate_language_code("sr")?, LanguageCodeType::Part1);
    assert_eq!(validate_language_code("srp")?, LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger")?, LanguageCodeType::Part2B);
    assert_eq!(validate_language_code(" EN ")?, LanguageCodeType::Part1);
    Ok(())
}

#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalize_to_part2t_withAllForms_shouldGiveThreeLetterCode() -> Result<()> {
    assert_eq!(normalize_to_part2t("de")?, "deu");
    assert_eq!(normalize_to_part2t("deu")?, "deu");
    assert_eq!(normalize_to_part2t("ger")?, "deu");
    assert!(normalize_to_part2t("zz").is_err());
    Ok(())
}

#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("sr", "srp"));
    assert!(language_codes_match("fre", "fr"));
    assert!(!language_codes_match("sr", "hr"));
    assert!(!language_codes_match("sr", "serbian"));
}

#[test]
fn test_resolve_language_key_withIsoEquivalent_shouldReturnDeclaredKey() -> Result<()> {
    let gloss = common::sample_glossary()?;

    assert_eq!(resolve_language_key(&gloss, "sr"), Some("sr"));
    assert_eq!(resolve_language_key(&gloss, "srp"), Some("sr"));
    assert_eq!(resolve_language_key(&gloss, "eng"), Some("en"));
    assert_eq!(resolve_language_key(&gloss, "de"), None);
    Ok(())
}

#[test]
fn test_langsort_withMixedCase_shouldIgnoreCase() {
    let mut words = vec!["banana", "Apple", "cherry", "apple"];
    langsort(&mut words, "en");
    assert_eq!(words, vec!["Apple", "apple", "banana", "cherry"]);
}

#[test]
fn test_collation_key_withTurkish_shouldKeepDottedAndDotlessApart() {
    assert_eq!(collation_key("IRMAK", "tr"), "ırmak");
    assert_eq!(collation_key("İstanbul", "tr"), "istanbul");
    assert_eq!(collation_key("IRMAK", "en"), "irmak");
}

#[test]
fn test_langsort_by_key_withTuples_shouldSortByExtractedKey() {
    let mut items = vec![("fascikla", 2), ("Datoteka", 1), ("ćelija", 3)];
    langsort_by_key(&mut items, "sr", |x| x.0);
    let keys: Vec<&str> = items.iter().map(|x| x.0).collect();
    assert_eq!(keys, vec!["Datoteka", "fascikla", "ćelija"]);
}
