/*!
 * Integration tests for the terminology rules view
 */

use std::path::Path;

use anyhow::Result;
use dgproc::view::{View, plrules::PlRules};
use crate::common;

fn rules_view(file: &Path) -> PlRules {
    PlRules {
        olang: "en".to_string(),
        tlang: "sr".to_string(),
        file: file.to_path_buf(),
        env: None,
    }
}

const CREATED: &str = "# Terminology rules, en to sr, updated from the glossary.

# @gloss-new
{\\bfile}i
id=\"file\"
hint=\"file = datoteka\"
valid msgstr=\"\\bdatoteka\"
disabled=\"1\"

# @gloss-new
{\\b(directory|folder)}i
id=\"folder\"
hint=\"directory|folder = fascikla\"
valid msgstr=\"\\bfascikla\"
disabled=\"1\"

";

#[test]
fn test_render_withoutExistingFile_shouldCreateDisabledSkeletons() -> Result<()> {
    common::init_test_logging();
    let gloss = common::sample_glossary()?;

    let content = rules_view(Path::new("term.rules")).render(&gloss, None)?;

    assert_eq!(content, CREATED);
    Ok(())
}

#[test]
fn test_render_withUnchangedFile_shouldBeStable() -> Result<()> {
    let gloss = common::sample_glossary()?;

    let content = rules_view(Path::new("term.rules")).render(&gloss, Some(CREATED))?;

    assert_eq!(content, CREATED);
    Ok(())
}

#[test]
fn test_render_withChangedAndRemovedConcepts_shouldFlagThem() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let existing = "# Team rules

{\\bfile}i
id=\"file\"
hint=\"file = fajl [not dat]\"
valid msgstr=\"\\bfajl\"

{\\bgone}i
id=\"gone\"
hint=\"gone = nestao\"

# end of rules
";

    let content = rules_view(Path::new("term.rules")).render(&gloss, Some(existing))?;

    assert_eq!(
        content,
        "# Team rules

# @gloss-fuzzy [file = datoteka]
{\\bfile}i
id=\"file\"
hint=\"file = fajl [not dat]\"
valid msgstr=\"\\bfajl\"

# @gloss-new
{\\b(directory|folder)}i
id=\"folder\"
hint=\"directory|folder = fascikla\"
valid msgstr=\"\\bfascikla\"
disabled=\"1\"

# @gloss-obsolete
{\\bgone}i
id=\"gone\"
hint=\"gone = nestao\"

# end of rules
"
    );
    Ok(())
}

#[test]
fn test_render_withResolvedFuzzyRule_shouldClearFlag() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let existing = "# Rules

# @gloss-fuzzy [file = datoteka]
{\\bfile}i
id=\"file\"
hint=\"file = datoteka\"
valid msgstr=\"\\bdatoteka\"

";

    let content = rules_view(Path::new("term.rules")).render(&gloss, Some(existing))?;

    assert!(content.starts_with("# Rules\n\n{\\bfile}i\nid=\"file\"\n"));
    assert!(!content.contains("@gloss-fuzzy"));
    Ok(())
}

#[test]
fn test_render_withUnknownTargetLanguage_shouldFail() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let mut view = rules_view(Path::new("term.rules"));
    view.tlang = "de".to_string();

    let err = view.render(&gloss, None).unwrap_err();
    assert_eq!(err.to_string(), "target language 'de' not present in the glossary");
    Ok(())
}

#[test]
fn test_process_withMissingThenExistingFile_shouldCreateThenUpdate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let gloss = common::sample_glossary()?;
    let path = temp_dir.path().join("term.rules");
    let view = rules_view(&path);

    view.process(&gloss)?;
    assert_eq!(std::fs::read_to_string(&path)?, CREATED);

    // A manual enable survives the update
    let edited = std::fs::read_to_string(&path)?.replacen("disabled=\"1\"\n", "", 1);
    std::fs::write(&path, &edited)?;
    view.process(&gloss)?;
    assert_eq!(std::fs::read_to_string(&path)?, edited);
    Ok(())
}
