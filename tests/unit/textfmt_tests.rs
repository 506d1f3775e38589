/*!
 * Tests for plain text and HTML formatting of glossary text
 */

use std::collections::HashMap;

use anyhow::Result;
use dgproc::glossary::{Markup, Segment, Text};
use dgproc::textfmt::{LineAccumulator, TextFormatterHtml, TextFormatterPlain, fill_paragraphs};
use crate::common;

fn plain(s: &str) -> Segment {
    Segment::Plain(s.to_string())
}

fn ol(lang: Option<&str>, s: &str) -> Segment {
    Segment::Markup(Markup::Ol {
        lang: lang.map(str::to_string),
        text: Text::from(s),
    })
}

#[test]
fn test_plain_format_withReferenceAndEmphasis_shouldUseTypographicMarks() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterPlain::new(&gloss, None, None);

    let folder = gloss.concepts["folder"].desc.first(None, None).unwrap();
    assert_eq!(tf.format(&folder.text), "A container of files°.");

    let tag = gloss.concepts["tag"].desc.first(None, None).unwrap();
    assert_eq!(tf.format(&tag.text), "A short *marker*.");
    Ok(())
}

#[test]
fn test_plain_format_withForeignText_shouldPrefixLanguageShortName() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterPlain::new(&gloss, Some("en"), None);

    let text = Text(vec![plain("see "), ol(Some("sr"), "datoteka")]);
    assert_eq!(tf.format(&text), "see (sr /datoteka/)");

    let text = Text(vec![plain("see "), ol(None, "Datei")]);
    assert_eq!(tf.format(&text), "see (/Datei/)");
    Ok(())
}

#[test]
fn test_plain_format_withParagraphs_shouldSeparateByBlankLine() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterPlain::new(&gloss, None, None).indent("  ");

    let text = Text(vec![
        Segment::Markup(Markup::Para(Text::from("one   first"))),
        Segment::Markup(Markup::Para(Text::from("two\nsecond"))),
    ]);
    assert_eq!(tf.format(&text), "  one first\n\n  two second");
    Ok(())
}

#[test]
fn test_plain_format_with_withPrefixAndWrapping_shouldWrapPrefixedText() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterPlain::new(&gloss, None, None).indent("  ").wrap(12);

    let out = tf.format_with(&Text::from("alpha beta gamma"), Some("1. "), None);
    assert_eq!(out, "  1. alpha\n  beta gamma");
    Ok(())
}

#[test]
fn test_plain_format_withPrefix_shouldPrependUnlessOverridden() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterPlain::new(&gloss, None, None).prefix("- ").suffix(";");

    assert_eq!(tf.format(&Text::from("first item")), "- first item;");
    assert_eq!(tf.format_with(&Text::from("first item"), Some("2. "), Some("")), "2. first item");
    Ok(())
}

#[test]
fn test_plain_format_withFirstIndent_shouldIndentFirstLineDifferently() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterPlain::new(&gloss, None, None)
        .first_indent("* ")
        .indent("  ")
        .suffix(".")
        .wrap(10);

    assert_eq!(tf.format(&Text::from("one two three")), "* one two\n  three.");
    Ok(())
}

#[test]
fn test_html_format_withReferenceInRefbase_shouldLinkToAnchor() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let refbase = HashMap::from([("file".to_string(), "dict.html".to_string())]);
    let tf = TextFormatterHtml::new(&gloss, Some("sr"), None)
        .refbase(refbase)
        .wtag("p");

    let desc = gloss.concepts["folder"].desc.first(Some("sr"), None).unwrap();
    assert_eq!(
        tf.format(&desc.text, Some("bd-desc")),
        "<p class=\"bd-desc\">Sadrži <a href=\"dict.html#file\">datoteke</a>.</p>"
    );
    Ok(())
}

#[test]
fn test_html_format_withoutRefbase_shouldLeavePlainText() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterHtml::new(&gloss, Some("sr"), None);

    let desc = gloss.concepts["folder"].desc.first(Some("sr"), None).unwrap();
    assert_eq!(tf.format(&desc.text, None), "Sadrži datoteke.");
    Ok(())
}

#[test]
fn test_html_format_withMarkupAndSpecialCharacters_shouldEscapeAndTag() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterHtml::new(&gloss, Some("en"), None);

    let text = Text(vec![
        plain("a < b & "),
        Segment::Markup(Markup::Em(Text::from("c"))),
        plain(" "),
        ol(Some("sr"), "datoteka"),
    ]);
    assert_eq!(
        tf.format(&text, None),
        "a &lt; b &amp; <em>c</em> (sr <span class=\"ol\">datoteka</span>)"
    );
    Ok(())
}

#[test]
fn test_html_format_withParagraphs_shouldWrapEachParagraph() -> Result<()> {
    let gloss = common::sample_glossary()?;
    let tf = TextFormatterHtml::new(&gloss, None, None).wtag("p");

    let text = Text(vec![
        Segment::Markup(Markup::Para(Text::from("one"))),
        Segment::Markup(Markup::Para(Text::from("two"))),
    ]);
    assert_eq!(tf.format(&text, None), "<p>one</p>\n<p>two</p>");
    Ok(())
}

#[test]
fn test_fill_paragraphs_withWrapping_shouldWrapEachParagraph() {
    let out = fill_paragraphs("aaa bbb ccc\n\nddd", 9, "  ");
    assert_eq!(out, "  aaa bbb\n  ccc\n\n  ddd");
}

#[test]
fn test_line_accumulator_withFileRoundTrip_shouldKeepLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("lines.txt");

    let mut accl = LineAccumulator::new("  ", 0);
    accl.line("<body>", 0);
    accl.line("<p>x</p>", 1);
    accl.write(&path)?;

    let mut read = LineAccumulator::new("  ", 0);
    read.read(&path)?;
    assert_eq!(read.lines(), accl.lines());
    Ok(())
}
