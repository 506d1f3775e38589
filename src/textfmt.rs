/*!
 * Formatting of glossary text for different outputs.
 *
 * Plain text resolves markup into typographic conventions, HTML text into
 * tags. Both collapse whitespace, so the layout of the glossary document
 * does not leak into the output.
 */

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::file_utils::FileManager;
use crate::glossary::{Glossary, Markup, Segment, Text};

// Masked paragraph break, resolved after markup is flattened
const PARA_BREAK: char = '\u{4}';

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Wrap text into lines of at most `width` characters.
///
/// Words longer than the available width are left whole on their own line.
/// Empty (or all-whitespace) text gives an empty string.
pub fn fill(text: &str, width: usize, initial_indent: &str, subsequent_indent: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    let mut has_word = false;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !has_word {
            let indent = if lines.is_empty() { initial_indent } else { subsequent_indent };
            line.push_str(indent);
            line.push_str(word);
            line_len = indent.chars().count() + word_len;
            has_word = true;
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(subsequent_indent);
            line.push_str(word);
            line_len = subsequent_indent.chars().count() + word_len;
        }
    }
    if has_word {
        lines.push(line);
    }
    lines.join("\n")
}

/// Wrap each blank-line separated paragraph of `text` at column `wcol`.
///
/// With `wcol` of 0 paragraphs are only indented, each on a single line.
pub fn fill_paragraphs(text: &str, wcol: usize, indent: &str) -> String {
    text.split("\n\n")
        .map(|para| {
            if wcol == 0 {
                format!("{}{}", indent, collapse_whitespace(para))
            } else {
                fill(para, wcol, indent, indent)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Short name of a language in the pivotal language/environment,
/// falling back to the language key
fn language_shortname(gloss: &Glossary, olang: &str, lang: &str, env: Option<&str>) -> Option<Text> {
    let language = gloss.languages.get(olang)?;
    Some(
        language
            .shortname
            .first(Some(lang), env)
            .map(|n| n.text.clone())
            .unwrap_or_else(|| Text::from(olang)),
    )
}

/// Formats glossary text into plain text
pub struct TextFormatterPlain<'a> {
    gloss: &'a Glossary,
    lang: String,
    env: Option<String>,
    wcol: usize,
    indent: String,
    first_indent: Option<String>,
    prefix: String,
    suffix: String,
}

impl<'a> TextFormatterPlain<'a> {
    /// Formatter for the given language and environment, glossary defaults if `None`
    pub fn new(gloss: &'a Glossary, lang: Option<&str>, env: Option<&str>) -> Self {
        Self {
            gloss,
            lang: lang.unwrap_or(&gloss.lang).to_string(),
            env: env.or(gloss.default_env()).map(str::to_string),
            wcol: 0,
            indent: String::new(),
            first_indent: None,
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Wrap lines after this column (0 for no wrapping)
    pub fn wrap(mut self, wcol: usize) -> Self {
        self.wcol = wcol;
        self
    }

    /// Indent for each line
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Indent for the first line only, when wrapping
    pub fn first_indent(mut self, indent: &str) -> Self {
        self.first_indent = Some(indent.to_string());
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn format(&self, text: &Text) -> String {
        self.format_with(text, None, None)
    }

    /// Format with prefix and suffix overriding those of the formatter,
    /// as for enumerations
    pub fn format_with(&self, text: &Text, prefix: Option<&str>, suffix: Option<&str>) -> String {
        let mut fmt_text = String::new();
        fmt_text.push_str(prefix.unwrap_or(&self.prefix));
        fmt_text.push_str(&self.format_sub(text));
        fmt_text.push_str(suffix.unwrap_or(&self.suffix));

        let first_indent = self.first_indent.as_deref().unwrap_or(&self.indent);
        fmt_text
            .trim_matches(PARA_BREAK)
            .split(PARA_BREAK)
            .map(collapse_whitespace)
            .map(|line| {
                if line.is_empty() {
                    line
                } else if self.wcol > 0 {
                    fill(&line, self.wcol, first_indent, &self.indent)
                } else {
                    format!("{}{}", self.indent, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_sub(&self, text: &Text) -> String {
        let mut fmt_text = String::new();
        for seg in text.segments() {
            match seg {
                Segment::Plain(s) => fmt_text.push_str(s),
                Segment::Markup(Markup::Para(inner)) => {
                    fmt_text.push_str(&self.format_sub(inner));
                    fmt_text.push(PARA_BREAK);
                    fmt_text.push(PARA_BREAK);
                }
                Segment::Markup(Markup::Ref { text, .. }) => {
                    fmt_text.push_str(&self.format_sub(text));
                    fmt_text.push('°');
                }
                Segment::Markup(Markup::Em(inner)) => {
                    fmt_text.push_str(&format!("*{}*", self.format_sub(inner)));
                }
                Segment::Markup(Markup::Ol { lang, text }) => {
                    let shortname = lang.as_deref().and_then(|olang| {
                        language_shortname(self.gloss, olang, &self.lang, self.env.as_deref())
                    });
                    match shortname {
                        Some(short) => fmt_text.push_str(&format!(
                            "({} /{}/)",
                            self.format_sub(&short),
                            self.format_sub(text)
                        )),
                        None => fmt_text.push_str(&format!("(/{}/)", self.format_sub(text))),
                    }
                }
            }
        }
        fmt_text
    }
}

/// Formats glossary text into HTML
pub struct TextFormatterHtml<'a> {
    gloss: &'a Glossary,
    lang: String,
    env: Option<String>,
    refbase: HashMap<String, String>,
    wtag: Option<String>,
}

impl<'a> TextFormatterHtml<'a> {
    pub fn new(gloss: &'a Glossary, lang: Option<&str>, env: Option<&str>) -> Self {
        Self {
            gloss,
            lang: lang.unwrap_or(&gloss.lang).to_string(),
            env: env.or(gloss.default_env()).map(str::to_string),
            refbase: HashMap::new(),
            wtag: None,
        }
    }

    /// Concept key to base URL of the page holding its anchor.
    /// References to concepts not in the map are left as plain text.
    pub fn refbase(mut self, refbase: HashMap<String, String>) -> Self {
        self.refbase = refbase;
        self
    }

    /// Tag to wrap each paragraph into
    pub fn wtag(mut self, tag: &str) -> Self {
        self.wtag = Some(tag.to_string());
        self
    }

    /// Format the text, with `pclass` as the class of wrapping tags
    pub fn format(&self, text: &Text, pclass: Option<&str>) -> String {
        let fmt_text = self.format_sub(text);
        let paras: Vec<String> = fmt_text
            .split(PARA_BREAK)
            .map(collapse_whitespace)
            .filter(|p| !p.is_empty())
            .collect();

        match &self.wtag {
            Some(tag) => {
                let attrs: Vec<(&str, &str)> = pclass.map(|c| vec![("class", c)]).unwrap_or_default();
                paras
                    .iter()
                    .map(|p| wtext(p, tag, &attrs))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            None => paras.join(" "),
        }
    }

    fn format_sub(&self, text: &Text) -> String {
        let mut fmt_text = String::new();
        for seg in text.segments() {
            match seg {
                Segment::Plain(s) => fmt_text.push_str(&escape_html(s)),
                Segment::Markup(Markup::Para(inner)) => {
                    fmt_text.push(PARA_BREAK);
                    fmt_text.push_str(&self.format_sub(inner));
                    fmt_text.push(PARA_BREAK);
                }
                Segment::Markup(Markup::Em(inner)) => {
                    fmt_text.push_str(&wtext(&self.format_sub(inner), "em", &[]));
                }
                Segment::Markup(Markup::Ref { c, text }) => {
                    let inner = self.format_sub(text);
                    match self.refbase.get(c) {
                        Some(base) => {
                            let href = format!("{}#{}", base, c);
                            fmt_text.push_str(&wtext(&inner, "a", &[("href", &href)]));
                        }
                        None => fmt_text.push_str(&inner),
                    }
                }
                Segment::Markup(Markup::Ol { lang, text }) => {
                    let inner = wtext(&self.format_sub(text), "span", &[("class", "ol")]);
                    let shortname = lang.as_deref().and_then(|olang| {
                        language_shortname(self.gloss, olang, &self.lang, self.env.as_deref())
                    });
                    match shortname {
                        Some(short) => {
                            fmt_text.push_str(&format!("({} {})", self.format_sub(&short), inner))
                        }
                        None => fmt_text.push_str(&format!("({})", inner)),
                    }
                }
            }
        }
        fmt_text
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Opening tag with attributes in the given order; `close` makes it self-closing
pub fn stag(tag: &str, attrs: &[(&str, &str)], close: bool) -> String {
    let mut s = format!("<{}", tag);
    for (name, value) in attrs {
        s.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }
    s.push_str(if close { "/>" } else { ">" });
    s
}

/// Closing tag
pub fn etag(tag: &str) -> String {
    format!("</{}>", tag)
}

/// Text wrapped into a tag. The text is taken as already formatted HTML.
pub fn wtext(text: &str, tag: &str, attrs: &[(&str, &str)]) -> String {
    format!("{}{}{}", stag(tag, attrs, false), text, etag(tag))
}

/// Collects lines with level-based indentation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineAccumulator {
    indent: String,
    base_level: usize,
    lines: Vec<String>,
}

impl LineAccumulator {
    /// Accumulator indenting by `indent` per level, starting at `base_level`
    pub fn new(indent: &str, base_level: usize) -> Self {
        Self {
            indent: indent.to_string(),
            base_level,
            lines: Vec::new(),
        }
    }

    /// Add a line at the given level, relative to the base level.
    /// An empty line gets no indentation.
    pub fn line(&mut self, text: &str, level: usize) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            let indent = self.indent.repeat(self.base_level + level);
            self.lines.push(format!("{}{}", indent, text));
        }
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append all lines of another accumulator, as they are
    pub fn extend(&mut self, other: &LineAccumulator) {
        self.lines.extend(other.lines.iter().cloned());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Append lines read from a file, as they are
    pub fn read<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = FileManager::read_to_string(path)?;
        self.lines.extend(content.lines().map(str::to_string));
        Ok(())
    }

    /// Write all lines into a file, each terminated by a newline
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_string())
    }
}

impl fmt::Display for LineAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
