/*!
 * Simple plain-text view of the glossary.
 *
 * Lists all concepts having a term in the pivotal language and environment,
 * ordered by their first term, with terms in other languages and numbered
 * descriptions.
 */

use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use crate::errors::{DeclarationError, UsageError};
use crate::glossary::{Concept, Glossary};
use crate::language_utils::langsort_by_key;
use crate::subcmd::{ParamSpec, ResolvedOptions, SubcmdEntry, SubcmdView, ValueType};
use crate::textfmt::TextFormatterPlain;
use crate::view::{View, resolve_env, resolve_lang, write_output};

/// Options of the simple text view
#[derive(Debug, Clone, PartialEq)]
pub struct TextSimple {
    pub lang: Option<String>,
    pub env: Option<String>,
    pub file: Option<PathBuf>,
    pub wcol: usize,
}

impl TextSimple {
    pub fn from_options(options: &ResolvedOptions) -> Result<Self, UsageError> {
        Ok(Self {
            lang: options.get_nonempty_str("lang")?.map(str::to_string),
            env: options.get_nonempty_str("env")?.map(str::to_string),
            file: options.get_nonempty_str("file")?.map(PathBuf::from),
            wcol: {
                let wcol = options.get_int("wcol")?;
                usize::try_from(wcol).map_err(|_| UsageError::Conversion {
                    param: "wcol".to_string(),
                    value: wcol.to_string(),
                    expected: "non-negative int".to_string(),
                })?
            },
        })
    }

    /// The text of the view
    pub fn render(&self, gloss: &Glossary) -> Result<String> {
        let lang = resolve_lang(gloss, self.lang.as_deref().unwrap_or(&gloss.lang), "language")?;
        let env = resolve_env(gloss, self.env.as_deref())?;
        let env = env.as_deref();

        let tfm = TextFormatterPlain::new(gloss, Some(&lang), env);

        // Concepts with a term in this langenv, by the first of their terms.
        let mut ordering: Vec<(String, &Concept)> = gloss
            .concepts
            .values()
            .filter_map(|c| {
                let terms = c.term.get_nonempty(Some(&lang), env)?;
                Some((tfm.format(&terms[0].nom), c))
            })
            .collect();
        langsort_by_key(&mut ordering, &lang, |x| x.0.as_str());
        debug!("Text view of {} concepts in '{}'", ordering.len(), lang);

        let mut fmt_title = gloss
            .title
            .first(Some(&lang), env)
            .map(|t| tfm.format(&t.text))
            .or_else(|| gloss.id.clone())
            .unwrap_or_default();
        if let Some(ename) = env
            .and_then(|e| gloss.environments.get(e))
            .and_then(|e| e.name.first(Some(&lang), env))
        {
            fmt_title = format!("{} ({})", fmt_title, tfm.format(&ename.text));
        }
        let fmt_header = format!("{}\n{}\n", fmt_title, "-".repeat(fmt_title.chars().count()));

        let tfd = TextFormatterPlain::new(gloss, Some(&lang), env)
            .indent("    ")
            .wrap(self.wcol);

        let mut fmt_concepts = Vec::with_capacity(ordering.len());
        for (_, concept) in &ordering {
            let mut fmt = String::from("  ");

            let terms = concept.term.get(Some(&lang), env).unwrap_or_default();
            let fmt_terms: Vec<String> = terms.iter().map(|t| tfm.format(&t.nom)).collect();
            fmt.push_str(&fmt_terms.join(", "));

            // Terms in other languages, same environment.
            let mut fmt_ots = Vec::new();
            for (olang, language) in gloss.languages.iter().filter(|(k, _)| **k != lang) {
                let oterms = concept.term.get_nonempty(Some(olang), env);
                let lname = language.shortname.first(Some(&lang), env);
                if let (Some(oterms), Some(lname)) = (oterms, lname) {
                    let ts: Vec<String> = oterms.iter().map(|t| tfm.format(&t.nom)).collect();
                    fmt_ots.push(format!("{} /{}/", tfm.format(&lname.text), ts.join(", ")));
                }
            }
            if !fmt_ots.is_empty() {
                fmt.push_str(&format!(" ({})", fmt_ots.join("; ")));
            }
            fmt.push('\n');

            let descs = concept.desc.get(Some(&lang), env).unwrap_or_default();
            let fmt_ds: Vec<String> = if descs.len() == 1 {
                vec![tfd.format(&descs[0].text)]
            } else {
                descs
                    .iter()
                    .enumerate()
                    .map(|(i, d)| tfd.format_with(&d.text, Some(&format!("{}. ", i + 1)), None))
                    .collect()
            };
            fmt.push_str(&fmt_ds.join("\n\n"));

            fmt_concepts.push(fmt);
        }

        Ok(format!("{}\n{}\n\n", fmt_header, fmt_concepts.join("\n\n")))
    }
}

impl View for TextSimple {
    fn process(&self, gloss: &Glossary) -> Result<()> {
        let text = self.render(gloss)?;
        write_output(self.file.as_deref(), &text)
    }
}

fn fill_optparser(pv: &mut SubcmdView<'_>) -> Result<(), DeclarationError> {
    pv.set_desc("Simple text view as a demonstration of writing views.");

    pv.add_subopt(
        ParamSpec::new("lang", ValueType::Str)
            .default_value("")
            .metavar("LANGKEY")
            .desc("Pivotal language for the view. The glossary default language is used if not given."),
    )?;
    pv.add_subopt(
        ParamSpec::new("env", ValueType::Str)
            .default_value("")
            .metavar("ENVKEY")
            .desc("Pivotal environment for the view. The glossary default environment is used if not given."),
    )?;
    pv.add_subopt(
        ParamSpec::new("file", ValueType::Str)
            .default_value("")
            .metavar("FILE")
            .desc("File to output the text into (defaults to stdout)."),
    )?;
    pv.add_subopt(
        ParamSpec::new("wcol", ValueType::Int)
            .default_value(70i64)
            .metavar("COLUMN")
            .desc("Wrap text after this column."),
    )?;
    Ok(())
}

fn create(options: &ResolvedOptions) -> Result<Box<dyn View>, UsageError> {
    Ok(Box::new(TextSimple::from_options(options)?))
}

pub fn entry() -> SubcmdEntry<dyn View> {
    SubcmdEntry {
        name: "text-simple",
        fill_optparser,
        create,
    }
}
