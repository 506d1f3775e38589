/*!
 * Validity checks on a constructed glossary, past what the document
 * structure alone can express.
 */

use log::warn;

use crate::dset::{Scoped, ScopedLookup};
use crate::errors::GlossaryError;
use crate::glossary::{Glossary, Named, Text};
use crate::language_utils;

/// Collects problems found while walking the glossary
struct Checker<'a> {
    gloss: &'a Glossary,
    problems: Vec<String>,
}

impl<'a> Checker<'a> {
    fn check_scope<T: Scoped>(&mut self, what: &str, fragment: &T) {
        if let Some(lang) = fragment.lang() {
            if !self.gloss.languages.contains_key(lang) {
                self.problems
                    .push(format!("{}: language '{}' not declared", what, lang));
            }
        }
        for env in fragment.envs() {
            if !self.gloss.environments.contains_key(env) {
                self.problems
                    .push(format!("{}: environment '{}' not declared", what, env));
            }
        }
    }

    fn check_text(&mut self, what: &str, text: &Text) {
        for ckey in text.refs() {
            if !self.gloss.concepts.contains_key(ckey) {
                self.problems
                    .push(format!("{}: reference to unknown concept '{}'", what, ckey));
            }
        }
        for lang in text.ol_langs() {
            if !self.gloss.languages.contains_key(lang) {
                self.problems
                    .push(format!("{}: foreign text in undeclared language '{}'", what, lang));
            }
        }
    }

    fn check_named(&mut self, what: &str, lookup: &ScopedLookup<Named>) {
        for named in lookup.distinct() {
            self.check_scope(what, named);
            self.check_text(what, &named.text);
        }
    }
}

/// Check a glossary for consistency.
///
/// All problems are collected and reported together. Language keys which
/// are not ISO 639 codes are only warned about.
pub fn check(gloss: &Glossary) -> Result<(), GlossaryError> {
    let mut ck = Checker {
        gloss,
        problems: Vec::new(),
    };

    if !gloss.languages.contains_key(&gloss.lang) {
        ck.problems
            .push(format!("default language '{}' not declared", gloss.lang));
    }
    for env in &gloss.env {
        if !gloss.environments.contains_key(env) {
            ck.problems
                .push(format!("default environment '{}' not declared", env));
        }
    }

    ck.check_named("title", &gloss.title);
    for desc in gloss.desc.distinct() {
        ck.check_scope("glossary description", desc);
        ck.check_text("glossary description", &desc.text);
    }

    for (key, language) in &gloss.languages {
        if language_utils::validate_language_code(key).is_err() {
            warn!("Language key '{}' is not an ISO 639 code", key);
        }
        let what = format!("language '{}'", key);
        ck.check_named(&what, &language.name);
        ck.check_named(&what, &language.shortname);
    }

    for (key, environment) in &gloss.environments {
        let what = format!("environment '{}'", key);
        for close in &environment.closeto {
            if !gloss.environments.contains_key(close) {
                ck.problems
                    .push(format!("{}: close to undeclared environment '{}'", what, close));
            }
        }
        ck.check_named(&what, &environment.name);
        ck.check_named(&what, &environment.shortname);
    }

    for (key, gramm) in &gloss.grammar {
        let what = format!("grammar '{}'", key);
        ck.check_named(&what, &gramm.name);
        ck.check_named(&what, &gramm.shortname);
    }

    for (key, concept) in &gloss.concepts {
        let what = format!("concept '{}'", key);
        for term in concept.term.distinct() {
            ck.check_scope(&what, term);
            ck.check_text(&what, &term.nom);
            for decl in &term.decl {
                if !gloss.grammar.contains_key(&decl.gr) {
                    ck.problems.push(format!(
                        "{}: declension with undeclared grammar '{}'",
                        what, decl.gr
                    ));
                }
            }
        }
        for desc in concept.desc.distinct() {
            ck.check_scope(&what, desc);
            ck.check_text(&what, &desc.text);
        }
    }

    let problems = ck.problems;
    if problems.is_empty() {
        Ok(())
    } else {
        Err(GlossaryError::Invalid(problems.join("; ")))
    }
}
