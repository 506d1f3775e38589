/*!
 * Construction of the glossary model out of a glossary document.
 *
 * Documents are JSON serializations of the Divergloss structure:
 *
 * ```json
 * {
 *   "lang": "en",
 *   "env": ["formal"],
 *   "title": [{"text": "Sample glossary"}],
 *   "languages": {"en": {"shortname": [{"text": "en"}]}},
 *   "environments": {"formal": {"name": [{"text": "formal"}], "closeto": []}},
 *   "concepts": {
 *     "file": {"term": [{"nom": "file"}], "desc": [{"text": "A named byte sequence."}]}
 *   }
 * }
 * ```
 */

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;

use crate::dset::{ScopeDefaults, ScopedLookup};
use crate::errors::GlossaryError;
use crate::file_utils::FileManager;
use crate::glossary::{Concept, Desc, Environment, Glossary, Gramm, Language, Named, Term, check};

#[derive(Debug, Deserialize)]
struct GlossaryDoc {
    #[serde(default)]
    id: Option<String>,
    lang: String,
    #[serde(default)]
    env: Vec<String>,
    #[serde(default)]
    title: Vec<Named>,
    #[serde(default)]
    desc: Vec<Desc>,
    #[serde(default)]
    languages: BTreeMap<String, NamedDoc>,
    #[serde(default)]
    environments: BTreeMap<String, EnvironmentDoc>,
    #[serde(default)]
    grammar: BTreeMap<String, NamedDoc>,
    #[serde(default)]
    concepts: BTreeMap<String, ConceptDoc>,
}

#[derive(Debug, Default, Deserialize)]
struct NamedDoc {
    #[serde(default)]
    name: Vec<Named>,
    #[serde(default)]
    shortname: Vec<Named>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentDoc {
    #[serde(default)]
    name: Vec<Named>,
    #[serde(default)]
    shortname: Vec<Named>,
    #[serde(default)]
    closeto: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConceptDoc {
    #[serde(default)]
    term: Vec<Term>,
    #[serde(default)]
    desc: Vec<Desc>,
}

/// Build a glossary out of a JSON document
pub fn from_json(json: &str) -> Result<Glossary, GlossaryError> {
    let doc: GlossaryDoc = serde_json::from_str(json)?;
    Ok(build(doc))
}

/// Read a glossary file, optionally checking it for validity
pub fn from_file<P: AsRef<Path>>(path: P, validate: bool) -> Result<Glossary> {
    let path = path.as_ref();
    let content = FileManager::read_to_string(path)?;
    let gloss = from_json(&content)
        .with_context(|| format!("Failed to construct glossary from: {:?}", path))?;

    if validate {
        check(&gloss).with_context(|| format!("Glossary check failed: {:?}", path))?;
    } else {
        debug!("Skipping glossary check");
    }

    info!(
        "Loaded glossary with {} concepts in {} languages",
        gloss.concepts.len(),
        gloss.languages.len()
    );
    Ok(gloss)
}

fn build(doc: GlossaryDoc) -> Glossary {
    // Closeness fallback is in effect as soon as environments are declared.
    let mut defaults = ScopeDefaults {
        lang: doc.lang,
        envs: doc.env,
        closeness: None,
    };
    if !doc.environments.is_empty() {
        let closeness: HashMap<String, Vec<String>> = doc
            .environments
            .iter()
            .map(|(key, env)| (key.clone(), env.closeto.clone()))
            .collect();
        defaults = defaults.with_closeness(closeness);
    }

    let mut gloss = Glossary::with_defaults(defaults);
    let scope = gloss.defaults();
    let named = |items: Vec<Named>| ScopedLookup::from_fragments(scope.clone(), items);

    gloss.id = doc.id;
    gloss.title = named(doc.title);
    gloss.desc = ScopedLookup::from_fragments(scope.clone(), doc.desc);

    gloss.languages = doc
        .languages
        .into_iter()
        .map(|(key, lang)| {
            let language = Language {
                key: key.clone(),
                name: named(lang.name),
                shortname: named(lang.shortname),
            };
            (key, language)
        })
        .collect();

    gloss.environments = doc
        .environments
        .into_iter()
        .map(|(key, env)| {
            let environment = Environment {
                key: key.clone(),
                name: named(env.name),
                shortname: named(env.shortname),
                closeto: env.closeto,
            };
            (key, environment)
        })
        .collect();

    gloss.grammar = doc
        .grammar
        .into_iter()
        .map(|(key, gr)| {
            let gramm = Gramm {
                key: key.clone(),
                name: named(gr.name),
                shortname: named(gr.shortname),
            };
            (key, gramm)
        })
        .collect();

    gloss.concepts = doc
        .concepts
        .into_iter()
        .map(|(key, concept)| {
            let concept = Concept {
                key: key.clone(),
                term: ScopedLookup::from_fragments(scope.clone(), concept.term),
                desc: ScopedLookup::from_fragments(scope.clone(), concept.desc),
            };
            (key, concept)
        })
        .collect();

    gloss
}
