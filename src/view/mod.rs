/*!
 * Views: outputs built from the filtered glossary.
 *
 * Each view declares its parameters through the subcommand machinery and
 * is constructed from its resolved options. Views never change the glossary.
 */

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::info;

use crate::file_utils::FileManager;
use crate::glossary::{Concept, Glossary};
use crate::language_utils;
use crate::subcmd::{SubcmdEntry, SubcmdHandler};

pub mod html_bidict;
pub mod null;
pub mod plrules;
pub mod text_simple;

/// Category name of views, as shown in help and errors
pub const CATEGORY: &str = "view";

/// A glossary view
pub trait View {
    fn process(&self, gloss: &Glossary) -> Result<()>;
}

/// All available views
pub fn registry() -> Vec<SubcmdEntry<dyn View>> {
    vec![
        html_bidict::entry(),
        null::entry(),
        plrules::entry(),
        text_simple::entry(),
    ]
}

/// Handler over all available views
pub fn handler() -> SubcmdHandler<dyn View> {
    SubcmdHandler::new(CATEGORY, registry())
}

/// Resolve a requested language to a key declared by the glossary
pub(crate) fn resolve_lang(gloss: &Glossary, requested: &str, role: &str) -> Result<String> {
    language_utils::resolve_language_key(gloss, requested)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{} '{}' not present in the glossary", role, requested))
}

/// Resolve a requested environment, the glossary default if not given
pub(crate) fn resolve_env(gloss: &Glossary, requested: Option<&str>) -> Result<Option<String>> {
    match requested.or(gloss.default_env()) {
        Some(env) if !gloss.environments.contains_key(env) => {
            Err(anyhow!("environment '{}' not defined by the glossary", env))
        }
        env => Ok(env.map(str::to_string)),
    }
}

/// Concepts having terms in both languages for the environment, by key
pub(crate) fn bilingual_concepts<'a>(
    gloss: &'a Glossary,
    olang: &str,
    tlang: &str,
    env: Option<&str>,
) -> Vec<(&'a str, &'a Concept)> {
    gloss
        .concepts
        .iter()
        .filter(|(_, c)| {
            c.term.get_nonempty(Some(olang), env).is_some()
                && c.term.get_nonempty(Some(tlang), env).is_some()
        })
        .map(|(key, c)| (key.as_str(), c))
        .collect()
}

/// Write view output into a file, or to standard output if no file is given
pub(crate) fn write_output(file: Option<&Path>, content: &str) -> Result<()> {
    match file {
        Some(path) => {
            FileManager::write_to_file(path, content)?;
            info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write to standard output")?;
        }
    }
    Ok(())
}
