/*!
 * Update of terminology rules files for Pology's `check-rules` sieve.
 *
 * A rules file is a sequence of rules separated by blank lines, preceded
 * by a prologue of comments and followed by an epilogue. Within a rule
 * the concept key is kept in the `id` field, and the terminology pair in
 * the `hint` field as `"<origin-terms> = <target-terms> [<free-hints>]"`.
 *
 * Rules for concepts new to the file are added as disabled skeletons
 * flagged `@gloss-new`. Rules whose terminology changed get
 * `@gloss-fuzzy [<new pair>]`, and those whose concept disappeared get
 * `@gloss-obsolete`. Everything else in the file is kept as it is.
 */

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DeclarationError, UsageError};
use crate::file_utils::FileManager;
use crate::glossary::{Concept, Glossary};
use crate::language_utils::langsort;
use crate::subcmd::{ParamSpec, ResolvedOptions, SubcmdEntry, SubcmdView, ValueType};
use crate::textfmt::TextFormatterPlain;
use crate::view::{View, bilingual_concepts, resolve_env, resolve_lang};

static HINT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*hint\s*=\s*"(.*)""#).unwrap());
static FREE_HINT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*)\]").unwrap());
static IDENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*id\s*=\s*"(.*)""#).unwrap());
static DISABLED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*disabled\s*=\s*"(.*)""#).unwrap());
static FLAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s*@gloss-(\w+)").unwrap());

const FLAG_PREFIX: &str = "@gloss-";

/// Separator of synonymous terms, usable in regular expressions as is
const TERM_DELIM: &str = "|";

fn str_to_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

// Has cased characters, all of them lowercase
fn is_lowercase(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

/// One rule of the file, with the fields the view cares about parsed out
#[derive(Debug, Clone, Default, PartialEq)]
struct Rule {
    ckey: String,
    oterms: String,
    tterms: String,
    freehint: Option<String>,
    disabled: bool,
    lines: Vec<String>,
}

impl Rule {
    /// Set the glossary flag comment, or remove it for an empty flag
    fn set_flag(&mut self, flag: &str, note: Option<&str>) {
        let mut flag_cmnt = String::new();
        if !flag.is_empty() {
            flag_cmnt = format!("# {}{}", FLAG_PREFIX, flag);
            if let Some(note) = note {
                flag_cmnt.push_str(&format!(" [{}]", note));
            }
        }
        self.set_line(|x| x.starts_with('#') && x.contains(FLAG_PREFIX), &flag_cmnt, Some(0));
    }

    fn has_flag(&self, flag: &str) -> bool {
        self.lines
            .iter()
            .filter_map(|line| FLAG_REGEX.captures(line))
            .any(|caps| &caps[1] == flag)
    }

    /// Replace all lines passing the check by the new line, placed where the
    /// first of them was (or at `defpos`, or at the end). An empty new line
    /// only removes.
    fn set_line<F: Fn(&str) -> bool>(&mut self, check: F, nline: &str, defpos: Option<usize>) {
        let mut inspos = None;
        let mut i = 0;
        while i < self.lines.len() {
            if check(&self.lines[i]) {
                inspos.get_or_insert(i);
                self.lines.remove(i);
            } else {
                i += 1;
            }
        }
        let inspos = inspos
            .or(defpos)
            .unwrap_or(self.lines.len())
            .min(self.lines.len());
        if !nline.is_empty() {
            self.lines.insert(inspos, nline.to_string());
        }
    }

    /// Bring the parsed fields back into the lines
    fn sync_lines(&mut self) {
        let identstr = if self.ckey.is_empty() {
            String::new()
        } else {
            format!("id=\"{}\"", self.ckey)
        };
        self.set_line(|x| IDENT_REGEX.is_match(x), &identstr, None);

        let has_terms = !self.oterms.is_empty() && !self.tterms.is_empty();
        let hintstr = match (&self.freehint, has_terms) {
            (Some(free), true) => format!("hint=\"{} = {} [{}]\"", self.oterms, self.tterms, free),
            (None, true) => format!("hint=\"{} = {}\"", self.oterms, self.tterms),
            (Some(free), false) => format!("hint=\"{}\"", free),
            (None, false) => String::new(),
        };
        self.set_line(|x| HINT_REGEX.is_match(x), &hintstr, None);

        let disabledstr = if self.disabled { "disabled=\"1\"" } else { "" };
        self.set_line(|x| DISABLED_REGEX.is_match(x), disabledstr, None);
    }

    /// Lines of the rule as written out, with the separating blank line
    fn format_lines(&mut self) -> Vec<String> {
        self.sync_lines();
        let mut flines = self.lines.clone();
        flines.push(String::new());
        flines
    }
}

/// Parsed rules file
#[derive(Debug, Default)]
struct RulesFile {
    prologue: Vec<String>,
    rules: Vec<Rule>,
    epilogue: Vec<String>,
}

impl RulesFile {
    /// Parse a rules file, keeping everything not understood as plain lines
    fn parse(content: &str) -> Self {
        let mut file = RulesFile::default();
        let mut in_prologue = true;
        let mut crule = Rule::default();

        for line in content.lines() {
            if line.starts_with('#') {
                if in_prologue {
                    file.prologue.push(line.to_string());
                } else {
                    crule.lines.push(line.to_string());
                }
                continue;
            }

            if line.is_empty() {
                if in_prologue {
                    in_prologue = false;
                    file.prologue.push(String::new());
                } else if !crule.lines.is_empty() {
                    file.rules.push(std::mem::take(&mut crule));
                }
                continue;
            }
            in_prologue = false;

            if let Some(caps) = IDENT_REGEX.captures(line) {
                crule.ckey = caps[1].trim().to_string();
            }

            if let Some(caps) = HINT_REGEX.captures(line) {
                let orig_hintstr = &caps[1];
                if let Some(free) = FREE_HINT_REGEX.captures(orig_hintstr) {
                    crule.freehint = Some(free[1].to_string());
                }
                let hintstr = FREE_HINT_REGEX.replace(orig_hintstr, "");
                match hintstr.split_once('=') {
                    Some((o, t)) => {
                        crule.oterms = o.trim().to_string();
                        crule.tterms = t.trim().to_string();
                    }
                    None => crule.freehint = Some(orig_hintstr.to_string()),
                }
            }

            if let Some(caps) = DISABLED_REGEX.captures(line) {
                crule.disabled = str_to_bool(caps[1].trim());
            }

            crule.lines.push(line.to_string());
        }

        // What follows the last blank line is a rule if it carries a concept
        // key, and the file epilogue otherwise.
        if !crule.ckey.is_empty() {
            file.rules.push(crule);
        } else {
            file.epilogue = crule.lines;
        }
        file
    }

    fn write(&mut self) -> String {
        let mut lines = self.prologue.clone();
        for rule in &mut self.rules {
            lines.extend(rule.format_lines());
        }
        lines.extend(self.epilogue.iter().cloned());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Options of the rules view
#[derive(Debug, Clone, PartialEq)]
pub struct PlRules {
    pub olang: String,
    pub tlang: String,
    pub file: PathBuf,
    pub env: Option<String>,
}

impl PlRules {
    pub fn from_options(options: &ResolvedOptions) -> Result<Self, UsageError> {
        Ok(Self {
            olang: options.get_str("olang")?.to_string(),
            tlang: options.get_str("tlang")?.to_string(),
            file: PathBuf::from(options.get_str("file")?),
            env: options.get_nonempty_str("env")?.map(str::to_string),
        })
    }

    /// Updated content of a rules file, `None` for a file not existing yet
    pub fn render(&self, gloss: &Glossary, existing: Option<&str>) -> Result<String> {
        let olang = resolve_lang(gloss, &self.olang, "origin language")?;
        let tlang = resolve_lang(gloss, &self.tlang, "target language")?;
        let env = resolve_env(gloss, self.env.as_deref())?;
        let env = env.as_deref();

        let tft = TextFormatterPlain::new(gloss, Some(&tlang), env);
        let format_terms = |concept: &Concept| -> (String, String) {
            let mut oterms: Vec<String> = concept
                .term
                .get(Some(&olang), env)
                .unwrap_or_default()
                .iter()
                .map(|t| tft.format(&t.nom))
                .collect();
            langsort(&mut oterms, &olang);

            let mut tterms: Vec<String> = concept
                .term
                .get(Some(&tlang), env)
                .unwrap_or_default()
                .iter()
                .map(|t| tft.format(&t.nom))
                .collect();
            langsort(&mut tterms, &tlang);

            (oterms.join(TERM_DELIM), tterms.join(TERM_DELIM))
        };

        let concepts: BTreeMap<&str, &Concept> =
            bilingual_concepts(gloss, &olang, &tlang, env).into_iter().collect();
        if concepts.is_empty() {
            warn!("No concepts found that have terms in both the requested origin and target language");
        }

        let mut rfile = match existing {
            Some(content) => RulesFile::parse(content),
            None => RulesFile {
                prologue: vec![
                    format!("# Terminology rules, {} to {}, updated from the glossary.", olang, tlang),
                    String::new(),
                ],
                ..RulesFile::default()
            },
        };

        // Flag existing rules.
        for rule in rfile.rules.iter_mut().filter(|r| !r.ckey.is_empty()) {
            let Some(&concept) = concepts.get(rule.ckey.as_str()) else {
                rule.set_flag("obsolete", None);
                continue;
            };
            let (oterms, tterms) = format_terms(concept);
            if oterms != rule.oterms || tterms != rule.tterms {
                let note = format!("{} = {}", oterms, tterms);
                rule.set_flag("fuzzy", Some(&note));
            } else if !rule.has_flag("new") {
                rule.set_flag("", None);
            }
        }

        // Add new rules, in order of concept keys.
        let mut n_new = 0;
        let mut next_pos = 0;
        for (&ckey, &concept) in &concepts {
            if rfile.rules.iter().any(|r| r.ckey == ckey) {
                continue;
            }

            let (oterms, tterms) = format_terms(concept);
            let mut topmatch = if oterms.contains(TERM_DELIM) {
                format!("{{\\b({})}}", oterms)
            } else {
                format!("{{\\b{}}}", oterms)
            };
            if is_lowercase(&oterms) {
                topmatch.push('i');
            }
            let valmatch = if tterms.contains(TERM_DELIM) {
                format!("valid msgstr=\"\\b({})\"", tterms)
            } else {
                format!("valid msgstr=\"\\b{}\"", tterms)
            };

            let mut nrule = Rule {
                ckey: ckey.to_string(),
                oterms,
                tterms,
                freehint: None,
                disabled: true,
                // Placeholders establish the field order, synced on writing.
                lines: vec![
                    topmatch,
                    "id=\"\"".to_string(),
                    "hint=\"\"".to_string(),
                    valmatch,
                    "disabled=\"1\"".to_string(),
                ],
            };
            nrule.set_flag("new", None);

            let pos = (next_pos..rfile.rules.len())
                .find(|&i| ckey < rfile.rules[i].ckey.as_str())
                .unwrap_or(rfile.rules.len());
            rfile.rules.insert(pos, nrule);
            next_pos = pos + 1;
            n_new += 1;
        }
        debug!("Added {} new rules", n_new);

        Ok(rfile.write())
    }
}

impl View for PlRules {
    fn process(&self, gloss: &Glossary) -> Result<()> {
        let existing = if FileManager::file_exists(&self.file) {
            Some(FileManager::read_to_string(&self.file)?)
        } else {
            info!("Rules file {:?} does not exist, creating it", self.file);
            None
        };
        let content = self.render(gloss, existing.as_deref())?;
        FileManager::write_to_file(&self.file, &content)?;
        info!("Updated rules file {:?}", self.file);
        Ok(())
    }
}

fn fill_optparser(pv: &mut SubcmdView<'_>) -> Result<(), DeclarationError> {
    pv.set_desc("Update rules files for Pology's check-rules sieve.");

    pv.add_subopt(
        ParamSpec::new("olang", ValueType::Str)
            .metavar("LANGKEY")
            .desc("Original language from the rules point of view."),
    )?;
    pv.add_subopt(
        ParamSpec::new("tlang", ValueType::Str)
            .metavar("LANGKEY")
            .desc("Target language from the rules point of view."),
    )?;
    pv.add_subopt(
        ParamSpec::new("file", ValueType::Str)
            .metavar("FILE")
            .desc("Rules file to update or create."),
    )?;
    pv.add_subopt(
        ParamSpec::new("env", ValueType::Str)
            .default_value("")
            .metavar("ENVKEY")
            .desc("Environment for which the rules are updated. The glossary default environment is used if not given."),
    )?;
    Ok(())
}

fn create(options: &ResolvedOptions) -> Result<Box<dyn View>, UsageError> {
    Ok(Box::new(PlRules::from_options(options)?))
}

pub fn entry() -> SubcmdEntry<dyn View> {
    SubcmdEntry {
        name: "plrules",
        fill_optparser,
        create,
    }
}
