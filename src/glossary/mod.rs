/*!
 * In-memory model of a Divergloss glossary.
 *
 * Everything that can differ by language and environment (names, terms,
 * descriptions) is held in a `ScopedLookup` sharing the glossary defaults.
 */

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Deserialize;

use crate::dset::{ScopeDefaults, Scoped, ScopedLookup};

pub mod check;
pub mod construct;

pub use check::check;
pub use construct::{from_file, from_json};

/// Marked-up text: a sequence of plain strings and markup segments.
///
/// In documents a text is either a plain string or a list of segments.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "TextRepr")]
pub struct Text(pub Vec<Segment>);

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Plain(String),
    Segments(Vec<Segment>),
}

impl From<TextRepr> for Text {
    fn from(repr: TextRepr) -> Self {
        match repr {
            TextRepr::Plain(s) => Text(vec![Segment::Plain(s)]),
            TextRepr::Segments(segs) => Text(segs),
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(vec![Segment::Plain(s.to_string())])
    }
}

impl Text {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Concept keys referenced anywhere in the text
    pub fn refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_refs(self, &mut out);
        out
    }

    /// Language keys of foreign-language (`ol`) segments in the text
    pub fn ol_langs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_ol_langs(self, &mut out);
        out
    }
}

fn collect_refs<'a>(text: &'a Text, out: &mut Vec<&'a str>) {
    for seg in &text.0 {
        if let Segment::Markup(markup) = seg {
            if let Markup::Ref { c, .. } = markup {
                out.push(c);
            }
            collect_refs(markup.inner(), out);
        }
    }
}

fn collect_ol_langs<'a>(text: &'a Text, out: &mut Vec<&'a str>) {
    for seg in &text.0 {
        if let Segment::Markup(markup) = seg {
            if let Markup::Ol { lang: Some(lang), .. } = markup {
                out.push(lang);
            }
            collect_ol_langs(markup.inner(), out);
        }
    }
}

/// One piece of a text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Plain(String),
    Markup(Markup),
}

/// Markup segments, each wrapping further text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// Paragraph
    Para(Text),
    /// Emphasis
    Em(Text),
    /// Reference to another concept
    Ref { c: String, text: Text },
    /// Text in another language
    Ol {
        #[serde(default)]
        lang: Option<String>,
        text: Text,
    },
}

impl Markup {
    pub fn inner(&self) -> &Text {
        match self {
            Self::Para(t) | Self::Em(t) => t,
            Self::Ref { text, .. } | Self::Ol { text, .. } => text,
        }
    }
}

/// A name, short name or title
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub env: Vec<String>,
    pub text: Text,
}

/// A term naming a concept
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub env: Vec<String>,
    /// Nominal form
    pub nom: Text,
    /// Declined forms, by grammar key
    #[serde(default)]
    pub decl: Vec<Decl>,
}

/// A declined form of a term
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Decl {
    pub gr: String,
    pub text: Text,
}

/// A description of a concept
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Desc {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub env: Vec<String>,
    pub text: Text,
}

macro_rules! impl_scoped {
    ($($ty:ty),*) => {
        $(
            impl Scoped for $ty {
                fn lang(&self) -> Option<&str> {
                    self.lang.as_deref()
                }

                fn envs(&self) -> &[String] {
                    &self.env
                }
            }
        )*
    };
}

impl_scoped!(Named, Term, Desc);

/// A language the glossary covers
#[derive(Debug, Clone)]
pub struct Language {
    pub key: String,
    pub name: ScopedLookup<Named>,
    pub shortname: ScopedLookup<Named>,
}

/// An environment (audience, domain) the glossary content may be specific to
#[derive(Debug, Clone)]
pub struct Environment {
    pub key: String,
    pub name: ScopedLookup<Named>,
    pub shortname: ScopedLookup<Named>,
    /// Keys of environments close to this one, most preferred first
    pub closeto: Vec<String>,
}

/// A grammatical category, used to label declensions
#[derive(Debug, Clone)]
pub struct Gramm {
    pub key: String,
    pub name: ScopedLookup<Named>,
    pub shortname: ScopedLookup<Named>,
}

/// A glossary entry
#[derive(Debug, Clone)]
pub struct Concept {
    pub key: String,
    pub term: ScopedLookup<Term>,
    pub desc: ScopedLookup<Desc>,
}

/// The whole glossary
#[derive(Debug, Clone)]
pub struct Glossary {
    pub id: Option<String>,
    /// Default language
    pub lang: String,
    /// Default environments, the first being the pivotal one
    pub env: Vec<String>,
    pub title: ScopedLookup<Named>,
    pub desc: ScopedLookup<Desc>,
    pub languages: BTreeMap<String, Language>,
    pub environments: BTreeMap<String, Environment>,
    pub grammar: BTreeMap<String, Gramm>,
    pub concepts: BTreeMap<String, Concept>,
    defaults: Rc<ScopeDefaults>,
}

impl Glossary {
    /// Empty glossary with the given defaults
    pub fn new(lang: &str, env: &[&str]) -> Self {
        Self::with_defaults(ScopeDefaults::new(lang, env))
    }

    /// Empty glossary sharing the given defaults (and closeness table)
    pub fn with_defaults(defaults: ScopeDefaults) -> Self {
        let defaults = Rc::new(defaults);
        Self {
            id: None,
            lang: defaults.lang.clone(),
            env: defaults.envs.clone(),
            title: ScopedLookup::new(Rc::clone(&defaults)),
            desc: ScopedLookup::new(Rc::clone(&defaults)),
            languages: BTreeMap::new(),
            environments: BTreeMap::new(),
            grammar: BTreeMap::new(),
            concepts: BTreeMap::new(),
            defaults,
        }
    }

    /// Defaults shared by every scoped collection of this glossary
    pub fn defaults(&self) -> Rc<ScopeDefaults> {
        Rc::clone(&self.defaults)
    }

    /// The pivotal default environment
    pub fn default_env(&self) -> Option<&str> {
        self.env.first().map(String::as_str)
    }

    /// Empty scoped collection tied to this glossary
    pub fn lookup<T: Scoped>(&self) -> ScopedLookup<T> {
        ScopedLookup::new(self.defaults())
    }
}
